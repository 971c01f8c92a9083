//! Market context classification.

use crate::types::{
    AssetClass, IndicatorSet, Instrument, LiquidityTier, MarketContext, MarketRegime, NewsImpact,
    PriceSample, TimeHorizon, TradingSession, Trend, VolatilityBucket,
};
use chrono::{NaiveTime, Timelike};
use std::collections::BTreeMap;

/// Bucket annualized volatility (percent).
pub fn classify_volatility(volatility: f64) -> VolatilityBucket {
    if volatility > 40.0 {
        VolatilityBucket::Extreme
    } else if volatility > 25.0 {
        VolatilityBucket::High
    } else if volatility > 15.0 {
        VolatilityBucket::Moderate
    } else if volatility > 10.0 {
        VolatilityBucket::Low
    } else {
        VolatilityBucket::VeryLow
    }
}

/// Volatility extremes take precedence over trend.
pub fn determine_regime(indicators: &IndicatorSet) -> MarketRegime {
    if indicators.volatility > 40.0 {
        return MarketRegime::HighVolatility;
    }
    if indicators.volatility < 10.0 {
        return MarketRegime::LowVolatility;
    }

    match indicators.trend {
        Trend::Bullish if indicators.momentum > 2.0 => MarketRegime::BullTrend,
        Trend::Bearish if indicators.momentum < -2.0 => MarketRegime::BearTrend,
        _ => MarketRegime::RangeBound,
    }
}

/// Session active at a time of day: US 13-21h, Asian 21-5h, European otherwise.
pub fn determine_session(time_of_day: NaiveTime) -> TradingSession {
    match time_of_day.hour() {
        13..=20 => TradingSession::Us,
        21..=23 | 0..=4 => TradingSession::Asian,
        _ => TradingSession::European,
    }
}

/// Static liquidity and news sensitivity per asset class.
pub fn class_profile(asset_class: AssetClass) -> (LiquidityTier, NewsImpact) {
    match asset_class {
        AssetClass::Forex => (LiquidityTier::VeryHigh, NewsImpact::High),
        AssetClass::Crypto => (LiquidityTier::Medium, NewsImpact::VeryHigh),
        AssetClass::Index => (LiquidityTier::High, NewsImpact::High),
        AssetClass::Commodity => (LiquidityTier::High, NewsImpact::Moderate),
    }
}

pub fn analyze_market_context(
    instrument: &Instrument,
    indicators: &IndicatorSet,
    time_of_day: NaiveTime,
) -> MarketContext {
    let (liquidity, news_impact) = class_profile(instrument.asset_class);

    MarketContext {
        regime: determine_regime(indicators),
        volatility_bucket: classify_volatility(indicators.volatility),
        liquidity,
        session: determine_session(time_of_day),
        news_impact,
    }
}

/// Liquidity estimated from the mean recorded volume. Missing volumes count as zero.
pub fn assess_liquidity(history: &[PriceSample]) -> LiquidityTier {
    if history.is_empty() {
        return LiquidityTier::Unknown;
    }

    let total: f64 = history.iter().map(|s| s.volume.unwrap_or(0) as f64).sum();
    let avg_volume = total / history.len() as f64;

    if avg_volume > 100_000_000.0 {
        LiquidityTier::VeryHigh
    } else if avg_volume > 10_000_000.0 {
        LiquidityTier::High
    } else if avg_volume > 1_000_000.0 {
        LiquidityTier::Medium
    } else {
        LiquidityTier::Low
    }
}

/// Rough cross-asset correlation hints.
pub fn correlations(instrument: &Instrument) -> BTreeMap<String, f64> {
    let mut map = BTreeMap::new();
    let base = instrument.base.to_uppercase();

    match instrument.asset_class {
        AssetClass::Forex => {
            let usd = if instrument.quote.eq_ignore_ascii_case("USD") { -0.8 } else { 0.6 };
            let risk = if base == "JPY" || base == "CHF" { -0.5 } else { 0.3 };
            map.insert("USD".to_string(), usd);
            map.insert("Risk".to_string(), risk);
        }
        AssetClass::Crypto => {
            map.insert("BTC".to_string(), if base == "BTC" { 1.0 } else { 0.7 });
            map.insert("Risk".to_string(), 0.8);
        }
        AssetClass::Commodity if instrument.is_gold() => {
            map.insert("USD".to_string(), -0.6);
            map.insert("Inflation".to_string(), 0.7);
        }
        _ => {}
    }

    map
}

/// Suggested holding period.
pub fn time_horizon(instrument: &Instrument, indicators: &IndicatorSet) -> TimeHorizon {
    if instrument.asset_class == AssetClass::Crypto {
        TimeHorizon::ShortTerm
    } else if indicators.volatility > 30.0 {
        TimeHorizon::Intraday
    } else if indicators.trend != Trend::Neutral {
        TimeHorizon::Swing
    } else {
        TimeHorizon::Position
    }
}

/// Overall confidence in the analysis, 50-95.
pub fn overall_confidence(indicators: &IndicatorSet, sentiment: u8) -> u8 {
    let mut confidence: i32 = 70;

    if indicators.rsi > 0.0 {
        confidence += 10;
    }

    if indicators.volatility < 20.0 {
        confidence += 10;
    } else if indicators.volatility > 40.0 {
        confidence -= 15;
    }

    if indicators.trend != Trend::Neutral {
        confidence += 10;
    }

    let agrees = (indicators.trend == Trend::Bullish && sentiment > 60)
        || (indicators.trend == Trend::Bearish && sentiment < 40);
    if agrees {
        confidence += 10;
    }

    confidence.clamp(50, 95) as u8
}
