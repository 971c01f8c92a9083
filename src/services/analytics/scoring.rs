//! Sentiment and risk scoring.

use crate::types::{AssetClass, IndicatorSet, Instrument, RiskAssessment, RiskFactors, RiskLevel, Trend};

const NEUTRAL_SCORE: f64 = 50.0;

/// Composite sentiment from 0 (bearish) to 100 (bullish).
///
/// Starts neutral and adds:
/// - RSI mean reversion: overbought (>70) -15, oversold (<30) +15
/// - MACD sign: +10 / -10, nothing when the reading is neutral
/// - Trend: +20 / -20
/// - Volatility: >30 -10, <10 +5
/// - Momentum: 0.2 per percent
pub fn sentiment_score(_instrument: &Instrument, indicators: &IndicatorSet) -> u8 {
    let mut score = NEUTRAL_SCORE;

    if indicators.rsi > 70.0 {
        score -= 15.0;
    } else if indicators.rsi < 30.0 {
        score += 15.0;
    }

    score += 10.0 * f64::from(indicators.macd.signal.signum());

    score += match indicators.trend {
        Trend::Bullish => 20.0,
        Trend::Bearish => -20.0,
        Trend::Neutral => 0.0,
    };

    if indicators.volatility > 30.0 {
        score -= 10.0;
    } else if indicators.volatility < 10.0 {
        score += 5.0;
    }

    if !indicators.momentum.is_nan() {
        score += indicators.momentum * 0.2;
    }

    score.clamp(0.0, 100.0).round() as u8
}

/// Risk level from volatility, with an asset class adjustment on the score.
///
/// The level reflects volatility alone. Crypto, gold and index adjustments
/// move the score without re-deriving the level.
pub fn assess_risk(instrument: &Instrument, indicators: &IndicatorSet) -> RiskAssessment {
    let volatility = indicators.volatility;

    let (level, mut score) = if volatility > 40.0 {
        (RiskLevel::High, 80i32)
    } else if volatility < 15.0 {
        (RiskLevel::Low, 20)
    } else {
        (RiskLevel::Medium, 50)
    };

    if instrument.asset_class == AssetClass::Crypto {
        score += 20;
    } else if instrument.is_gold() {
        score -= 10;
    } else if instrument.asset_class == AssetClass::Index {
        score -= 5;
    }

    RiskAssessment {
        level,
        score: score.clamp(0, 100) as u8,
        factors: RiskFactors {
            volatility,
            trend_strength: indicators.momentum.abs(),
            market_condition: indicators.trend,
        },
    }
}
