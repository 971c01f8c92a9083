//! Trade, risk and timing recommendations.

use crate::types::{
    AssetClass, IndicatorSet, Instrument, Recommendation, RecommendationKind,
    RecommendationStrength, Trend,
};

/// Widening applied to stops and targets of moderate recommendations.
const MODERATE_BUFFER: f64 = 0.02;

/// Build the ordered recommendation list for an instrument.
///
/// Empty only when there are no indicators to work from.
pub fn recommend(
    instrument: &Instrument,
    price: f64,
    indicators: Option<&IndicatorSet>,
    sentiment: u8,
) -> Vec<Recommendation> {
    match indicators {
        Some(indicators) => generate_recommendations(instrument, price, indicators, sentiment),
        None => Vec::new(),
    }
}

/// Decision table, first match wins for the directional entry:
///
/// 1. sentiment > 70 and bullish: strong buy
/// 2. sentiment < 30 and bearish: strong sell
/// 3. sentiment > 60: moderate buy
/// 4. sentiment < 40: moderate sell
///
/// A risk entry always follows, then a timing entry for crypto.
pub fn generate_recommendations(
    instrument: &Instrument,
    price: f64,
    indicators: &IndicatorSet,
    sentiment: u8,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::with_capacity(3);

    if let Some(directional) = directional(price, indicators, sentiment) {
        recommendations.push(directional);
    }

    recommendations.push(risk_management(indicators.volatility));

    if instrument.asset_class == AssetClass::Crypto {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Timing,
            strength: RecommendationStrength::Moderate,
            reason: "Crypto markets trade 24/7; favour overlapping sessions for liquidity".to_string(),
            entry: None,
            stop_loss: None,
            take_profit: None,
            position_size_hint: None,
        });
    }

    recommendations
}

fn directional(price: f64, indicators: &IndicatorSet, sentiment: u8) -> Option<Recommendation> {
    let support = indicators.support;
    let resistance = indicators.resistance;

    let (kind, strength, reason, stop_loss, take_profit) =
        if sentiment > 70 && indicators.trend == Trend::Bullish {
            (
                RecommendationKind::Buy,
                RecommendationStrength::Strong,
                "Strong bullish momentum with positive sentiment",
                support,
                resistance,
            )
        } else if sentiment < 30 && indicators.trend == Trend::Bearish {
            (
                RecommendationKind::Sell,
                RecommendationStrength::Strong,
                "Strong bearish momentum with negative sentiment",
                resistance,
                support,
            )
        } else if sentiment > 60 {
            (
                RecommendationKind::Buy,
                RecommendationStrength::Moderate,
                "Moderate bullish bias",
                support * (1.0 - MODERATE_BUFFER),
                resistance * (1.0 + MODERATE_BUFFER),
            )
        } else if sentiment < 40 {
            (
                RecommendationKind::Sell,
                RecommendationStrength::Moderate,
                "Moderate bearish bias",
                resistance * (1.0 + MODERATE_BUFFER),
                support * (1.0 - MODERATE_BUFFER),
            )
        } else {
            return None;
        };

    Some(Recommendation {
        kind,
        strength,
        reason: reason.to_string(),
        entry: Some(price),
        stop_loss: Some(stop_loss),
        take_profit: Some(take_profit),
        position_size_hint: None,
    })
}

/// Suggested position size in percent; shrinks as volatility grows, floored at 1%.
pub fn position_size_hint(volatility: f64) -> f64 {
    (10.0 - volatility / 10.0).max(1.0)
}

/// Maximum risk per trade in percent, between 0.1% and 5%.
pub fn max_risk_per_trade(volatility: f64) -> f64 {
    (10.0 - volatility / 5.0).clamp(0.1, 5.0)
}

fn risk_management(volatility: f64) -> Recommendation {
    Recommendation {
        kind: RecommendationKind::Risk,
        strength: RecommendationStrength::Info,
        reason: format!(
            "Risk management: Max {:.1}% risk per trade recommended",
            max_risk_per_trade(volatility)
        ),
        entry: None,
        stop_loss: None,
        take_profit: None,
        position_size_hint: Some(position_size_hint(volatility)),
    }
}
