//! Market analytics engine.
//!
//! Turns a bounded price history into an [`AnalysisSnapshot`]: technical
//! indicators, sentiment, risk, recommendations, projections and market
//! context. Every function here is pure apart from the injected noise
//! source used by the predictor.

pub mod context;
pub mod indicators;
pub mod predictions;
pub mod recommendations;
pub mod scoring;

pub use indicators::{compute_indicators, MIN_SAMPLES};
pub use predictions::{predict, FixedNoise, NoiseSource, RandomNoise};
pub use recommendations::{generate_recommendations, recommend};
pub use scoring::{assess_risk, sentiment_score};

use crate::types::{AnalysisSnapshot, Instrument, PriceSample};
use chrono::NaiveTime;
use tracing::debug;

/// Analyze one instrument's history.
///
/// Returns `None` when the history holds fewer than [`MIN_SAMPLES`] valid
/// prices. `time_of_day` drives the trading session; `noise` drives the
/// random term of the price projections.
pub fn analyze(
    instrument: &Instrument,
    history: &[PriceSample],
    time_of_day: NaiveTime,
    noise: &mut dyn NoiseSource,
) -> Option<AnalysisSnapshot> {
    let prices = indicators::valid_prices(history);
    let indicators = indicators::compute_from_prices(&prices)?;
    let price = *prices.last()?;

    let sentiment = sentiment_score(instrument, &indicators);
    let risk = assess_risk(instrument, &indicators);
    let recommendations = generate_recommendations(instrument, price, &indicators, sentiment);
    let prediction = predict(price, Some(&indicators), noise)?;
    let market_context = context::analyze_market_context(instrument, &indicators, time_of_day);

    debug!(
        "Analyzed {}: sentiment={} risk={:?} trend={:?} samples={}",
        instrument.display_symbol,
        sentiment,
        risk.level,
        indicators.trend,
        prices.len()
    );

    Some(AnalysisSnapshot {
        symbol: instrument.display_symbol.clone(),
        price,
        sample_count: prices.len(),
        confidence: context::overall_confidence(&indicators, sentiment),
        time_horizon: context::time_horizon(instrument, &indicators),
        liquidity: context::assess_liquidity(history),
        correlation: context::correlations(instrument),
        indicators,
        sentiment,
        risk,
        recommendations,
        prediction,
        context: market_context,
    })
}
