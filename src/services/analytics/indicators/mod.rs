//! Technical indicator implementations.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod trend;
pub mod volatility;

pub use bollinger::BollingerBands;
pub use ema::Ema;
pub use macd::Macd;
pub use rsi::Rsi;
pub use trend::{momentum, TrendDetector};
pub use volatility::annualized_volatility;

use crate::types::{IndicatorSet, PriceSample};
use tracing::trace;

/// Minimum number of valid prices before any indicator is computed.
pub const MIN_SAMPLES: usize = 14;

/// Samples looked back over for momentum.
const MOMENTUM_LOOKBACK: usize = 10;

/// Samples used for support and resistance.
const LEVELS_WINDOW: usize = 5;

/// Finite prices of a history, in order.
pub fn valid_prices(history: &[PriceSample]) -> Vec<f64> {
    history
        .iter()
        .filter(|s| s.is_valid())
        .map(|s| s.price)
        .collect()
}

/// Support and resistance as the min and max of the last few prices.
pub fn support_resistance(prices: &[f64], window: usize) -> (f64, f64) {
    let recent = &prices[prices.len().saturating_sub(window)..];
    if recent.is_empty() {
        return (0.0, 0.0);
    }
    let support = recent.iter().copied().fold(f64::INFINITY, f64::min);
    let resistance = recent.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (support, resistance)
}

/// Compute the full indicator set for a history snapshot.
///
/// Returns `None` when fewer than [`MIN_SAMPLES`] valid prices exist;
/// that is the normal "not enough history yet" state.
pub fn compute_indicators(history: &[PriceSample]) -> Option<IndicatorSet> {
    let prices = valid_prices(history);
    compute_from_prices(&prices)
}

/// Same as [`compute_indicators`] for an already filtered price series.
pub fn compute_from_prices(prices: &[f64]) -> Option<IndicatorSet> {
    if prices.len() < MIN_SAMPLES {
        trace!("Insufficient history: {} valid prices", prices.len());
        return None;
    }

    let (support, resistance) = support_resistance(prices, LEVELS_WINDOW);

    Some(IndicatorSet {
        rsi: Rsi::default().calculate(prices),
        macd: Macd::default().calculate(prices),
        bollinger: BollingerBands::default().calculate(prices),
        volatility: annualized_volatility(prices),
        trend: TrendDetector::default().classify(prices),
        momentum: momentum(prices, MOMENTUM_LOOKBACK),
        support,
        resistance,
    })
}
