//! MACD (Moving Average Convergence Divergence) proxy.

use super::ema::Ema;
use crate::types::MacdReading;

/// MACD proxy indicator.
///
/// MACD Line = EMA(fast) - EMA(slow), both over the full series.
/// The reported signal is the sign of the line itself, not a signal-line
/// crossover.
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
}

impl Default for Macd {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
        }
    }
}

impl Macd {
    pub fn min_periods(&self) -> usize {
        self.slow_period
    }

    /// Neutral reading when the series is shorter than the slow period.
    pub fn calculate(&self, prices: &[f64]) -> MacdReading {
        if prices.len() < self.min_periods() {
            return MacdReading::default();
        }

        let fast = Ema::new(self.fast_period).calculate(prices);
        let slow = Ema::new(self.slow_period).calculate(prices);
        let line = fast - slow;

        MacdReading {
            signal: if line > 0.0 { 1 } else { -1 },
            histogram: line,
        }
    }
}
