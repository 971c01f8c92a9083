//! Relative Strength Index (RSI) indicator.

/// RSI (Relative Strength Index) indicator.
///
/// Compares the magnitude of recent gains to recent losses over the last
/// `period` price changes. Values range from 0-100:
/// - Below 30: Oversold
/// - Above 70: Overbought
pub struct Rsi {
    period: usize,
}

impl Default for Rsi {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self { period: period.max(1) }
    }

    /// Calculate RSI over the most recent `period` deltas.
    ///
    /// Uses fewer deltas when the series is shorter. A window with no
    /// losses saturates at 100; fewer than two prices is neutral (50).
    pub fn calculate(&self, prices: &[f64]) -> f64 {
        if prices.len() < 2 {
            return 50.0;
        }

        let start = prices.len().saturating_sub(self.period + 1);
        let mut gains = 0.0;
        let mut losses = 0.0;

        for window in prices[start..].windows(2) {
            let change = window[1] - window[0];
            if change >= 0.0 {
                gains += change;
            } else {
                losses -= change;
            }
        }

        let avg_gain = gains / self.period as f64;
        let avg_loss = losses / self.period as f64;

        if avg_loss == 0.0 {
            return 100.0;
        }

        let rs = avg_gain / avg_loss;
        100.0 - (100.0 / (1.0 + rs))
    }
}
