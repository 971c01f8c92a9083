//! Exponential Moving Average (EMA) indicator.

/// EMA (Exponential Moving Average) indicator.
///
/// Gives more weight to recent prices. Seeded with the first price of the
/// series rather than an SMA so it is defined for any non-empty input.
pub struct Ema {
    period: usize,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self { period: period.max(1) }
    }

    pub fn multiplier(&self) -> f64 {
        2.0 / (self.period as f64 + 1.0)
    }

    /// Final EMA value over the whole series. Empty input yields 0.
    pub fn calculate(&self, prices: &[f64]) -> f64 {
        let Some((&first, rest)) = prices.split_first() else {
            return 0.0;
        };

        let k = self.multiplier();
        rest.iter().fold(first, |ema, &price| price * k + ema * (1.0 - k))
    }
}
