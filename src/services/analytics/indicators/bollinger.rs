//! Bollinger Bands indicator.

use crate::types::BollingerReading;

/// Bollinger Bands indicator.
///
/// Consists of:
/// - Middle band: SMA(20)
/// - Upper band: SMA + 2 * StdDev
/// - Lower band: SMA - 2 * StdDev
///
/// Standard deviation is the population form over the trailing window.
pub struct BollingerBands {
    period: usize,
    std_dev_multiplier: f64,
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self {
            period: 20,
            std_dev_multiplier: 2.0,
        }
    }
}

impl BollingerBands {
    /// Calculate standard deviation.
    fn std_dev(values: &[f64], mean: f64) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        let variance: f64 = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
        variance.sqrt()
    }

    /// All-zero bands when fewer than `period` prices are available.
    pub fn calculate(&self, prices: &[f64]) -> BollingerReading {
        if self.period == 0 || prices.len() < self.period {
            return BollingerReading::default();
        }

        let window = &prices[prices.len() - self.period..];
        let middle = window.iter().sum::<f64>() / self.period as f64;
        let std_dev = Self::std_dev(window, middle);

        BollingerReading {
            upper: middle + self.std_dev_multiplier * std_dev,
            middle,
            lower: middle - self.std_dev_multiplier * std_dev,
        }
    }
}
