//! Trend classification and momentum.

use crate::types::Trend;

/// Relative change between window means that counts as a trend.
const TREND_THRESHOLD: f64 = 0.02;

/// Compare the mean of the last `window` prices to the mean of the
/// `window` prices before them.
pub struct TrendDetector {
    window: usize,
}

impl Default for TrendDetector {
    fn default() -> Self {
        Self { window: 5 }
    }
}

impl TrendDetector {
    pub fn min_periods(&self) -> usize {
        self.window * 2
    }

    pub fn classify(&self, prices: &[f64]) -> Trend {
        if self.window == 0 || prices.len() < self.min_periods() {
            return Trend::Neutral;
        }

        let n = prices.len();
        let recent = &prices[n - self.window..];
        let older = &prices[n - 2 * self.window..n - self.window];

        let recent_avg = recent.iter().sum::<f64>() / self.window as f64;
        let older_avg = older.iter().sum::<f64>() / self.window as f64;

        if older_avg == 0.0 {
            return Trend::Neutral;
        }

        let change = (recent_avg - older_avg) / older_avg;
        if change > TREND_THRESHOLD {
            Trend::Bullish
        } else if change < -TREND_THRESHOLD {
            Trend::Bearish
        } else {
            Trend::Neutral
        }
    }
}

/// Percentage change from the oldest of the last `lookback` prices to the latest.
pub fn momentum(prices: &[f64], lookback: usize) -> f64 {
    if lookback == 0 || prices.len() < lookback {
        return 0.0;
    }

    let current = prices[prices.len() - 1];
    let past = prices[prices.len() - lookback];
    if past == 0.0 {
        return 0.0;
    }

    (current - past) / past * 100.0
}
