//! Short-horizon price projections.

use crate::types::{IndicatorSet, Prediction};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform draws in `[0, 1)` for the projection noise term.
pub trait NoiseSource {
    fn next_unit(&mut self) -> f64;
}

/// Pseudo-random noise backed by `StdRng`.
pub struct RandomNoise {
    rng: StdRng,
}

impl RandomNoise {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible noise for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomNoise {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseSource for RandomNoise {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Largest `f64` below 1.0.
const BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

/// Constant draw, clamped into `[0, 1)`. `FixedNoise(0.5)` removes the
/// random term entirely.
#[derive(Debug, Clone, Copy)]
pub struct FixedNoise(pub f64);

impl NoiseSource for FixedNoise {
    fn next_unit(&mut self) -> f64 {
        if self.0.is_nan() {
            return 0.5;
        }
        self.0.clamp(0.0, BELOW_ONE)
    }
}

/// Sensitivity of one projection horizon.
struct Horizon {
    trend: f64,
    momentum: f64,
    noise: f64,
}

const ONE_HOUR: Horizon = Horizon {
    trend: 0.01,
    momentum: 0.005,
    noise: 0.5,
};

const ONE_DAY: Horizon = Horizon {
    trend: 0.03,
    momentum: 0.01,
    noise: 1.0,
};

const ONE_WEEK: Horizon = Horizon {
    trend: 0.05,
    momentum: 0.02,
    noise: 1.5,
};

/// Project the price at 1h, 24h and 7d.
///
/// Each horizon moves the price by a trend term, a momentum term and a
/// uniform noise term scaled by volatility. Confidence depends on
/// volatility only.
pub fn predict(
    price: f64,
    indicators: Option<&IndicatorSet>,
    noise: &mut dyn NoiseSource,
) -> Option<Prediction> {
    let indicators = indicators?;

    let volatility = indicators.volatility / 100.0;
    let trend = indicators.trend.multiplier();
    let momentum = indicators.momentum / 100.0;

    let mut project = |h: &Horizon| {
        let random = (noise.next_unit() - 0.5) * volatility * h.noise;
        price * (1.0 + trend * h.trend + momentum * h.momentum + random)
    };

    let one_hour = project(&ONE_HOUR);
    let one_day = project(&ONE_DAY);
    let one_week = project(&ONE_WEEK);

    Some(Prediction {
        one_hour,
        one_day,
        one_week,
        confidence: prediction_confidence(indicators.volatility),
    })
}

/// `85 - 20 * volatility_fraction`, clamped to 50-95.
pub fn prediction_confidence(volatility_pct: f64) -> u8 {
    (85.0 - volatility_pct / 100.0 * 20.0).clamp(50.0, 95.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BollingerReading, MacdReading, Trend};

    fn indicators(trend: Trend, volatility: f64, momentum: f64) -> IndicatorSet {
        IndicatorSet {
            rsi: 50.0,
            macd: MacdReading::default(),
            bollinger: BollingerReading::default(),
            volatility,
            trend,
            momentum,
            support: 0.0,
            resistance: 0.0,
        }
    }

    #[test]
    fn test_no_indicators_no_prediction() {
        assert!(predict(100.0, None, &mut FixedNoise(0.5)).is_none());
    }

    #[test]
    fn test_deterministic_with_neutral_noise() {
        let set = indicators(Trend::Bullish, 20.0, 10.0);
        let prediction = predict(100.0, Some(&set), &mut FixedNoise(0.5)).unwrap();
        assert!((prediction.one_hour - 101.05).abs() < 1e-9);
        assert!((prediction.one_day - 103.1).abs() < 1e-9);
        assert!((prediction.one_week - 105.2).abs() < 1e-9);
    }

    #[test]
    fn test_noise_bounds() {
        let set = indicators(Trend::Neutral, 40.0, 0.0);
        // Max deviation at 7d: 0.5 * 0.4 * 1.5 = 30%.
        let low = predict(100.0, Some(&set), &mut FixedNoise(0.0)).unwrap();
        let high = predict(100.0, Some(&set), &mut FixedNoise(1.0)).unwrap();
        assert!((low.one_week - 70.0).abs() < 1e-9);
        assert!((high.one_week - 130.0).abs() < 1e-9);
        assert!((low.one_hour - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_seeded_noise_is_reproducible() {
        let set = indicators(Trend::Bearish, 30.0, -4.0);
        let a = predict(50.0, Some(&set), &mut RandomNoise::seeded(7)).unwrap();
        let b = predict(50.0, Some(&set), &mut RandomNoise::seeded(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_noise_in_unit_interval() {
        let mut noise = RandomNoise::new();
        for _ in 0..1000 {
            let u = noise.next_unit();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn test_fixed_noise_stays_in_unit_interval() {
        for value in [-3.0, 0.0, 0.5, 1.0, 7.5, f64::INFINITY, f64::NAN] {
            let u = FixedNoise(value).next_unit();
            assert!((0.0..1.0).contains(&u), "{} -> {}", value, u);
        }
        assert_eq!(FixedNoise(-3.0).next_unit(), 0.0);
        assert_eq!(FixedNoise(0.25).next_unit(), 0.25);
        assert_eq!(FixedNoise(f64::NAN).next_unit(), 0.5);
    }

    #[test]
    fn test_confidence_independent_of_noise() {
        let set = indicators(Trend::Bullish, 25.0, 3.0);
        let a = predict(10.0, Some(&set), &mut FixedNoise(0.0)).unwrap();
        let b = predict(10.0, Some(&set), &mut FixedNoise(1.0)).unwrap();
        assert_eq!(a.confidence, b.confidence);
        assert_eq!(a.confidence, 80);
    }

    #[test]
    fn test_confidence_range() {
        assert_eq!(prediction_confidence(0.0), 85);
        assert_eq!(prediction_confidence(100.0), 65);
        assert_eq!(prediction_confidence(1_000.0), 50);
        assert_eq!(prediction_confidence(-100.0), 95);
    }
}
