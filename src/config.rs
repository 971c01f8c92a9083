use crate::error::{AppError, Result};
use crate::types::DEFAULT_HISTORY_CAPACITY;
use std::env;

/// Upper bound on back-filled samples per instrument.
pub const MAX_WARMUP_SAMPLES: usize = 10_000;

/// Which clock drives trading session classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionClock {
    #[default]
    Utc,
    Local,
}

impl SessionClock {
    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "utc" => Some(Self::Utc),
            "local" => Some(Self::Local),
            _ => None,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Display symbols to track. Empty means the whole catalog.
    pub symbols: Vec<String>,
    /// Samples kept per instrument.
    pub history_capacity: usize,
    /// Interval between feed ticks (ms).
    pub feed_interval_ms: u64,
    /// Samples back-filled per instrument at startup.
    pub warmup_samples: usize,
    /// Stop after this many ticks (0 = run until interrupted).
    pub max_ticks: u64,
    /// Clock used for session classification.
    pub session_clock: SessionClock,
    /// Seed for feed and projection noise. Random when unset.
    pub noise_seed: Option<u64>,
    /// Print each snapshot as JSON on stdout.
    pub print_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            symbols: Vec::new(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            feed_interval_ms: 40_000,
            warmup_samples: 30,
            max_ticks: 0,
            session_clock: SessionClock::Utc,
            noise_seed: None,
            print_json: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        // Format: "EUR/USD,BTC/USD"
        let symbols = lookup("AUGUR_SYMBOLS")
            .map(|s| {
                s.split(',')
                    .map(|sym| sym.trim().to_string())
                    .filter(|sym| !sym.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let session_clock = match lookup("AUGUR_SESSION_CLOCK") {
            Some(value) => SessionClock::from_str(&value).ok_or_else(|| {
                AppError::Config(format!("AUGUR_SESSION_CLOCK must be utc or local, got {}", value))
            })?,
            None => defaults.session_clock,
        };

        let config = Self {
            symbols,
            history_capacity: lookup("AUGUR_HISTORY_CAPACITY")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.history_capacity),
            feed_interval_ms: lookup("AUGUR_FEED_INTERVAL_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.feed_interval_ms),
            warmup_samples: lookup("AUGUR_WARMUP_SAMPLES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.warmup_samples),
            max_ticks: lookup("AUGUR_MAX_TICKS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_ticks),
            session_clock,
            noise_seed: lookup("AUGUR_NOISE_SEED").and_then(|v| v.parse().ok()),
            print_json: lookup("AUGUR_PRINT_JSON")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.print_json),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.history_capacity == 0 {
            return Err(AppError::Config("AUGUR_HISTORY_CAPACITY must be > 0".to_string()));
        }
        if self.feed_interval_ms == 0 {
            return Err(AppError::Config("AUGUR_FEED_INTERVAL_MS must be > 0".to_string()));
        }
        if self.warmup_samples > MAX_WARMUP_SAMPLES {
            return Err(AppError::Config(format!(
                "AUGUR_WARMUP_SAMPLES must be <= {}",
                MAX_WARMUP_SAMPLES
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert!(config.symbols.is_empty());
        assert_eq!(config.history_capacity, 50);
        assert_eq!(config.feed_interval_ms, 40_000);
        assert_eq!(config.warmup_samples, 30);
        assert_eq!(config.max_ticks, 0);
        assert_eq!(config.session_clock, SessionClock::Utc);
        assert!(config.noise_seed.is_none());
        assert!(!config.print_json);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("AUGUR_SYMBOLS", "EUR/USD, BTC/USD,,"),
            ("AUGUR_HISTORY_CAPACITY", "20"),
            ("AUGUR_SESSION_CLOCK", "Local"),
            ("AUGUR_NOISE_SEED", "99"),
            ("AUGUR_PRINT_JSON", "1"),
        ]))
        .unwrap();

        assert_eq!(config.symbols, vec!["EUR/USD".to_string(), "BTC/USD".to_string()]);
        assert_eq!(config.history_capacity, 20);
        assert_eq!(config.session_clock, SessionClock::Local);
        assert_eq!(config.noise_seed, Some(99));
        assert!(config.print_json);
    }

    #[test]
    fn test_unparseable_numbers_fall_back() {
        let config = Config::from_lookup(lookup(&[("AUGUR_WARMUP_SAMPLES", "lots")])).unwrap();
        assert_eq!(config.warmup_samples, 30);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(Config::from_lookup(lookup(&[("AUGUR_HISTORY_CAPACITY", "0")])).is_err());
        assert!(Config::from_lookup(lookup(&[("AUGUR_SESSION_CLOCK", "mars")])).is_err());
    }

    #[test]
    fn test_warmup_samples_bounded() {
        let at_limit = MAX_WARMUP_SAMPLES.to_string();
        let config = Config::from_lookup(lookup(&[("AUGUR_WARMUP_SAMPLES", at_limit.as_str())])).unwrap();
        assert_eq!(config.warmup_samples, MAX_WARMUP_SAMPLES);

        let too_many = (MAX_WARMUP_SAMPLES + 1).to_string();
        let err = Config::from_lookup(lookup(&[("AUGUR_WARMUP_SAMPLES", too_many.as_str())])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));

        let huge = (i32::MAX as u64 + 5).to_string();
        assert!(Config::from_lookup(lookup(&[("AUGUR_WARMUP_SAMPLES", huge.as_str())])).is_err());
    }
}
