use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Default number of samples retained per instrument.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// A single recorded price observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSample {
    pub time: DateTime<Utc>,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,
}

impl PriceSample {
    pub fn new(time: DateTime<Utc>, price: f64, volume: Option<u64>) -> Self {
        Self { time, price, volume }
    }

    /// A sample is usable for analysis only if its price is a finite number.
    pub fn is_valid(&self) -> bool {
        self.price.is_finite()
    }
}

/// Bounded, time-ascending price history for one instrument.
///
/// Appending past capacity evicts the oldest sample. Every append bumps
/// `version`, which callers use to decide whether re-analysis is needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceHistory {
    samples: VecDeque<PriceSample>,
    capacity: usize,
    version: u64,
}

impl PriceHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            version: 0,
        }
    }

    /// Append a sample, evicting the oldest entries on overflow.
    pub fn push(&mut self, sample: PriceSample) {
        self.samples.push_back(sample);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
        self.version += 1;
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of appends since creation. Monotonic, never reset by eviction.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn latest(&self) -> Option<&PriceSample> {
        self.samples.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PriceSample> {
        self.samples.iter()
    }

    /// Stable copy of the current window, oldest first.
    pub fn to_vec(&self) -> Vec<PriceSample> {
        self.samples.iter().copied().collect()
    }
}

impl Default for PriceHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
