//! Per-instrument price history storage.

use crate::types::{PriceHistory, PriceSample, DEFAULT_HISTORY_CAPACITY};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::trace;

/// Thread-safe store of bounded price histories keyed by symbol.
///
/// Readers always receive a copy, so analysis never observes a history
/// being appended to.
pub struct HistoryStore {
    histories: DashMap<String, PriceHistory>,
    capacity: usize,
}

impl HistoryStore {
    /// Create a new history store.
    pub fn new(capacity: usize) -> Arc<Self> {
        Arc::new(Self {
            histories: DashMap::new(),
            capacity,
        })
    }

    fn key(symbol: &str) -> String {
        symbol.trim().to_lowercase()
    }

    /// Append a sample for a symbol, returning the new history version.
    pub fn record(&self, symbol: &str, sample: PriceSample) -> u64 {
        let mut entry = self
            .histories
            .entry(Self::key(symbol))
            .or_insert_with(|| PriceHistory::new(self.capacity));
        entry.push(sample);
        trace!("Recorded {} @ {} (v{})", symbol, sample.price, entry.version());
        entry.version()
    }

    /// Stable copy of a symbol's history.
    pub fn snapshot(&self, symbol: &str) -> Option<PriceHistory> {
        self.histories.get(&Self::key(symbol)).map(|h| h.clone())
    }

    /// Current version of a symbol's history, 0 if nothing was recorded.
    pub fn version(&self, symbol: &str) -> u64 {
        self.histories
            .get(&Self::key(symbol))
            .map(|h| h.version())
            .unwrap_or(0)
    }

    pub fn len(&self, symbol: &str) -> usize {
        self.histories
            .get(&Self::key(symbol))
            .map(|h| h.len())
            .unwrap_or(0)
    }

    /// Symbols with at least one recorded sample.
    pub fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.histories.iter().map(|e| e.key().clone()).collect();
        symbols.sort();
        symbols
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self {
            histories: DashMap::new(),
            capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}
