//! Analysis service: runs the engine over stored histories and memoizes
//! results per history version.

use crate::error::{AppError, Result};
use crate::services::analytics::{self, context, RandomNoise};
use crate::services::{Clock, HistoryStore};
use crate::types::{find_instrument, AnalysisSnapshot, Instrument, TradingSession};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// Cache entry for a computed analysis.
struct CachedAnalysis {
    /// History version the snapshot was computed from.
    version: u64,
    /// Session the clock reported at computation time.
    session: TradingSession,
    snapshot: Option<AnalysisSnapshot>,
}

/// Computes and caches analysis snapshots for catalog instruments.
pub struct AnalysisService {
    instruments: Vec<Instrument>,
    store: Arc<HistoryStore>,
    clock: Arc<dyn Clock>,
    /// Cache key: lowercased display symbol.
    cache: DashMap<String, CachedAnalysis>,
    noise_seed: Option<u64>,
}

impl AnalysisService {
    /// Create a new analysis service.
    pub fn new(
        instruments: Vec<Instrument>,
        store: Arc<HistoryStore>,
        clock: Arc<dyn Clock>,
        noise_seed: Option<u64>,
    ) -> Arc<Self> {
        Arc::new(Self {
            instruments,
            store,
            clock,
            cache: DashMap::new(),
            noise_seed,
        })
    }

    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    pub fn store(&self) -> &Arc<HistoryStore> {
        &self.store
    }

    /// Analysis for a symbol.
    ///
    /// `Ok(None)` means the instrument is known but its history is still
    /// too short. Recomputes when the history version has moved or the
    /// clock has crossed into another trading session.
    pub fn analyze_symbol(&self, symbol: &str) -> Result<Option<AnalysisSnapshot>> {
        let instrument = find_instrument(&self.instruments, symbol)
            .ok_or_else(|| AppError::UnknownInstrument(symbol.to_string()))?;
        let key = instrument.display_symbol.to_lowercase();

        let Some(history) = self.store.snapshot(&instrument.display_symbol) else {
            trace!("No history yet for {}", instrument.display_symbol);
            return Ok(None);
        };

        let time_of_day = self.clock.time_of_day();
        let session = context::determine_session(time_of_day);

        if let Some(cached) = self.cache.get(&key) {
            if cached.version == history.version() && cached.session == session {
                return Ok(cached.snapshot.clone());
            }
        }

        let mut noise = match self.noise_seed {
            Some(seed) => RandomNoise::seeded(seed ^ history.version()),
            None => RandomNoise::new(),
        };

        let samples = history.to_vec();
        let snapshot = analytics::analyze(
            instrument,
            &samples,
            time_of_day,
            &mut noise,
        );

        debug!(
            "Recomputed analysis for {} at v{} in {} session ({})",
            instrument.display_symbol,
            history.version(),
            session.label(),
            if snapshot.is_some() { "ready" } else { "insufficient data" }
        );

        self.cache.insert(
            key,
            CachedAnalysis {
                version: history.version(),
                session,
                snapshot: snapshot.clone(),
            },
        );

        Ok(snapshot)
    }

    /// Analysis for every catalog instrument, in catalog order.
    pub fn analyze_all(&self) -> Vec<(String, Option<AnalysisSnapshot>)> {
        self.instruments
            .iter()
            .map(|instrument| {
                let snapshot = self
                    .analyze_symbol(&instrument.display_symbol)
                    .ok()
                    .flatten();
                (instrument.display_symbol.clone(), snapshot)
            })
            .collect()
    }

    /// Version of the cached analysis for a symbol, if any.
    pub fn cached_version(&self, symbol: &str) -> Option<u64> {
        self.cache
            .get(&symbol.trim().to_lowercase())
            .map(|c| c.version)
    }

    /// Drop all cached snapshots.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
