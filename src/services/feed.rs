//! Simulated price feed.
//!
//! Produces quotes around fixed reference levels per instrument and
//! records them into a [`HistoryStore`]. Stands in for a real market data
//! source when running the engine end to end.

use crate::services::HistoryStore;
use crate::types::{AssetClass, Instrument, PriceSample};
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One simulated market quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,
    pub price: f64,
    pub bid: f64,
    pub ask: f64,
    /// Simulated daily change in percent.
    pub change_pct: f64,
    pub volume: u64,
    /// Simulated intraday volatility in percent.
    pub volatility: f64,
    pub timestamp: DateTime<Utc>,
}

/// Reference level, jitter half-width and volatility range for an instrument.
struct Profile {
    base_price: f64,
    jitter: f64,
    volatility: (f64, f64),
    change: f64,
}

fn profile(instrument: &Instrument) -> Profile {
    let pair = format!("{}{}", instrument.base, instrument.quote).to_uppercase();
    match instrument.asset_class {
        AssetClass::Forex => {
            let (base_price, jitter) = match pair.as_str() {
                "EURUSD" => (1.0850, 0.01),
                "GBPUSD" => (1.2750, 0.015),
                "USDJPY" => (149.50, 1.0),
                "AUDUSD" => (0.6550, 0.01),
                "USDCAD" => (1.3650, 0.01),
                "USDCHF" => (0.8850, 0.01),
                "NZDUSD" => (0.6150, 0.01),
                "EURGBP" => (0.8550, 0.01),
                _ => (1.0, 0.0),
            };
            Profile {
                base_price,
                jitter,
                volatility: (0.5, 2.0),
                change: 1.0,
            }
        }
        AssetClass::Crypto => match instrument.base.to_uppercase().as_str() {
            "BTC" => Profile {
                base_price: 45_000.0,
                jitter: 2_500.0,
                volatility: (3.0, 8.0),
                change: 4.0,
            },
            _ => Profile {
                base_price: 2_500.0,
                jitter: 250.0,
                volatility: (4.0, 10.0),
                change: 4.0,
            },
        },
        AssetClass::Commodity => {
            if instrument.is_gold() {
                Profile {
                    base_price: 2_050.0,
                    jitter: 25.0,
                    volatility: (1.0, 3.0),
                    change: 1.5,
                }
            } else {
                Profile {
                    base_price: 25.5,
                    jitter: 1.0,
                    volatility: (1.5, 4.0),
                    change: 1.5,
                }
            }
        }
        AssetClass::Index => {
            let (base_price, jitter, volatility) = match instrument.base.to_uppercase().as_str() {
                "NAS100" => (18_500.0, 250.0, (1.5, 3.5)),
                "US30" => (38_500.0, 200.0, (1.2, 3.0)),
                _ => (5_100.0, 50.0, (1.3, 3.3)),
            };
            Profile {
                base_price,
                jitter,
                volatility,
                change: 2.0,
            }
        }
    }
}

/// Random quote generator for a fixed set of instruments.
pub struct SimulatedFeed {
    instruments: Vec<Instrument>,
    rng: StdRng,
}

impl SimulatedFeed {
    pub fn new(instruments: Vec<Instrument>) -> Self {
        Self {
            instruments,
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible feed for a given seed.
    pub fn seeded(instruments: Vec<Instrument>, seed: u64) -> Self {
        Self {
            instruments,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    /// Generate one quote for an instrument.
    pub fn quote(&mut self, instrument: &Instrument, timestamp: DateTime<Utc>) -> Quote {
        let profile = profile(instrument);
        let rng = &mut self.rng;

        let raw_price = profile.base_price + (rng.gen::<f64>() - 0.5) * 2.0 * profile.jitter;
        let (vol_lo, vol_hi) = profile.volatility;
        let volatility = rng.gen_range(vol_lo..vol_hi);
        let change_pct = (rng.gen::<f64>() - 0.5) * 2.0 * profile.change;
        let volume = rng.gen_range(0..1_000_000_000u64);

        let spread = raw_price * (0.0001 + volatility * 0.00001);

        Quote {
            symbol: instrument.display_symbol.clone(),
            price: instrument.round_price(raw_price),
            bid: instrument.round_price(raw_price - spread),
            ask: instrument.round_price(raw_price + spread),
            change_pct: (change_pct * 100.0).round() / 100.0,
            volume,
            volatility: (volatility * 100.0).round() / 100.0,
            timestamp,
        }
    }

    /// Quote every instrument once and record the samples.
    pub fn tick(&mut self, store: &HistoryStore, timestamp: DateTime<Utc>) -> Vec<Quote> {
        let instruments = self.instruments.clone();
        let quotes: Vec<Quote> = instruments
            .iter()
            .map(|instrument| self.quote(instrument, timestamp))
            .collect();

        for quote in &quotes {
            store.record(
                &quote.symbol,
                PriceSample::new(quote.timestamp, quote.price, Some(quote.volume)),
            );
        }

        debug!("Feed tick recorded {} quotes", quotes.len());
        quotes
    }

    /// Back-fill `samples` ticks spaced `interval` apart, ending at `now`.
    ///
    /// The count saturates at `i32::MAX` so every timestamp stays in the past.
    pub fn warm_up(
        &mut self,
        store: &HistoryStore,
        samples: usize,
        interval: Duration,
        now: DateTime<Utc>,
    ) {
        let count = i32::try_from(samples).unwrap_or(i32::MAX);
        for i in (1..=count).rev() {
            self.tick(store, now - interval * i);
        }
        debug!("Warmed up {} samples per instrument", count);
    }
}
