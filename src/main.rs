use augur::config::{Config, SessionClock};
use augur::services::{AnalysisService, Clock, HistoryStore, SimulatedFeed, SystemClock};
use augur::types::{default_instruments, find_instrument, AnalysisSnapshot, Instrument};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "augur=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    let instruments = select_instruments(&config);
    if instruments.is_empty() {
        anyhow::bail!("No known instruments in AUGUR_SYMBOLS");
    }
    info!(
        "Starting Augur with {} instruments, tick every {}ms",
        instruments.len(),
        config.feed_interval_ms
    );

    let store = HistoryStore::new(config.history_capacity);
    let clock: Arc<dyn Clock> = Arc::new(match config.session_clock {
        SessionClock::Utc => SystemClock::utc(),
        SessionClock::Local => SystemClock::local(),
    });
    let service = AnalysisService::new(
        instruments.clone(),
        store.clone(),
        clock,
        config.noise_seed,
    );

    let mut feed = match config.noise_seed {
        Some(seed) => SimulatedFeed::seeded(instruments.clone(), seed),
        None => SimulatedFeed::new(instruments.clone()),
    };

    let interval = Duration::from_millis(config.feed_interval_ms);
    if config.warmup_samples > 0 {
        feed.warm_up(
            &store,
            config.warmup_samples,
            chrono::Duration::milliseconds(config.feed_interval_ms as i64),
            chrono::Utc::now(),
        );
        info!("Back-filled {} samples per instrument", config.warmup_samples);
    }

    let mut ticker = tokio::time::interval(interval);
    let mut ticks: u64 = 0;

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down");
                break;
            }
        }

        feed.tick(&store, chrono::Utc::now());
        ticks += 1;

        let snapshots = analyze_concurrently(&service, &instruments).await;
        for (symbol, snapshot) in snapshots {
            match snapshot {
                Some(snapshot) => report(&snapshot, &instruments, config.print_json),
                None => debug!("{}: insufficient history", symbol),
            }
        }

        if config.max_ticks > 0 && ticks >= config.max_ticks {
            info!("Reached {} ticks, exiting", ticks);
            break;
        }
    }

    Ok(())
}

/// Instruments named in the config, or the full catalog.
fn select_instruments(config: &Config) -> Vec<Instrument> {
    let catalog = default_instruments();
    if config.symbols.is_empty() {
        return catalog;
    }

    config
        .symbols
        .iter()
        .filter_map(|symbol| {
            let found = find_instrument(&catalog, symbol).cloned();
            if found.is_none() {
                warn!("Ignoring unknown symbol {}", symbol);
            }
            found
        })
        .collect()
}

/// Analyze each instrument on its own task.
async fn analyze_concurrently(
    service: &Arc<AnalysisService>,
    instruments: &[Instrument],
) -> Vec<(String, Option<AnalysisSnapshot>)> {
    let mut tasks = JoinSet::new();
    for (index, instrument) in instruments.iter().enumerate() {
        let service = service.clone();
        let symbol = instrument.display_symbol.clone();
        tasks.spawn(async move {
            let snapshot = match service.analyze_symbol(&symbol) {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    warn!("Analysis failed for {}: {}", symbol, e);
                    None
                }
            };
            (index, symbol, snapshot)
        });
    }

    let mut results = Vec::with_capacity(instruments.len());
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(result) => results.push(result),
            Err(e) => warn!("Analysis task panicked: {}", e),
        }
    }

    results.sort_by_key(|(index, _, _)| *index);
    results
        .into_iter()
        .map(|(_, symbol, snapshot)| (symbol, snapshot))
        .collect()
}

fn report(snapshot: &AnalysisSnapshot, instruments: &[Instrument], print_json: bool) {
    let Some(instrument) = find_instrument(instruments, &snapshot.symbol) else {
        return;
    };

    let top = snapshot
        .top_recommendation()
        .map(|r| format!("{:?}/{:?}", r.kind, r.strength))
        .unwrap_or_else(|| "none".to_string());

    info!(
        "{} {} | sentiment {} | risk {:?} ({}) | trend {} | {} session | top {}",
        snapshot.symbol,
        instrument.format_price(snapshot.price),
        snapshot.sentiment,
        snapshot.risk.level,
        snapshot.risk.score,
        snapshot.indicators.trend.label(),
        snapshot.context.session.label(),
        top
    );

    if print_json {
        match snapshot.to_json(false) {
            Ok(json) => println!("{}", json),
            Err(e) => warn!("Failed to serialize {}: {}", snapshot.symbol, e),
        }
    }
}
