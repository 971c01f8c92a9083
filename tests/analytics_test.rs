//! Engine-level tests for the analytics pipeline

use augur::services::analytics::{
    analyze, assess_risk, compute_indicators, generate_recommendations, predict, recommend,
    sentiment_score, FixedNoise, RandomNoise,
};
use augur::types::*;
use chrono::{DateTime, NaiveTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn history(prices: &[f64]) -> Vec<PriceSample> {
    prices
        .iter()
        .enumerate()
        .map(|(i, &price)| {
            let time: DateTime<Utc> = DateTime::from_timestamp(1_700_000_000 + i as i64 * 40, 0).unwrap();
            PriceSample::new(time, price, Some(5_000_000))
        })
        .collect()
}

fn linear(from: f64, to: f64, count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| from + (to - from) * i as f64 / (count - 1) as f64)
        .collect()
}

fn random_walk(seed: u64, count: usize, step: f64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut price = 100.0;
    (0..count)
        .map(|_| {
            price *= 1.0 + rng.gen_range(-step..step);
            price
        })
        .collect()
}

fn catalog(symbol: &str) -> Instrument {
    find_instrument(&default_instruments(), symbol).unwrap().clone()
}

fn noon() -> NaiveTime {
    NaiveTime::from_hms_opt(12, 0, 0).unwrap()
}

#[test]
fn test_short_history_yields_nothing() {
    let eur = catalog("EUR/USD");
    for len in 0..14 {
        let samples = history(&linear(1.08, 1.09, len.max(2))[..len]);
        assert!(compute_indicators(&samples).is_none());
        assert!(analyze(&eur, &samples, noon(), &mut FixedNoise(0.5)).is_none());
        assert!(recommend(&eur, 1.08, compute_indicators(&samples).as_ref(), 50).is_empty());
    }
}

#[test]
fn test_rsi_and_volatility_bounds_on_random_walks() {
    for seed in 0..50 {
        let prices = random_walk(seed, 50, 0.03);
        let set = compute_indicators(&history(&prices)).unwrap();
        assert!((0.0..=100.0).contains(&set.rsi), "rsi {}", set.rsi);
        assert!(set.volatility >= 0.0);
        assert!(set.support <= set.resistance);
        assert!(set.bollinger.lower <= set.bollinger.middle);
        assert!(set.bollinger.middle <= set.bollinger.upper);
        assert_ne!(set.macd.signal, 0);
    }
}

#[test]
fn test_trend_mirror_symmetry() {
    let pivot = 100.0;
    for (from, to) in [(80.0, 95.0), (90.0, 110.0), (95.0, 120.0)] {
        let prices = linear(from, to, 20);
        let mirrored: Vec<f64> = prices.iter().map(|p| 2.0 * pivot - p).collect();

        let up = compute_indicators(&history(&prices)).unwrap();
        let down = compute_indicators(&history(&mirrored)).unwrap();
        assert_eq!(up.trend, Trend::Bullish);
        assert_eq!(down.trend, Trend::Bearish);
        assert!(up.momentum > 0.0 && down.momentum < 0.0);
    }
}

#[test]
fn test_ascending_eur_usd_is_a_buy() {
    let eur = catalog("EUR/USD");
    let samples = history(&linear(1.0800, 1.1900, 20));
    let snapshot = analyze(&eur, &samples, noon(), &mut FixedNoise(0.5)).unwrap();

    assert_eq!(snapshot.indicators.trend, Trend::Bullish);
    assert!(snapshot.indicators.momentum > 0.0);
    assert!(snapshot.sentiment > 50);

    let top = snapshot.top_recommendation().unwrap();
    assert_eq!(top.kind, RecommendationKind::Buy);
    assert!((top.entry.unwrap() - 1.19).abs() < 1e-9);
}

#[test]
fn test_shallow_ascent_stays_neutral() {
    // 1.0800 -> 1.0900 moves the five-sample means by well under 2%.
    let eur = catalog("EUR/USD");
    let samples = history(&linear(1.0800, 1.0900, 20));
    let snapshot = analyze(&eur, &samples, noon(), &mut FixedNoise(0.5)).unwrap();
    assert_eq!(snapshot.indicators.trend, Trend::Neutral);
    assert!(snapshot.indicators.momentum > 0.0);
}

#[test]
fn test_constant_history() {
    let gold = catalog("GOLD/USD");
    let samples = history(&[2_048.5; 30]);
    let snapshot = analyze(&gold, &samples, noon(), &mut FixedNoise(0.5)).unwrap();
    let set = &snapshot.indicators;

    assert_eq!(set.volatility, 0.0);
    assert_eq!(set.rsi, 100.0);
    assert_eq!(set.bollinger.upper, set.bollinger.middle);
    assert_eq!(set.bollinger.lower, set.bollinger.middle);
    assert_eq!(snapshot.context.regime, MarketRegime::LowVolatility);
    assert_eq!(snapshot.context.volatility_bucket, VolatilityBucket::VeryLow);
    assert_eq!(snapshot.prediction.one_week, 2_048.5);
}

#[test]
fn test_crypto_high_volatility_risk() {
    let btc = catalog("BTC/USD");
    let set = IndicatorSet {
        rsi: 55.0,
        macd: MacdReading { signal: 1, histogram: 12.0 },
        bollinger: BollingerReading::default(),
        volatility: 45.0,
        trend: Trend::Neutral,
        momentum: 1.0,
        support: 44_000.0,
        resistance: 46_000.0,
    };
    let risk = assess_risk(&btc, &set);
    assert_eq!(risk.level, RiskLevel::High);
    assert_eq!(risk.score, 100);
}

#[test]
fn test_sentiment_clamped_on_wild_histories() {
    let btc = catalog("BTC/USD");
    let crash: Vec<f64> = (0..40).map(|i| 1_000_000.0 * 0.5f64.powi(i)).collect();
    let melt_up: Vec<f64> = (0..40).map(|i| 1.0 * 1.9f64.powi(i)).collect();

    for prices in [crash, melt_up, random_walk(7, 50, 0.5)] {
        let set = compute_indicators(&history(&prices)).unwrap();
        let score = sentiment_score(&btc, &set);
        assert!(score <= 100);
    }
}

#[test]
fn test_recommendations_always_include_risk_entry() {
    for symbol in ["EUR/USD", "BTC/USD", "S&P 500", "SILVER/USD"] {
        let instrument = catalog(symbol);
        for seed in 0..20 {
            let prices = random_walk(seed, 30, 0.02);
            let set = compute_indicators(&history(&prices)).unwrap();
            let sentiment = sentiment_score(&instrument, &set);
            let recs = generate_recommendations(&instrument, *prices.last().unwrap(), &set, sentiment);

            let risk_entries = recs.iter().filter(|r| r.kind == RecommendationKind::Risk).count();
            assert_eq!(risk_entries, 1);
            assert!(recs.iter().filter(|r| r.kind.is_directional()).count() <= 1);

            let timing = recs.iter().any(|r| r.kind == RecommendationKind::Timing);
            assert_eq!(timing, instrument.asset_class == AssetClass::Crypto);
        }
    }
}

#[test]
fn test_prediction_direction_within_noise_band() {
    let prices: Vec<f64> = (0..30).map(|i| 100.0 * 1.01f64.powi(i)).collect();
    let set = compute_indicators(&history(&prices)).unwrap();
    assert_eq!(set.trend, Trend::Bullish);

    let price = *prices.last().unwrap();
    let v = set.volatility / 100.0;
    let m = set.momentum / 100.0;

    for seed in 0..100 {
        let p = predict(price, Some(&set), &mut RandomNoise::seeded(seed)).unwrap();
        let bands = [
            (p.one_hour, 0.01 + 0.005 * m, 0.5),
            (p.one_day, 0.03 + 0.01 * m, 1.0),
            (p.one_week, 0.05 + 0.02 * m, 1.5),
        ];
        for (projected, drift, scale) in bands {
            let deviation = projected / price - 1.0;
            let tolerance = 0.5 * v * scale + 1e-12;
            assert!((deviation - drift).abs() <= tolerance);
            assert!(deviation > 0.0);
        }
        assert!((50..=95).contains(&p.confidence));
    }
}

#[test]
fn test_session_comes_from_injected_time() {
    let eur = catalog("EUR/USD");
    let samples = history(&random_walk(3, 30, 0.01));
    let at = |h| NaiveTime::from_hms_opt(h, 15, 0).unwrap();

    let us = analyze(&eur, &samples, at(14), &mut FixedNoise(0.5)).unwrap();
    let asian = analyze(&eur, &samples, at(2), &mut FixedNoise(0.5)).unwrap();
    let european = analyze(&eur, &samples, at(8), &mut FixedNoise(0.5)).unwrap();

    assert_eq!(us.context.session, TradingSession::Us);
    assert_eq!(asian.context.session, TradingSession::Asian);
    assert_eq!(european.context.session, TradingSession::European);
}

#[test]
fn test_repeat_analysis_is_deterministic_except_prediction() {
    let btc = catalog("BTC/USD");
    let samples = history(&random_walk(11, 50, 0.04));

    let a = analyze(&btc, &samples, noon(), &mut RandomNoise::seeded(1)).unwrap();
    let b = analyze(&btc, &samples, noon(), &mut RandomNoise::seeded(2)).unwrap();

    assert_eq!(a.indicators, b.indicators);
    assert_eq!(a.sentiment, b.sentiment);
    assert_eq!(a.risk, b.risk);
    assert_eq!(a.recommendations, b.recommendations);
    assert_eq!(a.context, b.context);
    assert_eq!(a.correlation, b.correlation);
    assert_eq!(a.prediction.confidence, b.prediction.confidence);
    assert_ne!(a.prediction.one_week, b.prediction.one_week);
}

#[test]
fn test_snapshot_extras() {
    let btc = catalog("BTC/USD");
    let samples = history(&random_walk(5, 30, 0.01));
    let snapshot = analyze(&btc, &samples, noon(), &mut FixedNoise(0.5)).unwrap();

    assert_eq!(snapshot.symbol, "BTC/USD");
    assert_eq!(snapshot.sample_count, 30);
    assert_eq!(snapshot.time_horizon, TimeHorizon::ShortTerm);
    assert_eq!(snapshot.liquidity, LiquidityTier::Medium);
    assert_eq!(snapshot.context.liquidity, LiquidityTier::Medium);
    assert_eq!(snapshot.context.news_impact, NewsImpact::VeryHigh);
    assert_eq!(snapshot.correlation.get("BTC"), Some(&1.0));
    assert!((50..=95).contains(&snapshot.confidence));
}

#[test]
fn test_invalid_samples_ignored_for_price() {
    let eur = catalog("EUR/USD");
    let mut prices = linear(1.08, 1.10, 20);
    prices.push(f64::NAN);
    let snapshot = analyze(&eur, &history(&prices), noon(), &mut FixedNoise(0.5)).unwrap();
    assert_eq!(snapshot.sample_count, 20);
    assert!((snapshot.price - 1.10).abs() < 1e-12);
}
