//! Annualized volatility of simple returns.

/// Trading days used to annualize daily-style volatility.
const TRADING_DAYS: f64 = 252.0;

/// Population standard deviation of simple returns, annualized and in percent.
///
/// Returns whose previous price is zero are skipped.
pub fn annualized_volatility(prices: &[f64]) -> f64 {
    if prices.len() < 2 {
        return 0.0;
    }

    let returns: Vec<f64> = prices
        .windows(2)
        .filter(|w| w[0] != 0.0)
        .map(|w| (w[1] - w[0]) / w[0])
        .collect();

    if returns.is_empty() {
        return 0.0;
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;

    variance.sqrt() * TRADING_DAYS.sqrt() * 100.0
}
