//! GBCE All Share Index.

use crate::domain::stock::Stock;

/// Geometric mean of the most recent trade price of every stock that has
/// traded. Stocks with an empty ledger are skipped; `None` if none remain.
pub fn geometric_mean_index(stocks: &[Stock]) -> Option<f64> {
    let prices: Vec<f64> = stocks
        .iter()
        .filter_map(|s| s.last_trade().map(|t| t.price()))
        .collect();

    if prices.is_empty() {
        return None;
    }

    let product: f64 = prices.iter().product();
    Some(product.powf(1.0 / prices.len() as f64))
}
