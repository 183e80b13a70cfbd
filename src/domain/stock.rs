//! Stock records and the per-stock calculations.

use crate::domain::error::InvalidArgument;
use crate::domain::trade::{Trade, TradeSide};
use chrono::{Duration, NaiveDateTime};
use std::fmt;
use std::str::FromStr;

/// Trades older than this (relative to `now`) are ignored by the
/// volume-weighted price.
pub const VWAP_WINDOW_MINUTES: i64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockKind {
    Common,
    Preferred,
}

impl StockKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockKind::Common => "COMMON",
            StockKind::Preferred => "PREFERRED",
        }
    }
}

impl fmt::Display for StockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StockKind {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "COMMON" => Ok(StockKind::Common),
            "PREFERRED" => Ok(StockKind::Preferred),
            _ => Err(InvalidArgument::new(format!(
                "unknown stock type '{}'",
                s.trim()
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Stock {
    pub symbol: String,
    pub kind: StockKind,
    /// Last dividend paid; only read for common stock.
    pub last_dividend: Option<f64>,
    /// Fixed dividend rate (0.02 for 2%); only read for preferred stock.
    pub fixed_dividend: Option<f64>,
    pub par_value: f64,
    trades: Vec<Trade>,
}

impl Stock {
    /// Dividend fields are checked when a calculation needs them, not here.
    pub fn new(
        symbol: impl Into<String>,
        kind: StockKind,
        last_dividend: Option<f64>,
        fixed_dividend: Option<f64>,
        par_value: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            kind,
            last_dividend,
            fixed_dividend,
            par_value,
            trades: Vec::new(),
        }
    }

    /// The trade ledger, oldest first.
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn last_trade(&self) -> Option<&Trade> {
        self.trades.last()
    }

    /// Common: last_dividend / price. Preferred: fixed_dividend * par_value / price.
    pub fn dividend_yield(&self, price: f64) -> Result<f64, InvalidArgument> {
        ensure_positive_price(price)?;

        match self.kind {
            StockKind::Common => match self.last_dividend {
                Some(dividend) if dividend >= 0.0 => Ok(dividend / price),
                _ => Err(InvalidArgument::new(
                    "Last dividend must be provided and be non-negative for Common stocks",
                )),
            },
            StockKind::Preferred => match self.fixed_dividend {
                Some(rate) if rate > 0.0 => Ok(rate * self.par_value / price),
                _ => Err(InvalidArgument::new(
                    "Fixed dividend must be provided and be positive for Preferred stocks",
                )),
            },
        }
    }

    /// price / dividend yield, or `None` when the yield is zero.
    pub fn pe_ratio(&self, price: f64) -> Result<Option<f64>, InvalidArgument> {
        let dividend_yield = self.dividend_yield(price)?;
        if dividend_yield == 0.0 {
            return Ok(None);
        }
        Ok(Some(price / dividend_yield))
    }

    /// Append a trade stamped `at`. Rejected inputs leave the ledger untouched.
    pub fn record_trade(
        &mut self,
        quantity: i64,
        price: f64,
        side: TradeSide,
        at: NaiveDateTime,
    ) -> Result<(), InvalidArgument> {
        if quantity <= 0 {
            return Err(InvalidArgument::new("Quantity must be positive"));
        }
        ensure_positive_price(price)?;

        self.trades.push(Trade::new(at, quantity, price, side));
        Ok(())
    }

    /// Sum(price * quantity) / Sum(quantity) over trades stamped at or after
    /// `now - 15 minutes`. `None` when no trade falls in the window.
    pub fn volume_weighted_price(&self, now: NaiveDateTime) -> Option<f64> {
        let cutoff = now - Duration::minutes(VWAP_WINDOW_MINUTES);

        let (total_value, total_quantity) = self
            .trades
            .iter()
            .filter(|t| t.timestamp() >= cutoff)
            .fold((0.0, 0i128), |(value, qty), t| {
                (value + t.notional(), qty + i128::from(t.quantity()))
            });

        if total_quantity == 0 {
            return None;
        }
        Some(total_value / total_quantity as f64)
    }
}

fn ensure_positive_price(price: f64) -> Result<(), InvalidArgument> {
    if !price.is_finite() || price <= 0.0 {
        return Err(InvalidArgument::new("Price must be positive"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const EPS: f64 = 1e-9;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn common(last_dividend: f64) -> Stock {
        Stock::new("POP", StockKind::Common, Some(last_dividend), None, 100.0)
    }

    fn preferred(fixed: Option<f64>) -> Stock {
        Stock::new("GIN", StockKind::Preferred, Some(8.0), fixed, 100.0)
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("common".parse::<StockKind>().unwrap(), StockKind::Common);
        assert_eq!("Preferred".parse::<StockKind>().unwrap(), StockKind::Preferred);
        let err = "ordinary".parse::<StockKind>().unwrap_err();
        assert_eq!(err.reason, "unknown stock type 'ordinary'");
    }

    #[test]
    fn common_yield_is_last_dividend_over_price() {
        assert!((common(8.0).dividend_yield(100.0).unwrap() - 0.08).abs() < EPS);
        assert!((common(23.0).dividend_yield(100.0).unwrap() - 0.23).abs() < EPS);
    }

    #[test]
    fn common_yield_with_zero_dividend_is_zero() {
        assert_eq!(common(0.0).dividend_yield(10.0).unwrap(), 0.0);
    }

    #[test]
    fn common_yield_ignores_fixed_dividend() {
        let stock = Stock::new("ABC", StockKind::Common, Some(10.0), Some(0.5), 100.0);
        assert!((stock.dividend_yield(50.0).unwrap() - 0.2).abs() < EPS);
    }

    #[test]
    fn common_yield_requires_non_negative_dividend() {
        let missing = Stock::new("ABC", StockKind::Common, None, None, 100.0);
        assert!(missing.dividend_yield(100.0).is_err());
        assert!(common(-1.0).dividend_yield(100.0).is_err());
    }

    #[test]
    fn preferred_yield_uses_fixed_rate_and_par() {
        let y = preferred(Some(0.02)).dividend_yield(100.0).unwrap();
        assert!((y - 0.02).abs() < EPS);
        let y = preferred(Some(0.02)).dividend_yield(50.0).unwrap();
        assert!((y - 0.04).abs() < EPS);
    }

    #[test]
    fn preferred_yield_requires_positive_rate() {
        assert!(preferred(None).dividend_yield(100.0).is_err());
        assert!(preferred(Some(0.0)).dividend_yield(100.0).is_err());
        assert!(preferred(Some(-0.02)).dividend_yield(100.0).is_err());
    }

    #[test]
    fn yield_rejects_non_positive_price() {
        for price in [0.0, -5.0, f64::NAN] {
            let err = common(8.0).dividend_yield(price).unwrap_err();
            assert_eq!(err.reason, "Price must be positive");
            assert!(preferred(Some(0.02)).dividend_yield(price).is_err());
        }
    }

    #[test]
    fn price_is_checked_before_dividend() {
        let err = preferred(None).dividend_yield(0.0).unwrap_err();
        assert_eq!(err.reason, "Price must be positive");
    }

    #[test]
    fn pe_ratio_is_price_over_yield() {
        assert!((common(8.0).pe_ratio(100.0).unwrap().unwrap() - 1250.0).abs() < 1e-6);
        assert!((preferred(Some(0.02)).pe_ratio(100.0).unwrap().unwrap() - 5000.0).abs() < 1e-6);
        assert!((preferred(Some(0.02)).pe_ratio(50.0).unwrap().unwrap() - 1250.0).abs() < 1e-6);
    }

    #[test]
    fn pe_ratio_undefined_for_zero_yield() {
        assert_eq!(common(0.0).pe_ratio(100.0).unwrap(), None);
    }

    #[test]
    fn pe_ratio_propagates_yield_errors() {
        assert!(common(0.0).pe_ratio(0.0).is_err());
        assert!(preferred(None).pe_ratio(100.0).is_err());
    }

    #[test]
    fn record_trade_appends_in_order() {
        let mut stock = common(10.0);
        stock.record_trade(100, 50.0, TradeSide::Buy, at(10, 0, 0)).unwrap();
        stock.record_trade(50, 60.0, TradeSide::Sell, at(10, 1, 0)).unwrap();

        assert_eq!(stock.trades().len(), 2);
        let first = &stock.trades()[0];
        assert_eq!(first.quantity(), 100);
        assert!((first.price() - 50.0).abs() < EPS);
        assert_eq!(first.side(), TradeSide::Buy);
        assert_eq!(first.timestamp(), at(10, 0, 0));

        let last = stock.last_trade().unwrap();
        assert_eq!(last.quantity(), 50);
        assert_eq!(last.side(), TradeSide::Sell);
    }

    #[test]
    fn record_trade_rejects_bad_inputs_without_mutation() {
        let mut stock = common(10.0);
        stock.record_trade(1, 1.0, TradeSide::Buy, at(9, 0, 0)).unwrap();

        let cases = [(0, 50.0), (-100, 50.0), (100, 0.0), (100, -50.0), (100, f64::INFINITY)];
        for (quantity, price) in cases {
            assert!(stock.record_trade(quantity, price, TradeSide::Buy, at(9, 1, 0)).is_err());
        }
        assert_eq!(stock.trades().len(), 1);
        assert_eq!(stock.trades()[0].timestamp(), at(9, 0, 0));
    }

    #[test]
    fn vwap_over_recent_trades() {
        let mut stock = common(0.0);
        stock.record_trade(10, 100.0, TradeSide::Buy, at(10, 0, 0)).unwrap();
        stock.record_trade(5, 110.0, TradeSide::Sell, at(10, 5, 0)).unwrap();

        let vwap = stock.volume_weighted_price(at(10, 10, 0)).unwrap();
        assert!((vwap - 1550.0 / 15.0).abs() < EPS);
    }

    #[test]
    fn vwap_window_boundary_is_inclusive() {
        let mut stock = common(10.0);
        stock.record_trade(200, 60.0, TradeSide::Buy, at(10, 0, 0)).unwrap();
        stock.record_trade(100, 50.0, TradeSide::Buy, at(10, 15, 0)).unwrap();

        let vwap = stock.volume_weighted_price(at(10, 15, 0)).unwrap();
        let expected = (100.0 * 50.0 + 200.0 * 60.0) / 300.0;
        assert!((vwap - expected).abs() < EPS);
    }

    #[test]
    fn vwap_ignores_trades_older_than_window() {
        let mut stock = common(10.0);
        stock.record_trade(200, 60.0, TradeSide::Buy, at(10, 0, 0)).unwrap();
        stock.record_trade(100, 50.0, TradeSide::Buy, at(10, 10, 0)).unwrap();

        let vwap = stock.volume_weighted_price(at(10, 15, 1)).unwrap();
        assert!((vwap - 50.0).abs() < EPS);
        // The ledger itself is never pruned.
        assert_eq!(stock.trades().len(), 2);
    }

    #[test]
    fn vwap_undefined_without_recent_trades() {
        let mut stock = common(10.0);
        assert_eq!(stock.volume_weighted_price(at(10, 0, 0)), None);

        stock.record_trade(10, 100.0, TradeSide::Buy, at(9, 0, 0)).unwrap();
        assert_eq!(stock.volume_weighted_price(at(10, 0, 0)), None);
    }

    #[test]
    fn vwap_sums_quantities_beyond_i64() {
        let mut stock = common(10.0);
        stock.record_trade(i64::MAX, 100.0, TradeSide::Buy, at(10, 0, 0)).unwrap();
        stock.record_trade(i64::MAX, 110.0, TradeSide::Buy, at(10, 0, 0)).unwrap();

        let vwap = stock.volume_weighted_price(at(10, 0, 0)).unwrap();
        assert!((vwap - 105.0).abs() < 1e-9);
    }

    #[test]
    fn read_only_calls_are_repeatable() {
        let mut stock = preferred(Some(0.02));
        stock.record_trade(5, 120.0, TradeSide::Buy, at(10, 0, 0)).unwrap();
        stock.record_trade(10, 125.0, TradeSide::Sell, at(10, 1, 0)).unwrap();

        let now = at(10, 2, 0);
        assert_eq!(stock.dividend_yield(100.0), stock.dividend_yield(100.0));
        assert_eq!(stock.pe_ratio(100.0), stock.pe_ratio(100.0));
        assert_eq!(stock.volume_weighted_price(now), stock.volume_weighted_price(now));
        assert_eq!(stock.trades().len(), 2);
    }
}
