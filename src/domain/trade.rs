//! Trade ledger entries.

use crate::domain::error::InvalidArgument;
use chrono::NaiveDateTime;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Buy => "BUY",
            TradeSide::Sell => "SELL",
        }
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeSide {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BUY" => Ok(TradeSide::Buy),
            "SELL" => Ok(TradeSide::Sell),
            _ => Err(InvalidArgument::new("Invalid trade indicator")),
        }
    }
}

/// A recorded trade. Only [`Stock::record_trade`](super::stock::Stock::record_trade)
/// creates these, and nothing mutates them afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    timestamp: NaiveDateTime,
    quantity: i64,
    price: f64,
    side: TradeSide,
}

impl Trade {
    pub(crate) fn new(timestamp: NaiveDateTime, quantity: i64, price: f64, side: TradeSide) -> Self {
        Self {
            timestamp,
            quantity,
            price,
            side,
        }
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn side(&self) -> TradeSide {
        self.side
    }

    /// price * quantity
    pub fn notional(&self) -> f64 {
        self.price * self.quantity as f64
    }
}
