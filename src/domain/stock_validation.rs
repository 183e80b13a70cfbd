//! Stock definition validation.
//!
//! The same field rules apply whether a stock is typed in at the prompt or
//! read from the `[stock]` section of a config file.

use crate::domain::error::{GbceError, InvalidArgument};
use crate::domain::stock::{Stock, StockKind};
use crate::ports::config_port::ConfigPort;

const SECTION: &str = "stock";

pub fn check_last_dividend(value: f64) -> Result<(), InvalidArgument> {
    if !value.is_finite() || value < 0.0 {
        return Err(InvalidArgument::new("Last dividend must not be negative."));
    }
    Ok(())
}

pub fn check_fixed_dividend(value: f64) -> Result<(), InvalidArgument> {
    if !value.is_finite() || value < 0.0 {
        return Err(InvalidArgument::new("Fixed dividend must not be negative."));
    }
    Ok(())
}

pub fn check_par_value(value: f64) -> Result<(), InvalidArgument> {
    if !value.is_finite() || value <= 0.0 {
        return Err(InvalidArgument::new("Par value must be above zero."));
    }
    Ok(())
}

/// True when the config carries a stock definition at all.
pub fn stock_configured(config: &dyn ConfigPort) -> bool {
    config.get_string(SECTION, "symbol").is_some() || config.get_string(SECTION, "type").is_some()
}

/// Build a [`Stock`] from the `[stock]` section. Only the dividend field that
/// matters for the stock's kind is required; the other is carried through
/// as-is if present.
pub fn build_stock(config: &dyn ConfigPort) -> Result<Stock, GbceError> {
    let symbol = require(config, "symbol")?;
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err(invalid("symbol", "symbol must not be empty"));
    }

    let kind: StockKind = require(config, "type")?
        .parse()
        .map_err(|e: InvalidArgument| invalid("type", &e.reason))?;

    let mut last_dividend = parse_number(config, "last_dividend")?;
    let mut fixed_dividend = parse_number(config, "fixed_dividend")?;

    match kind {
        StockKind::Common => {
            let value = last_dividend.ok_or_else(|| missing("last_dividend"))?;
            check_last_dividend(value).map_err(|e| invalid("last_dividend", &e.reason))?;
            fixed_dividend = fixed_dividend.filter(|v| v.is_finite());
        }
        StockKind::Preferred => {
            let value = fixed_dividend.ok_or_else(|| missing("fixed_dividend"))?;
            check_fixed_dividend(value).map_err(|e| invalid("fixed_dividend", &e.reason))?;
            last_dividend = last_dividend.filter(|v| v.is_finite());
        }
    }

    let par_value = parse_number(config, "par_value")?.ok_or_else(|| missing("par_value"))?;
    check_par_value(par_value).map_err(|e| invalid("par_value", &e.reason))?;

    Ok(Stock::new(symbol, kind, last_dividend, fixed_dividend, par_value))
}

fn require(config: &dyn ConfigPort, key: &str) -> Result<String, GbceError> {
    config.get_string(SECTION, key).ok_or_else(|| missing(key))
}

fn parse_number(config: &dyn ConfigPort, key: &str) -> Result<Option<f64>, GbceError> {
    match config.get_string(SECTION, key) {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| invalid(key, &format!("{key} must be a number"))),
    }
}

fn missing(key: &str) -> GbceError {
    GbceError::ConfigMissing {
        section: SECTION.to_string(),
        key: key.to_string(),
    }
}

fn invalid(key: &str, reason: &str) -> GbceError {
    GbceError::ConfigInvalid {
        section: SECTION.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
