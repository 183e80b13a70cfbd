//! Core domain types and calculations.

pub mod error;
pub mod index;
pub mod stock;
pub mod stock_validation;
pub mod trade;
