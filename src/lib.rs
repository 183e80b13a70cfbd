//! gbce — Super Simple Stock Market calculations for the Global Beverage
//! Corporation Exchange.
//!
//! Hexagonal architecture: calculations in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`], the interactive menu in [`shell`]
//! and command-line dispatch in [`cli`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod shell;
pub mod cli;
