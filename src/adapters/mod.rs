//! Concrete adapter implementations for ports.

pub mod audit_log;
pub mod file_config_adapter;
pub mod system_clock;
