//! Port traits implemented by [`crate::adapters`].

pub mod clock_port;
pub mod config_port;
