//! Time source port trait.

use chrono::NaiveDateTime;

/// Supplies "now" for trade stamping and the volume-weighted price window.
pub trait ClockPort {
    fn now(&self) -> NaiveDateTime;
}
