//! Wall-clock adapter for [`ClockPort`].

use crate::ports::clock_port::ClockPort;
use chrono::{Local, NaiveDateTime};

/// Local wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
