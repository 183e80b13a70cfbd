#![allow(dead_code)]

use chrono::{Duration, NaiveDate, NaiveDateTime};
use gbce::domain::stock::{Stock, StockKind};
use gbce::ports::clock_port::ClockPort;
use gbce::domain::error::GbceError;
use gbce::shell::{Prompter, Session};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::Cursor;

pub fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

/// The GBCE sample table.
pub fn tea() -> Stock {
    Stock::new("TEA", StockKind::Common, Some(0.0), None, 100.0)
}

pub fn pop() -> Stock {
    Stock::new("POP", StockKind::Common, Some(8.0), None, 100.0)
}

pub fn ale() -> Stock {
    Stock::new("ALE", StockKind::Common, Some(23.0), None, 60.0)
}

pub fn gin() -> Stock {
    Stock::new("GIN", StockKind::Preferred, Some(8.0), Some(0.02), 100.0)
}

pub fn joe() -> Stock {
    Stock::new("JOE", StockKind::Common, Some(13.0), None, 250.0)
}

pub fn sample_stocks() -> Vec<Stock> {
    vec![tea(), pop(), ale(), gin(), joe()]
}

/// Always reports the same instant.
pub struct FixedClock(pub NaiveDateTime);

impl ClockPort for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Hands out queued instants in order, then keeps repeating the last one.
pub struct ScriptedClock {
    times: RefCell<VecDeque<NaiveDateTime>>,
    last: RefCell<NaiveDateTime>,
}

impl ScriptedClock {
    pub fn new(times: &[NaiveDateTime]) -> Self {
        Self {
            last: RefCell::new(times[0]),
            times: RefCell::new(times.iter().copied().collect()),
        }
    }

    /// `count` instants starting at `start`, `step` apart.
    pub fn stepping(start: NaiveDateTime, step: Duration, count: usize) -> Self {
        let times: Vec<_> = (0..count as i32).map(|i| start + step * i).collect();
        Self::new(&times)
    }
}

impl ClockPort for ScriptedClock {
    fn now(&self) -> NaiveDateTime {
        if let Some(t) = self.times.borrow_mut().pop_front() {
            *self.last.borrow_mut() = t;
        }
        *self.last.borrow()
    }
}

pub type TestPrompter = Prompter<Cursor<Vec<u8>>, Vec<u8>>;

pub fn scripted(input: &str) -> TestPrompter {
    Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
}

pub fn output_of(prompter: TestPrompter) -> String {
    String::from_utf8(prompter.into_inner().1).unwrap()
}

/// Drive a whole menu session from scripted input, returning the final stock
/// and everything printed.
pub fn run_session<C: ClockPort>(
    input: &str,
    clock: C,
    stock: Stock,
) -> (Result<Stock, GbceError>, String) {
    let mut out = Vec::new();
    let prompter = Prompter::new(Cursor::new(input.as_bytes()), &mut out);
    let result = Session::new(prompter, clock, stock).run();
    (result, String::from_utf8(out).unwrap())
}
