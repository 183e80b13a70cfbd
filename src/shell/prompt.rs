//! Line-oriented prompting over any `BufRead`/`Write` pair.

use crate::domain::error::GbceError;
use log::info;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

pub const INVALID_NUMBER: &str = "Invalid input. Please enter a valid number.";

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `prompt`, read one line and return it trimmed. Every answer is
    /// written to the audit log. Closed input is an `UnexpectedEof` error.
    pub fn line(&mut self, prompt: &str) -> Result<String, GbceError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed").into());
        }

        let value = buf.trim().to_string();
        info!("User input: {} - {}", prompt.trim(), value);
        Ok(value)
    }

    /// Re-prompt until the answer parses as a finite number.
    pub fn float(&mut self, prompt: &str) -> Result<f64, GbceError> {
        loop {
            match self.line(prompt)?.parse::<f64>() {
                Ok(v) if v.is_finite() => return Ok(v),
                _ => self.say(INVALID_NUMBER)?,
            }
        }
    }

    /// Re-prompt with `invalid` until the answer parses as `T`.
    pub fn choice<T: FromStr>(&mut self, prompt: &str, invalid: &str) -> Result<T, GbceError> {
        loop {
            match self.line(prompt)?.parse::<T>() {
                Ok(v) => return Ok(v),
                Err(_) => self.say(invalid)?,
            }
        }
    }

    pub fn say(&mut self, message: &str) -> Result<(), GbceError> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}
