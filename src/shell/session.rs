//! The menu loop for a single stock.

use crate::domain::error::{GbceError, InvalidArgument};
use crate::domain::index::geometric_mean_index;
use crate::domain::stock::{Stock, StockKind};
use crate::domain::stock_validation::{check_fixed_dividend, check_last_dividend, check_par_value};
use crate::domain::trade::TradeSide;
use crate::ports::clock_port::ClockPort;
use crate::shell::menu::MenuChoice;
use crate::shell::prompt::Prompter;
use log::{error, info};
use std::io::{BufRead, Write};
use std::slice;

const PRICE_PROMPT: &str = "Enter the current price of the stock: ";

/// Prompt for the five stock fields, re-prompting until each is valid.
pub fn read_stock_definition<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> Result<Stock, GbceError> {
    let symbol = loop {
        let symbol = prompter.line("Enter the symbol of the stock: ")?;
        if !symbol.is_empty() {
            break symbol;
        }
        prompter.say("Symbol must not be empty.")?;
    };

    let kind: StockKind = prompter.choice(
        "Enter the type of the stock (COMMON/PREFERRED): ",
        "Invalid stock type. Please enter COMMON or PREFERRED.",
    )?;

    let (last_dividend, fixed_dividend) = match kind {
        StockKind::Common => {
            let value = read_checked(
                prompter,
                "Enter the last dividend paid by the stock (it should not be negative): ",
                check_last_dividend,
            )?;
            (Some(value), None)
        }
        StockKind::Preferred => {
            let value = read_checked(
                prompter,
                "Enter the fixed dividend rate for preferred stocks (percentage eg 0.02 for 2%, it should not be negative): ",
                check_fixed_dividend,
            )?;
            (None, Some(value))
        }
    };

    let par_value = read_checked(
        prompter,
        "Enter the par value of the stock (must be above zero): ",
        check_par_value,
    )?;

    Ok(Stock::new(symbol, kind, last_dividend, fixed_dividend, par_value))
}

fn read_checked<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    prompt: &str,
    check: fn(f64) -> Result<(), InvalidArgument>,
) -> Result<f64, GbceError> {
    loop {
        let value = prompter.float(prompt)?;
        match check(value) {
            Ok(()) => return Ok(value),
            Err(e) => prompter.say(&e.reason)?,
        }
    }
}

pub struct Session<R, W, C> {
    prompter: Prompter<R, W>,
    clock: C,
    stock: Stock,
}

impl<R: BufRead, W: Write, C: ClockPort> Session<R, W, C> {
    pub fn new(prompter: Prompter<R, W>, clock: C, stock: Stock) -> Self {
        Self {
            prompter,
            clock,
            stock,
        }
    }

    /// Run the menu until the user exits or declines to continue, then hand
    /// back the stock with whatever trades were recorded.
    pub fn run(mut self) -> Result<Stock, GbceError> {
        info!(
            "Session started for {} ({})",
            self.stock.symbol, self.stock.kind
        );

        loop {
            self.prompter.say(&MenuChoice::render())?;
            let raw = self.prompter.line("\nEnter your choice: ")?;

            match raw.parse::<MenuChoice>() {
                Ok(MenuChoice::Exit) => break,
                Ok(choice) => self.dispatch(choice)?,
                Err(()) => self
                    .prompter
                    .say("\nInvalid choice. Please enter a number between 1 and 6.")?,
            }

            let answer = self.prompter.line("\nDo you want to continue? (Y/N): ")?;
            if !answer.eq_ignore_ascii_case("y") {
                break;
            }
        }

        info!("Session ended for {}", self.stock.symbol);
        Ok(self.stock)
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<(), GbceError> {
        match choice {
            MenuChoice::DividendYield => self.dividend_yield(),
            MenuChoice::PeRatio => self.pe_ratio(),
            MenuChoice::RecordTrade => self.record_trade(),
            MenuChoice::VolumeWeightedPrice => self.volume_weighted_price(),
            MenuChoice::AllShareIndex => self.all_share_index(),
            MenuChoice::Exit => Ok(()),
        }
    }

    fn report_error(&mut self, err: &InvalidArgument) -> Result<(), GbceError> {
        error!("Error: {err}");
        self.prompter.say(&format!("\nError: {err}"))
    }

    fn dividend_yield(&mut self) -> Result<(), GbceError> {
        let price = self.prompter.float(PRICE_PROMPT)?;
        info!("User input - Operation: Calculate Dividend Yield - Price: {price}");

        match self.stock.dividend_yield(price) {
            Ok(result) => {
                self.prompter.say(&format!("\nDividend Yield: {result}"))?;
                info!("Calculation Result - Dividend Yield: {result}");
                Ok(())
            }
            Err(e) => self.report_error(&e),
        }
    }

    fn pe_ratio(&mut self) -> Result<(), GbceError> {
        let price = self.prompter.float(PRICE_PROMPT)?;
        info!("User input - Operation: Calculate P/E Ratio - Price: {price}");

        match self.stock.pe_ratio(price) {
            Ok(Some(result)) => {
                self.prompter.say(&format!("\nP/E Ratio: {result}"))?;
                info!("Calculation Result - P/E Ratio: {result}");
                Ok(())
            }
            Ok(None) => {
                let message = "P/E Ratio cannot be calculated because dividend is zero.";
                self.prompter.say(&format!("\n{message}"))?;
                info!("Calculation Result - {message}");
                Ok(())
            }
            Err(e) => self.report_error(&e),
        }
    }

    fn record_trade(&mut self) -> Result<(), GbceError> {
        let raw_quantity = self.prompter.line("Enter the quantity of shares traded: ")?;
        let quantity: i64 = match raw_quantity.parse() {
            Ok(q) => q,
            Err(_) => {
                let err = InvalidArgument::new(format!(
                    "Quantity must be a whole number, got '{raw_quantity}'"
                ));
                return self.report_error(&err);
            }
        };
        let price = self
            .prompter
            .float("Enter the price at which the trade occurred: ")?;
        let side: TradeSide = self.prompter.choice(
            "Enter whether the trade is a buy or sell (BUY/SELL): ",
            "Invalid trade indicator. Please enter BUY or SELL.",
        )?;

        let at = self.clock.now();
        match self.stock.record_trade(quantity, price, side, at) {
            Ok(()) => {
                self.prompter.say("\nTrade recorded successfully")?;
                info!(
                    "User input - Operation: Record Trade - Quantity: {quantity}, Price: {price}, Indicator: {side}"
                );
                info!("Trade recorded successfully");
                Ok(())
            }
            Err(e) => self.report_error(&e),
        }
    }

    fn volume_weighted_price(&mut self) -> Result<(), GbceError> {
        match self.stock.volume_weighted_price(self.clock.now()) {
            Some(result) => {
                self.prompter
                    .say(&format!("\nVolume-weighted Stock Price: {result}"))?;
                info!("Calculation Result - Volume-weighted Stock Price: {result}");
            }
            None => {
                self.prompter.say("\nNo trades within the last 15 minutes.")?;
                info!("No trades within the last 15 minutes.");
            }
        }
        Ok(())
    }

    fn all_share_index(&mut self) -> Result<(), GbceError> {
        match geometric_mean_index(slice::from_ref(&self.stock)) {
            Some(result) => {
                self.prompter
                    .say(&format!("\nGBCE All Share Index: {result}"))?;
                info!("Calculation Result - GBCE All Share Index: {result}");
            }
            None => {
                self.prompter.say("\nNo valid stocks with trades.")?;
                info!("No valid stocks with trades.");
            }
        }
        Ok(())
    }
}
