//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::audit_log::{self, AuditLogConfig};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::system_clock::SystemClock;
use crate::domain::error::GbceError;
use crate::domain::stock::Stock;
use crate::domain::stock_validation::{build_stock, stock_configured};
use crate::ports::config_port::ConfigPort;
use crate::shell::{read_stock_definition, Prompter, Session};

#[derive(Parser, Debug)]
#[command(name = "gbce", about = "Super Simple Stock Market calculator")]
pub struct Cli {
    /// INI file with optional [log] and [stock] sections
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the interactive menu
    Shell,
    /// Validate the [stock] section of a config file
    Validate,
    /// Print dividend yield and P/E ratio for the configured stock
    Quote {
        #[arg(short, long, allow_negative_numbers = true)]
        price: f64,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Shell => run_shell(cli.config.as_ref()),
        Command::Validate => run_validate(cli.config.as_ref()),
        Command::Quote { price } => run_quote(cli.config.as_ref(), price, &mut io::stdout()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, GbceError> {
    FileConfigAdapter::from_file(path).map_err(|e| GbceError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn require_config(path: Option<&PathBuf>, command: &str) -> Result<FileConfigAdapter, GbceError> {
    match path {
        Some(p) => load_config(p),
        None => Err(GbceError::ConfigParse {
            file: "<none>".to_string(),
            reason: format!("--config is required for {command}"),
        }),
    }
}

fn run_shell(config_path: Option<&PathBuf>) -> Result<(), GbceError> {
    let config = config_path.map(load_config).transpose()?;

    let log_config = match &config {
        Some(c) => AuditLogConfig::from_config(c)?,
        None => AuditLogConfig::default(),
    };
    audit_log::init(&log_config)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut prompter = Prompter::new(stdin.lock(), stdout.lock());

    let stock = resolve_stock(config.as_ref().map(|c| c as &dyn ConfigPort), &mut prompter)?;
    let stock = Session::new(prompter, SystemClock, stock).run()?;

    eprintln!(
        "Session finished: {} trade(s) recorded for {}",
        stock.trades().len(),
        stock.symbol
    );
    Ok(())
}

/// Use the configured stock when the config has one, otherwise prompt.
pub fn resolve_stock<R: BufRead, W: Write>(
    config: Option<&dyn ConfigPort>,
    prompter: &mut Prompter<R, W>,
) -> Result<Stock, GbceError> {
    match config {
        Some(c) if stock_configured(c) => {
            let stock = build_stock(c)?;
            prompter.say(&format!("Using configured stock {} ({})", stock.symbol, stock.kind))?;
            Ok(stock)
        }
        _ => read_stock_definition(prompter),
    }
}

/// Validate `[stock]` and print the parsed definition to stderr.
pub fn run_validate(config_path: Option<&PathBuf>) -> Result<(), GbceError> {
    let config = require_config(config_path, "validate")?;
    eprintln!("Validating stock definition");

    let stock = build_stock(&config)?;
    eprintln!("  symbol:         {}", stock.symbol);
    eprintln!("  type:           {}", stock.kind);
    if let Some(d) = stock.last_dividend {
        eprintln!("  last dividend:  {d}");
    }
    if let Some(r) = stock.fixed_dividend {
        eprintln!("  fixed dividend: {r}");
    }
    eprintln!("  par value:      {}", stock.par_value);
    eprintln!("\nStock definition is valid.");
    Ok(())
}

/// Non-interactive dividend yield and P/E for the `[stock]` section.
pub fn run_quote(
    config_path: Option<&PathBuf>,
    price: f64,
    out: &mut dyn Write,
) -> Result<(), GbceError> {
    let config = require_config(config_path, "quote")?;
    let stock = build_stock(&config)?;
    quote(&stock, price, out)
}

pub fn quote(stock: &Stock, price: f64, out: &mut dyn Write) -> Result<(), GbceError> {
    let dividend_yield = stock.dividend_yield(price)?;
    writeln!(out, "{} @ {price}", stock.symbol)?;
    writeln!(out, "Dividend Yield: {dividend_yield}")?;
    match stock.pe_ratio(price)? {
        Some(pe) => writeln!(out, "P/E Ratio: {pe}")?,
        None => writeln!(out, "P/E Ratio: undefined (dividend is zero)")?,
    }
    Ok(())
}
