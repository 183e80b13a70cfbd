//! Main menu entries.

use std::fmt::Write as _;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    DividendYield,
    PeRatio,
    RecordTrade,
    VolumeWeightedPrice,
    AllShareIndex,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 6] = [
        MenuChoice::DividendYield,
        MenuChoice::PeRatio,
        MenuChoice::RecordTrade,
        MenuChoice::VolumeWeightedPrice,
        MenuChoice::AllShareIndex,
        MenuChoice::Exit,
    ];

    pub fn key(&self) -> u8 {
        match self {
            MenuChoice::DividendYield => 1,
            MenuChoice::PeRatio => 2,
            MenuChoice::RecordTrade => 3,
            MenuChoice::VolumeWeightedPrice => 4,
            MenuChoice::AllShareIndex => 5,
            MenuChoice::Exit => 6,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::DividendYield => "Calculate Dividend Yield",
            MenuChoice::PeRatio => "Calculate P/E Ratio",
            MenuChoice::RecordTrade => "Record a Trade",
            MenuChoice::VolumeWeightedPrice => "Calculate Volume-weighted Stock Price",
            MenuChoice::AllShareIndex => "Calculate GBCE All Share Index",
            MenuChoice::Exit => "Exit",
        }
    }

    /// The menu block printed before each choice.
    pub fn render() -> String {
        let mut text = String::from("\nSelect an operation:\n");
        for choice in Self::ALL {
            let _ = writeln!(text, "{}. {}", choice.key(), choice.label());
        }
        text
    }
}

impl FromStr for MenuChoice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.key().to_string() == raw)
            .ok_or(())
    }
}
