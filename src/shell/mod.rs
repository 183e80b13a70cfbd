//! Interactive menu shell around the calculation core.
//!
//! Everything user-facing lives here: prompting, re-prompting on bad input,
//! printing results and writing the audit log. The domain layer is called
//! with already-parsed values only.

pub mod menu;
pub mod prompt;
pub mod session;

pub use prompt::Prompter;
pub use session::{read_stock_definition, Session};
