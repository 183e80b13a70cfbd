//! Audit log of shell inputs and results.
//!
//! Installs an `env_logger` backend for the `log` facade that appends
//! `<timestamp> - <LEVEL> - <message>` lines to a file. `RUST_LOG`, when set,
//! overrides the configured level.

use crate::domain::error::GbceError;
use crate::ports::config_port::ConfigPort;
use log::LevelFilter;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

pub const DEFAULT_LOG_FILE: &str = "logs/user_interaction.log";

#[derive(Debug, Clone, PartialEq)]
pub struct AuditLogConfig {
    pub path: PathBuf,
    pub level: LevelFilter,
    /// Keep earlier sessions' lines instead of truncating on start.
    pub append: bool,
}

impl Default for AuditLogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_LOG_FILE),
            level: LevelFilter::Info,
            append: true,
        }
    }
}

impl AuditLogConfig {
    /// Read the `[log]` section; every key is optional.
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, GbceError> {
        let defaults = Self::default();

        let path = config
            .get_string("log", "file")
            .filter(|s| !s.trim().is_empty())
            .map(|s| PathBuf::from(s.trim()))
            .unwrap_or(defaults.path);

        let level = match config.get_string("log", "level") {
            Some(s) => s
                .trim()
                .parse::<LevelFilter>()
                .map_err(|_| GbceError::ConfigInvalid {
                    section: "log".to_string(),
                    key: "level".to_string(),
                    reason: format!("unknown log level '{}'", s.trim()),
                })?,
            None => defaults.level,
        };

        Ok(Self {
            path,
            level,
            append: config.get_bool("log", "append", defaults.append),
        })
    }
}

/// Open the log file (creating its directory) and install the global logger.
pub fn init(config: &AuditLogConfig) -> Result<(), GbceError> {
    let log_init = |reason: String| GbceError::LogInit {
        path: config.path.display().to_string(),
        reason,
    };

    if let Some(parent) = config.path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| log_init(e.to_string()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(config.append)
        .truncate(!config.append)
        .open(&config.path)
        .map_err(|e| log_init(e.to_string()))?;

    env_logger::Builder::new()
        .filter_level(config.level)
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}",
                buf.timestamp_millis(),
                record.level(),
                record.args()
            )
        })
        .try_init()
        .map_err(|e| log_init(e.to_string()))
}
