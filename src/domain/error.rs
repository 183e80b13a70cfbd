//! Domain error types.

/// The only failure the calculation core reports: a caller passed a value the
/// operation cannot accept. Never transient, never retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{reason}")]
pub struct InvalidArgument {
    pub reason: String,
}

impl InvalidArgument {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Top-level error type for gbce.
#[derive(Debug, thiserror::Error)]
pub enum GbceError {
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("cannot set up audit log at {path}: {reason}")]
    LogInit { path: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&GbceError> for std::process::ExitCode {
    fn from(err: &GbceError) -> Self {
        let code: u8 = match err {
            GbceError::Io(_) => 1,
            GbceError::ConfigParse { .. }
            | GbceError::ConfigMissing { .. }
            | GbceError::ConfigInvalid { .. } => 2,
            GbceError::LogInit { .. } => 3,
            GbceError::InvalidArgument(_) => 4,
        };
        std::process::ExitCode::from(code)
    }
}
