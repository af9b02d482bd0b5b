#![forbid(unsafe_code)]

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("unknown palette key `{key}` (expected one of: {expected})")]
    UnknownPaletteKey { key: String, expected: String },

    #[error("cannot open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to install log subscriber: {0}")]
    Logging(String),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Process exit code for this error: 2 for usage errors, 1 otherwise.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::UnknownPaletteKey { .. } | Self::LogFile { .. } => 2,
            Self::Io(_) | Self::Logging(_) | Self::Json(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_errors_exit_with_two() {
        let err = AppError::UnknownPaletteKey {
            key: "slider".into(),
            expected: "userName, email".into(),
        };
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("`slider`"));
    }

    #[test]
    fn runtime_errors_exit_with_one() {
        let err = AppError::from(io::Error::other("boom"));
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.to_string(), "I/O error: boom");
    }
}
