//! Engine error type.
//!
//! Rule-set failures are split by which file was at fault so callers can tell
//! a bad naming file apart from a bad positioning file.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid naming rules in {}: {reason}", path.display())]
    InvalidNaming { path: PathBuf, reason: String },

    #[error("invalid positioning rules in {}: {reason}", path.display())]
    InvalidPositioning { path: PathBuf, reason: String },

    #[error("parse {}: {reason}", path.display())]
    InvalidPlan { path: PathBuf, reason: String },

    #[error("read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EngineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EngineError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for either of the two rule-set failures.
    pub fn is_invalid_rules(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidNaming { .. } | EngineError::InvalidPositioning { .. }
        )
    }
}
