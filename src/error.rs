//! Error types for marklock.
//!
//! Uses thiserror for derive macros. Lock contention is a typed variant so a
//! caller cannot mistake losing a race for a plain `false`.

use crate::exit_codes;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for marklock operations.
#[derive(Error, Debug)]
pub enum MarklockError {
    /// The lock name is empty or whitespace only.
    #[error("invalid lock identifier '{0}': must contain a non-whitespace character")]
    InvalidLockIdentifier(String),

    /// The marker file for this lock already exists.
    #[error("lock '{id}' is already held (marker: {})", path.display())]
    AlreadyLocked { id: String, path: PathBuf },

    /// A coordinator operation ran before `init`.
    #[error("{0} failed: lock coordinator is not initialized")]
    NotInitialized(&'static str),

    /// An underlying I/O call failed.
    #[error("filesystem error at '{}': {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Invalid configuration or command usage.
    #[error("{0}")]
    UserError(String),
}

impl MarklockError {
    /// Wrap an I/O error with the path it happened on.
    pub fn filesystem(path: impl Into<PathBuf>, source: io::Error) -> Self {
        MarklockError::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            MarklockError::InvalidLockIdentifier(_) => exit_codes::USER_ERROR,
            MarklockError::AlreadyLocked { .. } => exit_codes::LOCK_HELD,
            MarklockError::NotInitialized(_) => exit_codes::NOT_INITIALIZED,
            MarklockError::Filesystem { .. } => exit_codes::FILESYSTEM_FAILURE,
            MarklockError::UserError(_) => exit_codes::USER_ERROR,
        }
    }

    /// True when this error reports contention on an existing marker.
    pub fn is_already_locked(&self) -> bool {
        matches!(self, MarklockError::AlreadyLocked { .. })
    }
}

/// Result type alias for marklock operations.
pub type Result<T> = std::result::Result<T, MarklockError>;
