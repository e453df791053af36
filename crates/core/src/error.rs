//! Error types for s3upload
//!
//! Every error is terminal for a run: nothing in the core retries.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for s3upload operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a sync run
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or invalid configuration, detected before any work is done
    #[error("Configuration error: {0}")]
    Config(String),

    /// Credentials could not be resolved or were rejected by the store
    #[error("Authentication error: {0}")]
    Auth(String),

    /// A listing or upload request failed
    #[error("Network error: {0}")]
    Network(String),

    /// A local directory could not be listed or a file could not be read
    #[error("Filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Build a filesystem error for `path`
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// True for failures talking to the object store, including credentials
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Auth(_) | Error::Network(_))
    }
}
