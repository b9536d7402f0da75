//! Error types shared by every /proc reader in this crate.
//!
//! Kinds mirror how a caller is expected to react: `NotFound` is routine
//! (the process exited between enumeration and read), everything else is
//! diagnostic.

use std::io;
use std::path::{Path, PathBuf};

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{} not found (process gone or file absent)", .path.display())]
    NotFound { path: PathBuf },

    #[error("permission denied reading {}", .path.display())]
    PermissionDenied { path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed record in {}: {reason}", .path.display())]
    MalformedRecord { path: PathBuf, reason: String },

    #[error("computation error: {0}")]
    ComputationError(String),

    #[error("configuration error: {0}")]
    ConfigurationError(String),
}

impl Error {
    /// Classifies an I/O failure on `path`.
    ///
    /// ESRCH shows up when a process dies while its files are being read and
    /// is treated the same as a missing file.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        if err.raw_os_error() == Some(libc::ESRCH) {
            return Error::NotFound {
                path: path.to_path_buf(),
            };
        }
        match err.kind() {
            io::ErrorKind::NotFound => Error::NotFound {
                path: path.to_path_buf(),
            },
            io::ErrorKind::PermissionDenied => Error::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => Error::ReadError {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    pub fn malformed(path: &Path, reason: impl Into<String>) -> Self {
        Error::MalformedRecord {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// True for the routine "process vanished" case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}
