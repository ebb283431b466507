//! Filesystem error types.

use std::path::PathBuf;

use thiserror::Error;

/// Filesystem error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum FileError {
    #[error("path does not exist: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("not a directory: {}", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("file is not valid utf-8: {}", .path.display())]
    InvalidUtf8 { path: PathBuf },

    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FileError {
    /// Creates an I/O error, mapping `NotFound` to its own variant.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }

    /// Returns whether the path was missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
