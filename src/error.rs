//! Error type for the rename engine.
//!
//! Scan errors abort before anything is mutated. Errors from the content and rename
//! stages arrive after some files may already have changed; nothing is rolled back.

use std::io;
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum RenameError {
    /// Malformed root, exclusion or replacement arguments.
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Access denied: {}", path.display())]
    AccessDenied { path: PathBuf, source: io::Error },

    /// Destination of a rename already exists.
    #[error("Cannot rename {} to {}: destination already exists", from.display(), to.display())]
    RenameConflict { from: PathBuf, to: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("{count} rewrite worker(s) panicked")]
    WorkerPanicked { count: usize },

    #[error("Run cancelled by user")]
    Cancelled,
}

impl RenameError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Classify an I/O error raised while touching `path`.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound {
                path: path.to_path_buf(),
            },
            io::ErrorKind::PermissionDenied => Self::AccessDenied {
                path: path.to_path_buf(),
                source: err,
            },
            _ => Self::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    /// Path the error is about, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::NotFound { path } | Self::AccessDenied { path, .. } | Self::Io { path, .. } => {
                Some(path)
            }
            Self::RenameConflict { from, .. } => Some(from),
            Self::InvalidInput { .. } | Self::WorkerPanicked { .. } | Self::Cancelled => None,
        }
    }
}

/// Extension for attaching a path to `io::Result`.
pub(crate) trait IoResultExt<T> {
    fn at_path(self, path: &Path) -> Result<T, RenameError>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn at_path(self, path: &Path) -> Result<T, RenameError> {
        self.map_err(|e| RenameError::from_io(path, e))
    }
}
