//! Error types for the placer module.

use std::path::PathBuf;
use thiserror::Error;

/// Why a single file could not be moved.
#[derive(Debug, Error)]
pub enum PlacerError {
    #[error("Source file not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// Files are never overwritten.
    #[error("Destination already exists: {path}")]
    DestinationExists { path: PathBuf },

    #[error("Failed to create directory {path}: {cause}")]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        cause: std::io::Error,
    },

    /// The cross-device copy failed. The partial destination was removed.
    #[error("Failed to copy {from} to {to}: {cause}")]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        cause: std::io::Error,
    },

    #[error("Failed to rename {from} to {to}: {cause}")]
    MoveFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        cause: std::io::Error,
    },

    /// The copy landed but the original could not be deleted, so the file
    /// now exists twice.
    #[error("Copied but could not remove source {path}: {cause}")]
    CleanupFailed {
        path: PathBuf,
        #[source]
        cause: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlacerError {
    pub fn copy_failed(from: PathBuf, to: PathBuf, cause: std::io::Error) -> Self {
        Self::CopyFailed { from, to, cause }
    }

    pub fn move_failed(from: PathBuf, to: PathBuf, cause: std::io::Error) -> Self {
        Self::MoveFailed { from, to, cause }
    }

    /// Whether the source file is known to still be at its original path.
    ///
    /// Quarantine is only attempted when this holds.
    pub fn source_intact(&self) -> bool {
        !matches!(self, Self::SourceNotFound { .. } | Self::CleanupFailed { .. })
    }
}
