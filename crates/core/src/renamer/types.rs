//! Types for the renamer module.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::external_catalog::ExternalCatalogError;

/// Why a file did not reach its library destination.
#[derive(Debug, Error)]
pub enum FileError {
    /// The provider ladder was exhausted without a usable record.
    #[error("no TMDB match for '{title}'")]
    LookupFailed { title: String },

    /// The provider could not be queried.
    #[error("TMDB lookup failed: {0}")]
    Catalog(#[from] ExternalCatalogError),

    /// The primary move failed.
    #[error("move failed: {0}")]
    MoveFailed(String),
}

/// Which queue a matched file is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// Already in a deliverable container; goes to the upload folder.
    DirectUpload,
    /// Needs the transcoder; goes to the transcode folder.
    Transcode,
}

/// Final result of processing one file.
///
/// In a dry run the outcome describes what would have happened.
#[derive(Debug)]
pub enum FileOutcome {
    /// The file is at its destination.
    Moved { destination: PathBuf, route: Route },
    /// The file was moved into `error_dir`.
    Quarantined { error: FileError, error_dir: PathBuf },
    /// Quarantine also failed; the file was left where it was.
    Stranded { error: FileError },
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }

    pub fn error(&self) -> Option<&FileError> {
        match self {
            Self::Moved { .. } => None,
            Self::Quarantined { error, .. } | Self::Stranded { error } => Some(error),
        }
    }
}

/// Counters for a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub direct_upload: usize,
    pub queued_for_transcode: usize,
    /// The run stopped early on a cancellation request.
    pub cancelled: bool,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &FileOutcome) {
        self.attempted += 1;
        match outcome {
            FileOutcome::Moved { route, .. } => {
                self.succeeded += 1;
                match route {
                    Route::DirectUpload => self.direct_upload += 1,
                    Route::Transcode => self.queued_for_transcode += 1,
                }
            }
            FileOutcome::Quarantined { .. } | FileOutcome::Stranded { .. } => self.failed += 1,
        }
    }
}

/// Cooperative stop signal checked between files.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
