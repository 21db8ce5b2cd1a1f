//! Trait definitions for the placer module.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{error, warn};

use super::error::PlacerError;
use super::types::{MoveMethod, Relocation};

/// Moves files into the library, quarantining those that cannot be moved.
#[async_trait]
pub trait Placer: Send + Sync {
    /// Moves `source` to `destination`, creating parent directories.
    ///
    /// Never overwrites an existing destination.
    async fn move_file(&self, source: &Path, destination: &Path)
        -> Result<MoveMethod, PlacerError>;

    /// Moves `source` into `error_dir`, keeping its file name. Returns the
    /// quarantined path.
    async fn quarantine(&self, source: &Path, error_dir: &Path) -> Result<PathBuf, PlacerError>;

    /// Moves `source` to `destination`, falling back to `error_dir` on failure.
    ///
    /// Never panics or returns an error; the outcome says where the file went.
    async fn relocate(&self, source: &Path, destination: &Path, error_dir: &Path) -> Relocation {
        let err = match self.move_file(source, destination).await {
            Ok(method) => {
                return Relocation::Moved {
                    destination: destination.to_path_buf(),
                    method,
                }
            }
            Err(err) => err,
        };

        let reason = err.to_string();
        warn!(
            source = %source.display(),
            destination = %destination.display(),
            error = %reason,
            "Move failed, quarantining file"
        );

        if !err.source_intact() {
            return Relocation::Stranded { reason };
        }

        match self.quarantine(source, error_dir).await {
            Ok(path) => Relocation::Quarantined { reason, path },
            Err(quarantine_err) => {
                error!(
                    source = %source.display(),
                    error_dir = %error_dir.display(),
                    error = %quarantine_err,
                    "Quarantine failed, file left in place"
                );
                Relocation::Stranded {
                    reason: format!("{}; quarantine failed: {}", reason, quarantine_err),
                }
            }
        }
    }
}
