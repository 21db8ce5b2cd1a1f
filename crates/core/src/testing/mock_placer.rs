//! Mock placer for testing.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::placer::{MoveMethod, Placer, PlacerError};

/// A recorded move for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedMove {
    /// The file that was asked to move.
    pub source: PathBuf,
    /// Where it was asked to go.
    pub destination: PathBuf,
    /// Whether this was a quarantine move.
    pub quarantine: bool,
    /// Whether the move succeeded.
    pub success: bool,
}

/// Mock implementation of the Placer trait.
///
/// Performs no I/O. Provides controllable behavior for testing:
/// - Track moves and quarantines for assertions
/// - Fail the next move, every primary move, or every quarantine
///
/// # Example
///
/// ```rust,ignore
/// use plexifier_core::testing::MockPlacer;
///
/// let placer = MockPlacer::new();
/// placer.set_fail_moves(true).await;
///
/// let outcome = placer.relocate(src, dst, errors).await;
/// assert!(!outcome.moved());
/// assert_eq!(placer.recorded_moves().await.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockPlacer {
    /// Recorded moves.
    moves: Arc<RwLock<Vec<RecordedMove>>>,
    /// If set, the next primary move will fail with this error.
    next_error: Arc<RwLock<Option<PlacerError>>>,
    /// Whether every primary move fails.
    fail_moves: Arc<RwLock<bool>>,
    /// Whether every quarantine fails.
    fail_quarantine: Arc<RwLock<bool>>,
}

impl MockPlacer {
    /// Create a new mock placer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded moves.
    pub async fn recorded_moves(&self) -> Vec<RecordedMove> {
        self.moves.read().await.clone()
    }

    /// Get successful primary moves only.
    pub async fn placed(&self) -> Vec<RecordedMove> {
        self.moves
            .read()
            .await
            .iter()
            .filter(|m| m.success && !m.quarantine)
            .cloned()
            .collect()
    }

    /// Get the number of moves attempted.
    pub async fn move_count(&self) -> usize {
        self.moves.read().await.len()
    }

    /// Configure the next primary move to fail with the given error.
    pub async fn set_next_error(&self, error: PlacerError) {
        *self.next_error.write().await = Some(error);
    }

    /// Make every primary move fail.
    pub async fn set_fail_moves(&self, fail: bool) {
        *self.fail_moves.write().await = fail;
    }

    /// Make every quarantine fail.
    pub async fn set_fail_quarantine(&self, fail: bool) {
        *self.fail_quarantine.write().await = fail;
    }

    async fn record(&self, source: &Path, destination: &Path, quarantine: bool, success: bool) {
        self.moves.write().await.push(RecordedMove {
            source: source.to_path_buf(),
            destination: destination.to_path_buf(),
            quarantine,
            success,
        });
    }
}

fn simulated_failure(source: &Path, destination: &Path) -> PlacerError {
    PlacerError::move_failed(
        source.to_path_buf(),
        destination.to_path_buf(),
        std::io::Error::new(std::io::ErrorKind::PermissionDenied, "simulated failure"),
    )
}

#[async_trait]
impl Placer for MockPlacer {
    async fn move_file(
        &self,
        source: &Path,
        destination: &Path,
    ) -> Result<MoveMethod, PlacerError> {
        let injected = self.next_error.write().await.take();
        let error = match injected {
            Some(err) => Some(err),
            None if *self.fail_moves.read().await => Some(simulated_failure(source, destination)),
            None => None,
        };

        self.record(source, destination, false, error.is_none()).await;
        match error {
            Some(err) => Err(err),
            None => Ok(MoveMethod::Renamed),
        }
    }

    async fn quarantine(&self, source: &Path, error_dir: &Path) -> Result<PathBuf, PlacerError> {
        let target = error_dir.join(source.file_name().unwrap_or_default());
        let fail = *self.fail_quarantine.read().await;

        self.record(source, &target, true, !fail).await;
        if fail {
            return Err(simulated_failure(source, &target));
        }
        Ok(target)
    }
}
