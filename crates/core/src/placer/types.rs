//! Types for the placer module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How a file reached its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveMethod {
    /// Same-filesystem rename.
    Renamed,
    /// Copy followed by removal of the source.
    Copied,
    /// Source and destination were already the same path.
    Unchanged,
}

/// Outcome of relocating one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relocation {
    /// The file is at its destination.
    Moved {
        destination: PathBuf,
        method: MoveMethod,
    },
    /// The primary move failed and the file was moved into the error directory.
    Quarantined { reason: String, path: PathBuf },
    /// Both the primary move and the quarantine failed. The file is wherever
    /// the failed moves left it, normally its original path.
    Stranded { reason: String },
}

impl Relocation {
    /// Whether the primary move succeeded.
    pub fn moved(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relocation_moved_flag() {
        let moved = Relocation::Moved {
            destination: PathBuf::from("/lib/a.mkv"),
            method: MoveMethod::Renamed,
        };
        assert!(moved.moved());

        let quarantined = Relocation::Quarantined {
            reason: "exists".to_string(),
            path: PathBuf::from("/errors/a.mkv"),
        };
        assert!(!quarantined.moved());

        let stranded = Relocation::Stranded {
            reason: "denied".to_string(),
        };
        assert!(!stranded.moved());
    }
}
