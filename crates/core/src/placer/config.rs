//! Tuning for [`FsPlacer`](super::FsPlacer).

use serde::{Deserialize, Serialize};

const DEFAULT_COPY_BUFFER: usize = 8 * 1024 * 1024;

/// How files are moved on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacerConfig {
    /// Copy buffer used when a rename crosses filesystems.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,

    /// Try `rename` first. When false every move is copy + delete.
    #[serde(default = "enabled")]
    pub prefer_atomic_moves: bool,

    /// Create the destination's missing parent folders.
    #[serde(default = "enabled")]
    pub create_parents: bool,
}

fn default_buffer_size() -> usize {
    DEFAULT_COPY_BUFFER
}

fn enabled() -> bool {
    true
}

impl Default for PlacerConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_COPY_BUFFER,
            prefer_atomic_moves: true,
            create_parents: true,
        }
    }
}

impl PlacerConfig {
    pub fn with_atomic_moves(mut self, enabled: bool) -> Self {
        self.prefer_atomic_moves = enabled;
        self
    }

    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(1);
        self
    }

    pub fn with_create_parents(mut self, enabled: bool) -> Self {
        self.create_parents = enabled;
        self
    }
}
