//! Placer module for moving files to their final destinations.
//!
//! This module provides the `Placer` trait and a file system implementation
//! that moves renamed media into the library tree.
//!
//! # Features
//!
//! - Atomic moves when source and destination are on the same filesystem
//! - Automatic fallback to copy when atomic move fails
//! - Automatic parent directory creation
//! - Existing destinations are never overwritten
//! - Failed moves quarantine the file into an error directory
//!
//! # Example
//!
//! ```ignore
//! use plexifier_core::placer::{FsPlacer, Placer};
//!
//! let placer = FsPlacer::with_defaults();
//!
//! let outcome = placer
//!     .relocate(
//!         Path::new("/media/rename/Movies/heat.1995.mkv"),
//!         Path::new("/media/transcode/Movies/Heat (1995) {tmdb-949}/Heat (1995).mkv"),
//!         Path::new("/media/errors/renaming_errors"),
//!     )
//!     .await;
//! assert!(outcome.moved());
//! ```

mod config;
mod error;
mod fs_placer;
mod traits;
mod types;

pub use config::PlacerConfig;
pub use error::PlacerError;
pub use fs_placer::FsPlacer;
pub use traits::Placer;
pub use types::{MoveMethod, Relocation};
