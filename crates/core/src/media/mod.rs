//! Parsed media identity.
//!
//! A [`MediaDescriptor`] is what the parser infers from a file path before any
//! metadata lookup happens. It is provider-independent: titles are raw guesses
//! and years come from the file name or its directories.

mod types;

pub use types::{ContentType, EpisodeNumber, MediaDescriptor};
