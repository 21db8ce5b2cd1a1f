//! Metadata matching.
//!
//! [`MatchResolver`] turns a parsed [`MediaDescriptor`](crate::media::MediaDescriptor)
//! into a [`MetadataRecord`] through a ladder of increasingly relaxed provider
//! queries:
//!
//! 1. title + year, preferring the first result released that year
//! 2. (TV only) each title variant, region qualifiers and spaces removed
//! 3. title without year, taking the provider's first result
//!
//! Matched TV episodes can then be refined with a per-episode lookup that
//! corrects numbering and fills the episode title.

mod refine;
mod resolver;
mod types;

pub use resolver::{pick_ranked, title_variants, MatchResolver};
pub use types::{EpisodeDetails, MetadataRecord, RefinementPriority};
