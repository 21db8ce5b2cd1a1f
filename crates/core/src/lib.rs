//! Plex-style media renaming.
//!
//! A file moves through four stages: [`parser`] infers what it is from its
//! name and folders, [`matcher`] confirms that identity against TMDB,
//! [`formatter`] computes the canonical library path and [`placer`] moves it
//! there or into quarantine. [`renamer`] runs the stages over a queue.

pub mod config;
pub mod external_catalog;
pub mod formatter;
pub mod matcher;
pub mod media;
pub mod parser;
pub mod placer;
pub mod renamer;
pub mod scanner;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, LogLevel,
    SanitizedConfig,
};
pub use external_catalog::{ExternalCatalog, ExternalCatalogError, TmdbClient, TmdbConfig};
pub use formatter::{format_destination, NamingOptions};
pub use matcher::{MatchResolver, MetadataRecord, RefinementPriority};
pub use media::{ContentType, EpisodeNumber, MediaDescriptor};
pub use parser::{parse_media_file, parse_media_file_within};
pub use placer::{FsPlacer, Placer, PlacerConfig, PlacerError, Relocation};
pub use renamer::{
    setup_directories, CancellationFlag, FileError, FileOutcome, MediaRenamer, Route, RunSummary,
};
pub use scanner::scan_media_files;
