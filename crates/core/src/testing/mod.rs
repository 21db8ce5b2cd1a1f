//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the external service traits,
//! so the rename pipeline can be exercised end to end without network access
//! or real file moves.
//!
//! # Example
//!
//! ```rust,ignore
//! use plexifier_core::testing::{fixtures, MockExternalCatalog, MockPlacer};
//!
//! let catalog = MockExternalCatalog::new();
//! let placer = MockPlacer::new();
//!
//! // Configure mock responses
//! catalog.add_movie(fixtures::tmdb_movie(949, "Heat", 1995)).await;
//! placer.set_fail_moves(true).await;
//! ```

mod mock_external_catalog;
mod mock_placer;

pub use mock_external_catalog::{MockExternalCatalog, RecordedCatalogQuery};
pub use mock_placer::{MockPlacer, RecordedMove};

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::path::{Path, PathBuf};

    use crate::config::Config;
    use crate::external_catalog::{TmdbEpisode, TmdbMovie, TmdbSeason, TmdbSeries};

    /// Create a test TMDB movie.
    pub fn tmdb_movie(id: u32, title: &str, year: u32) -> TmdbMovie {
        TmdbMovie {
            id,
            title: title.to_string(),
            original_title: None,
            release_date: Some(format!("{}-06-15", year)),
            overview: Some(format!("A movie about {}.", title.to_lowercase())),
        }
    }

    /// Create a test TMDB TV series. Seasons are filled in from registered
    /// seasons by the mock catalog.
    pub fn tmdb_series(id: u32, name: &str, first_air_year: u32) -> TmdbSeries {
        TmdbSeries {
            id,
            name: name.to_string(),
            original_name: None,
            first_air_date: Some(format!("{}-01-10", first_air_year)),
            overview: None,
            seasons: vec![],
        }
    }

    /// Create a test TMDB season whose episodes are numbered from 1.
    pub fn tmdb_season(season_number: u32, episode_names: &[&str]) -> TmdbSeason {
        TmdbSeason {
            season_number,
            name: Some(format!("Season {}", season_number)),
            episodes: episode_names
                .iter()
                .zip(1u32..)
                .map(|(name, episode_number)| TmdbEpisode {
                    season_number,
                    episode_number,
                    name: name.to_string(),
                    air_date: None,
                })
                .collect(),
        }
    }

    /// A configuration rooted at `media_base` with a placeholder API key.
    pub fn config(media_base: &Path) -> Config {
        let mut config = Config::default();
        config.tmdb.api_key = "test-key".to_string();
        config.library.media_base = media_base.to_path_buf();
        config
    }

    /// Writes a small file at `root/relative`, creating parent directories.
    pub fn touch(root: &Path, relative: &str) -> PathBuf {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create fixture directory");
        }
        std::fs::write(&path, b"fixture").expect("write fixture file");
        path
    }
}
