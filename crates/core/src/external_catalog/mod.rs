//! Metadata lookups against TMDB.
//!
//! The matcher depends only on [`ExternalCatalog`]; [`TmdbClient`] is the
//! production implementation.

mod tmdb;
mod types;

pub use tmdb::{TmdbClient, TmdbConfig, DEFAULT_TMDB_BASE_URL};
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// A catalog lookup that failed outright, as opposed to finding nothing.
#[derive(Debug, Error)]
pub enum ExternalCatalogError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// A record that must exist (a series by ID) is missing.
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Missing or rejected API key.
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// Movie and series lookups used to identify a file.
///
/// Search hits come back in the provider's relevance order, which the
/// resolver falls back on when no year disambiguates.
#[async_trait]
pub trait ExternalCatalog: Send + Sync {
    /// Search for movies by query, optionally narrowed to a release year.
    async fn search_movies(
        &self,
        query: &str,
        year: Option<u32>,
    ) -> Result<Vec<TmdbMovie>, ExternalCatalogError>;

    /// Search for TV series by query, optionally narrowed to a first-air year.
    async fn search_tv(
        &self,
        query: &str,
        year: Option<u32>,
    ) -> Result<Vec<TmdbSeries>, ExternalCatalogError>;

    /// Get a specific TV series by TMDB ID, including its season list.
    async fn get_tv(&self, tmdb_id: u32) -> Result<TmdbSeries, ExternalCatalogError>;

    /// Get a specific TV season, or `None` if the series has no such season.
    async fn get_tv_season(
        &self,
        tmdb_id: u32,
        season: u32,
    ) -> Result<Option<TmdbSeason>, ExternalCatalogError>;

    /// Get a single episode, or `None` if it does not exist.
    async fn get_episode(
        &self,
        tmdb_id: u32,
        season: u32,
        episode: u32,
    ) -> Result<Option<TmdbEpisode>, ExternalCatalogError>;
}
