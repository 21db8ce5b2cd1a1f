//! HTTP client for TMDB v3.
//!
//! The key travels as the `api_key` query parameter. A 429 surfaces as
//! [`ExternalCatalogError::RateLimitExceeded`] and is not retried.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{TmdbEpisode, TmdbMovie, TmdbSeason, TmdbSeries};
use super::{ExternalCatalog, ExternalCatalogError};

/// Default TMDB API endpoint.
pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TmdbConfig {
    #[serde(default)]
    pub api_key: String,
    /// Overrides [`DEFAULT_TMDB_BASE_URL`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    /// Fails without an API key.
    pub fn new(config: TmdbConfig) -> Result<Self, ExternalCatalogError> {
        if config.api_key.is_empty() {
            return Err(ExternalCatalogError::NotConfigured(
                "TMDB API key is required".to_string(),
            ));
        }

        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| DEFAULT_TMDB_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key,
        })
    }

    /// Issues a GET and decodes the body. A 404 yields `Ok(None)`.
    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
        what: &str,
    ) -> Result<Option<T>, ExternalCatalogError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", &self.api_key)])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(ExternalCatalogError::NotConfigured(
                "Invalid TMDB API key".to_string(),
            ));
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ExternalCatalogError::RateLimitExceeded);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExternalCatalogError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let decoded = response.json().await.map_err(|e| {
            ExternalCatalogError::ParseError(format!("Failed to parse {} response: {}", what, e))
        })?;

        Ok(Some(decoded))
    }
}

#[derive(Debug, Deserialize)]
struct SearchPage<T> {
    #[serde(default = "Vec::new")]
    results: Vec<T>,
}

#[async_trait]
impl ExternalCatalog for TmdbClient {
    async fn search_movies(
        &self,
        query: &str,
        year: Option<u32>,
    ) -> Result<Vec<TmdbMovie>, ExternalCatalogError> {
        debug!(query, ?year, "Searching TMDB movies");

        let mut params = vec![("query", query.to_string())];
        params.extend(year.map(|y| ("year", y.to_string())));

        let page: SearchPage<TmdbMovie> = self
            .fetch("/search/movie", &params, "movie search")
            .await?
            .ok_or_else(|| ExternalCatalogError::NotFound("movie search endpoint".to_string()))?;

        Ok(page.results)
    }

    async fn search_tv(
        &self,
        query: &str,
        year: Option<u32>,
    ) -> Result<Vec<TmdbSeries>, ExternalCatalogError> {
        debug!(query, ?year, "Searching TMDB series");

        let mut params = vec![("query", query.to_string())];
        params.extend(year.map(|y| ("first_air_date_year", y.to_string())));

        let page: SearchPage<TmdbSeries> = self
            .fetch("/search/tv", &params, "TV search")
            .await?
            .ok_or_else(|| ExternalCatalogError::NotFound("TV search endpoint".to_string()))?;

        Ok(page.results)
    }

    async fn get_tv(&self, tmdb_id: u32) -> Result<TmdbSeries, ExternalCatalogError> {
        debug!(tmdb_id, "Fetching TMDB series");

        self.fetch(&format!("/tv/{}", tmdb_id), &[], "TV")
            .await?
            .ok_or_else(|| ExternalCatalogError::NotFound(format!("TV series ID {}", tmdb_id)))
    }

    async fn get_tv_season(
        &self,
        tmdb_id: u32,
        season: u32,
    ) -> Result<Option<TmdbSeason>, ExternalCatalogError> {
        debug!(tmdb_id, season, "Fetching TMDB season");

        let fetched: Option<TmdbSeason> = self
            .fetch(&format!("/tv/{}/season/{}", tmdb_id, season), &[], "season")
            .await?;

        Ok(fetched.map(|mut s| {
            s.season_number = season;
            for episode in &mut s.episodes {
                episode.season_number = season;
            }
            s
        }))
    }

    async fn get_episode(
        &self,
        tmdb_id: u32,
        season: u32,
        episode: u32,
    ) -> Result<Option<TmdbEpisode>, ExternalCatalogError> {
        debug!(tmdb_id, season, episode, "Fetching TMDB episode");

        let fetched: Option<TmdbEpisode> = self
            .fetch(
                &format!("/tv/{}/season/{}/episode/{}", tmdb_id, season, episode),
                &[],
                "episode",
            )
            .await?;

        Ok(fetched.map(|e| TmdbEpisode {
            season_number: season,
            ..e
        }))
    }
}
