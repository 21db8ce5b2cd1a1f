//! Scriptable TMDB stand-in.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::external_catalog::{
    ExternalCatalog, ExternalCatalogError, TmdbEpisode, TmdbMovie, TmdbSeason, TmdbSeasonSummary,
    TmdbSeries,
};

/// A recorded catalog query for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCatalogQuery {
    SearchMovies { query: String, year: Option<u32> },
    SearchTv { query: String, year: Option<u32> },
    GetTv { tmdb_id: u32 },
    GetTvSeason { tmdb_id: u32, season: u32 },
    GetEpisode { tmdb_id: u32, season: u32, episode: u32 },
}

/// In-memory [`ExternalCatalog`] with query recording and one-shot failures.
///
/// Searches return entries whose title contains the query (ignoring case), in
/// the order they were added. A year keeps only entries from that year.
#[derive(Debug, Clone, Default)]
pub struct MockExternalCatalog {
    movies: Arc<RwLock<Vec<TmdbMovie>>>,
    series: Arc<RwLock<Vec<TmdbSeries>>>,
    seasons: Arc<RwLock<HashMap<(u32, u32), TmdbSeason>>>,
    queries: Arc<RwLock<Vec<RecordedCatalogQuery>>>,
    next_error: Arc<RwLock<Option<ExternalCatalogError>>>,
}

impl MockExternalCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_movie(&self, movie: TmdbMovie) {
        self.movies.write().await.push(movie);
    }

    pub async fn add_series(&self, series: TmdbSeries) {
        self.series.write().await.push(series);
    }

    pub async fn add_season(&self, series_id: u32, season: TmdbSeason) {
        self.seasons
            .write()
            .await
            .insert((series_id, season.season_number), season);
    }

    pub async fn recorded_queries(&self) -> Vec<RecordedCatalogQuery> {
        self.queries.read().await.clone()
    }

    pub async fn query_count(&self) -> usize {
        self.queries.read().await.len()
    }

    /// The next call of any kind fails with `error`.
    pub async fn set_next_error(&self, error: ExternalCatalogError) {
        *self.next_error.write().await = Some(error);
    }

    /// Records `query`, then yields the pending failure if one is armed.
    async fn begin(&self, query: RecordedCatalogQuery) -> Result<(), ExternalCatalogError> {
        self.queries.write().await.push(query);
        match self.next_error.write().await.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn season_summaries(
        seasons: &HashMap<(u32, u32), TmdbSeason>,
        tmdb_id: u32,
    ) -> Vec<TmdbSeasonSummary> {
        let mut summaries: Vec<TmdbSeasonSummary> = seasons
            .iter()
            .filter(|((id, _), _)| *id == tmdb_id)
            .map(|((_, number), season)| TmdbSeasonSummary {
                season_number: *number,
                name: season.name.clone(),
                episode_count: season.episodes.len() as u32,
            })
            .collect();
        summaries.sort_unstable_by_key(|s| s.season_number);
        summaries
    }
}

fn keep<'a, T: Clone + 'a>(
    entries: impl Iterator<Item = &'a T>,
    title: impl Fn(&T) -> &str,
    year: impl Fn(&T) -> Option<u32>,
    query: &str,
    wanted_year: Option<u32>,
) -> Vec<T> {
    let needle = query.to_lowercase();
    entries
        .filter(|e| title(*e).to_lowercase().contains(&needle))
        .filter(|e| wanted_year.is_none() || year(*e) == wanted_year)
        .cloned()
        .collect()
}

#[async_trait]
impl ExternalCatalog for MockExternalCatalog {
    async fn search_movies(
        &self,
        query: &str,
        year: Option<u32>,
    ) -> Result<Vec<TmdbMovie>, ExternalCatalogError> {
        self.begin(RecordedCatalogQuery::SearchMovies {
            query: query.to_string(),
            year,
        })
        .await?;

        let movies = self.movies.read().await;
        Ok(keep(movies.iter(), |m| m.title.as_str(), TmdbMovie::year, query, year))
    }

    async fn search_tv(
        &self,
        query: &str,
        year: Option<u32>,
    ) -> Result<Vec<TmdbSeries>, ExternalCatalogError> {
        self.begin(RecordedCatalogQuery::SearchTv {
            query: query.to_string(),
            year,
        })
        .await?;

        let series = self.series.read().await;
        Ok(keep(series.iter(), |s| s.name.as_str(), TmdbSeries::year, query, year))
    }

    async fn get_tv(&self, tmdb_id: u32) -> Result<TmdbSeries, ExternalCatalogError> {
        self.begin(RecordedCatalogQuery::GetTv { tmdb_id }).await?;

        let mut series = self
            .series
            .read()
            .await
            .iter()
            .find(|s| s.id == tmdb_id)
            .cloned()
            .ok_or_else(|| ExternalCatalogError::NotFound(format!("TV series ID {}", tmdb_id)))?;

        // Search entries carry no seasons; details list the registered ones.
        if series.seasons.is_empty() {
            series.seasons = Self::season_summaries(&*self.seasons.read().await, tmdb_id);
        }

        Ok(series)
    }

    async fn get_tv_season(
        &self,
        tmdb_id: u32,
        season: u32,
    ) -> Result<Option<TmdbSeason>, ExternalCatalogError> {
        self.begin(RecordedCatalogQuery::GetTvSeason { tmdb_id, season })
            .await?;

        Ok(self.seasons.read().await.get(&(tmdb_id, season)).cloned())
    }

    async fn get_episode(
        &self,
        tmdb_id: u32,
        season: u32,
        episode: u32,
    ) -> Result<Option<TmdbEpisode>, ExternalCatalogError> {
        self.begin(RecordedCatalogQuery::GetEpisode {
            tmdb_id,
            season,
            episode,
        })
        .await?;

        let seasons = self.seasons.read().await;
        Ok(seasons
            .get(&(tmdb_id, season))
            .and_then(|s| s.episodes.iter().find(|e| e.episode_number == episode))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[tokio::test]
    async fn test_search_movies() {
        let catalog = MockExternalCatalog::new();
        catalog.add_movie(fixtures::tmdb_movie(603, "The Matrix", 1999)).await;
        catalog
            .add_movie(fixtures::tmdb_movie(604, "The Matrix Reloaded", 2003))
            .await;

        let results = catalog.search_movies("matrix", None).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, 603);

        let results = catalog.search_movies("matrix", Some(2003)).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "The Matrix Reloaded");
    }

    #[tokio::test]
    async fn test_search_tv() {
        let catalog = MockExternalCatalog::new();
        catalog
            .add_series(fixtures::tmdb_series(1396, "Breaking Bad", 2008))
            .await;
        catalog
            .add_series(fixtures::tmdb_series(2316, "The Office", 2005))
            .await;

        let results = catalog.search_tv("breaking", None).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Breaking Bad");

        let results = catalog.search_tv("the office", Some(2001)).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_get_tv_lists_registered_seasons() {
        let catalog = MockExternalCatalog::new();
        catalog.add_series(fixtures::tmdb_series(1, "Test Show", 2020)).await;
        catalog.add_season(1, fixtures::tmdb_season(2, &["A", "B"])).await;
        catalog.add_season(1, fixtures::tmdb_season(1, &["C"])).await;

        let series = catalog.get_tv(1).await.unwrap();
        let numbers: Vec<u32> = series.seasons.iter().map(|s| s.season_number).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(series.seasons[1].episode_count, 2);
    }

    #[tokio::test]
    async fn test_get_tv_season_and_episode() {
        let catalog = MockExternalCatalog::new();
        catalog
            .add_season(7, fixtures::tmdb_season(2, &["One", "Two", "Three"]))
            .await;

        let season = catalog.get_tv_season(7, 2).await.unwrap().unwrap();
        assert_eq!(season.episodes.len(), 3);
        assert!(catalog.get_tv_season(7, 9).await.unwrap().is_none());

        let episode = catalog.get_episode(7, 2, 3).await.unwrap().unwrap();
        assert_eq!(episode.name, "Three");
        assert!(catalog.get_episode(7, 2, 4).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_recorded_queries() {
        let catalog = MockExternalCatalog::new();

        catalog.search_movies("movie", Some(2001)).await.ok();
        catalog.get_tv_season(5, 1).await.ok();

        let queries = catalog.recorded_queries().await;
        assert_eq!(
            queries,
            vec![
                RecordedCatalogQuery::SearchMovies {
                    query: "movie".to_string(),
                    year: Some(2001),
                },
                RecordedCatalogQuery::GetTvSeason {
                    tmdb_id: 5,
                    season: 1
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_armed_error_fires_once() {
        let catalog = MockExternalCatalog::new();
        catalog
            .set_next_error(ExternalCatalogError::RateLimitExceeded)
            .await;

        let result = catalog.search_movies("test", None).await;
        assert!(matches!(result, Err(ExternalCatalogError::RateLimitExceeded)));

        let result = catalog.search_movies("test", None).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_not_found() {
        let catalog = MockExternalCatalog::new();

        let result = catalog.get_tv(99999).await;
        assert!(matches!(result, Err(ExternalCatalogError::NotFound(_))));
    }
}
