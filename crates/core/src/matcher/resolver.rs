//! The provider query ladder.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::external_catalog::{ExternalCatalog, ExternalCatalogError};
use crate::media::{ContentType, MediaDescriptor};

use super::types::{MetadataRecord, RefinementPriority};

/// Region qualifiers stripped from show titles, longest first.
const REGION_SUFFIXES: &[&str] = &[" (US)", " (UK)", " US", " UK"];

/// Resolves parsed descriptors against an external catalog.
pub struct MatchResolver {
    pub(super) catalog: Arc<dyn ExternalCatalog>,
    pub(super) priority: RefinementPriority,
}

impl MatchResolver {
    pub fn new(catalog: Arc<dyn ExternalCatalog>, priority: RefinementPriority) -> Self {
        Self { catalog, priority }
    }

    /// Finds the best provider record for a descriptor.
    ///
    /// Returns `Ok(None)` once the ladder is exhausted. Provider errors are
    /// returned as-is and never retried.
    pub async fn resolve(
        &self,
        descriptor: &MediaDescriptor,
    ) -> Result<Option<MetadataRecord>, ExternalCatalogError> {
        let title = descriptor.title.trim();
        if title.is_empty() {
            debug!("Empty title, skipping provider lookup");
            return Ok(None);
        }

        let record = match descriptor.content_type() {
            ContentType::Movie => self.resolve_movie(title, descriptor.year).await?,
            ContentType::TvEpisode => self.resolve_show(title, descriptor.year).await?,
        };

        match &record {
            Some(r) => info!(
                query = title,
                matched = %r.title,
                tmdb_id = r.id,
                year = ?r.year,
                "Found TMDB match"
            ),
            None => warn!(query = title, year = ?descriptor.year, "No TMDB match found"),
        }
        Ok(record)
    }

    async fn resolve_movie(
        &self,
        title: &str,
        year: Option<u32>,
    ) -> Result<Option<MetadataRecord>, ExternalCatalogError> {
        let results = self.catalog.search_movies(title, year).await?;
        if let Some(movie) = pick_ranked(&results, year, |m| m.year()) {
            return Ok(Some(movie.into()));
        }

        if year.is_some() {
            debug!(query = title, "No movie results with year, retrying without");
            let results = self.catalog.search_movies(title, None).await?;
            return Ok(results.first().map(Into::into));
        }
        Ok(None)
    }

    async fn resolve_show(
        &self,
        title: &str,
        year: Option<u32>,
    ) -> Result<Option<MetadataRecord>, ExternalCatalogError> {
        let results = self.catalog.search_tv(title, year).await?;
        if let Some(series) = pick_ranked(&results, year, |s| s.year()) {
            return Ok(Some(series.into()));
        }

        for variant in title_variants(title) {
            debug!(query = title, variant = %variant, "Trying show title variant");
            let results = self.catalog.search_tv(&variant, year).await?;
            if let Some(series) = pick_ranked(&results, year, |s| s.year()) {
                return Ok(Some(series.into()));
            }
        }

        if year.is_some() {
            debug!(query = title, "No show results with year, retrying without");
            let results = self.catalog.search_tv(title, None).await?;
            return Ok(results.first().map(Into::into));
        }
        Ok(None)
    }
}

/// Picks the first result released in `year`, else the first result overall.
///
/// Provider order is never changed.
pub fn pick_ranked<T>(
    results: &[T],
    year: Option<u32>,
    year_of: impl Fn(&T) -> Option<u32>,
) -> Option<&T> {
    year.and_then(|y| results.iter().find(|r| year_of(r) == Some(y)))
        .or_else(|| results.first())
}

/// Alternate spellings of a show title: region qualifiers removed, then
/// spaces removed.
pub fn title_variants(title: &str) -> Vec<String> {
    let mut variants: Vec<String> = Vec::new();

    for suffix in REGION_SUFFIXES {
        let Some(cut) = title.len().checked_sub(suffix.len()) else {
            continue;
        };
        if title.is_char_boundary(cut) && title[cut..].eq_ignore_ascii_case(suffix) {
            let stripped = title[..cut].trim().to_string();
            if !stripped.is_empty() {
                variants.push(stripped);
            }
            break;
        }
    }

    let compact: String = title.chars().filter(|c| !c.is_whitespace()).collect();
    variants.push(compact);

    let mut unique = Vec::new();
    for variant in variants {
        if variant != title && !unique.contains(&variant) {
            unique.push(variant);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_ranked_prefers_exact_year() {
        let results = vec![(1, Some(2001)), (2, Some(2005)), (3, Some(2005))];
        let pick = pick_ranked(&results, Some(2005), |r| r.1).unwrap();
        assert_eq!(pick.0, 2);
    }

    #[test]
    fn test_pick_ranked_falls_back_to_first() {
        let results = vec![(1, Some(2001)), (2, None)];
        assert_eq!(pick_ranked(&results, Some(1999), |r| r.1).unwrap().0, 1);
        assert_eq!(pick_ranked(&results, None, |r| r.1).unwrap().0, 1);

        let empty: Vec<(u32, Option<u32>)> = vec![];
        assert!(pick_ranked(&empty, Some(1999), |r| r.1).is_none());
    }

    #[test]
    fn test_title_variants_strip_region() {
        assert_eq!(
            title_variants("The Office US"),
            vec!["The Office".to_string(), "TheOfficeUS".to_string()]
        );
        assert_eq!(
            title_variants("Ghosts (UK)"),
            vec!["Ghosts".to_string(), "Ghosts(UK)".to_string()]
        );
    }

    #[test]
    fn test_title_variants_without_region() {
        assert_eq!(title_variants("Doctor Who"), vec!["DoctorWho".to_string()]);
        assert!(title_variants("Bluey").is_empty());
    }

    #[test]
    fn test_region_only_inside_word_is_kept() {
        assert_eq!(title_variants("Mucus"), Vec::<String>::new());
    }
}
