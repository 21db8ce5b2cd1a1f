//! Types produced by the match resolver.

use serde::{Deserialize, Serialize};

use crate::external_catalog::{TmdbMovie, TmdbSeries};
use crate::media::{ContentType, EpisodeNumber};

/// A resolved provider record for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
    /// Stable TMDB identifier.
    pub id: u32,
    /// Movie title or show name.
    pub title: String,
    /// Release or first-air year.
    pub year: Option<u32>,
    pub content_type: ContentType,
    /// Episode-level details, filled in by refinement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode: Option<EpisodeDetails>,
}

/// Episode numbering and name as the provider knows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeDetails {
    pub number: EpisodeNumber,
    pub name: String,
}

impl From<&TmdbMovie> for MetadataRecord {
    fn from(movie: &TmdbMovie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            year: movie.year(),
            content_type: ContentType::Movie,
            episode: None,
        }
    }
}

impl From<&TmdbSeries> for MetadataRecord {
    fn from(series: &TmdbSeries) -> Self {
        Self {
            id: series.id,
            title: series.name.clone(),
            year: series.year(),
            content_type: ContentType::TvEpisode,
            episode: None,
        }
    }
}

/// Which parsed value wins when episode numbers and titles disagree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefinementPriority {
    /// Look the episode up by its season/episode numbers.
    #[default]
    EpisodeNumbers,
    /// Look the episode up by its parsed title first, correcting the numbers.
    EpisodeTitle,
}

impl RefinementPriority {
    pub fn from_flag(use_episode_titles: bool) -> Self {
        if use_episode_titles {
            Self::EpisodeTitle
        } else {
            Self::EpisodeNumbers
        }
    }
}
