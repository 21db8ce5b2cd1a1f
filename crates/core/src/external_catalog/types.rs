//! Catalog records as TMDB returns them.
//!
//! These deserialize straight from TMDB JSON. Unknown fields are ignored and
//! fields absent from search results fall back to their defaults.

use serde::{Deserialize, Serialize};

/// Leading `YYYY` of a `YYYY-MM-DD` date. TMDB sends `""` for unknown dates.
fn year_of(date: Option<&str>) -> Option<u32> {
    date?.split('-').next()?.parse().ok()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TmdbMovie {
    pub id: u32,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
}

impl TmdbMovie {
    pub fn year(&self) -> Option<u32> {
        year_of(self.release_date.as_deref())
    }
}

/// A series, either a search hit or a full details response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TmdbSeries {
    pub id: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_air_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    /// Empty for search hits.
    #[serde(default)]
    pub seasons: Vec<TmdbSeasonSummary>,
}

impl TmdbSeries {
    pub fn year(&self) -> Option<u32> {
        year_of(self.first_air_date.as_deref())
    }
}

/// One entry of a series' season list. Season 0 holds specials.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TmdbSeasonSummary {
    pub season_number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub episode_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TmdbSeason {
    #[serde(default)]
    pub season_number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Ordered by episode number.
    #[serde(default)]
    pub episodes: Vec<TmdbEpisode>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TmdbEpisode {
    #[serde(default)]
    pub season_number: u32,
    pub episode_number: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub air_date: Option<String>,
}
