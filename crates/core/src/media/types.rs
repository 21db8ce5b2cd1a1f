//! Types describing a parsed media file.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of content a file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    /// A feature film.
    Movie,
    /// A single episode of a TV series.
    TvEpisode,
}

impl ContentType {
    /// Library folder name used for this content type ("Movies" / "TV Shows").
    pub fn library_folder(&self) -> &'static str {
        match self {
            Self::Movie => "Movies",
            Self::TvEpisode => "TV Shows",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Movie => write!(f, "movie"),
            Self::TvEpisode => write!(f, "tv episode"),
        }
    }
}

/// Season and episode pair. Both numbers are always present together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EpisodeNumber {
    pub season: u32,
    pub episode: u32,
}

impl EpisodeNumber {
    pub fn new(season: u32, episode: u32) -> Self {
        Self { season, episode }
    }
}

impl fmt::Display for EpisodeNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{:02}E{:02}", self.season, self.episode)
    }
}

/// The parsed identity of one media file.
///
/// The content type is derived from the presence of an episode number, so a
/// descriptor is a TV episode exactly when it carries a season/episode pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaDescriptor {
    /// Best-guess human title (show name for episodes). Not sanitized.
    pub title: String,
    /// Year in the range 1900-2099, if one was found.
    pub year: Option<u32>,
    episode: Option<EpisodeNumber>,
    /// Episode title, only ever set on TV episodes.
    episode_title: Option<String>,
    /// ISO date (`YYYY-MM-DD`) for date-addressed shows.
    pub date: Option<String>,
}

impl MediaDescriptor {
    /// Creates a movie descriptor.
    pub fn movie(title: impl Into<String>, year: Option<u32>) -> Self {
        Self {
            title: title.into(),
            year,
            episode: None,
            episode_title: None,
            date: None,
        }
    }

    /// Creates a TV episode descriptor.
    pub fn episode(title: impl Into<String>, year: Option<u32>, number: EpisodeNumber) -> Self {
        Self {
            title: title.into(),
            year,
            episode: Some(number),
            episode_title: None,
            date: None,
        }
    }

    /// Sets the episode title. Ignored for movies.
    pub fn with_episode_title(mut self, episode_title: Option<String>) -> Self {
        self.set_episode_title(episode_title);
        self
    }

    /// Sets the air date.
    pub fn with_date(mut self, date: Option<String>) -> Self {
        self.date = date;
        self
    }

    pub fn content_type(&self) -> ContentType {
        if self.episode.is_some() {
            ContentType::TvEpisode
        } else {
            ContentType::Movie
        }
    }

    pub fn is_episode(&self) -> bool {
        self.episode.is_some()
    }

    pub fn episode_number(&self) -> Option<EpisodeNumber> {
        self.episode
    }

    pub fn season(&self) -> Option<u32> {
        self.episode.map(|n| n.season)
    }

    pub fn episode_index(&self) -> Option<u32> {
        self.episode.map(|n| n.episode)
    }

    pub fn episode_title(&self) -> Option<&str> {
        self.episode_title.as_deref()
    }

    /// Replaces the season/episode pair of a TV episode.
    ///
    /// Returns `false` and leaves the descriptor untouched for movies, since a
    /// movie gaining an episode number would change its content type.
    pub fn correct_episode_number(&mut self, number: EpisodeNumber) -> bool {
        match self.episode.as_mut() {
            Some(current) => {
                *current = number;
                true
            }
            None => false,
        }
    }

    /// Replaces the episode title of a TV episode. Ignored for movies.
    pub fn set_episode_title(&mut self, episode_title: Option<String>) {
        if self.episode.is_some() {
            self.episode_title = episode_title.filter(|t| !t.trim().is_empty());
        }
    }
}
