//! Plex-style destination paths.
//!
//! Pure functions: no I/O, never fails. Invalid filename characters are
//! removed rather than rejected.
//!
//! ```text
//! Movies:   Heat (1995) {tmdb-949}/Heat (1995) {tmdb-949}.mkv
//! TV Shows: Billions (2016-) {tmdb-62852}/Season 03/Billions - S03E04 - The Coup.mkv
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::matcher::MetadataRecord;
use crate::media::{ContentType, EpisodeNumber, MediaDescriptor};
use crate::parser::rules::sanitize_filename;

/// Naming switches for episode files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingOptions {
    /// Name episode files `{Show} - {Episode Title}` without `SxxEyy`.
    #[serde(default)]
    pub episode_title_only: bool,
}

/// Builds the library-relative destination for a matched file.
///
/// The year comes from the provider record when it has one, else from the
/// parsed descriptor.
pub fn format_destination(
    descriptor: &MediaDescriptor,
    record: &MetadataRecord,
    extension: &str,
    options: NamingOptions,
) -> PathBuf {
    let title = sanitize_filename(&record.title);
    let year = record.year.or(descriptor.year);
    let extension = normalize_extension(extension);

    match (descriptor.content_type(), descriptor.episode_number()) {
        (ContentType::TvEpisode, Some(number)) => {
            let episode_title = descriptor
                .episode_title()
                .map(sanitize_filename)
                .filter(|t| !t.is_empty());
            let folder = show_folder(&title, year, record.id);
            let filename =
                episode_filename(&title, number, episode_title.as_deref(), &extension, options);
            PathBuf::from(folder).join(season_folder(number.season)).join(filename)
        }
        _ => {
            let base = movie_base(&title, year, record.id);
            PathBuf::from(&base).join(format!("{}{}", base, extension))
        }
    }
}

fn movie_base(title: &str, year: Option<u32>, id: u32) -> String {
    match year {
        Some(year) => format!("{} ({}) {{tmdb-{}}}", title, year, id),
        None => format!("{} {{tmdb-{}}}", title, id),
    }
}

// TODO: close the range ("2005-2013") for ended shows once TmdbSeries carries
// the provider's status and last air date.
fn show_folder(title: &str, year: Option<u32>, id: u32) -> String {
    match year {
        Some(year) => format!("{} ({}-) {{tmdb-{}}}", title, year, id),
        None => format!("{} {{tmdb-{}}}", title, id),
    }
}

pub fn season_folder(season: u32) -> String {
    format!("Season {:02}", season)
}

fn episode_filename(
    title: &str,
    number: EpisodeNumber,
    episode_title: Option<&str>,
    extension: &str,
    options: NamingOptions,
) -> String {
    match episode_title {
        Some(name) if options.episode_title_only => format!("{} - {}{}", title, name, extension),
        Some(name) => format!("{} - {} - {}{}", title, number, name, extension),
        None => format!("{} - {}{}", title, number, extension),
    }
}

fn normalize_extension(extension: &str) -> String {
    let trimmed = extension.trim();
    if trimmed.is_empty() || trimmed.starts_with('.') {
        trimmed.to_string()
    } else {
        format!(".{}", trimmed)
    }
}
