//! Filename and directory parsing.
//!
//! Turns a media file path into a [`MediaDescriptor`] using only the path
//! itself. Parsing never fails; ambiguous inputs degrade to a movie guess.
//!
//! A file is an episode when its name carries an `SxxEyy` token. For episodes
//! the show title comes from the nearest qualifying ancestor directory, falling
//! back to the file name itself. Movies take title and year from the stem.

mod date;
mod episode;
pub mod rules;
mod show;
mod title;

use std::path::Path;

use tracing::trace;

use crate::media::MediaDescriptor;

pub use date::{extract_date, AirDate};
pub use episode::{extract_episode_title, parse_episode_number};
pub use show::{clean_show_folder, resolve_show_folder, ShowFolder};
pub use title::{clean_title, guess_title_and_year};

/// Parses a media file path with an unbounded ancestor walk.
pub fn parse_media_file(path: &Path) -> MediaDescriptor {
    parse_media_file_within(path, None)
}

/// Parses a media file path, never looking at directories at or above `root`.
pub fn parse_media_file_within(path: &Path, root: Option<&Path>) -> MediaDescriptor {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = path
        .file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let air_date = extract_date(&filename);
    let date_year = air_date.as_ref().map(AirDate::year);
    let date = air_date.as_ref().map(AirDate::iso);

    let descriptor = match parse_episode_number(&filename) {
        Some(number) => {
            let (title, year) = match resolve_show_folder(path, root) {
                Some(folder) => (folder.title, folder.year),
                None => guess_title_and_year(&stem),
            };
            let episode_title = extract_episode_title(&stem, &title);
            MediaDescriptor::episode(title, year.or(date_year), number)
                .with_episode_title(episode_title)
        }
        None => {
            let (title, year) = guess_title_and_year(&stem);
            MediaDescriptor::movie(title, year.or(date_year))
        }
    };
    let descriptor = descriptor.with_date(date);

    trace!(
        path = %path.display(),
        title = %descriptor.title,
        year = ?descriptor.year,
        content_type = %descriptor.content_type(),
        "Parsed media file"
    );
    descriptor
}
