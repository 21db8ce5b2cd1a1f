//! Show-title inference from the directories above an episode file.

use std::path::Path;

use super::rules::{
    collapse_whitespace, CONTAINER_DIRECTORIES, PAREN_YEAR, RELEASE_DIRECTORY, SEASON_DIRECTORY,
    SHOW_FOLDER_NOISE,
};

/// A show folder found above an episode file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowFolder {
    pub title: String,
    /// Year from a `(YYYY)` annotation on the folder, if any.
    pub year: Option<u32>,
}

/// Walks the ancestors of `path` looking for the show folder.
///
/// Season folders and release-style folders are skipped. The walk stops at a
/// generic container name (`TV Shows`, `rename`, ...), at `root` when given,
/// or at the top of the path. Returns `None` when no ancestor qualifies or the
/// nearest candidate still looks like a release file name.
pub fn resolve_show_folder(path: &Path, root: Option<&Path>) -> Option<ShowFolder> {
    for ancestor in path.ancestors().skip(1) {
        if let Some(root) = root {
            if ancestor == root || !ancestor.starts_with(root) {
                break;
            }
        }

        let Some(name) = ancestor.file_name().and_then(|n| n.to_str()) else {
            break;
        };

        if is_container(name) {
            break;
        }
        if is_skippable(name) {
            continue;
        }
        if looks_like_filename(name) {
            return None;
        }

        let title = clean_show_folder(name);
        if title.is_empty() {
            return None;
        }
        let year = PAREN_YEAR
            .captures(name)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok());
        return Some(ShowFolder { title, year });
    }
    None
}

fn is_container(name: &str) -> bool {
    let lower = name.trim().to_lowercase();
    CONTAINER_DIRECTORIES.contains(&lower.as_str())
}

fn is_skippable(name: &str) -> bool {
    SEASON_DIRECTORY.is_match(name.trim())
        || RELEASE_DIRECTORY.iter().any(|rule| rule.pattern.is_match(name))
}

// Dotted names without spaces are release names, not show folders.
fn looks_like_filename(name: &str) -> bool {
    !name.contains(' ') && name.matches('.').count() >= 2
}

/// Removes parenthetical, bracketed and `{id-tag}` annotations from a folder name.
pub fn clean_show_folder(name: &str) -> String {
    let mut cleaned = name.to_string();
    for rule in SHOW_FOLDER_NOISE.iter() {
        cleaned = rule.strip(&cleaned);
    }
    collapse_whitespace(&cleaned)
}
