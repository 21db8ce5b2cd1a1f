//! Recursive discovery of video files.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

/// Lists regular files under `dir` whose extension is in `extensions`.
///
/// Extensions are compared case-insensitively and may be given with or
/// without the leading dot. The result is sorted by path. A missing root
/// yields an empty list.
pub fn scan_media_files(dir: &Path, extensions: &[String]) -> Vec<PathBuf> {
    if !dir.is_dir() {
        warn!(dir = %dir.display(), "Scan root does not exist or is not a directory");
        return Vec::new();
    }

    let wanted: Vec<String> = extensions
        .iter()
        .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
        .collect();

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "Skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| has_extension(path, &wanted))
        .collect();

    files.sort();
    debug!(dir = %dir.display(), count = files.len(), "Scanned for media files");
    files
}

fn has_extension(path: &Path, wanted: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| wanted.iter().any(|w| w.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}
