//! The rename run: scan, then parse, match, format and relocate each file in
//! turn.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::config::{Config, LibraryConfig};
use crate::external_catalog::ExternalCatalog;
use crate::formatter::{format_destination, NamingOptions};
use crate::matcher::{MatchResolver, RefinementPriority};
use crate::media::ContentType;
use crate::parser::parse_media_file_within;
use crate::placer::{Placer, Relocation};
use crate::scanner::scan_media_files;

use super::types::{CancellationFlag, FileError, FileOutcome, Route, RunSummary};

/// Processes a rename queue one file at a time.
pub struct MediaRenamer<P: Placer> {
    config: Config,
    resolver: MatchResolver,
    placer: P,
    naming: NamingOptions,
    cancel: CancellationFlag,
}

impl<P: Placer> MediaRenamer<P> {
    /// Creates a renamer from a resolved configuration.
    pub fn new(config: Config, catalog: Arc<dyn ExternalCatalog>, placer: P) -> Self {
        let priority = RefinementPriority::from_flag(config.renamer.use_episode_titles);
        let naming = NamingOptions {
            episode_title_only: config.renamer.episode_title_only_filenames,
        };
        Self {
            resolver: MatchResolver::new(catalog, priority),
            placer,
            naming,
            cancel: CancellationFlag::new(),
            config,
        }
    }

    /// Uses an externally owned cancellation flag.
    pub fn with_cancellation(mut self, cancel: CancellationFlag) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancellation(&self) -> CancellationFlag {
        self.cancel.clone()
    }

    pub fn is_dry_run(&self) -> bool {
        self.config.renamer.dry_run
    }

    /// The directories scanned for `source_dir`, in processing order.
    ///
    /// `Movies/` then `TV Shows/` when either exists, else `source_dir` itself.
    pub fn queue_dirs(&self, source_dir: &Path) -> Vec<PathBuf> {
        let dirs: Vec<PathBuf> = [ContentType::Movie, ContentType::TvEpisode]
            .iter()
            .map(|ct| source_dir.join(ct.library_folder()))
            .filter(|dir| dir.is_dir())
            .collect();

        if dirs.is_empty() {
            debug!(
                source = %source_dir.display(),
                "No content type folders, scanning source directly"
            );
            vec![source_dir.to_path_buf()]
        } else {
            dirs
        }
    }

    /// Processes every media file under `source_dir`.
    ///
    /// Per-file failures never abort the run. A cancellation request stops
    /// the loop before the next file.
    pub async fn run(&self, source_dir: &Path) -> RunSummary {
        let mut summary = RunSummary::default();
        info!(
            source = %source_dir.display(),
            dry_run = self.is_dry_run(),
            "Starting media renaming"
        );

        'queues: for dir in self.queue_dirs(source_dir) {
            let files = scan_media_files(&dir, &self.config.library.video_extensions);
            info!(dir = %dir.display(), files = files.len(), "Processing queue");

            for file in files {
                if self.cancel.is_cancelled() {
                    warn!("Cancellation requested, stopping before next file");
                    summary.cancelled = true;
                    break 'queues;
                }
                let outcome = self.process_file(&file, &dir).await;
                summary.record(&outcome);
            }
        }

        info!(
            attempted = summary.attempted,
            succeeded = summary.succeeded,
            failed = summary.failed,
            direct_upload = summary.direct_upload,
            queued_for_transcode = summary.queued_for_transcode,
            dry_run = self.is_dry_run(),
            "Media renaming completed"
        );
        summary
    }

    /// Runs one file through parse, match, format and relocate.
    ///
    /// `root` bounds the show-folder search.
    pub async fn process_file(&self, path: &Path, root: &Path) -> FileOutcome {
        info!(file = %path.display(), "Processing file");

        let mut descriptor = parse_media_file_within(path, Some(root));
        debug!(?descriptor, "Parsed media info");

        let mut record = match self.resolver.resolve(&descriptor).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                let error = FileError::LookupFailed {
                    title: descriptor.title.clone(),
                };
                return self.quarantine_unmatched(path, error).await;
            }
            Err(e) => return self.quarantine_unmatched(path, FileError::Catalog(e)).await,
        };

        if descriptor.is_episode() {
            self.resolver.refine_episode(&mut descriptor, &mut record).await;
        }

        let extension = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        let relative = format_destination(&descriptor, &record, &extension, self.naming);

        let library = &self.config.library;
        let content_type = descriptor.content_type();
        let route = route_for(library, &extension);
        let destination = match route {
            Route::DirectUpload => library.upload_dir(content_type),
            Route::Transcode => library.transcode_dir(content_type),
        }
        .join(relative);

        if self.is_dry_run() {
            info!(
                source = %path.display(),
                destination = %destination.display(),
                "DRY RUN: would move file"
            );
            return FileOutcome::Moved { destination, route };
        }

        let error_dir = library.renaming_errors_dir();
        match self.placer.relocate(path, &destination, &error_dir).await {
            Relocation::Moved { destination, method } => {
                info!(
                    source = %path.display(),
                    destination = %destination.display(),
                    ?method,
                    ?route,
                    "Moved file"
                );
                FileOutcome::Moved { destination, route }
            }
            Relocation::Quarantined { reason, path: quarantined } => {
                error!(
                    source = %path.display(),
                    quarantined = %quarantined.display(),
                    "Failed to move, file quarantined"
                );
                FileOutcome::Quarantined {
                    error: FileError::MoveFailed(reason),
                    error_dir,
                }
            }
            Relocation::Stranded { reason } => FileOutcome::Stranded {
                error: FileError::MoveFailed(reason),
            },
        }
    }

    async fn quarantine_unmatched(&self, path: &Path, error: FileError) -> FileOutcome {
        let error_dir = self.config.library.processing_errors_dir();
        error!(file = %path.display(), error = %error, "Handling error for file");

        if self.is_dry_run() {
            info!(
                file = %path.display(),
                error_dir = %error_dir.display(),
                "DRY RUN: would move file to error directory"
            );
            return FileOutcome::Quarantined { error, error_dir };
        }

        match self.placer.quarantine(path, &error_dir).await {
            Ok(quarantined) => {
                debug!(quarantined = %quarantined.display(), "File quarantined");
                FileOutcome::Quarantined { error, error_dir }
            }
            Err(e) => {
                error!(
                    file = %path.display(),
                    error = %e,
                    "Failed to move error file, left in place"
                );
                FileOutcome::Stranded { error }
            }
        }
    }
}

fn route_for(library: &LibraryConfig, extension: &str) -> Route {
    if library.is_direct_upload(extension) {
        Route::DirectUpload
    } else {
        Route::Transcode
    }
}

/// Creates the transcode and upload queues plus the error directories.
pub async fn setup_directories(library: &LibraryConfig) -> std::io::Result<()> {
    let content_types = [ContentType::Movie, ContentType::TvEpisode];
    let mut directories: Vec<PathBuf> = Vec::new();
    for ct in content_types {
        directories.push(library.transcode_dir(ct));
        directories.push(library.upload_dir(ct));
    }
    directories.push(library.renaming_errors_dir());
    directories.push(library.processing_errors_dir());

    for dir in directories {
        tokio::fs::create_dir_all(&dir).await?;
        debug!(dir = %dir.display(), "Ensured directory exists");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external_catalog::ExternalCatalogError;
    use crate::testing::{fixtures, MockExternalCatalog, MockPlacer};
    use tempfile::TempDir;

    fn renamer(
        media_base: &Path,
        catalog: &MockExternalCatalog,
        placer: &MockPlacer,
    ) -> MediaRenamer<MockPlacer> {
        MediaRenamer::new(
            fixtures::config(media_base),
            Arc::new(catalog.clone()),
            placer.clone(),
        )
    }

    #[tokio::test]
    async fn test_movie_routed_to_transcode() {
        let catalog = MockExternalCatalog::new();
        catalog.add_movie(fixtures::tmdb_movie(949, "Heat", 1995)).await;
        let placer = MockPlacer::new();
        let base = Path::new("/media");

        let outcome = renamer(base, &catalog, &placer)
            .process_file(
                Path::new("/media/rename/Movies/Heat.1995.1080p.BluRay.x264.mkv"),
                Path::new("/media/rename/Movies"),
            )
            .await;

        match outcome {
            FileOutcome::Moved { destination, route } => {
                assert_eq!(route, Route::Transcode);
                assert_eq!(
                    destination,
                    Path::new(
                        "/media/transcode/Movies/Heat (1995) {tmdb-949}/Heat (1995) {tmdb-949}.mkv"
                    )
                );
            }
            other => panic!("expected move, got {:?}", other),
        }
        assert_eq!(placer.placed().await.len(), 1);
    }

    #[tokio::test]
    async fn test_mp4_episode_routed_to_upload() {
        let catalog = MockExternalCatalog::new();
        catalog.add_series(fixtures::tmdb_series(62852, "Billions", 2016)).await;
        catalog
            .add_season(62852, fixtures::tmdb_season(1, &["Pilot", "Naming Rights"]))
            .await;
        let placer = MockPlacer::new();

        let outcome = renamer(Path::new("/media"), &catalog, &placer)
            .process_file(
                Path::new("/media/rename/TV Shows/Billions/Season 1/Billions.S01E02.720p.mp4"),
                Path::new("/media/rename/TV Shows"),
            )
            .await;

        match outcome {
            FileOutcome::Moved { destination, route } => {
                assert_eq!(route, Route::DirectUpload);
                assert_eq!(
                    destination,
                    Path::new(
                        "/media/upload/TV Shows/Billions (2016-) {tmdb-62852}/Season 01/Billions - S01E02 - Naming Rights.mp4"
                    )
                );
            }
            other => panic!("expected move, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unmatched_file_quarantined_as_processing_error() {
        let catalog = MockExternalCatalog::new();
        let placer = MockPlacer::new();

        let outcome = renamer(Path::new("/media"), &catalog, &placer)
            .process_file(
                Path::new("/media/rename/Movies/Unknown.Film.2001.mkv"),
                Path::new("/media/rename/Movies"),
            )
            .await;

        match outcome {
            FileOutcome::Quarantined { error, error_dir } => {
                assert!(matches!(error, FileError::LookupFailed { .. }));
                assert_eq!(error_dir, Path::new("/media/errors/processing_errors"));
            }
            other => panic!("expected quarantine, got {:?}", other),
        }

        let moves = placer.recorded_moves().await;
        assert_eq!(moves.len(), 1);
        assert!(moves[0].quarantine);
    }

    #[tokio::test]
    async fn test_provider_error_quarantines_file() {
        let catalog = MockExternalCatalog::new();
        catalog
            .set_next_error(ExternalCatalogError::RateLimitExceeded)
            .await;
        let placer = MockPlacer::new();

        let outcome = renamer(Path::new("/media"), &catalog, &placer)
            .process_file(Path::new("/media/rename/Heat.1995.mkv"), Path::new("/media/rename"))
            .await;

        assert!(matches!(
            outcome.error(),
            Some(FileError::Catalog(ExternalCatalogError::RateLimitExceeded))
        ));
    }

    #[tokio::test]
    async fn test_move_failure_quarantined_as_renaming_error() {
        let catalog = MockExternalCatalog::new();
        catalog.add_movie(fixtures::tmdb_movie(949, "Heat", 1995)).await;
        let placer = MockPlacer::new();
        placer.set_fail_moves(true).await;

        let outcome = renamer(Path::new("/media"), &catalog, &placer)
            .process_file(Path::new("/media/rename/Heat.1995.mkv"), Path::new("/media/rename"))
            .await;

        match outcome {
            FileOutcome::Quarantined { error, error_dir } => {
                assert!(matches!(error, FileError::MoveFailed(_)));
                assert_eq!(error_dir, Path::new("/media/errors/renaming_errors"));
            }
            other => panic!("expected quarantine, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failed_quarantine_strands_file() {
        let catalog = MockExternalCatalog::new();
        let placer = MockPlacer::new();
        placer.set_fail_quarantine(true).await;

        let outcome = renamer(Path::new("/media"), &catalog, &placer)
            .process_file(Path::new("/media/rename/Nothing.mkv"), Path::new("/media/rename"))
            .await;

        assert!(matches!(outcome, FileOutcome::Stranded { .. }));
    }

    #[tokio::test]
    async fn test_dry_run_does_not_move() {
        let catalog = MockExternalCatalog::new();
        catalog.add_movie(fixtures::tmdb_movie(949, "Heat", 1995)).await;
        let placer = MockPlacer::new();
        let mut config = fixtures::config(Path::new("/media"));
        config.renamer.dry_run = true;

        let renamer = MediaRenamer::new(config, Arc::new(catalog.clone()), placer.clone());
        let moved = renamer
            .process_file(Path::new("/media/rename/Heat.1995.mkv"), Path::new("/media/rename"))
            .await;
        let unmatched = renamer
            .process_file(Path::new("/media/rename/Nope.mkv"), Path::new("/media/rename"))
            .await;

        assert!(moved.is_success());
        assert!(matches!(unmatched, FileOutcome::Quarantined { .. }));
        assert_eq!(placer.move_count().await, 0);
        assert_eq!(catalog.query_count().await, 2);
    }

    #[tokio::test]
    async fn test_queue_dirs_prefer_content_folders() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("rename");
        std::fs::create_dir_all(source.join("TV Shows")).unwrap();

        let catalog = MockExternalCatalog::new();
        let placer = MockPlacer::new();
        let r = renamer(temp.path(), &catalog, &placer);
        assert_eq!(r.queue_dirs(&source), vec![source.join("TV Shows")]);

        std::fs::create_dir_all(source.join("Movies")).unwrap();
        assert_eq!(
            r.queue_dirs(&source),
            vec![source.join("Movies"), source.join("TV Shows")]
        );

        let flat = temp.path().join("flat");
        assert_eq!(r.queue_dirs(&flat), vec![flat.clone()]);
    }

    #[tokio::test]
    async fn test_cancelled_run_processes_nothing() {
        let temp = TempDir::new().unwrap();
        fixtures::touch(temp.path(), "rename/Movies/Heat.1995.mkv");

        let catalog = MockExternalCatalog::new();
        let placer = MockPlacer::new();
        let cancel = CancellationFlag::new();
        cancel.cancel();

        let summary = renamer(temp.path(), &catalog, &placer)
            .with_cancellation(cancel)
            .run(&temp.path().join("rename"))
            .await;

        assert!(summary.cancelled);
        assert_eq!(summary.attempted, 0);
        assert_eq!(catalog.query_count().await, 0);
    }

    #[tokio::test]
    async fn test_setup_directories() {
        let temp = TempDir::new().unwrap();
        let config = fixtures::config(temp.path());
        setup_directories(&config.library).await.unwrap();

        for dir in [
            "transcode/Movies",
            "transcode/TV Shows",
            "upload/Movies",
            "upload/TV Shows",
            "errors/renaming_errors",
            "errors/processing_errors",
        ] {
            assert!(temp.path().join(dir).is_dir(), "missing {}", dir);
        }
    }
}
