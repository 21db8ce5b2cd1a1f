//! Renamer lifecycle integration tests.
//!
//! These tests drive a full run over a temporary media tree with the mock
//! catalog and the real file system placer:
//! - Routing to transcode and upload queues
//! - Quarantine of unmatched files and failed moves
//! - Dry runs leaving the tree untouched
//! - Source files never lost when every move fails

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use plexifier_core::{
    placer::{FsPlacer, Placer, Relocation},
    renamer::{setup_directories, MediaRenamer},
    testing::{fixtures, MockExternalCatalog},
    Config,
};

/// Test helper owning a media tree and a populated mock catalog.
struct TestHarness {
    media: TempDir,
    catalog: MockExternalCatalog,
}

impl TestHarness {
    async fn new() -> Self {
        let media = TempDir::new().expect("Failed to create media dir");
        let catalog = MockExternalCatalog::new();

        catalog.add_movie(fixtures::tmdb_movie(949, "Heat", 1995)).await;
        catalog
            .add_movie(fixtures::tmdb_movie(329865, "Arrival", 2016))
            .await;
        catalog
            .add_series(fixtures::tmdb_series(62852, "Billions", 2016))
            .await;
        catalog
            .add_season(
                62852,
                fixtures::tmdb_season(
                    3,
                    &["Tie Goes to the Runner", "Redemption", "Hell of a Ride", "The Coup"],
                ),
            )
            .await;

        Self { media, catalog }
    }

    fn base(&self) -> &Path {
        self.media.path()
    }

    fn config(&self) -> Config {
        fixtures::config(self.base())
    }

    fn add(&self, relative: &str) -> PathBuf {
        fixtures::touch(&self.base().join("rename"), relative)
    }

    fn renamer(&self, config: Config) -> MediaRenamer<FsPlacer> {
        MediaRenamer::new(
            config,
            Arc::new(self.catalog.clone()),
            FsPlacer::with_defaults(),
        )
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.base().join(relative)
    }
}

#[tokio::test]
async fn test_full_run_routes_files() {
    let h = TestHarness::new().await;
    let heat = h.add("Movies/Heat.1995.1080p.BluRay.x264-GROUP.mkv");
    let arrival = h.add("Movies/Arrival (2016)/Arrival.2016.2160p.WEB-DL.mp4");
    let episode = h.add("TV Shows/Billions/Season 03/Billions.S03E04.1080p.WEB.h264.mkv");
    let unknown = h.add("Movies/Totally.Unknown.Thing.2003.mkv");

    let config = h.config();
    setup_directories(&config.library).await.unwrap();
    let summary = h.renamer(config).run(&h.path("rename")).await;

    assert_eq!(summary.attempted, 4);
    assert_eq!(summary.succeeded, 3);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.direct_upload, 1);
    assert_eq!(summary.queued_for_transcode, 2);
    assert!(!summary.cancelled);

    assert!(h
        .path("transcode/Movies/Heat (1995) {tmdb-949}/Heat (1995) {tmdb-949}.mkv")
        .is_file());
    assert!(h
        .path("upload/Movies/Arrival (2016) {tmdb-329865}/Arrival (2016) {tmdb-329865}.mp4")
        .is_file());
    assert!(h
        .path("transcode/TV Shows/Billions (2016-) {tmdb-62852}/Season 03/Billions - S03E04 - The Coup.mkv")
        .is_file());
    assert!(h
        .path("errors/processing_errors/Totally.Unknown.Thing.2003.mkv")
        .is_file());

    for source in [heat, arrival, episode, unknown] {
        assert!(!source.exists(), "{} was not moved", source.display());
    }
}

#[tokio::test]
async fn test_flat_source_directory() {
    let h = TestHarness::new().await;
    let heat = fixtures::touch(&h.path("incoming"), "Heat.1995.mkv");

    let summary = h.renamer(h.config()).run(&h.path("incoming")).await;

    assert_eq!(summary.succeeded, 1);
    assert!(!heat.exists());
    assert!(h
        .path("transcode/Movies/Heat (1995) {tmdb-949}/Heat (1995) {tmdb-949}.mkv")
        .is_file());
}

#[tokio::test]
async fn test_existing_destination_quarantines_as_renaming_error() {
    let h = TestHarness::new().await;
    let heat = h.add("Movies/Heat.1995.mkv");
    let existing = fixtures::touch(
        h.base(),
        "transcode/Movies/Heat (1995) {tmdb-949}/Heat (1995) {tmdb-949}.mkv",
    );
    std::fs::write(&existing, b"keep me").unwrap();

    let summary = h.renamer(h.config()).run(&h.path("rename")).await;

    assert_eq!(summary.failed, 1);
    assert!(!heat.exists());
    assert!(h.path("errors/renaming_errors/Heat.1995.mkv").is_file());
    assert_eq!(std::fs::read(&existing).unwrap(), b"keep me");
}

#[tokio::test]
async fn test_dry_run_leaves_tree_untouched() {
    let h = TestHarness::new().await;
    let heat = h.add("Movies/Heat.1995.mkv");
    let unknown = h.add("Movies/Nothing.Here.mkv");

    let mut config = h.config();
    config.renamer.dry_run = true;
    let summary = h.renamer(config).run(&h.path("rename")).await;

    assert_eq!(summary.attempted, 2);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed, 1);
    assert!(heat.is_file());
    assert!(unknown.is_file());
    assert!(!h.path("transcode").exists());
    assert!(!h.path("errors").exists());
}

#[tokio::test]
async fn test_episode_title_mode_renames_by_title() {
    let h = TestHarness::new().await;
    h.add("TV Shows/Billions/Season 01/Billions - S01E07 - The Coup.mkv");

    let mut config = h.config();
    config.renamer.use_episode_titles = true;
    config.renamer.episode_title_only_filenames = true;
    let summary = h.renamer(config).run(&h.path("rename")).await;

    assert_eq!(summary.succeeded, 1);
    assert!(h
        .path("transcode/TV Shows/Billions (2016-) {tmdb-62852}/Season 03/Billions - The Coup.mkv")
        .is_file());
}

#[tokio::test]
async fn test_relocating_twice_does_not_touch_destination() {
    let temp = TempDir::new().unwrap();
    let source = fixtures::touch(temp.path(), "in/movie.mkv");
    let destination = temp.path().join("lib/movie.mkv");
    let errors = temp.path().join("errors");
    let placer = FsPlacer::with_defaults();

    let first = placer.relocate(&source, &destination, &errors).await;
    assert!(first.moved());

    let second = placer.relocate(&source, &destination, &errors).await;
    assert!(!second.moved());
    assert!(matches!(second, Relocation::Stranded { .. }));
    assert!(destination.is_file());
    assert!(!errors.exists());
}

#[tokio::test]
async fn test_source_kept_when_move_and_quarantine_fail() {
    let temp = TempDir::new().unwrap();
    let source = fixtures::touch(temp.path(), "in/movie.mkv");
    // A regular file where directories are needed makes both moves fail.
    let blocker = fixtures::touch(temp.path(), "blocker");
    let destination = blocker.join("lib/movie.mkv");
    let errors = blocker.join("errors");

    let outcome = FsPlacer::with_defaults()
        .relocate(&source, &destination, &errors)
        .await;

    assert!(matches!(outcome, Relocation::Stranded { .. }));
    assert!(source.is_file());
}
