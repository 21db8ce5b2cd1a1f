//! Moves files on the local file system.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{self, OpenOptions};
use tokio::io::{AsyncWriteExt, BufReader};
use tracing::debug;

use super::config::PlacerConfig;
use super::error::PlacerError;
use super::traits::Placer;
use super::types::MoveMethod;

/// EXDEV on Linux and macOS.
const EXDEV: i32 = 18;

fn crosses_devices(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::CrossesDevices || err.raw_os_error() == Some(EXDEV)
}

/// [`Placer`] backed by `rename`, with copy + delete across filesystems.
pub struct FsPlacer {
    config: PlacerConfig,
}

impl FsPlacer {
    pub fn new(config: PlacerConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(PlacerConfig::default())
    }

    /// `Ok(false)` when the rename would cross filesystems.
    async fn rename(source: &Path, destination: &Path) -> Result<bool, PlacerError> {
        match fs::rename(source, destination).await {
            Ok(()) => Ok(true),
            Err(e) if crosses_devices(&e) => Ok(false),
            Err(e) => Err(PlacerError::move_failed(
                source.to_path_buf(),
                destination.to_path_buf(),
                e,
            )),
        }
    }

    /// Streams `source` into a new file at `destination`.
    async fn copy_contents(&self, source: &Path, destination: &Path) -> Result<u64, PlacerError> {
        let copy_err = |e: io::Error| {
            PlacerError::copy_failed(source.to_path_buf(), destination.to_path_buf(), e)
        };

        let input = fs::File::open(source).await.map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => PlacerError::SourceNotFound {
                path: source.to_path_buf(),
            },
            _ => PlacerError::Io(e),
        })?;

        let mut output = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(destination)
            .await
            .map_err(|e| match e.kind() {
                io::ErrorKind::AlreadyExists => PlacerError::DestinationExists {
                    path: destination.to_path_buf(),
                },
                _ => copy_err(e),
            })?;

        let mut input = BufReader::with_capacity(self.config.buffer_size, input);
        let bytes = tokio::io::copy_buf(&mut input, &mut output)
            .await
            .map_err(copy_err)?;
        output.sync_all().await.map_err(copy_err)?;
        output.shutdown().await.map_err(copy_err)?;

        Ok(bytes)
    }

    /// Copy, then delete the source. A failed copy removes its partial output.
    async fn copy_then_delete(&self, source: &Path, destination: &Path) -> Result<(), PlacerError> {
        match self.copy_contents(source, destination).await {
            Ok(bytes) => debug!(
                source = %source.display(),
                destination = %destination.display(),
                bytes,
                "Copied across filesystems"
            ),
            Err(e @ PlacerError::DestinationExists { .. }) => return Err(e),
            Err(e) => {
                let _ = fs::remove_file(destination).await;
                return Err(e);
            }
        }

        fs::remove_file(source)
            .await
            .map_err(|cause| PlacerError::CleanupFailed {
                path: source.to_path_buf(),
                cause,
            })
    }

    async fn create_dir(dir: &Path) -> Result<(), PlacerError> {
        fs::create_dir_all(dir)
            .await
            .map_err(|cause| PlacerError::DirectoryCreationFailed {
                path: dir.to_path_buf(),
                cause,
            })
    }
}

async fn is_free(path: &Path) -> bool {
    !fs::try_exists(path).await.unwrap_or(true)
}

/// Picks `dir/name`, or `dir/stem (n).ext` if that is taken.
async fn free_path_in(dir: &Path, source: &Path) -> PathBuf {
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unnamed".to_string());
    let candidate = dir.join(&name);
    if is_free(&candidate).await {
        return candidate;
    }

    let stem = source
        .file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.clone());
    let ext = source
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    for n in 1u32.. {
        let numbered = dir.join(format!("{} ({}){}", stem, n, ext));
        if is_free(&numbered).await {
            return numbered;
        }
    }
    candidate
}

#[async_trait]
impl Placer for FsPlacer {
    async fn move_file(
        &self,
        source: &Path,
        destination: &Path,
    ) -> Result<MoveMethod, PlacerError> {
        if !fs::try_exists(source).await.unwrap_or(false) {
            return Err(PlacerError::SourceNotFound {
                path: source.to_path_buf(),
            });
        }

        if source == destination {
            return Ok(MoveMethod::Unchanged);
        }

        if fs::try_exists(destination).await.unwrap_or(false) {
            return Err(PlacerError::DestinationExists {
                path: destination.to_path_buf(),
            });
        }

        if self.config.create_parents {
            if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
                Self::create_dir(parent).await?;
            }
        }

        if self.config.prefer_atomic_moves && Self::rename(source, destination).await? {
            debug!(
                source = %source.display(),
                destination = %destination.display(),
                "Renamed file"
            );
            return Ok(MoveMethod::Renamed);
        }

        self.copy_then_delete(source, destination).await?;
        Ok(MoveMethod::Copied)
    }

    async fn quarantine(&self, source: &Path, error_dir: &Path) -> Result<PathBuf, PlacerError> {
        Self::create_dir(error_dir).await?;

        let target = free_path_in(error_dir, source).await;
        self.move_file(source, &target).await?;
        Ok(target)
    }
}
