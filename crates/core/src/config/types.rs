use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::external_catalog::TmdbConfig;
use crate::media::ContentType;

/// Quarantine subdirectory for files whose move failed.
pub const RENAMING_ERRORS_DIR: &str = "renaming_errors";
/// Quarantine subdirectory for files that could not be matched.
pub const PROCESSING_ERRORS_DIR: &str = "processing_errors";

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub library: LibraryConfig,
    #[serde(default)]
    pub renamer: RenamerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Media tree layout, relative to `media_base`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibraryConfig {
    #[serde(default = "default_media_base")]
    pub media_base: PathBuf,
    #[serde(default = "default_rename_folder")]
    pub rename_folder: String,
    #[serde(default = "default_transcode_folder")]
    pub transcode_folder: String,
    #[serde(default = "default_upload_folder")]
    pub upload_folder: String,
    #[serde(default = "default_error_folder")]
    pub error_folder: String,
    /// Extensions picked up by the scanner.
    #[serde(default = "default_video_extensions")]
    pub video_extensions: Vec<String>,
    /// Extensions that skip transcoding and go straight to upload.
    #[serde(default = "default_direct_upload_extensions")]
    pub direct_upload_extensions: Vec<String>,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            media_base: default_media_base(),
            rename_folder: default_rename_folder(),
            transcode_folder: default_transcode_folder(),
            upload_folder: default_upload_folder(),
            error_folder: default_error_folder(),
            video_extensions: default_video_extensions(),
            direct_upload_extensions: default_direct_upload_extensions(),
        }
    }
}

impl LibraryConfig {
    pub fn rename_dir(&self) -> PathBuf {
        self.media_base.join(&self.rename_folder)
    }

    pub fn transcode_dir(&self, content_type: ContentType) -> PathBuf {
        self.media_base
            .join(&self.transcode_folder)
            .join(content_type.library_folder())
    }

    pub fn upload_dir(&self, content_type: ContentType) -> PathBuf {
        self.media_base
            .join(&self.upload_folder)
            .join(content_type.library_folder())
    }

    pub fn error_dir(&self) -> PathBuf {
        self.media_base.join(&self.error_folder)
    }

    pub fn renaming_errors_dir(&self) -> PathBuf {
        self.error_dir().join(RENAMING_ERRORS_DIR)
    }

    pub fn processing_errors_dir(&self) -> PathBuf {
        self.error_dir().join(PROCESSING_ERRORS_DIR)
    }

    /// Whether a file with this extension bypasses the transcoder.
    pub fn is_direct_upload(&self, extension: &str) -> bool {
        let extension = extension.trim_start_matches('.');
        self.direct_upload_extensions
            .iter()
            .any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(extension))
    }
}

fn default_media_base() -> PathBuf {
    PathBuf::from("../media")
}

fn default_rename_folder() -> String {
    "rename".to_string()
}

fn default_transcode_folder() -> String {
    "transcode".to_string()
}

fn default_upload_folder() -> String {
    "upload".to_string()
}

fn default_error_folder() -> String {
    "errors".to_string()
}

fn default_video_extensions() -> Vec<String> {
    ["mkv", "mp4", "avi", "mov", "m4v", "webm"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_direct_upload_extensions() -> Vec<String> {
    vec!["mp4".to_string()]
}

/// Renaming behavior
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RenamerConfig {
    /// Trust episode titles over season/episode numbers during refinement.
    #[serde(default)]
    pub use_episode_titles: bool,
    /// Name episode files by episode title only.
    #[serde(default)]
    pub episode_title_only_filenames: bool,
    /// Match and log without touching the file system.
    #[serde(default)]
    pub dry_run: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LogLevel,
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    /// Also write JSON lines to `<log_dir>/plexifier.log`.
    #[serde(default = "default_json_file")]
    pub json_file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            log_dir: default_log_dir(),
            json_file: default_json_file(),
        }
    }
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("./.logs")
}

fn default_json_file() -> bool {
    true
}

/// Log verbosity, parsed case-insensitively.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_filter().to_ascii_uppercase())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(format!(
                "invalid log level '{}', expected one of DEBUG, INFO, WARN, ERROR",
                other
            )),
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, String> {
        value.parse()
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.to_string()
    }
}

/// Sanitized config for logging (API key redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub tmdb: SanitizedTmdbConfig,
    pub library: LibraryConfig,
    pub renamer: RenamerConfig,
    pub logging: LoggingConfig,
}

/// Sanitized TMDB config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedTmdbConfig {
    pub api_key_configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            tmdb: SanitizedTmdbConfig {
                api_key_configured: !config.tmdb.api_key.is_empty(),
                base_url: config.tmdb.base_url.clone(),
            },
            library: config.library.clone(),
            renamer: config.renamer.clone(),
            logging: config.logging.clone(),
        }
    }
}
