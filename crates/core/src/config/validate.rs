use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - TMDB API key is set
/// - At least one video extension is scanned
/// - Transcode and upload queues are distinct folders
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.tmdb.api_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "tmdb.api_key is required (set TMDB_API_KEY)".to_string(),
        ));
    }

    if config.library.video_extensions.is_empty() {
        return Err(ConfigError::ValidationError(
            "library.video_extensions cannot be empty".to_string(),
        ));
    }

    if config.library.transcode_folder == config.library.upload_folder {
        return Err(ConfigError::ValidationError(
            "library.transcode_folder and library.upload_folder must differ".to_string(),
        ));
    }

    Ok(())
}
