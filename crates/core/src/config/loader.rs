use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Config file read from the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "plexifier.toml";

/// Load configuration with environment variable overrides.
///
/// An explicit `path` must exist. Without one, `plexifier.toml` is read if
/// present. `TMDB_API_KEY` sets the provider key; `PLEXIFIER_*` variables
/// (nested with `__`) override everything else.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.display().to_string()));
            }
            Toml::file(path)
        }
        None => Toml::file(DEFAULT_CONFIG_FILE),
    };

    let config: Config = Figment::from(Serialized::defaults(Config::default()))
        .merge(file)
        .merge(
            Env::raw()
                .only(&["TMDB_API_KEY"])
                .map(|_| "tmdb.api_key".into()),
        )
        .merge(Env::prefixed("PLEXIFIER_").split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::string(toml_str))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}
