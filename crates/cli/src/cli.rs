use clap::Parser;
use std::path::PathBuf;

use plexifier_core::{Config, LogLevel};

#[derive(Debug, Parser)]
#[command(name = "plexifier")]
#[command(version, about = "Rename movies and TV episodes into a Plex library layout")]
pub struct Cli {
    /// Directory to process (default: <media_base>/<rename_folder>)
    pub source_dir: Option<PathBuf>,

    /// Match and log without moving any files
    #[arg(long)]
    pub dry_run: bool,

    /// Trust episode titles over season/episode numbers
    #[arg(long)]
    pub use_episode_titles: bool,

    /// Log level: DEBUG, INFO, WARN or ERROR
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Path to config file (default: plexifier.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Applies command line overrides on top of the loaded config.
    pub fn apply(&self, config: &mut Config) {
        if self.dry_run {
            config.renamer.dry_run = true;
        }
        if self.use_episode_titles {
            config.renamer.use_episode_titles = true;
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
    }

    /// The queue to process.
    pub fn source_dir(&self, config: &Config) -> PathBuf {
        self.source_dir
            .clone()
            .unwrap_or_else(|| config.library.rename_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_defaults_keep_config() {
        let cli = Cli::try_parse_from(["plexifier"]).unwrap();
        let mut config = Config::default();
        config.renamer.dry_run = true;
        cli.apply(&mut config);

        assert!(config.renamer.dry_run);
        assert!(!config.renamer.use_episode_titles);
        assert_eq!(config.logging.level, LogLevel::Info);
        assert_eq!(cli.source_dir(&config), Path::new("../media/rename"));
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "plexifier",
            "/data/incoming",
            "--dry-run",
            "--use-episode-titles",
            "--log-level",
            "debug",
        ])
        .unwrap();
        let mut config = Config::default();
        cli.apply(&mut config);

        assert!(config.renamer.dry_run);
        assert!(config.renamer.use_episode_titles);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(cli.source_dir(&config), Path::new("/data/incoming"));
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        assert!(Cli::try_parse_from(["plexifier", "--log-level", "LOUD"]).is_err());
    }
}
