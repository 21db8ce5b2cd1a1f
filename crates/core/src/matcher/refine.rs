//! Secondary per-episode lookup for matched shows.

use tracing::{debug, info, warn};

use crate::external_catalog::TmdbEpisode;
use crate::media::{EpisodeNumber, MediaDescriptor};

use super::resolver::MatchResolver;
use super::types::{EpisodeDetails, MetadataRecord, RefinementPriority};

impl MatchResolver {
    /// Corrects episode numbering and title from the provider.
    ///
    /// Any lookup failure keeps the parsed values. Does nothing for movies.
    pub async fn refine_episode(
        &self,
        descriptor: &mut MediaDescriptor,
        record: &mut MetadataRecord,
    ) {
        let Some(number) = descriptor.episode_number() else {
            return;
        };

        let by_title = match (self.priority, descriptor.episode_title()) {
            (RefinementPriority::EpisodeTitle, Some(title)) => {
                self.find_by_title(record.id, title, number.season).await
            }
            _ => None,
        };
        let found = match by_title {
            Some(episode) => Some(episode),
            None => self.find_by_number(record.id, number).await,
        };

        let Some(episode) = found else {
            debug!(
                tmdb_id = record.id,
                episode = %number,
                "No provider episode found, keeping parsed values"
            );
            return;
        };

        let corrected = EpisodeNumber::new(episode.season_number, episode.episode_number);
        if corrected != number && descriptor.correct_episode_number(corrected) {
            info!(from = %number, to = %corrected, "Updated episode number from TMDB");
        }

        if !episode.name.trim().is_empty() {
            if descriptor.episode_title() != Some(episode.name.as_str()) {
                info!(
                    from = ?descriptor.episode_title(),
                    to = %episode.name,
                    "Updated episode title from TMDB"
                );
            }
            descriptor.set_episode_title(Some(episode.name.clone()));
        }

        record.episode = Some(EpisodeDetails {
            number: corrected,
            name: episode.name,
        });
    }

    async fn find_by_number(&self, tmdb_id: u32, number: EpisodeNumber) -> Option<TmdbEpisode> {
        match self
            .catalog
            .get_episode(tmdb_id, number.season, number.episode)
            .await
        {
            Ok(episode) => episode,
            Err(e) => {
                warn!(tmdb_id, episode = %number, error = %e, "Episode lookup failed");
                None
            }
        }
    }

    /// Scans the show's seasons for an episode with a matching name, starting
    /// with the parsed season.
    async fn find_by_title(
        &self,
        tmdb_id: u32,
        title: &str,
        season_hint: u32,
    ) -> Option<TmdbEpisode> {
        let wanted = comparable_name(title);
        if wanted.is_empty() {
            return None;
        }

        let series = match self.catalog.get_tv(tmdb_id).await {
            Ok(series) => series,
            Err(e) => {
                warn!(tmdb_id, error = %e, "Series lookup failed");
                return None;
            }
        };

        let mut seasons: Vec<u32> = series.seasons.iter().map(|s| s.season_number).collect();
        seasons.sort_by_key(|&s| s != season_hint);

        for season in seasons {
            match self.catalog.get_tv_season(tmdb_id, season).await {
                Ok(Some(details)) => {
                    if let Some(episode) = details
                        .episodes
                        .into_iter()
                        .find(|e| comparable_name(&e.name) == wanted)
                    {
                        debug!(tmdb_id, season, name = %episode.name, "Matched episode by title");
                        return Some(episode);
                    }
                }
                Ok(None) => {}
                Err(e) => warn!(tmdb_id, season, error = %e, "Season lookup failed"),
            }
        }
        None
    }
}

/// Lowercase alphanumerics only, so punctuation and spacing never block a match.
fn comparable_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}
