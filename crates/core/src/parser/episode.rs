//! Season/episode numbers and episode titles.

use crate::media::EpisodeNumber;

use super::rules::{
    clean_episode_candidate, is_plain_title, normalize_keep_dashes, EPISODE_TITLE_RULES,
    SEASON_EPISODE, STRUCTURAL_SEGMENT,
};

/// Reads the first `SxxEyy` token in `text`.
pub fn parse_episode_number(text: &str) -> Option<EpisodeNumber> {
    let caps = SEASON_EPISODE.captures(text)?;
    let season = caps.get(1)?.as_str().parse().ok()?;
    let episode = caps.get(2)?.as_str().parse().ok()?;
    Some(EpisodeNumber::new(season, episode))
}

/// Extracts an episode title from a file stem.
///
/// Templates are tried in order; the first accepted candidate wins. When none
/// match, the stem is split on `" - "` and the last non-structural segment is
/// taken. The templates that capture text before the `SxxEyy` marker reject
/// a candidate that is just the show title.
pub fn extract_episode_title(stem: &str, show_title: &str) -> Option<String> {
    let text = normalize_keep_dashes(stem);

    let templated = EPISODE_TITLE_RULES.iter().find_map(|rule| {
        let candidate = strip_show_prefix(&rule.apply(&text)?, show_title);
        let leading = matches!(rule.name, "reversed" | "bare");
        (!(leading && is_show_title(&candidate, show_title))).then_some(candidate)
    });
    if templated.is_some() {
        return templated;
    }

    let segments: Vec<&str> = text.split(" - ").collect();
    if segments.len() < 2 {
        return None;
    }
    segments
        .iter()
        .skip(1)
        .rev()
        .map(|segment| clean_episode_candidate(segment))
        .find(|candidate| {
            !STRUCTURAL_SEGMENT.is_match(candidate) && is_plain_title(candidate)
        })
}

fn comparable(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

fn is_show_title(candidate: &str, show_title: &str) -> bool {
    comparable(candidate) == comparable(show_title)
}

fn strip_show_prefix(candidate: &str, show_title: &str) -> String {
    match candidate.split_once(" - ") {
        Some((head, rest)) if comparable(head) == comparable(show_title) => {
            clean_episode_candidate(rest)
        }
        _ => candidate.to_string(),
    }
}
