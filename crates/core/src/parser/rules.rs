//! Pattern tables used by the parser.
//!
//! Every heuristic lives here as a named, ordered rule so that each one can be
//! exercised on its own. Patterns are compiled once on first use.

use once_cell::sync::Lazy;
use regex_lite::Regex;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in pattern must compile")
}

/// `SxxEyy` token with 1-2 digit season and episode.
/// Must not follow a letter or digit; `_` and `.` count as separators.
pub static SEASON_EPISODE: Lazy<Regex> =
    Lazy::new(|| compile(r"(?i)(?:^|[^a-z0-9])s(\d{1,2})e(\d{1,2})"));

/// Bare 4-digit year token in 1900-2099.
pub static YEAR: Lazy<Regex> = Lazy::new(|| compile(r"\b(?:19|20)\d{2}\b"));

/// Parenthesized year, e.g. `(2012)`.
pub static PAREN_YEAR: Lazy<Regex> = Lazy::new(|| compile(r"\(((?:19|20)\d{2})\)"));

/// Calendar date with `-`, `_`, `.` or space separators.
pub static DATE: Lazy<Regex> = Lazy::new(|| {
    compile(r"(19\d{2}|20\d{2})[-_. ](0[1-9]|1[0-2])[-_. ](0[1-9]|[12]\d|3[01])")
});

/// Quality, source, codec and audio markers that never belong in a title.
pub static QUALITY: Lazy<Regex> = Lazy::new(|| {
    compile(
        r"(?i)\b(480p|576p|720p|1080p|2160p|4k|hdr|hdr10\+?|dv|web[- ]?dl|bluray|blu[- ]ray|webrip|hdtv|x264|x265|h[. ]?26[45]|hevc|ddp?\d?[. ]?\d?|atmos|remux)\b",
    )
});

/// Any square-bracketed segment.
pub static BRACKETED: Lazy<Regex> = Lazy::new(|| compile(r"\[[^\]]*\]"));

/// Leading "Part N" / "Pt N" marker on an episode title.
pub static PART_MARKER: Lazy<Regex> = Lazy::new(|| compile(r"(?i)^(?:part|pt)\s*\d+"));

/// Segments that name a structural part of a release rather than a title.
pub static STRUCTURAL_SEGMENT: Lazy<Regex> =
    Lazy::new(|| compile(r"(?i)^(?:s\d+e\d+|season\s+\d+|episode\s+\d+)"));

/// A named pattern whose matches are deleted from a title.
#[derive(Debug)]
pub struct NoiseRule {
    pub name: &'static str,
    pub pattern: Regex,
}

impl NoiseRule {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            pattern: compile(pattern),
        }
    }

    pub fn strip(&self, text: &str) -> String {
        self.pattern.replace_all(text, "").into_owned()
    }
}

/// Tokens stripped from movie-style titles, applied in order.
pub static TITLE_NOISE: Lazy<Vec<NoiseRule>> = Lazy::new(|| {
    vec![
        NoiseRule::new("season_episode", r"(?i)\bs\d{1,2}e\d{1,2}\b"),
        NoiseRule::new("resolution", r"(?i)\b(?:480p|576p|720p|1080p|2160p|4k|uhd)\b"),
        NoiseRule::new(
            "source",
            r"(?i)\b(?:web[- ]?dl|web[- ]?rip|bluray|blu[- ]ray|brrip|bdrip|dvdrip|hdtv|remux)\b",
        ),
        NoiseRule::new(
            "video_codec",
            r"(?i)\b(?:x264|x265|h[. ]?26[45]|hevc|avc|10bit|hdr10\+?|hdr|dv)\b",
        ),
        NoiseRule::new(
            "audio_codec",
            r"(?i)\b(?:ddp?\d*(?:[. ]\d)?|aac\d?(?:[. ]\d)?|ac3|eac3|dts(?:[- ]?hd)?|truehd|atmos|flac)\b",
        ),
        NoiseRule::new(
            "streaming_service",
            r"(?i)\b(?:amzn|nf|hbo|hmax|hulu|dsnp|atvp|pcok|pmtp)\b",
        ),
        NoiseRule::new(
            "release_group",
            r"(?i)\b(?:ntb|elite|eztv|rarbg|yts|yify|flux|cmrg|tgx|ion10)\b",
        ),
        NoiseRule::new("square_brackets", r"\[[^\]]*\]"),
        NoiseRule::new("curly_braces", r"\{[^}]*\}"),
    ]
});

/// A directory-name pattern marking an ancestor that cannot be the show folder.
#[derive(Debug)]
pub struct DirectoryRule {
    pub name: &'static str,
    pub pattern: Regex,
}

impl DirectoryRule {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            pattern: compile(pattern),
        }
    }
}

/// Patterns for release-style folder names, matched against the raw name.
pub static RELEASE_DIRECTORY: Lazy<Vec<DirectoryRule>> = Lazy::new(|| {
    vec![
        DirectoryRule::new("season_episode", r"(?i)s\d{1,2}e\d{1,2}"),
        DirectoryRule::new("season_pack", r"(?i)[. ]s\d{2}(?:[. ]|$)"),
        DirectoryRule::new(
            "quality",
            r"(?i)\b(?:480p|576p|720p|1080p|2160p|4k|hdr|web[- ]?dl|bluray|webrip|hdtv|x264|x265|h\.?26[45]|hevc|remux)\b",
        ),
        DirectoryRule::new("bracketed", r"\[[^\]]*\]"),
        DirectoryRule::new("release_group", r"(?i)[.\-](?:elite|ntb|eztv|rartv|rarbg)\b"),
    ]
});

/// Season folders such as `Season 01`, `Series 2`, `S03` or `Specials`.
pub static SEASON_DIRECTORY: Lazy<Regex> =
    Lazy::new(|| compile(r"(?i)^(?:(?:season|series)\s*\d+.*|s\d{1,2}|specials)$"));

/// Generic container names that end the ancestor walk.
pub const CONTAINER_DIRECTORIES: &[&str] = &[
    "tv shows", "tv", "shows", "movies", "season", "episodes", "series", "rename", "media",
];

/// Trailing annotations removed from a show folder name.
pub static SHOW_FOLDER_NOISE: Lazy<Vec<NoiseRule>> = Lazy::new(|| {
    vec![
        NoiseRule::new("parenthetical", r"\s*\([^)]*\)"),
        NoiseRule::new("square_brackets", r"\[[^\]]*\]"),
        NoiseRule::new("id_tag", r"(?i)\s*\{[a-z0-9\-:]+\}"),
    ]
});

/// An ordered episode-title template. The `title` group holds the candidate.
#[derive(Debug)]
pub struct EpisodeTitleRule {
    pub name: &'static str,
    pub pattern: Regex,
    pub accept: fn(&str) -> bool,
}

impl EpisodeTitleRule {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            pattern: compile(pattern),
            accept: is_plain_title,
        }
    }

    /// Returns the cleaned candidate if the template matches and it is accepted.
    pub fn apply(&self, text: &str) -> Option<String> {
        let captures = self.pattern.captures(text)?;
        let raw = captures.name("title")?.as_str();
        let candidate = clean_episode_candidate(raw);
        (self.accept)(&candidate).then_some(candidate)
    }
}

/// Episode-title templates, first accepted match wins.
pub static EPISODE_TITLE_RULES: Lazy<Vec<EpisodeTitleRule>> = Lazy::new(|| {
    vec![
        EpisodeTitleRule::new(
            "dash_suffix",
            r"(?i)s\d{1,2}e\d{1,2}\s*[-–—]\s*(?P<title>.+)$",
        ),
        EpisodeTitleRule::new("space_suffix", r"(?i)s\d{1,2}e\d{1,2}\s+(?P<title>.+)$"),
        EpisodeTitleRule::new(
            "reversed",
            r"(?i)^(?P<title>.+)\s*[-–—]\s*s\d{1,2}e\d{1,2}$",
        ),
        EpisodeTitleRule::new(
            "dated",
            r"^.+?\s*(?:19|20)\d{2}[-_.\s]\s*\d{1,2}[-_.\s]\s*\d{1,2}\s*[-–—]\s*(?P<title>.+)$",
        ),
        EpisodeTitleRule::new("bare", r"(?i)^(?P<title>.+?)\s*s\d{1,2}e\d{1,2}$"),
    ]
});

/// Strips a leading part marker and bracketed tags from a candidate.
pub fn clean_episode_candidate(raw: &str) -> String {
    let trimmed = raw.trim_matches(|c: char| c == ' ' || c == '-' || c == '_');
    let without_part = PART_MARKER.replace(trimmed, "");
    let without_tags = BRACKETED.replace_all(&without_part, "");
    collapse_whitespace(&without_tags)
        .trim_matches(|c: char| c == ' ' || c == '-' || c == '_')
        .to_string()
}

/// A candidate is a title when it is non-empty and free of release markers.
pub fn is_plain_title(candidate: &str) -> bool {
    !candidate.is_empty() && !SEASON_EPISODE.is_match(candidate) && !QUALITY.is_match(candidate)
}

/// Replaces `.`, `_`, `-` and `+` with spaces and collapses whitespace.
pub fn normalize_separators(text: &str) -> String {
    let replaced: String = text
        .chars()
        .map(|c| match c {
            '.' | '_' | '-' | '+' => ' ',
            other => other,
        })
        .collect();
    collapse_whitespace(&replaced)
}

/// Like [`normalize_separators`] but keeps dashes, which delimit episode titles.
pub fn normalize_keep_dashes(text: &str) -> String {
    let replaced: String = text
        .chars()
        .map(|c| match c {
            '.' | '_' | '+' => ' ',
            other => other,
        })
        .collect();
    collapse_whitespace(&replaced)
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Removes characters that are invalid in file names on common platforms.
pub fn sanitize_filename(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*'))
        .collect();
    collapse_whitespace(&cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noise_rule(name: &str) -> &'static NoiseRule {
        TITLE_NOISE.iter().find(|r| r.name == name).unwrap()
    }

    fn episode_rule(name: &str) -> &'static EpisodeTitleRule {
        EPISODE_TITLE_RULES.iter().find(|r| r.name == name).unwrap()
    }

    #[test]
    fn test_season_episode_pattern() {
        let caps = SEASON_EPISODE.captures("Show.s08e11.720p").unwrap();
        assert_eq!(&caps[1], "08");
        assert_eq!(&caps[2], "11");
        assert!(!SEASON_EPISODE.is_match("Season 1 Episode 2"));
        assert!(!SEASON_EPISODE.is_match("Classes1e2"));
        assert!(SEASON_EPISODE.is_match("Show_S01E02"));
        assert!(SEASON_EPISODE.is_match("S01E02 - Pilot"));
    }

    #[test]
    fn test_year_pattern_ignores_resolutions() {
        assert!(!YEAR.is_match("Movie 2160p"));
        assert!(!YEAR.is_match("Movie 1080p"));
        assert!(YEAR.is_match("Movie 2024 1080p"));
        assert!(!YEAR.is_match("Movie 1850"));
    }

    #[test]
    fn test_quality_pattern() {
        assert!(QUALITY.is_match("Pilot 720p"));
        assert!(QUALITY.is_match("WEB-DL"));
        assert!(QUALITY.is_match("x265"));
        assert!(QUALITY.is_match("h 264"));
        assert!(!QUALITY.is_match("The Coup"));
    }

    #[test]
    fn test_each_noise_rule_strips_its_tokens() {
        assert_eq!(noise_rule("season_episode").strip("Show S01E02").trim(), "Show");
        assert_eq!(noise_rule("resolution").strip("Title 2160p").trim(), "Title");
        assert_eq!(noise_rule("source").strip("Title WEB DL").trim(), "Title");
        assert_eq!(noise_rule("video_codec").strip("Title x265").trim(), "Title");
        assert_eq!(noise_rule("audio_codec").strip("Title DDP5 1").trim(), "Title");
        assert_eq!(noise_rule("streaming_service").strip("Title AMZN").trim(), "Title");
        assert_eq!(noise_rule("release_group").strip("Title NTb").trim(), "Title");
        assert_eq!(noise_rule("square_brackets").strip("[YTS] Title").trim(), "Title");
        assert_eq!(noise_rule("curly_braces").strip("Title {imdb-tt1}").trim(), "Title");
    }

    #[test]
    fn test_noise_rules_leave_plain_words() {
        for rule in TITLE_NOISE.iter() {
            assert_eq!(rule.strip("Wake Up Dead Man"), "Wake Up Dead Man", "{}", rule.name);
        }
    }

    #[test]
    fn test_dash_suffix_rule() {
        let rule = episode_rule("dash_suffix");
        assert_eq!(rule.apply("Ghosts - S01E01 - Pilot"), Some("Pilot".to_string()));
        assert_eq!(rule.apply("Ghosts S01E01 Pilot"), None);
    }

    #[test]
    fn test_space_suffix_rule() {
        let rule = episode_rule("space_suffix");
        assert_eq!(rule.apply("Ghosts S01E01 Pilot"), Some("Pilot".to_string()));
        assert_eq!(rule.apply("Ghosts S01E01 720p WEB-DL"), None);
    }

    #[test]
    fn test_reversed_rule() {
        let rule = episode_rule("reversed");
        assert_eq!(rule.apply("The Coup - S03E04"), Some("The Coup".to_string()));
    }

    #[test]
    fn test_dated_rule() {
        let rule = episode_rule("dated");
        assert_eq!(
            rule.apply("Late Show 2024-01-15 - Guest Night"),
            Some("Guest Night".to_string())
        );
    }

    #[test]
    fn test_bare_rule() {
        let rule = episode_rule("bare");
        assert_eq!(rule.apply("Marquel S08E11"), Some("Marquel".to_string()));
    }

    #[test]
    fn test_candidate_cleanup() {
        assert_eq!(clean_episode_candidate("Part 2 The Return"), "The Return");
        assert_eq!(clean_episode_candidate("The Return [HD]"), "The Return");
        assert_eq!(clean_episode_candidate(" - Pilot - "), "Pilot");
    }

    #[test]
    fn test_is_plain_title() {
        assert!(is_plain_title("The Coup"));
        assert!(!is_plain_title(""));
        assert!(!is_plain_title("S01E02"));
        assert!(!is_plain_title("Pilot 1080p"));
    }

    #[test]
    fn test_normalize_separators() {
        assert_eq!(normalize_separators("Movie.Title_2024-WEB+DL"), "Movie Title 2024 WEB DL");
        assert_eq!(normalize_separators("  a   b  "), "a b");
    }

    #[test]
    fn test_normalize_keep_dashes() {
        assert_eq!(normalize_keep_dashes("Show.-.S01E02.-.Pilot"), "Show - S01E02 - Pilot");
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("What? If: A/B"), "What If AB");
        assert_eq!(sanitize_filename("<Title>  \"Quoted\""), "Title Quoted");
    }

    #[test]
    fn test_season_directory() {
        assert!(SEASON_DIRECTORY.is_match("Season 01"));
        assert!(SEASON_DIRECTORY.is_match("season 3"));
        assert!(SEASON_DIRECTORY.is_match("S02"));
        assert!(SEASON_DIRECTORY.is_match("Specials"));
        assert!(!SEASON_DIRECTORY.is_match("Seasons of Love"));
    }

    #[test]
    fn test_release_directory_rules() {
        let matches = |name: &str| RELEASE_DIRECTORY.iter().any(|r| r.pattern.is_match(name));
        assert!(matches("Show.S01.1080p.WEB-DL.x265-ELiTE"));
        assert!(matches("Show.S02E03.HDTV"));
        assert!(matches("[Group] Show"));
        assert!(matches("Show.S01"));
        assert!(!matches("Breaking Bad"));
        assert!(!matches("The Office (US)"));
    }
}
