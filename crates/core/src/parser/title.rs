//! Movie-style title and year extraction from a file stem.

use super::rules::{
    collapse_whitespace, normalize_separators, PAREN_YEAR, QUALITY, SEASON_EPISODE, TITLE_NOISE,
    YEAR,
};

/// Guesses a title and release year from a file stem.
///
/// A parenthesized year wins over bare year tokens. Otherwise the last bare
/// year that has text before it is used, so `1917.2019` reads as "1917" from
/// 2019. The title is everything before the chosen year; without a year it is
/// everything before the first episode or quality marker.
pub fn guess_title_and_year(stem: &str) -> (String, Option<u32>) {
    let normalized = normalize_separators(stem);

    let (title_part, year) = match split_at_year(&normalized) {
        Some((title, year)) => (title, Some(year)),
        None => (truncate_at_marker(&normalized), None),
    };

    (clean_title(title_part), year)
}

fn split_at_year(text: &str) -> Option<(&str, u32)> {
    if let Some(caps) = PAREN_YEAR.captures(text) {
        let whole = caps.get(0)?;
        if whole.start() > 0 {
            let year = caps.get(1)?.as_str().parse().ok()?;
            return Some((&text[..whole.start()], year));
        }
    }

    let last = YEAR.find_iter(text).filter(|m| m.start() > 0).last()?;
    let year = last.as_str().parse().ok()?;
    Some((&text[..last.start()], year))
}

fn truncate_at_marker(text: &str) -> &str {
    let cut = [SEASON_EPISODE.find(text), QUALITY.find(text)]
        .into_iter()
        .flatten()
        .map(|m| m.start())
        .filter(|&start| start > 0)
        .min();

    match cut {
        Some(index) => &text[..index],
        None => text,
    }
}

/// Strips noise tokens, collapses whitespace and fixes shouting titles.
pub fn clean_title(raw: &str) -> String {
    let mut title = raw.to_string();
    for rule in TITLE_NOISE.iter() {
        title = rule.strip(&title);
    }

    let title = collapse_whitespace(&title);
    let title = title
        .trim_matches(|c: char| matches!(c, ' ' | '-' | '_' | '(' | ')' | '[' | ']' | '{' | '}'))
        .to_string();

    if is_all_uppercase(&title) {
        title_case(&title)
    } else {
        title
    }
}

fn is_all_uppercase(text: &str) -> bool {
    let mut letters = text.chars().filter(|c| c.is_alphabetic()).peekable();
    letters.peek().is_some() && letters.all(|c| c.is_uppercase())
}

fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
