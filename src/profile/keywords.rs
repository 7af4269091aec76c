//! Naive keyword extraction for profile aggregates.

use std::collections::HashMap;

/// Maximum keywords extracted from one insight.
pub const MAX_KEYWORDS: usize = 10;

const STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "your", "you", "will", "today", "this", "that",
];

/// Extract up to [`MAX_KEYWORDS`] keywords from `text`.
///
/// Tokens are split on whitespace, lowercased and stripped of surrounding
/// punctuation; tokens of four characters or fewer and stopwords are
/// dropped. The rest are ranked by frequency, first occurrence breaking
/// ties.
pub fn extract_keywords(text: &str) -> Vec<String> {
    // token -> (count, first position)
    let mut seen: HashMap<String, (usize, usize)> = HashMap::new();

    let tokens = text
        .split_whitespace()
        .map(|raw| {
            raw.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|token| token.chars().count() > 4 && !STOPWORDS.contains(&token.as_str()));

    for (position, token) in tokens.enumerate() {
        seen.entry(token)
            .and_modify(|(count, _)| *count += 1)
            .or_insert((1, position));
    }

    let mut ranked: Vec<(String, usize, usize)> = seen
        .into_iter()
        .map(|(token, (count, first))| (token, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|(token, _, _)| token)
        .collect()
}
