//! Heuristic context retrieval over the built-in corpus.
//!
//! [`ContextAssembler`] ranks the twelve corpus snippets against a query
//! sign and a free-text style descriptor. It is a keyword heuristic, not a
//! semantic search:
//!
//! ```text
//! score(entry) = |{ k in entry.keywords : k ⊆ lowercase(style) }|
//!              + (entry.sign == query.sign ? sign_bonus : 0)
//! ```
//!
//! `sign_bonus` is one more than the largest keyword set in the corpus, so
//! the query sign's own entry always outranks every other entry and is
//! always part of a non-empty result.

mod corpus;

pub use corpus::{CORPUS, ContextSnippet};

use serde::Serialize;

use crate::types::ZodiacSign;

/// A corpus entry together with its relevance score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredSnippet {
    pub snippet: ContextSnippet,
    pub score: u32,
}

/// Ranks corpus snippets for a sign and style descriptor.
#[derive(Debug, Clone)]
pub struct ContextAssembler {
    corpus: &'static [ContextSnippet],
    sign_bonus: u32,
}

impl ContextAssembler {
    /// Assembler over the built-in corpus.
    pub fn new() -> Self {
        Self::with_corpus(&CORPUS)
    }

    /// Assembler over a custom static corpus.
    pub fn with_corpus(corpus: &'static [ContextSnippet]) -> Self {
        let max_keywords = corpus.iter().map(|s| s.keywords.len()).max().unwrap_or(0);
        Self {
            corpus,
            sign_bonus: max_keywords as u32 + 1,
        }
    }

    /// Bonus added to entries matching the query sign.
    pub fn sign_bonus(&self) -> u32 {
        self.sign_bonus
    }

    /// Score a single entry.
    pub fn score(&self, snippet: &ContextSnippet, zodiac_sign: ZodiacSign, style: &str) -> u32 {
        let style = style.to_lowercase();
        self.score_lowered(snippet, zodiac_sign, &style)
    }

    fn score_lowered(&self, snippet: &ContextSnippet, zodiac_sign: ZodiacSign, style: &str) -> u32 {
        let overlap = snippet
            .keywords
            .iter()
            .filter(|k| style.contains(&k.to_lowercase()))
            .count() as u32;
        let bonus = if snippet.zodiac_sign == zodiac_sign {
            self.sign_bonus
        } else {
            0
        };
        overlap + bonus
    }

    /// Return at most `top_k` snippets, best first.
    ///
    /// Sorting is stable: equal scores keep corpus order.
    pub fn retrieve(&self, zodiac_sign: ZodiacSign, style: &str, top_k: usize) -> Vec<ScoredSnippet> {
        let style = style.to_lowercase();
        let mut scored: Vec<ScoredSnippet> = self
            .corpus
            .iter()
            .map(|snippet| ScoredSnippet {
                score: self.score_lowered(snippet, zodiac_sign, &style),
                snippet: snippet.clone(),
            })
            .collect();
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(top_k);
        scored
    }
}

impl Default for ContextAssembler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bonus_exceeds_any_keyword_overlap() {
        let assembler = ContextAssembler::new();
        assert_eq!(assembler.sign_bonus(), 5);
    }

    #[test]
    fn own_sign_first_even_with_unrelated_style() {
        let assembler = ContextAssembler::new();
        // Every keyword of the Taurus entry, none of the Leo entry.
        let style = "grounded practical reliable stability";
        let results = assembler.retrieve(ZodiacSign::Leo, style, 2);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].snippet.zodiac_sign, ZodiacSign::Leo);
        assert_eq!(results[0].score, 5);
        assert_eq!(results[1].snippet.zodiac_sign, ZodiacSign::Taurus);
        assert_eq!(results[1].score, 4);
    }

    #[test]
    fn keyword_match_is_case_insensitive_substring() {
        let assembler = ContextAssembler::new();
        let leo = &CORPUS[0];
        assert_eq!(assembler.score(leo, ZodiacSign::Aries, "LEADERSHIP and Warmth"), 2);
        // Substring: "inspire" inside "inspired".
        assert_eq!(assembler.score(leo, ZodiacSign::Aries, "inspired"), 1);
    }

    #[test]
    fn ties_keep_corpus_order() {
        let assembler = ContextAssembler::new();
        let results = assembler.retrieve(ZodiacSign::Pisces, "", 12);
        assert_eq!(results[0].snippet.zodiac_sign, ZodiacSign::Pisces);
        let rest: Vec<_> = results[1..].iter().map(|r| r.snippet.id).collect();
        let expected: Vec<_> = CORPUS
            .iter()
            .filter(|s| s.zodiac_sign != ZodiacSign::Pisces)
            .map(|s| s.id)
            .collect();
        assert_eq!(rest, expected);
    }

    #[test]
    fn top_k_bounds_result() {
        let assembler = ContextAssembler::new();
        assert!(assembler.retrieve(ZodiacSign::Leo, "anything", 0).is_empty());
        assert_eq!(assembler.retrieve(ZodiacSign::Leo, "anything", 3).len(), 3);
        assert_eq!(assembler.retrieve(ZodiacSign::Leo, "anything", 50).len(), 12);
    }
}
