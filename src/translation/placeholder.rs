//! Deterministic placeholder translation.

use async_trait::async_trait;

use super::{TranslationBackend, TranslationMethod};
use crate::Result;
use crate::types::Language;

/// Characters of the source text kept by the placeholder.
const EXCERPT_CHARS: usize = 100;

/// Marks text as "translated" without any external dependency.
///
/// Never fails and never blocks; it closes every translation chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderTranslator;

impl PlaceholderTranslator {
    /// The placeholder transform.
    ///
    /// Hindi: a fixed Hindi prefix followed by the first 100 characters of
    /// the text and an ellipsis. English: the text unchanged.
    pub fn transform(text: &str, target: Language) -> String {
        match target {
            Language::English => text.to_string(),
            Language::Hindi => {
                let excerpt: String = text.chars().take(EXCERPT_CHARS).collect();
                format!("आज आपकी ज्योतिषीय अंतर्दृष्टि: {excerpt}...")
            }
        }
    }
}

#[async_trait]
impl TranslationBackend for PlaceholderTranslator {
    fn name(&self) -> &str {
        "placeholder"
    }

    fn method(&self) -> TranslationMethod {
        TranslationMethod::Placeholder
    }

    fn is_available(&self) -> bool {
        true
    }

    async fn translate(&self, text: &str, target: Language) -> Result<String> {
        Ok(Self::transform(text, target))
    }
}
