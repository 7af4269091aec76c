//! Prompt context handed to generation providers.

use serde::{Deserialize, Serialize};

use super::{GenerationRequest, ZodiacSign};

/// Structured hints carried next to the prompt text.
///
/// Remote providers only read the text; local providers (the template
/// provider) use the hints directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptHints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zodiac_sign: Option<ZodiacSign>,
}

/// Assembled prompt: plain text plus optional structured hints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptContext {
    pub text: String,
    #[serde(default)]
    pub hints: PromptHints,
}

impl PromptContext {
    /// A bare prompt without hints.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            hints: PromptHints::default(),
        }
    }

    /// Build the insight prompt from the request, retrieved corpus snippets
    /// and the subject's personalization summary.
    ///
    /// Empty `snippets` and `None` personalization omit their sections.
    pub fn assemble(
        request: &GenerationRequest,
        snippets: &[String],
        personalization: Option<&str>,
    ) -> Self {
        let sign = request.zodiac_sign;
        let place = non_empty_or(&request.birth_place, "Not specified");
        let time = non_empty_or(&request.birth_time, "Not specified");

        let mut lines = vec![
            format!(
                "Generate a personalized daily astrological insight for {}.",
                request.name
            ),
            String::new(),
            format!("Zodiac Sign: {sign}"),
            format!("Traits: {}", sign.traits()),
            format!("Element: {}", sign.element().as_str()),
            format!("Strengths: {}", sign.strengths()),
            format!("Birth Date: {}", request.birth_date),
            format!("Birth Time: {time}"),
            format!("Birth Place: {place}"),
            String::new(),
            format!("Base Prediction: {}", sign.base_prediction()),
        ];

        if !snippets.is_empty() {
            lines.push(String::new());
            lines.push("Relevant Astrological Context:".to_string());
            for (i, snippet) in snippets.iter().enumerate() {
                lines.push(format!("{}. {}", i + 1, snippet));
            }
        }

        if let Some(summary) = personalization.filter(|s| !s.trim().is_empty()) {
            lines.push(String::new());
            lines.push("User Preferences:".to_string());
            lines.push(summary.to_string());
        }

        lines.extend([
            String::new(),
            "Generate a natural, personalized insight (2-3 sentences) that:".to_string(),
            format!("1. Addresses {} directly", request.name),
            "2. Incorporates their zodiac traits naturally".to_string(),
            "3. Provides actionable, positive guidance".to_string(),
            "4. Sounds warm and authentic".to_string(),
            String::new(),
            "Insight:".to_string(),
        ]);

        Self {
            text: lines.join("\n"),
            hints: PromptHints {
                name: Some(request.name.clone()),
                zodiac_sign: Some(sign),
            },
        }
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}
