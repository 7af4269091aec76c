//! Template-based terminal provider.
//!
//! Produces a fixed per-sign insight addressed to the subject by name. It
//! reads only the prompt's structured hints, never the prompt text, and
//! never fails, so it closes every provider chain.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::traits::GenerationProvider;
use crate::Result;
use crate::types::{PromptContext, ZodiacSign};

/// Name used when the prompt carries no subject name.
const ANONYMOUS: &str = "Friend";

/// Deterministic, infallible, instantaneous generator.
#[derive(Debug, Clone, Default)]
pub struct TemplateProvider;

impl TemplateProvider {
    pub fn new() -> Self {
        Self
    }

    /// Render the insight for a subject.
    ///
    /// Without a sign the text falls back to a generic encouragement.
    pub fn render(name: Option<&str>, zodiac_sign: Option<ZodiacSign>) -> String {
        let name = name.map(str::trim).filter(|n| !n.is_empty()).unwrap_or(ANONYMOUS);
        match zodiac_sign {
            Some(sign) => sign_template(name, sign),
            None => format!(
                "Dear {name}, today favors steady steps and an open heart. Trust your strengths and the journey ahead."
            ),
        }
    }
}

fn sign_template(name: &str, sign: ZodiacSign) -> String {
    match sign {
        ZodiacSign::Leo => format!(
            "Dear {name}, your innate leadership and warmth will shine today. Embrace spontaneity and avoid overthinking. Your natural charisma will help you connect with others."
        ),
        ZodiacSign::Aries => format!(
            "{name}, your bold and energetic spirit will drive you forward today. Take initiative on projects that matter to you. Your courage will inspire those around you."
        ),
        ZodiacSign::Taurus => format!(
            "{name}, your grounded nature will help you handle unexpected work pressure today. Stay practical and trust your instincts. Your reliability is your strength."
        ),
        ZodiacSign::Gemini => format!(
            "{name}, your curiosity and communication skills will be highlighted today. Share your ideas freely and connect with others. Your adaptability will serve you well."
        ),
        ZodiacSign::Cancer => format!(
            "{name}, your intuition will guide you through emotional situations today. Trust your inner voice and nurture your relationships. Your empathy creates deep connections."
        ),
        ZodiacSign::Virgo => format!(
            "{name}, your analytical mind will help you solve complex problems today. Focus on details but don't lose sight of the bigger picture. Your precision is valuable."
        ),
        ZodiacSign::Libra => format!(
            "{name}, your diplomatic nature will help you find balance today. Seek harmony in your relationships and decisions. Your charm will open doors."
        ),
        ZodiacSign::Scorpio => format!(
            "{name}, your intensity and passion will fuel your pursuits today. Channel your determination into meaningful goals. Your depth of feeling is a gift."
        ),
        ZodiacSign::Sagittarius => format!(
            "{name}, your adventurous spirit will lead you to new opportunities today. Stay optimistic and open to learning. Your enthusiasm is contagious."
        ),
        ZodiacSign::Capricorn => format!(
            "{name}, your ambition and discipline will help you achieve your goals today. Stay organized and focused. Your perseverance will pay off."
        ),
        ZodiacSign::Aquarius => format!(
            "{name}, your innovative thinking will bring fresh perspectives today. Embrace your independence and share your unique ideas. Your idealism inspires others."
        ),
        ZodiacSign::Pisces => format!(
            "{name}, your compassion and creativity will flow today. Trust your artistic instincts and help those in need. Your empathy makes a difference."
        ),
    }
}

#[async_trait]
impl GenerationProvider for TemplateProvider {
    fn name(&self) -> &str {
        "template"
    }

    fn is_terminal(&self) -> bool {
        true
    }

    async fn generate(&self, prompt: &PromptContext, _cancel: CancellationToken) -> Result<String> {
        Ok(Self::render(
            prompt.hints.name.as_deref(),
            prompt.hints.zodiac_sign,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GenerationRequest;

    #[test]
    fn addresses_subject_by_name() {
        let text = TemplateProvider::render(Some("Ritika"), Some(ZodiacSign::Leo));
        assert!(text.starts_with("Dear Ritika, your innate leadership"));
    }

    #[test]
    fn every_sign_has_distinct_text() {
        let texts: std::collections::HashSet<_> = ZodiacSign::ALL
            .into_iter()
            .map(|sign| TemplateProvider::render(Some("A"), Some(sign)))
            .collect();
        assert_eq!(texts.len(), 12);
    }

    #[test]
    fn missing_hints_still_produce_text() {
        let text = TemplateProvider::render(None, None);
        assert!(text.contains(ANONYMOUS));
        assert!(!text.is_empty());
        let blank = TemplateProvider::render(Some("  "), Some(ZodiacSign::Aries));
        assert!(blank.starts_with(ANONYMOUS));
    }

    #[tokio::test]
    async fn generate_is_deterministic() {
        let request = GenerationRequest::new("Ritika", "1995-08-20", ZodiacSign::Leo);
        let prompt = PromptContext::assemble(&request, &[], None);
        let provider = TemplateProvider::new();
        let a = provider.generate(&prompt, CancellationToken::new()).await.unwrap();
        let b = provider.generate(&prompt, CancellationToken::new()).await.unwrap();
        assert_eq!(a, b);
        assert!(provider.is_terminal());
    }
}
