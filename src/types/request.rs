//! Generation request and result types.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{Language, ZodiacSign};

/// Birth details of the subject an insight is generated for.
///
/// Built by the caller (which also derives the zodiac sign) and consumed
/// read-only by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Subject name, used to address the insight.
    pub name: String,

    /// Birth date, `YYYY-MM-DD`.
    pub birth_date: String,

    /// Birth time, `HH:MM` (24-hour).
    #[serde(default)]
    pub birth_time: String,

    /// Birth place (city, country).
    #[serde(default)]
    pub birth_place: String,

    /// Target output language.
    #[serde(default)]
    pub language: Language,

    /// Zodiac sign derived from the birth date.
    pub zodiac_sign: ZodiacSign,
}

impl GenerationRequest {
    /// Create a request with the identifying fields; time and place empty,
    /// language English.
    pub fn new(
        name: impl Into<String>,
        birth_date: impl Into<String>,
        zodiac_sign: ZodiacSign,
    ) -> Self {
        Self {
            name: name.into(),
            birth_date: birth_date.into(),
            birth_time: String::new(),
            birth_place: String::new(),
            language: Language::default(),
            zodiac_sign,
        }
    }

    /// Set the birth time.
    pub fn birth_time(mut self, time: impl Into<String>) -> Self {
        self.birth_time = time.into();
        self
    }

    /// Set the birth place.
    pub fn birth_place(mut self, place: impl Into<String>) -> Self {
        self.birth_place = place.into();
        self
    }

    /// Set the target language.
    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }
}

/// A generated (or cached) insight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    /// Insight text, already translated into `language`.
    pub text: String,
    /// Name of the provider that produced the text.
    pub provider: String,
    pub zodiac_sign: ZodiacSign,
    pub language: Language,
    /// Whether the insight was served from the cache.
    pub cached: bool,
    /// Time spent producing the insight.
    #[serde(with = "duration_millis")]
    pub elapsed: Duration,
}

mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_optional_fields() {
        let request = GenerationRequest::new("Ritika", "1995-08-20", ZodiacSign::Leo)
            .birth_time("14:30")
            .birth_place("Jaipur, India")
            .language(Language::Hindi);
        assert_eq!(request.birth_time, "14:30");
        assert_eq!(request.birth_place, "Jaipur, India");
        assert_eq!(request.language, Language::Hindi);
    }

    #[test]
    fn insight_serializes_elapsed_as_millis() {
        let insight = Insight {
            text: "hello".into(),
            provider: "template".into(),
            zodiac_sign: ZodiacSign::Leo,
            language: Language::English,
            cached: false,
            elapsed: Duration::from_millis(42),
        };
        let json = serde_json::to_value(&insight).unwrap();
        assert_eq!(json["elapsed"], 42);
        assert_eq!(json["language"], "en");
        assert_eq!(json["zodiac_sign"], "Leo");
    }
}
