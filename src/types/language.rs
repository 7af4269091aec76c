//! Output language codes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::StargazerError;

/// Target language of an insight.
///
/// Providers always generate English; any other language goes through the
/// translation adapter afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "hi")]
    Hindi,
}

impl Language {
    /// ISO 639-1 code.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
        }
    }

    /// FLORES-200 code, as used by NLLB and IndicTrans2.
    pub fn flores_code(&self) -> &'static str {
        match self {
            Language::English => "eng_Latn",
            Language::Hindi => "hin_Deva",
        }
    }

    /// Whether generated (English) text needs translating into this language.
    pub fn requires_translation(&self) -> bool {
        *self != Language::English
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = StargazerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::English),
            "hi" => Ok(Language::Hindi),
            other => Err(StargazerError::InvalidInput(format!(
                "language must be either \"en\" or \"hi\", got \"{other}\""
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_codes() {
        assert_eq!("en".parse::<Language>().unwrap(), Language::English);
        assert_eq!("HI".parse::<Language>().unwrap(), Language::Hindi);
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn only_non_english_requires_translation() {
        assert!(!Language::English.requires_translation());
        assert!(Language::Hindi.requires_translation());
    }

    #[test]
    fn serde_uses_codes() {
        assert_eq!(serde_json::to_string(&Language::Hindi).unwrap(), "\"hi\"");
        let lang: Language = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(lang, Language::English);
    }
}
