//! Zodiac sign identifiers and their static trait data.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::StargazerError;

/// One of the twelve zodiac signs.
///
/// The sign is derived from a birth date by the caller; stargazer only
/// consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

/// Classical element of a sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

impl ZodiacSign {
    /// All signs in calendar order starting from Aries.
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    /// Canonical display name (e.g. `"Leo"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }

    /// Short trait description, also used as the retrieval style descriptor.
    pub fn traits(&self) -> &'static str {
        match self {
            ZodiacSign::Aries => "bold, energetic, and pioneering",
            ZodiacSign::Taurus => "grounded, reliable, and sensual",
            ZodiacSign::Gemini => "curious, adaptable, and communicative",
            ZodiacSign::Cancer => "intuitive, nurturing, and emotional",
            ZodiacSign::Leo => "confident, warm, and charismatic",
            ZodiacSign::Virgo => "analytical, practical, and detail-oriented",
            ZodiacSign::Libra => "diplomatic, balanced, and harmonious",
            ZodiacSign::Scorpio => "intense, passionate, and transformative",
            ZodiacSign::Sagittarius => "adventurous, optimistic, and philosophical",
            ZodiacSign::Capricorn => "ambitious, disciplined, and responsible",
            ZodiacSign::Aquarius => "innovative, independent, and humanitarian",
            ZodiacSign::Pisces => "compassionate, intuitive, and artistic",
        }
    }

    pub fn strengths(&self) -> &'static str {
        match self {
            ZodiacSign::Aries => "leadership, courage, determination",
            ZodiacSign::Taurus => "patience, stability, practicality",
            ZodiacSign::Gemini => "versatility, wit, social skills",
            ZodiacSign::Cancer => "empathy, loyalty, imagination",
            ZodiacSign::Leo => "leadership, creativity, generosity",
            ZodiacSign::Virgo => "precision, reliability, problem-solving",
            ZodiacSign::Libra => "fairness, charm, cooperation",
            ZodiacSign::Scorpio => "determination, resourcefulness, depth",
            ZodiacSign::Sagittarius => "enthusiasm, honesty, open-mindedness",
            ZodiacSign::Capricorn => "perseverance, organization, wisdom",
            ZodiacSign::Aquarius => "originality, idealism, friendliness",
            ZodiacSign::Pisces => "empathy, creativity, adaptability",
        }
    }

    pub fn element(&self) -> Element {
        match self {
            ZodiacSign::Aries | ZodiacSign::Leo | ZodiacSign::Sagittarius => Element::Fire,
            ZodiacSign::Taurus | ZodiacSign::Virgo | ZodiacSign::Capricorn => Element::Earth,
            ZodiacSign::Gemini | ZodiacSign::Libra | ZodiacSign::Aquarius => Element::Air,
            ZodiacSign::Cancer | ZodiacSign::Scorpio | ZodiacSign::Pisces => Element::Water,
        }
    }

    /// Rule-based daily prediction seeded from the sign's element.
    pub fn base_prediction(&self) -> String {
        let prediction = match self.element() {
            Element::Fire => {
                "Your passionate energy will drive you forward today. Channel your enthusiasm into productive endeavors."
            }
            Element::Earth => {
                "Your grounded nature will help you handle unexpected work pressure. Stay practical and focused."
            }
            Element::Air => {
                "Your communication skills will be highlighted today. Share your ideas and connect with others."
            }
            Element::Water => {
                "Your intuition will guide you through emotional situations. Trust your inner voice."
            }
        };
        format!("Your {} nature suggests that {}", self.traits(), prediction)
    }
}

impl Element {
    pub fn as_str(&self) -> &'static str {
        match self {
            Element::Fire => "Fire",
            Element::Earth => "Earth",
            Element::Air => "Air",
            Element::Water => "Water",
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZodiacSign {
    type Err = StargazerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ZodiacSign::ALL
            .into_iter()
            .find(|sign| sign.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| StargazerError::InvalidInput(format!("unknown zodiac sign: {s}")))
    }
}
