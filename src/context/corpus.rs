//! Built-in reference corpus: one snippet per zodiac sign.

use serde::Serialize;

use crate::types::ZodiacSign;

/// A reference text used to enrich prompts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextSnippet {
    pub id: &'static str,
    pub text: &'static str,
    pub zodiac_sign: ZodiacSign,
    pub theme: &'static str,
    /// Ordered keyword set used for relevance scoring.
    pub keywords: &'static [&'static str],
}

/// The fixed corpus, in its canonical order (ties in scoring keep this order).
pub static CORPUS: [ContextSnippet; 12] = [
    ContextSnippet {
        id: "leo_leadership",
        text: "Leo individuals possess natural leadership qualities. Their warmth and charisma inspire others. Today, embrace your innate ability to guide and motivate.",
        zodiac_sign: ZodiacSign::Leo,
        theme: "leadership",
        keywords: &["leadership", "charisma", "warmth", "inspire"],
    },
    ContextSnippet {
        id: "taurus_grounded",
        text: "Taurus signs are known for their grounded nature and practical approach. Your reliability helps you handle unexpected work pressure with stability.",
        zodiac_sign: ZodiacSign::Taurus,
        theme: "stability",
        keywords: &["grounded", "practical", "reliable", "stability"],
    },
    ContextSnippet {
        id: "aries_energy",
        text: "Aries brings bold energy and pioneering spirit. Your courage drives you forward. Take initiative on projects that matter to you.",
        zodiac_sign: ZodiacSign::Aries,
        theme: "energy",
        keywords: &["bold", "energetic", "courage", "initiative"],
    },
    ContextSnippet {
        id: "gemini_communication",
        text: "Gemini excels in communication and adaptability. Share your ideas freely and connect with others. Your curiosity opens new doors.",
        zodiac_sign: ZodiacSign::Gemini,
        theme: "communication",
        keywords: &["communication", "adaptable", "curiosity", "ideas"],
    },
    ContextSnippet {
        id: "cancer_intuition",
        text: "Cancer signs are intuitive and nurturing. Trust your inner voice and nurture relationships. Your empathy creates deep connections.",
        zodiac_sign: ZodiacSign::Cancer,
        theme: "intuition",
        keywords: &["intuitive", "nurturing", "empathy", "relationships"],
    },
    ContextSnippet {
        id: "virgo_analysis",
        text: "Virgo's analytical mind helps solve complex problems. Focus on details but maintain the bigger picture. Your precision is valuable.",
        zodiac_sign: ZodiacSign::Virgo,
        theme: "analysis",
        keywords: &["analytical", "precision", "details", "problems"],
    },
    ContextSnippet {
        id: "libra_balance",
        text: "Libra seeks harmony and balance. Your diplomatic nature helps find equilibrium. Seek harmony in relationships and decisions.",
        zodiac_sign: ZodiacSign::Libra,
        theme: "balance",
        keywords: &["harmony", "balance", "diplomatic", "equilibrium"],
    },
    ContextSnippet {
        id: "scorpio_intensity",
        text: "Scorpio's intensity and passion fuel meaningful pursuits. Channel determination into goals. Your depth of feeling is a gift.",
        zodiac_sign: ZodiacSign::Scorpio,
        theme: "intensity",
        keywords: &["intense", "passion", "determination", "depth"],
    },
    ContextSnippet {
        id: "sagittarius_adventure",
        text: "Sagittarius brings adventurous spirit and optimism. Stay open to learning and new opportunities. Your enthusiasm is contagious.",
        zodiac_sign: ZodiacSign::Sagittarius,
        theme: "adventure",
        keywords: &["adventurous", "optimistic", "learning", "enthusiasm"],
    },
    ContextSnippet {
        id: "capricorn_ambition",
        text: "Capricorn's ambition and discipline drive achievement. Stay organized and focused. Your perseverance will pay off.",
        zodiac_sign: ZodiacSign::Capricorn,
        theme: "ambition",
        keywords: &["ambition", "discipline", "organized", "perseverance"],
    },
    ContextSnippet {
        id: "aquarius_innovation",
        text: "Aquarius brings innovative thinking and independence. Embrace your unique ideas and share them. Your idealism inspires others.",
        zodiac_sign: ZodiacSign::Aquarius,
        theme: "innovation",
        keywords: &["innovative", "independent", "unique", "idealism"],
    },
    ContextSnippet {
        id: "pisces_compassion",
        text: "Pisces shows compassion and creativity. Trust your artistic instincts and help those in need. Your empathy makes a difference.",
        zodiac_sign: ZodiacSign::Pisces,
        theme: "compassion",
        keywords: &["compassion", "creativity", "artistic", "empathy"],
    },
];
