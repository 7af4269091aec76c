//! Public types for the Stargazer API.

mod language;
mod prompt;
mod request;
mod zodiac;

pub use language::Language;
pub use prompt::{PromptContext, PromptHints};
pub use request::{GenerationRequest, Insight};
pub use zodiac::{Element, ZodiacSign};
