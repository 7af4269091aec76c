//! Stargazer - personalized insight generation over a provider fallback chain
//!
//! This crate generates short personalized daily insights from a subject's
//! birth details. Generation runs through an ordered chain of interchangeable
//! text-generation providers, each bounded by a timeout and closed by an
//! infallible template provider, so a request always yields text. Around the
//! chain sit a deterministic insight cache, a keyword-scored context corpus,
//! per-subject profiles feeding personalization back into the prompt, and a
//! translation adapter with the same fallback discipline.
//!
//! # Example
//!
//! ```rust,no_run
//! use stargazer::{GenerationRequest, Language, Stargazer, ZodiacSign};
//!
//! #[tokio::main]
//! async fn main() -> stargazer::Result<()> {
//!     let engine = Stargazer::builder()
//!         .gemini("your-gemini-key")
//!         .context_retrieval(true)
//!         .profiles(true)
//!         .build()?;
//!
//!     let request = GenerationRequest::new("Ritika", "1995-08-20", ZodiacSign::Leo)
//!         .birth_time("14:30")
//!         .birth_place("Jaipur, India")
//!         .language(Language::Hindi);
//!
//!     let insight = engine.generate_insight(&request).await?;
//!     println!("[{}] {}", insight.provider, insight.text);
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod context;
pub mod error;
pub mod gateway;
pub mod profile;
pub mod providers;
pub mod telemetry;
pub mod translation;
pub mod types;

/// Crate version, as published.
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export main types at crate root
pub use cache::{CacheConfig, CacheEntry, CacheKey, InsightCache};
pub use config::{Config, Secrets};
pub use context::{ContextAssembler, ContextSnippet, ScoredSnippet};
pub use error::{Result, StargazerError};
pub use gateway::{InsightEngine, Stargazer, StargazerBuilder};
pub use profile::{ProfileId, ProfileTracker, UserProfile};
pub use providers::{
    Generation, GenerationProvider, ProviderChain, ProviderDescriptor, ProviderSelection,
};
pub use translation::{TranslationAdapter, TranslationBackend, TranslationMethod};

// Re-export all types
pub use types::{
    Element, GenerationRequest, Insight, Language, PromptContext, PromptHints, ZodiacSign,
};
