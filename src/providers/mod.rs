//! Text generation providers and the fallback chain that runs them.
//!
//! Remote providers ([`GeminiClient`], [`HuggingFaceClient`],
//! [`OpenAiClient`]) call hosted models over HTTP. [`TemplateProvider`] is
//! the local terminal fallback. [`ProviderChain`] orders them and bounds
//! each attempt with a timeout.

pub mod chain;
pub mod gemini;
pub mod huggingface;
pub mod openai;
pub mod template;
pub mod traits;

pub use chain::{
    AttemptOutcome, DEFAULT_PROVIDER_TIMEOUT, FailureKind, FailureRecord, Generation,
    ProviderChain, ProviderDescriptor,
};
pub use gemini::GeminiClient;
pub use huggingface::HuggingFaceClient;
pub use openai::OpenAiClient;
pub use template::TemplateProvider;
pub use traits::GenerationProvider;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::StargazerError;

/// System persona sent to chat-style models.
pub(crate) const SYSTEM_PERSONA: &str =
    "You are an expert astrologer who provides warm, personalized daily insights.";

/// Output token cap for every remote provider.
pub(crate) const MAX_OUTPUT_TOKENS: u32 = 200;

/// Sampling temperature for every remote provider.
pub(crate) const TEMPERATURE: f32 = 0.7;

/// Transport-level timeout; the chain's per-provider timeout is normally tighter.
const HTTP_TIMEOUT: Duration = Duration::from_secs(60);

/// Shared HTTP client configuration for remote providers.
pub(crate) fn http_client() -> Client {
    Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Turn a non-success response into an error, keeping a short body excerpt.
pub(crate) async fn ensure_success(
    response: reqwest::Response,
    service: &str,
) -> crate::Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let excerpt: String = body.chars().take(200).collect();
    Err(StargazerError::from_status(
        status.as_u16(),
        format!("{service} returned {status}: {excerpt}"),
    ))
}

/// Which providers make up the chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ProviderSelection {
    /// Every configured provider in default priority order.
    #[default]
    Auto,
    /// One named provider, followed by the terminal template provider.
    Named(String),
}

impl ProviderSelection {
    /// Names accepted by [`ProviderSelection::Named`].
    pub const KNOWN: [&'static str; 4] = ["gemini", "huggingface", "openai", "template"];
}

impl FromStr for ProviderSelection {
    type Err = StargazerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        match name.as_str() {
            "auto" | "" => Ok(ProviderSelection::Auto),
            "mock" => Ok(ProviderSelection::Named("template".to_string())),
            known if Self::KNOWN.contains(&known) => {
                Ok(ProviderSelection::Named(known.to_string()))
            }
            _ => Err(StargazerError::Configuration(format!(
                "unknown provider '{s}' (expected auto, {})",
                Self::KNOWN.join(", ")
            ))),
        }
    }
}

impl TryFrom<String> for ProviderSelection {
    type Error = StargazerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ProviderSelection> for String {
    fn from(value: ProviderSelection) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ProviderSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderSelection::Auto => f.write_str("auto"),
            ProviderSelection::Named(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_parses_known_names() {
        assert_eq!("auto".parse::<ProviderSelection>().unwrap(), ProviderSelection::Auto);
        assert_eq!(
            "Gemini".parse::<ProviderSelection>().unwrap(),
            ProviderSelection::Named("gemini".into())
        );
        assert_eq!(
            "mock".parse::<ProviderSelection>().unwrap(),
            ProviderSelection::Named("template".into())
        );
    }

    #[test]
    fn selection_rejects_unknown() {
        let err = "claude".parse::<ProviderSelection>().unwrap_err();
        assert!(matches!(err, StargazerError::Configuration(_)));
    }

    #[test]
    fn selection_deserializes_from_string() {
        #[derive(Deserialize)]
        struct Wrapper {
            provider: ProviderSelection,
        }
        let w: Wrapper = toml::from_str(r#"provider = "openai""#).unwrap();
        assert_eq!(w.provider, ProviderSelection::Named("openai".into()));
    }
}
