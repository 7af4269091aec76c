//! Google Cloud Translation (v2 REST) backend.
//!
//! See: <https://cloud.google.com/translate/docs/reference/rest/v2/translate>

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{TranslationBackend, TranslationMethod};
use crate::providers::{ensure_success, http_client};
use crate::types::Language;
use crate::{Result, StargazerError};

const DEFAULT_BASE_URL: &str = "https://translation.googleapis.com";

/// Client for Google Cloud Translation v2.
#[derive(Clone)]
pub struct GoogleTranslateClient {
    api_key: String,
    http: Client,
    base_url: String,
}

impl GoogleTranslateClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing with wiremock).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            http: http_client(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl TranslationBackend for GoogleTranslateClient {
    fn name(&self) -> &str {
        "google"
    }

    fn method(&self) -> TranslationMethod {
        TranslationMethod::Google
    }

    fn is_available(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    async fn translate(&self, text: &str, target: Language) -> Result<String> {
        let url = format!("{}/language/translate/v2", self.base_url);
        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&TranslateRequest {
                q: text,
                source: Language::English.code(),
                target: target.code(),
                format: "text",
            })
            .send()
            .await?;
        let response = ensure_success(response, "google translate").await?;
        let parsed: TranslateResponse = response.json().await?;

        parsed
            .data
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .ok_or(StargazerError::EmptyResponse)
    }
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    data: TranslationData,
}

#[derive(Deserialize)]
struct TranslationData {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
}
