//! HuggingFace Inference API client for text generation and translation.
//!
//! This client uses HuggingFace's serverless inference endpoints.
//! See: <https://huggingface.co/docs/api-inference/index>

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use super::traits::GenerationProvider;
use super::{MAX_OUTPUT_TOKENS, TEMPERATURE, http_client};
use crate::types::PromptContext;
use crate::{Result, StargazerError};

/// Default base URL for HuggingFace Inference API
const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co";

/// Default text generation model
pub const DEFAULT_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.1";

/// Client for HuggingFace Inference API.
///
/// Supports:
/// - Text generation (instruction-following models)
/// - Translation (seq2seq models taking FLORES language codes)
#[derive(Clone)]
pub struct HuggingFaceClient {
    api_key: String,
    http: Client,
    base_url: String,
    model: String,
}

impl HuggingFaceClient {
    /// Create a new HuggingFace client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing with wiremock).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            http: http_client(),
            base_url: base_url.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Override the text generation model.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Whether an API key is configured.
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Generate a continuation for `prompt` with the configured model.
    ///
    /// The prompt is wrapped in a short instruction for instruction-tuned
    /// models; any echo of that wrapped prompt is stripped from the answer.
    pub async fn generate_text(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/models/{}", self.base_url, self.model);
        let formatted = format!(
            "You are an expert astrologer. Generate a warm, personalized daily insight (2-3 sentences).\n\n{prompt}"
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&GenerateRequest {
                inputs: &formatted,
                parameters: GenerateParameters {
                    max_new_tokens: MAX_OUTPUT_TOKENS,
                    temperature: TEMPERATURE,
                    return_full_text: false,
                },
            })
            .send()
            .await?;

        self.handle_response_errors(&response, &self.model)?;

        let parsed: GenerateResponse = response.json().await?;
        let text = match parsed {
            GenerateResponse::Batch(items) => items
                .into_iter()
                .next()
                .map(|item| item.generated_text)
                .ok_or(StargazerError::EmptyResponse)?,
            GenerateResponse::Single(item) => item.generated_text,
        };

        Ok(text.replace(&formatted, "").trim().to_string())
    }

    /// Translate `text` with a seq2seq translation model.
    ///
    /// # Arguments
    /// * `model` - Full HuggingFace model ID (e.g., `facebook/nllb-200-distilled-600M`)
    /// * `src_lang` / `tgt_lang` - FLORES-200 codes (e.g., `eng_Latn`, `hin_Deva`)
    pub async fn translate(
        &self,
        text: &str,
        model: &str,
        src_lang: &str,
        tgt_lang: &str,
    ) -> Result<String> {
        let url = format!("{}/models/{}", self.base_url, model);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&TranslateRequest {
                inputs: text,
                parameters: TranslateParameters { src_lang, tgt_lang },
            })
            .send()
            .await?;

        self.handle_response_errors(&response, model)?;

        let parsed: Vec<TranslateResponse> = response.json().await?;
        parsed
            .into_iter()
            .next()
            .map(|t| t.translation_text.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(StargazerError::EmptyResponse)
    }

    fn handle_response_errors(&self, response: &reqwest::Response, model: &str) -> Result<()> {
        let status = response.status();

        if status.is_success() {
            return Ok(());
        }

        match status.as_u16() {
            503 => Err(StargazerError::Api {
                status: 503,
                message: format!("model {model} is loading, please retry"),
            }),
            code => Err(StargazerError::from_status(
                code,
                format!("HuggingFace API error for {model}: {status}"),
            )),
        }
    }
}

#[async_trait]
impl GenerationProvider for HuggingFaceClient {
    fn name(&self) -> &str {
        "huggingface"
    }

    async fn generate(&self, prompt: &PromptContext, cancel: CancellationToken) -> Result<String> {
        tokio::select! {
            _ = cancel.cancelled() => Err(StargazerError::Cancelled),
            text = self.generate_text(&prompt.text) => text,
        }
    }
}

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Serialize)]
struct GenerateRequest<'a> {
    inputs: &'a str,
    parameters: GenerateParameters,
}

#[derive(Serialize)]
struct GenerateParameters {
    max_new_tokens: u32,
    temperature: f32,
    return_full_text: bool,
}

/// The endpoint answers with a list for most models and a bare object for some.
#[derive(Deserialize)]
#[serde(untagged)]
enum GenerateResponse {
    Batch(Vec<GeneratedText>),
    Single(GeneratedText),
}

#[derive(Deserialize)]
struct GeneratedText {
    generated_text: String,
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    inputs: &'a str,
    parameters: TranslateParameters<'a>,
}

#[derive(Serialize)]
struct TranslateParameters<'a> {
    src_lang: &'a str,
    tgt_lang: &'a str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    translation_text: String,
}
