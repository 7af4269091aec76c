//! Post-generation translation with ordered backend fallback.
//!
//! Providers always generate English. When a request targets another
//! language, the [`TranslationAdapter`] converts the generated text using
//! one of several backends:
//!
//! | Method        | Backend                                    |
//! |---------------|--------------------------------------------|
//! | `indictrans2` | IndicTrans2 via HuggingFace Inference      |
//! | `nllb`        | NLLB-200 via HuggingFace Inference         |
//! | `google`      | Google Cloud Translation v2                |
//! | `placeholder` | deterministic local transform (terminal)   |
//!
//! Under [`TranslationMethod::Auto`] the available backends are tried in
//! that order, each once under the adapter timeout, and the placeholder
//! closes the chain. Availability is probed once, when the adapter is
//! built.

pub mod google;
pub mod huggingface;
pub mod placeholder;

pub use google::GoogleTranslateClient;
pub use huggingface::HfTranslator;
pub use placeholder::PlaceholderTranslator;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::telemetry;
use crate::types::Language;
use crate::{Result, StargazerError};

/// Default per-backend translation timeout.
pub const DEFAULT_TRANSLATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Translation backend selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationMethod {
    /// First available backend, most specialized first.
    #[default]
    Auto,
    #[serde(rename = "indictrans2")]
    IndicTrans2,
    Nllb,
    Google,
    /// Deterministic local transform. Always available.
    #[serde(alias = "stub")]
    Placeholder,
}

impl TranslationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranslationMethod::Auto => "auto",
            TranslationMethod::IndicTrans2 => "indictrans2",
            TranslationMethod::Nllb => "nllb",
            TranslationMethod::Google => "google",
            TranslationMethod::Placeholder => "placeholder",
        }
    }

    /// Position under `Auto`; lower is tried first.
    fn rank(&self) -> u8 {
        match self {
            TranslationMethod::IndicTrans2 => 0,
            TranslationMethod::Nllb => 1,
            TranslationMethod::Google => 2,
            TranslationMethod::Placeholder | TranslationMethod::Auto => u8::MAX,
        }
    }
}

impl fmt::Display for TranslationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TranslationMethod {
    type Err = StargazerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(TranslationMethod::Auto),
            "indictrans2" => Ok(TranslationMethod::IndicTrans2),
            "nllb" => Ok(TranslationMethod::Nllb),
            "google" => Ok(TranslationMethod::Google),
            "placeholder" | "stub" => Ok(TranslationMethod::Placeholder),
            _ => Err(StargazerError::Configuration(format!(
                "unknown translation method '{s}' (expected auto, indictrans2, nllb, google or placeholder)"
            ))),
        }
    }
}

/// A translation backend.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Backend name for logging and metrics.
    fn name(&self) -> &str;

    /// The method that selects this backend.
    fn method(&self) -> TranslationMethod;

    /// Whether the backend's runtime dependency is configured.
    ///
    /// Probed once when the adapter is built.
    fn is_available(&self) -> bool;

    /// Translate English `text` into `target`.
    async fn translate(&self, text: &str, target: Language) -> Result<String>;
}

/// Ordered translation backends closed by the placeholder transform.
pub struct TranslationAdapter {
    /// Available backends, in `Auto` order.
    backends: Vec<Arc<dyn TranslationBackend>>,
    placeholder: PlaceholderTranslator,
    timeout: Duration,
}

impl TranslationAdapter {
    /// Build an adapter from candidate backends.
    ///
    /// Unavailable candidates are dropped here and never reconsidered.
    pub fn new(candidates: Vec<Arc<dyn TranslationBackend>>, timeout: Duration) -> Self {
        let mut backends: Vec<_> = candidates
            .into_iter()
            .filter(|backend| {
                let available = backend.is_available();
                if !available {
                    debug!(backend = backend.name(), "translation backend unavailable");
                }
                available && backend.method() != TranslationMethod::Placeholder
            })
            .collect();
        backends.sort_by_key(|b| b.method().rank());

        Self {
            backends,
            placeholder: PlaceholderTranslator,
            timeout,
        }
    }

    /// Adapter with no remote backends.
    pub fn placeholder_only() -> Self {
        Self::new(Vec::new(), DEFAULT_TRANSLATION_TIMEOUT)
    }

    /// Methods usable with [`translate`](Self::translate), in `Auto` order.
    pub fn available_methods(&self) -> Vec<TranslationMethod> {
        let mut methods = vec![TranslationMethod::Auto];
        methods.extend(self.backends.iter().map(|b| b.method()));
        methods.push(TranslationMethod::Placeholder);
        methods
    }

    /// Whether `method` can be requested without `TranslationUnavailable`.
    pub fn is_method_available(&self, method: TranslationMethod) -> bool {
        match method {
            TranslationMethod::Auto | TranslationMethod::Placeholder => true,
            named => self.backend_for(named).is_some(),
        }
    }

    fn backend_for(&self, method: TranslationMethod) -> Option<&Arc<dyn TranslationBackend>> {
        self.backends.iter().find(|b| b.method() == method)
    }

    /// Translate `text` into `target`.
    ///
    /// English targets return the text unchanged. A named backend that was
    /// not available at construction yields
    /// [`StargazerError::TranslationUnavailable`]; any backend failure at
    /// call time degrades to the placeholder.
    #[instrument(skip(self, text), fields(len = text.len()))]
    pub async fn translate(
        &self,
        text: &str,
        target: Language,
        method: TranslationMethod,
    ) -> Result<String> {
        if !target.requires_translation() {
            return Ok(text.to_string());
        }

        match method {
            TranslationMethod::Placeholder => {}
            TranslationMethod::Auto => {
                for backend in &self.backends {
                    if let Some(translated) = self.attempt(backend.as_ref(), text, target).await {
                        return Ok(translated);
                    }
                }
            }
            named => {
                let backend = self
                    .backend_for(named)
                    .ok_or_else(|| StargazerError::TranslationUnavailable(named.to_string()))?;
                if let Some(translated) = self.attempt(backend.as_ref(), text, target).await {
                    return Ok(translated);
                }
            }
        }

        Self::record(self.placeholder.name(), "ok");
        Ok(PlaceholderTranslator::transform(text, target))
    }

    /// One bounded attempt. `None` means fall through.
    async fn attempt(
        &self,
        backend: &dyn TranslationBackend,
        text: &str,
        target: Language,
    ) -> Option<String> {
        let name = backend.name();
        match tokio::time::timeout(self.timeout, backend.translate(text, target)).await {
            Ok(Ok(translated)) if !translated.trim().is_empty() => {
                Self::record(name, "ok");
                Some(translated)
            }
            Ok(Ok(_)) => {
                Self::record(name, "error");
                warn!(backend = name, "translation backend returned empty text");
                None
            }
            Ok(Err(e)) => {
                Self::record(name, "error");
                warn!(backend = name, error = %e, "translation backend failed, falling back");
                None
            }
            Err(_) => {
                Self::record(name, "timeout");
                warn!(backend = name, timeout = ?self.timeout, "translation backend timed out, falling back");
                None
            }
        }
    }

    fn record(backend: &str, status: &'static str) {
        metrics::counter!(telemetry::TRANSLATIONS_TOTAL,
            "backend" => backend.to_owned(),
            "status" => status,
        )
        .increment(1);
    }
}

impl Default for TranslationAdapter {
    fn default() -> Self {
        Self::placeholder_only()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_parses_with_stub_alias() {
        assert_eq!("stub".parse::<TranslationMethod>().unwrap(), TranslationMethod::Placeholder);
        assert_eq!("NLLB".parse::<TranslationMethod>().unwrap(), TranslationMethod::Nllb);
        assert!("bing".parse::<TranslationMethod>().is_err());
    }

    #[test]
    fn method_serde_names() {
        let json = serde_json::to_string(&TranslationMethod::IndicTrans2).unwrap();
        assert_eq!(json, "\"indictrans2\"");
        let parsed: TranslationMethod = serde_json::from_str("\"stub\"").unwrap();
        assert_eq!(parsed, TranslationMethod::Placeholder);
    }

    #[test]
    fn placeholder_only_methods() {
        let adapter = TranslationAdapter::placeholder_only();
        assert_eq!(
            adapter.available_methods(),
            vec![TranslationMethod::Auto, TranslationMethod::Placeholder]
        );
        assert!(!adapter.is_method_available(TranslationMethod::Google));
    }

    #[tokio::test]
    async fn english_is_identity() {
        let adapter = TranslationAdapter::placeholder_only();
        let text = adapter
            .translate("Hello", Language::English, TranslationMethod::Auto)
            .await
            .unwrap();
        assert_eq!(text, "Hello");
    }

    #[tokio::test]
    async fn unavailable_named_backend_errors() {
        let adapter = TranslationAdapter::placeholder_only();
        let err = adapter
            .translate("Hello", Language::Hindi, TranslationMethod::Nllb)
            .await
            .unwrap_err();
        assert!(matches!(err, StargazerError::TranslationUnavailable(ref m) if m == "nllb"));
    }
}
