//! Provider trait for text generation backends.
//!
//! Every backend in the fallback chain implements [`GenerationProvider`].
//! The chain never inspects error variants: any `Err`, an empty answer or
//! a timeout simply moves on to the next provider.
//!
//! # Cancellation
//!
//! Each attempt receives a fresh [`CancellationToken`]. When the attempt
//! exceeds its timeout the chain drops the future and cancels the token.
//! Providers that spawn work of their own should watch the token; a plain
//! `async` body is abandoned by the drop alone.
//!
//! # Example
//!
//! ```ignore
//! async fn generate(&self, prompt: &PromptContext, cancel: CancellationToken) -> Result<String> {
//!     tokio::select! {
//!         _ = cancel.cancelled() => Err(StargazerError::Cancelled),
//!         text = self.complete(&prompt.text) => text,
//!     }
//! }
//! ```

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::Result;
use crate::types::PromptContext;

/// A text generation backend.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Provider name for logging, metrics and [`Insight::provider`](crate::Insight::provider).
    fn name(&self) -> &str;

    /// Whether this provider can close a chain.
    ///
    /// Terminal providers must be infallible and instantaneous and must not
    /// touch external resources. A chain is rejected at construction unless
    /// its lowest-priority provider is terminal.
    fn is_terminal(&self) -> bool {
        false
    }

    /// Generate text for the assembled prompt.
    async fn generate(&self, prompt: &PromptContext, cancel: CancellationToken) -> Result<String>;
}
