//! Timeout-bounded provider fallback chain.
//!
//! The `ProviderChain` stores providers in priority order (lowest rank
//! first) and attempts them one at a time until one produces text.
//!
//! # Fallback Triggers
//!
//! The chain moves on to the next provider when an attempt:
//! - returns any error,
//! - returns empty (or whitespace-only) text,
//! - does not finish within the provider's timeout.
//!
//! Only success stops the chain. Failures are recorded in
//! [`Generation::failures`] and never surface to the caller.
//!
//! # Chain Flow
//!
//! ```text
//!          generate(prompt)
//!                 │
//!                 ▼
//!   ┌──────────────────────────┐
//!   │  gemini   (timeout 30s)  │ ──► Failed / TimedOut: record, continue
//!   └────────────┬─────────────┘
//!                ▼
//!   ┌──────────────────────────┐
//!   │  huggingface (30s)       │ ──► Failed / TimedOut: record, continue
//!   └────────────┬─────────────┘
//!                ▼
//!   ┌──────────────────────────┐
//!   │  template (terminal)     │ ──► always Succeeded
//!   └──────────────────────────┘
//! ```
//!
//! Attempts are sequential, so the worst-case latency before the terminal
//! provider is the sum of the preceding timeouts.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, instrument, warn};

use super::traits::GenerationProvider;
use crate::telemetry;
use crate::types::PromptContext;
use crate::{Result, StargazerError};

/// Default per-provider timeout.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(30);

/// A provider together with its rank and timeout.
#[derive(Clone)]
pub struct ProviderDescriptor {
    pub provider: Arc<dyn GenerationProvider>,
    /// Lower ranks are attempted first.
    pub priority: u32,
    pub timeout: Duration,
}

impl ProviderDescriptor {
    pub fn new(provider: Arc<dyn GenerationProvider>, priority: u32, timeout: Duration) -> Self {
        Self {
            provider,
            priority,
            timeout,
        }
    }

    pub fn name(&self) -> &str {
        self.provider.name()
    }
}

impl std::fmt::Debug for ProviderDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderDescriptor")
            .field("provider", &self.provider.name())
            .field("priority", &self.priority)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// How a single attempt ended.
#[derive(Debug)]
pub enum AttemptOutcome {
    Succeeded(String),
    Failed(StargazerError),
    TimedOut,
}

/// Why a provider was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FailureKind {
    TimedOut,
    Failed(String),
}

/// A skipped provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureRecord {
    pub provider: String,
    pub kind: FailureKind,
    pub elapsed: Duration,
}

impl FailureRecord {
    /// The equivalent error value.
    pub fn to_error(&self) -> StargazerError {
        match &self.kind {
            FailureKind::TimedOut => StargazerError::ProviderTimeout {
                provider: self.provider.clone(),
                elapsed: self.elapsed,
            },
            FailureKind::Failed(reason) => StargazerError::ProviderFailure {
                provider: self.provider.clone(),
                reason: reason.clone(),
            },
        }
    }
}

/// Result of running the chain.
#[derive(Debug, Clone)]
pub struct Generation {
    pub text: String,
    /// Name of the provider that produced `text`.
    pub provider: String,
    /// Total time spent in the chain.
    pub elapsed: Duration,
    /// Providers skipped before `provider`, in attempt order.
    pub failures: Vec<FailureRecord>,
}

/// Ordered, timeout-bounded fallback chain ending in a terminal provider.
#[derive(Debug, Clone)]
pub struct ProviderChain {
    descriptors: Vec<ProviderDescriptor>,
}

impl ProviderChain {
    /// Build a chain. Descriptors are sorted by priority (stable).
    ///
    /// Fails with [`StargazerError::Configuration`] when the chain is empty
    /// or its last provider is not terminal.
    pub fn new(mut descriptors: Vec<ProviderDescriptor>) -> Result<Self> {
        descriptors.sort_by_key(|d| d.priority);
        let Some(last) = descriptors.last() else {
            return Err(StargazerError::Configuration(
                "provider chain is empty".to_string(),
            ));
        };
        if !last.provider.is_terminal() {
            return Err(StargazerError::Configuration(format!(
                "provider chain must end in a terminal provider, found '{}'",
                last.name()
            )));
        }
        Ok(Self { descriptors })
    }

    /// Provider names in attempt order.
    pub fn names(&self) -> Vec<&str> {
        self.descriptors.iter().map(|d| d.name()).collect()
    }

    pub fn descriptors(&self) -> &[ProviderDescriptor] {
        &self.descriptors
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Run one provider under its timeout.
    pub async fn attempt(descriptor: &ProviderDescriptor, prompt: &PromptContext) -> AttemptOutcome {
        let cancel = CancellationToken::new();
        let call = descriptor.provider.generate(prompt, cancel.clone());
        match tokio::time::timeout(descriptor.timeout, call).await {
            Ok(Ok(text)) if text.trim().is_empty() => {
                AttemptOutcome::Failed(StargazerError::EmptyResponse)
            }
            Ok(Ok(text)) => AttemptOutcome::Succeeded(text),
            Ok(Err(e)) => AttemptOutcome::Failed(e),
            Err(_) => {
                cancel.cancel();
                AttemptOutcome::TimedOut
            }
        }
    }

    /// Attempt providers in order until one produces text.
    #[instrument(skip(self, prompt), fields(providers = self.descriptors.len()))]
    pub async fn generate(&self, prompt: &PromptContext) -> Result<Generation> {
        let start = Instant::now();
        let mut failures = Vec::new();

        for descriptor in &self.descriptors {
            let name = descriptor.name();
            let attempt_start = Instant::now();
            let outcome = Self::attempt(descriptor, prompt).await;
            let elapsed = attempt_start.elapsed();

            match outcome {
                AttemptOutcome::Succeeded(text) => {
                    Self::record_attempt(name, "ok", elapsed);
                    debug!(provider = name, ?elapsed, "provider succeeded");
                    return Ok(Generation {
                        text: text.trim().to_string(),
                        provider: name.to_string(),
                        elapsed: start.elapsed(),
                        failures,
                    });
                }
                AttemptOutcome::Failed(e) => {
                    Self::record_attempt(name, "error", elapsed);
                    warn!(provider = name, error = %e, "provider failed, falling back");
                    failures.push(FailureRecord {
                        provider: name.to_string(),
                        kind: FailureKind::Failed(e.to_string()),
                        elapsed,
                    });
                }
                AttemptOutcome::TimedOut => {
                    Self::record_attempt(name, "timeout", elapsed);
                    warn!(
                        provider = name,
                        timeout = ?descriptor.timeout,
                        "provider timed out, falling back"
                    );
                    failures.push(FailureRecord {
                        provider: name.to_string(),
                        kind: FailureKind::TimedOut,
                        elapsed,
                    });
                }
            }
        }

        error!(
            attempted = failures.len(),
            "terminal provider failed; chain exhausted"
        );
        Err(StargazerError::AllProvidersExhausted)
    }

    /// Record attempt outcome metrics (counter + histogram).
    fn record_attempt(provider: &str, status: &'static str, elapsed: Duration) {
        metrics::counter!(telemetry::PROVIDER_ATTEMPTS_TOTAL,
            "provider" => provider.to_owned(),
            "status" => status,
        )
        .increment(1);
        metrics::histogram!(telemetry::PROVIDER_DURATION_SECONDS,
            "provider" => provider.to_owned(),
        )
        .record(elapsed.as_secs_f64());
    }
}
