//! Tests for metrics integration.
//!
//! Uses `metrics_util::debugging::DebuggingRecorder` to capture and assert
//! on emitted metrics without needing a real exporter.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use metrics_util::MetricKind;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};
use tokio_util::sync::CancellationToken;

use stargazer::telemetry;
use stargazer::{
    GenerationProvider, GenerationRequest, Language, PromptContext, Result, Stargazer,
    StargazerError, ZodiacSign,
};

// ============================================================================
// Mock providers
// ============================================================================

struct FailingProvider;

#[async_trait]
impl GenerationProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn generate(&self, _: &PromptContext, _: CancellationToken) -> Result<String> {
        Err(StargazerError::AuthenticationFailed)
    }
}

// ============================================================================
// Snapshot type alias for readability
// ============================================================================

type SnapshotVec = Vec<(
    metrics_util::CompositeKey,
    Option<metrics::Unit>,
    Option<metrics::SharedString>,
    DebugValue,
)>;

// ============================================================================
// Helpers
// ============================================================================

/// Sum all counter values matching a given metric name.
fn counter_total(snapshot: &SnapshotVec, name: &str) -> u64 {
    counter_with(snapshot, name, &[])
}

/// Sum counter values whose labels include every `(key, value)` pair.
fn counter_with(snapshot: &SnapshotVec, name: &str, labels: &[(&str, &str)]) -> u64 {
    snapshot
        .iter()
        .filter(|(key, _, _, _)| key.kind() == MetricKind::Counter && key.key().name() == name)
        .filter(|(key, _, _, _)| {
            labels.iter().all(|(k, v)| {
                key.key()
                    .labels()
                    .any(|label| label.key() == *k && label.value() == *v)
            })
        })
        .map(|(_, _, _, value)| match value {
            DebugValue::Counter(v) => *v,
            _ => 0,
        })
        .sum()
}

/// Check if any histogram entries exist for a given metric name.
fn has_histogram(snapshot: &SnapshotVec, name: &str) -> bool {
    snapshot
        .iter()
        .any(|(key, _, _, _)| key.kind() == MetricKind::Histogram && key.key().name() == name)
}

/// Run `work` with a local recorder installed and return the snapshot.
///
/// `block_in_place` keeps the sync `with_local_recorder` closure on the
/// current thread while `block_on` drives the inner async work.
fn recorded<F, T>(work: F) -> (T, SnapshotVec)
where
    F: Future<Output = T>,
{
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    let out = metrics::with_local_recorder(&recorder, || {
        tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(work))
    });
    (out, snapshotter.snapshot().into_vec())
}

fn request() -> GenerationRequest {
    GenerationRequest::new("Ritika", "1995-08-20", ZodiacSign::Leo)
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn fallback_records_each_attempt() {
    let (result, snapshot) = recorded(async {
        let engine = Stargazer::builder()
            .add_provider(Arc::new(FailingProvider), 0, Duration::from_secs(5))
            .build()
            .unwrap();
        engine.generate_insight(&request()).await
    });
    assert_eq!(result.unwrap().provider, "template");

    assert_eq!(
        counter_with(
            &snapshot,
            telemetry::PROVIDER_ATTEMPTS_TOTAL,
            &[("provider", "failing"), ("status", "error")]
        ),
        1
    );
    assert_eq!(
        counter_with(
            &snapshot,
            telemetry::PROVIDER_ATTEMPTS_TOTAL,
            &[("provider", "template"), ("status", "ok")]
        ),
        1
    );
    assert!(has_histogram(&snapshot, telemetry::PROVIDER_DURATION_SECONDS));
    assert_eq!(
        counter_with(&snapshot, telemetry::INSIGHTS_TOTAL, &[("source", "chain")]),
        1
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn cache_hit_and_miss_counted() {
    let (result, snapshot) = recorded(async {
        let engine = Stargazer::builder().build().unwrap();
        engine.generate_insight(&request()).await.unwrap();
        engine.generate_insight(&request()).await
    });
    assert!(result.unwrap().cached);

    assert_eq!(counter_total(&snapshot, telemetry::CACHE_MISSES_TOTAL), 1);
    assert_eq!(counter_total(&snapshot, telemetry::CACHE_HITS_TOTAL), 1);
    assert_eq!(
        counter_with(&snapshot, telemetry::INSIGHTS_TOTAL, &[("source", "cache")]),
        1
    );
    // The hit never reached the chain.
    assert_eq!(counter_total(&snapshot, telemetry::PROVIDER_ATTEMPTS_TOTAL), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn placeholder_translation_counted() {
    let (result, snapshot) = recorded(async {
        let engine = Stargazer::builder().build().unwrap();
        engine
            .generate_insight(&request().language(Language::Hindi))
            .await
    });
    assert!(result.is_ok());

    assert_eq!(
        counter_with(
            &snapshot,
            telemetry::TRANSLATIONS_TOTAL,
            &[("backend", "placeholder"), ("status", "ok")]
        ),
        1
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn profile_updates_counted_only_when_enabled() {
    let (_, disabled) = recorded(async {
        let engine = Stargazer::builder().build().unwrap();
        engine.generate_insight(&request()).await
    });
    assert_eq!(counter_total(&disabled, telemetry::PROFILE_UPDATES_TOTAL), 0);

    let (_, enabled) = recorded(async {
        let engine = Stargazer::builder().profiles(true).build().unwrap();
        engine.generate_insight(&request()).await
    });
    assert_eq!(counter_total(&enabled, telemetry::PROFILE_UPDATES_TOTAL), 1);
}

#[tokio::test]
async fn no_recorder_is_noop() {
    let engine = Stargazer::builder().build().unwrap();
    let insight = engine.generate_insight(&request()).await.unwrap();
    assert!(!insight.text.is_empty());
}
