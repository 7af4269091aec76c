//! The insight engine: cache, context, profile, chain and translation
//! composed per request.

use std::sync::Arc;

use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::cache::{CacheEntry, InsightCache};
use crate::context::{ContextAssembler, ScoredSnippet};
use crate::profile::{ProfileId, ProfileTracker, UserProfile};
use crate::providers::ProviderChain;
use crate::telemetry;
use crate::translation::{PlaceholderTranslator, TranslationAdapter, TranslationMethod};
use crate::types::{GenerationRequest, Insight, Language, PromptContext, ZodiacSign};
use crate::Result;

/// Orchestrates one insight per request.
///
/// Built with [`Stargazer::builder()`](crate::Stargazer::builder). The
/// engine is `Send + Sync`; share it across tasks behind an `Arc`.
///
/// ```text
/// request ─► cache? ──hit──────────────────────────────────────► Insight (cached)
///               │ miss
///               ▼
///          profile + context ─► prompt ─► chain ─► translate ─► cache put
///                                                                  │
///                                                   profile record ◄┘
/// ```
pub struct InsightEngine {
    pub(super) chain: ProviderChain,
    pub(super) cache: Option<Arc<InsightCache>>,
    pub(super) context: ContextAssembler,
    pub(super) context_enabled: bool,
    pub(super) context_top_k: usize,
    pub(super) profiles: Arc<ProfileTracker>,
    pub(super) profiles_enabled: bool,
    pub(super) translator: TranslationAdapter,
    pub(super) translation_enabled: bool,
    pub(super) translation_method: TranslationMethod,
}

impl InsightEngine {
    /// Generate (or recall) the insight for a request.
    ///
    /// Never fails on provider errors while the chain is intact: the
    /// terminal provider always answers. Failures of the optional
    /// subsystems are logged and skipped.
    #[instrument(
        skip(self, request),
        fields(sign = %request.zodiac_sign, language = %request.language)
    )]
    pub async fn generate_insight(&self, request: &GenerationRequest) -> Result<Insight> {
        let start = Instant::now();

        let cache_key = self.cache.as_ref().map(|cache| {
            cache.key(
                &request.name,
                &request.birth_date,
                request.zodiac_sign,
                request.language,
            )
        });

        if let (Some(cache), Some(key)) = (&self.cache, &cache_key)
            && let Some(entry) = cache.get(key)
        {
            debug!(provider = %entry.provider, "insight served from cache");
            Self::record_insight(&entry.provider, "cache");
            return Ok(Insight {
                text: entry.text,
                provider: entry.provider,
                zodiac_sign: request.zodiac_sign,
                language: request.language,
                cached: true,
                elapsed: start.elapsed(),
            });
        }

        let profile = self.profiles_enabled.then(|| {
            let id = self.profiles.identify(&request.name, &request.birth_date);
            self.profiles.get_or_create(&id, &request.name)
        });

        let snippets: Vec<String> = if self.context_enabled {
            self.context
                .retrieve(
                    request.zodiac_sign,
                    request.zodiac_sign.traits(),
                    self.context_top_k,
                )
                .into_iter()
                .map(|scored| scored.snippet.text.to_string())
                .collect()
        } else {
            Vec::new()
        };

        let personalization = profile
            .as_ref()
            .map(|p| self.profiles.personalization_context(p));

        let prompt = PromptContext::assemble(request, &snippets, personalization.as_deref());
        let generation = self.chain.generate(&prompt).await?;

        let text = if self.translation_enabled && request.language.requires_translation() {
            self.translate_or_degrade(&generation.text, request.language)
                .await
        } else {
            generation.text
        };

        if let (Some(cache), Some(key)) = (&self.cache, cache_key) {
            cache.put(key, CacheEntry::new(text.clone(), generation.provider.clone()));
        }

        if let Some(profile) = &profile
            && let Err(e) = self.profiles.record_request(
                &profile.id,
                request.zodiac_sign,
                &text,
                request.language,
            )
        {
            warn!(error = %e, "profile update failed");
        }

        info!(
            provider = %generation.provider,
            skipped = generation.failures.len(),
            elapsed = ?start.elapsed(),
            "insight generated"
        );
        Self::record_insight(&generation.provider, "chain");

        Ok(Insight {
            text,
            provider: generation.provider,
            zodiac_sign: request.zodiac_sign,
            language: request.language,
            cached: false,
            elapsed: start.elapsed(),
        })
    }

    async fn translate_or_degrade(&self, text: &str, target: Language) -> String {
        match self
            .translator
            .translate(text, target, self.translation_method)
            .await
        {
            Ok(translated) => translated,
            Err(e) => {
                warn!(error = %e, "translation failed, using placeholder");
                PlaceholderTranslator::transform(text, target)
            }
        }
    }

    /// Translate English `text` into `target` with `method`.
    pub async fn translate(
        &self,
        text: &str,
        target: Language,
        method: TranslationMethod,
    ) -> Result<String> {
        self.translator.translate(text, target, method).await
    }

    /// Rank corpus snippets for a sign and style descriptor.
    pub fn retrieve_context(
        &self,
        zodiac_sign: ZodiacSign,
        style: &str,
        top_k: usize,
    ) -> Vec<ScoredSnippet> {
        self.context.retrieve(zodiac_sign, style, top_k)
    }

    /// Fetch or create the profile for a subject.
    pub fn get_or_create_profile(&self, name: &str, birth_date: &str) -> UserProfile {
        let id = self.profiles.identify(name, birth_date);
        self.profiles.get_or_create(&id, name)
    }

    /// Record a request against an existing profile.
    pub fn record_request(
        &self,
        id: &ProfileId,
        zodiac_sign: ZodiacSign,
        insight: &str,
        language: Language,
    ) -> Result<UserProfile> {
        self.profiles
            .record_request(id, zodiac_sign, insight, language)
    }

    /// Prompt-ready summary of a profile.
    pub fn personalization_context(&self, profile: &UserProfile) -> String {
        self.profiles.personalization_context(profile)
    }

    /// Provider names in attempt order.
    pub fn provider_names(&self) -> Vec<&str> {
        self.chain.names()
    }

    /// Translation methods accepted by [`translate`](Self::translate).
    pub fn translation_methods(&self) -> Vec<TranslationMethod> {
        self.translator.available_methods()
    }

    pub fn cache(&self) -> Option<&Arc<InsightCache>> {
        self.cache.as_ref()
    }

    pub fn profiles(&self) -> &Arc<ProfileTracker> {
        &self.profiles
    }

    pub fn profiles_enabled(&self) -> bool {
        self.profiles_enabled
    }

    fn record_insight(provider: &str, source: &'static str) {
        metrics::counter!(telemetry::INSIGHTS_TOTAL,
            "provider" => provider.to_owned(),
            "source" => source,
        )
        .increment(1);
    }
}
