//! Builder for configuring engine instances

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use super::InsightEngine;
use crate::cache::{CacheConfig, InsightCache};
use crate::config::{ApiProviderConfig, Config, Secrets};
use crate::context::ContextAssembler;
use crate::profile::ProfileTracker;
use crate::providers::{
    DEFAULT_PROVIDER_TIMEOUT, GeminiClient, GenerationProvider, HuggingFaceClient, OpenAiClient,
    ProviderChain, ProviderDescriptor, ProviderSelection, TemplateProvider,
};
use crate::translation::{
    DEFAULT_TRANSLATION_TIMEOUT, GoogleTranslateClient, HfTranslator, TranslationAdapter,
    TranslationBackend, TranslationMethod,
};
use crate::{Result, StargazerError};

/// Chain ranks of the built-in providers. Custom providers may use any rank.
const GEMINI_PRIORITY: u32 = 10;
const HUGGINGFACE_PRIORITY: u32 = 20;
const OPENAI_PRIORITY: u32 = 30;
const TERMINAL_PRIORITY: u32 = u32::MAX;

/// Default number of context snippets per prompt.
pub const DEFAULT_CONTEXT_TOP_K: usize = 2;

/// Main entry point for creating engine instances.
pub struct Stargazer;

impl Stargazer {
    /// Create a new builder for configuring the engine.
    pub fn builder() -> StargazerBuilder {
        StargazerBuilder::new()
    }
}

/// Key and overrides for one hosted service.
#[derive(Debug, Clone, Default)]
struct RemoteService {
    api_key: String,
    model: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl RemoteService {
    fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    fn with_overrides(api_key: String, overrides: &ApiProviderConfig) -> Self {
        Self {
            api_key,
            model: overrides.model.clone(),
            base_url: overrides.base_url.clone(),
            timeout: overrides.timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Builder for configuring engine instances.
///
/// Cache and translation are enabled by default; context retrieval and
/// profiling are opt-in. The chain always ends in the template provider
/// unless [`terminal`](Self::terminal) replaces it.
pub struct StargazerBuilder {
    gemini: Option<RemoteService>,
    huggingface: Option<RemoteService>,
    openai: Option<RemoteService>,
    google_translate: Option<RemoteService>,
    custom_providers: Vec<ProviderDescriptor>,
    terminal: Arc<dyn GenerationProvider>,
    provider_timeout: Duration,
    selection: ProviderSelection,
    cache_enabled: bool,
    cache: Option<Arc<InsightCache>>,
    cache_config: CacheConfig,
    context_enabled: bool,
    context_top_k: usize,
    profiles_enabled: bool,
    profile_tracker: Option<Arc<ProfileTracker>>,
    recent_keywords: usize,
    translation_enabled: bool,
    translation_method: TranslationMethod,
    translation_timeout: Duration,
    translation_backends: Vec<Arc<dyn TranslationBackend>>,
}

impl StargazerBuilder {
    pub fn new() -> Self {
        Self {
            gemini: None,
            huggingface: None,
            openai: None,
            google_translate: None,
            custom_providers: Vec::new(),
            terminal: Arc::new(TemplateProvider::new()),
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
            selection: ProviderSelection::Auto,
            cache_enabled: true,
            cache: None,
            cache_config: CacheConfig::default(),
            context_enabled: false,
            context_top_k: DEFAULT_CONTEXT_TOP_K,
            profiles_enabled: false,
            profile_tracker: None,
            recent_keywords: crate::profile::DEFAULT_RECENT_KEYWORDS,
            translation_enabled: true,
            translation_method: TranslationMethod::Auto,
            translation_timeout: DEFAULT_TRANSLATION_TIMEOUT,
            translation_backends: Vec::new(),
        }
    }

    /// Build from loaded configuration and secrets.
    ///
    /// Hosted services are registered only when their API key resolves.
    pub fn from_config(config: &Config, secrets: &Secrets) -> Self {
        let providers = &config.providers;
        let mut builder = Self::new()
            .provider_timeout(providers.timeout())
            .selection(providers.selection.clone())
            .context_retrieval(config.context.enabled)
            .context_top_k(config.context.top_k)
            .profiles(config.profiles.enabled)
            .recent_keywords(config.profiles.recent_keywords)
            .translation(config.translation.enabled)
            .translation_method(config.translation.method)
            .translation_timeout(Duration::from_secs(config.translation.timeout_secs));

        if let Some(key) = secrets.api_key("gemini") {
            builder.gemini = Some(RemoteService::with_overrides(key, &providers.gemini));
        }
        if let Some(key) = secrets.api_key("huggingface") {
            builder.huggingface = Some(RemoteService::with_overrides(key, &providers.huggingface));
        }
        if let Some(key) = secrets.api_key("openai") {
            builder.openai = Some(RemoteService::with_overrides(key, &providers.openai));
        }
        if let Some(key) = secrets.api_key("google_translate") {
            builder.google_translate = Some(RemoteService::new(key));
        }

        if config.cache.enabled {
            let mut cache_config = CacheConfig::new();
            if let Some(max) = config.cache.max_entries {
                cache_config = cache_config.max_entries(max);
            }
            if let Some(ttl) = config.cache.ttl_secs {
                cache_config = cache_config.ttl(Duration::from_secs(ttl));
            }
            builder.cache_config(cache_config)
        } else {
            builder.disable_cache()
        }
    }

    /// Configure Google Gemini (generation).
    pub fn gemini(mut self, api_key: impl Into<String>) -> Self {
        self.gemini = Some(RemoteService::new(api_key));
        self
    }

    /// Configure HuggingFace (generation, IndicTrans2 and NLLB translation).
    pub fn huggingface(mut self, api_key: impl Into<String>) -> Self {
        self.huggingface = Some(RemoteService::new(api_key));
        self
    }

    /// Configure OpenAI (generation).
    pub fn openai(mut self, api_key: impl Into<String>) -> Self {
        self.openai = Some(RemoteService::new(api_key));
        self
    }

    /// Configure Google Cloud Translation.
    pub fn google_translate(mut self, api_key: impl Into<String>) -> Self {
        self.google_translate = Some(RemoteService::new(api_key));
        self
    }

    /// Add a custom generation provider at `priority` (lower runs first).
    pub fn add_provider(
        mut self,
        provider: Arc<dyn GenerationProvider>,
        priority: u32,
        timeout: Duration,
    ) -> Self {
        self.custom_providers
            .push(ProviderDescriptor::new(provider, priority, timeout));
        self
    }

    /// Replace the terminal template provider.
    ///
    /// The replacement must report [`GenerationProvider::is_terminal`].
    pub fn terminal(mut self, provider: Arc<dyn GenerationProvider>) -> Self {
        self.terminal = provider;
        self
    }

    /// Default timeout for built-in providers (default: 30s).
    pub fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = timeout;
        self
    }

    /// Restrict the chain to one named provider (plus the terminal).
    pub fn selection(mut self, selection: ProviderSelection) -> Self {
        self.selection = selection;
        self
    }

    /// Share an existing cache.
    pub fn cache(mut self, cache: Arc<InsightCache>) -> Self {
        self.cache = Some(cache);
        self.cache_enabled = true;
        self
    }

    /// Configure the cache the builder creates.
    pub fn cache_config(mut self, config: CacheConfig) -> Self {
        self.cache_config = config;
        self.cache_enabled = true;
        self
    }

    /// Disable the insight cache.
    pub fn disable_cache(mut self) -> Self {
        self.cache_enabled = false;
        self.cache = None;
        self
    }

    /// Enable or disable context retrieval (default: disabled).
    pub fn context_retrieval(mut self, enabled: bool) -> Self {
        self.context_enabled = enabled;
        self
    }

    /// Snippets injected per prompt (default: 2).
    pub fn context_top_k(mut self, top_k: usize) -> Self {
        self.context_top_k = top_k;
        self
    }

    /// Enable or disable profile tracking (default: disabled).
    pub fn profiles(mut self, enabled: bool) -> Self {
        self.profiles_enabled = enabled;
        self
    }

    /// Share an existing profile tracker. Enables profiling.
    pub fn profile_tracker(mut self, tracker: Arc<ProfileTracker>) -> Self {
        self.profile_tracker = Some(tracker);
        self.profiles_enabled = true;
        self
    }

    /// Recent keywords kept per profile (default: 20).
    pub fn recent_keywords(mut self, bound: usize) -> Self {
        self.recent_keywords = bound;
        self
    }

    /// Enable or disable translation of non-English requests (default: enabled).
    pub fn translation(mut self, enabled: bool) -> Self {
        self.translation_enabled = enabled;
        self
    }

    /// Translation method used by the pipeline (default: auto).
    pub fn translation_method(mut self, method: TranslationMethod) -> Self {
        self.translation_method = method;
        self
    }

    /// Per-backend translation timeout (default: 30s).
    pub fn translation_timeout(mut self, timeout: Duration) -> Self {
        self.translation_timeout = timeout;
        self
    }

    /// Add a custom translation backend.
    pub fn add_translation_backend(mut self, backend: Arc<dyn TranslationBackend>) -> Self {
        self.translation_backends.push(backend);
        self
    }

    fn remote_descriptors(&self) -> Vec<ProviderDescriptor> {
        let mut descriptors = Vec::new();

        if let Some(service) = &self.gemini {
            let mut client = match &service.base_url {
                Some(url) => GeminiClient::with_base_url(&service.api_key, url),
                None => GeminiClient::new(&service.api_key),
            };
            if let Some(model) = &service.model {
                client = client.model(model);
            }
            descriptors.push(ProviderDescriptor::new(
                Arc::new(client),
                GEMINI_PRIORITY,
                service.timeout.unwrap_or(self.provider_timeout),
            ));
        }

        if let Some(service) = &self.huggingface {
            let mut client = match &service.base_url {
                Some(url) => HuggingFaceClient::with_base_url(&service.api_key, url),
                None => HuggingFaceClient::new(&service.api_key),
            };
            if let Some(model) = &service.model {
                client = client.model(model);
            }
            descriptors.push(ProviderDescriptor::new(
                Arc::new(client),
                HUGGINGFACE_PRIORITY,
                service.timeout.unwrap_or(self.provider_timeout),
            ));
        }

        if let Some(service) = &self.openai {
            let mut client = match &service.base_url {
                Some(url) => OpenAiClient::with_base_url(&service.api_key, url),
                None => OpenAiClient::new(&service.api_key),
            };
            if let Some(model) = &service.model {
                client = client.model(model);
            }
            descriptors.push(ProviderDescriptor::new(
                Arc::new(client),
                OPENAI_PRIORITY,
                service.timeout.unwrap_or(self.provider_timeout),
            ));
        }

        descriptors
    }

    fn build_chain(&self) -> Result<ProviderChain> {
        let mut descriptors = self.remote_descriptors();
        descriptors.extend(self.custom_providers.iter().cloned());

        if let ProviderSelection::Named(name) = &self.selection {
            if name != self.terminal.name() {
                descriptors.retain(|d| d.name() == name);
                if descriptors.is_empty() {
                    return Err(StargazerError::Configuration(format!(
                        "provider '{name}' selected but not configured"
                    )));
                }
            } else {
                descriptors.clear();
            }
        }

        descriptors.push(ProviderDescriptor::new(
            self.terminal.clone(),
            TERMINAL_PRIORITY,
            self.provider_timeout,
        ));
        ProviderChain::new(descriptors)
    }

    fn build_translator(&self) -> TranslationAdapter {
        let mut candidates = self.translation_backends.clone();
        if let Some(service) = &self.huggingface {
            let client = match &service.base_url {
                Some(url) => HuggingFaceClient::with_base_url(&service.api_key, url),
                None => HuggingFaceClient::new(&service.api_key),
            };
            candidates.push(Arc::new(HfTranslator::indictrans2(client.clone())));
            candidates.push(Arc::new(HfTranslator::nllb(client)));
        }
        if let Some(service) = &self.google_translate {
            candidates.push(Arc::new(GoogleTranslateClient::new(&service.api_key)));
        }
        TranslationAdapter::new(candidates, self.translation_timeout)
    }

    /// Build the engine.
    ///
    /// Fails on an unknown or unconfigured named provider, a non-terminal
    /// chain tail, or a named translation method whose backend is not
    /// available.
    pub fn build(self) -> Result<InsightEngine> {
        let chain = self.build_chain()?;

        let translator = self.build_translator();
        if self.translation_enabled && !translator.is_method_available(self.translation_method) {
            return Err(StargazerError::TranslationUnavailable(
                self.translation_method.to_string(),
            ));
        }

        let cache = if self.cache_enabled {
            Some(
                self.cache
                    .clone()
                    .unwrap_or_else(|| Arc::new(InsightCache::new(&self.cache_config))),
            )
        } else {
            None
        };

        let profiles = self.profile_tracker.clone().unwrap_or_else(|| {
            Arc::new(ProfileTracker::with_recent_keyword_bound(self.recent_keywords))
        });

        debug!(
            providers = ?chain.names(),
            translation = ?translator.available_methods(),
            cache = self.cache_enabled,
            context = self.context_enabled,
            profiles = self.profiles_enabled,
            "engine configured"
        );

        Ok(InsightEngine {
            chain,
            cache,
            context: ContextAssembler::new(),
            context_enabled: self.context_enabled,
            context_top_k: self.context_top_k,
            profiles,
            profiles_enabled: self.profiles_enabled,
            translator,
            translation_enabled: self.translation_enabled,
            translation_method: self.translation_method,
        })
    }
}

impl Default for StargazerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
