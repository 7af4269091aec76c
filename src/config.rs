//! Configuration loading.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. Explicit path (e.g. the CLI's `--config <path>`)
//! 2. `~/.stargazer/config.toml` (user)
//! 3. `/etc/stargazer/config.toml` (system)
//!
//! When no file exists in the standard locations the defaults apply; every
//! section and field is optional.
//!
//! Secrets are loaded separately with mandatory permission checks:
//! 1. `~/.stargazer/secrets.toml` (user, must be 0600)
//! 2. `/etc/stargazer/secrets.toml` (system, must be 0600)
//!
//! Keys missing from the secrets file fall back to environment variables.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use crate::providers::ProviderSelection;
use crate::translation::TranslationMethod;
use crate::{Result, StargazerError};

/// Engine configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub cache: CacheSection,
    #[serde(default)]
    pub context: ContextSection,
    #[serde(default)]
    pub profiles: ProfilesSection,
    #[serde(default)]
    pub translation: TranslationSection,
}

/// Generation provider configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ProvidersConfig {
    /// "auto" or one of gemini, huggingface, openai, template (default: auto).
    #[serde(default)]
    pub selection: ProviderSelection,
    /// Per-provider timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub gemini: ApiProviderConfig,
    #[serde(default)]
    pub huggingface: ApiProviderConfig,
    #[serde(default)]
    pub openai: ApiProviderConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            selection: ProviderSelection::default(),
            timeout_secs: default_timeout(),
            gemini: ApiProviderConfig::default(),
            huggingface: ApiProviderConfig::default(),
            openai: ApiProviderConfig::default(),
        }
    }
}

impl ProvidersConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Remote provider configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiProviderConfig {
    /// Model override.
    #[serde(default)]
    pub model: Option<String>,
    /// Timeout override in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Base URL override (proxies, tests).
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Insight cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheSection {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Bound on cached insights (default: unbounded).
    #[serde(default)]
    pub max_entries: Option<u64>,
    /// Entry time-to-live in seconds (default: no expiry).
    #[serde(default)]
    pub ttl_secs: Option<u64>,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: None,
            ttl_secs: None,
        }
    }
}

/// Context retrieval configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ContextSection {
    #[serde(default)]
    pub enabled: bool,
    /// Snippets injected into each prompt (default: 2).
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for ContextSection {
    fn default() -> Self {
        Self {
            enabled: false,
            top_k: default_top_k(),
        }
    }
}

/// Profile tracking configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfilesSection {
    #[serde(default)]
    pub enabled: bool,
    /// Recent keywords kept per profile (default: 20).
    #[serde(default = "default_recent_keywords")]
    pub recent_keywords: usize,
}

impl Default for ProfilesSection {
    fn default() -> Self {
        Self {
            enabled: false,
            recent_keywords: default_recent_keywords(),
        }
    }
}

/// Translation configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TranslationSection {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// auto, indictrans2, nllb, google or placeholder (default: auto).
    #[serde(default)]
    pub method: TranslationMethod,
    /// Per-backend timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for TranslationSection {
    fn default() -> Self {
        Self {
            enabled: true,
            method: TranslationMethod::default(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_top_k() -> usize {
    2
}

fn default_recent_keywords() -> usize {
    crate::profile::DEFAULT_RECENT_KEYWORDS
}

/// Secrets configuration (API keys).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Secrets {
    #[serde(default)]
    pub gemini: Option<ApiKeySecret>,
    #[serde(default)]
    pub huggingface: Option<ApiKeySecret>,
    #[serde(default)]
    pub openai: Option<ApiKeySecret>,
    #[serde(default)]
    pub google_translate: Option<ApiKeySecret>,
}

/// A single API key secret.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiKeySecret {
    pub api_key: String,
}

/// Service name → environment variable name mapping.
const SERVICE_ENV_VARS: &[(&str, &str)] = &[
    ("gemini", "GEMINI_API_KEY"),
    ("huggingface", "HUGGINGFACE_API_KEY"),
    ("openai", "OPENAI_API_KEY"),
    ("google_translate", "GOOGLE_TRANSLATE_API_KEY"),
];

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// An explicit path must exist. Without one, the first of
    /// `~/.stargazer/config.toml` and `/etc/stargazer/config.toml` is used,
    /// or the defaults if neither exists.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match Self::resolve_config_path(explicit_path)? {
            Some(path) => Self::load_from_path(&path),
            None => {
                debug!("no config file found, using defaults");
                Ok(Config::default())
            }
        }
    }

    /// Parse a specific config file.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            StargazerError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            StargazerError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })
    }

    /// Resolve the config file path.
    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(StargazerError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        // User config
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".stargazer").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        // System config
        let system_config = PathBuf::from("/etc/stargazer/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }
}

impl Secrets {
    /// Load secrets from the standard locations with permission checks.
    ///
    /// Resolution order:
    /// 1. `~/.stargazer/secrets.toml` (if exists, must be 0600)
    /// 2. `/etc/stargazer/secrets.toml` (if exists, must be 0600)
    ///
    /// Returns empty secrets if no file exists (keys may come from env vars).
    pub fn load() -> Result<Self> {
        // Try user secrets first
        if let Some(home) = dirs::home_dir() {
            let user_secrets = home.join(".stargazer").join("secrets.toml");
            if user_secrets.exists() {
                return Self::load_from_path(&user_secrets);
            }
        }

        // Try system secrets
        let system_secrets = PathBuf::from("/etc/stargazer/secrets.toml");
        if system_secrets.exists() {
            return Self::load_from_path(&system_secrets);
        }

        Ok(Secrets::default())
    }

    /// Load a specific secrets file after checking its permissions.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        Self::check_permissions(path)?;
        let content = fs::read_to_string(path).map_err(|e| {
            StargazerError::Configuration(format!("Failed to read secrets file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            StargazerError::Configuration(format!("Failed to parse secrets file {path:?}: {e}"))
        })
    }

    /// Check that the secrets file has secure permissions (0600 or 0400).
    #[cfg(unix)]
    fn check_permissions(path: &Path) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let metadata = fs::metadata(path).map_err(|e| {
            StargazerError::Configuration(format!("Failed to stat secrets file {path:?}: {e}"))
        })?;

        let mode = metadata.permissions().mode();
        // Reject if group or other bits are set
        if mode & 0o077 != 0 {
            return Err(StargazerError::Configuration(format!(
                "Secrets file {path:?} has insecure permissions {:o}. Must be 0600 or 0400.",
                mode & 0o777
            )));
        }

        Ok(())
    }

    #[cfg(not(unix))]
    fn check_permissions(_path: &Path) -> Result<()> {
        Ok(())
    }

    /// API key for a service, falling back to its environment variable.
    ///
    /// Empty keys count as missing.
    pub fn api_key(&self, service: &str) -> Option<String> {
        let from_file = match service {
            "gemini" => self.gemini.as_ref(),
            "huggingface" => self.huggingface.as_ref(),
            "openai" => self.openai.as_ref(),
            "google_translate" => self.google_translate.as_ref(),
            _ => None,
        }
        .map(|s| s.api_key.clone())
        .filter(|key| !key.trim().is_empty());

        from_file
            .or_else(|| {
                SERVICE_ENV_VARS
                    .iter()
                    .find(|(name, _)| *name == service)
                    .and_then(|(_, env_var)| std::env::var(env_var).ok())
            })
            .filter(|key| !key.trim().is_empty())
    }
}
