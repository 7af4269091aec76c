//! File-level tests for configuration and secrets loading.

use std::fs;
use std::time::Duration;

use stargazer::config::{Config, Secrets};
use stargazer::{ProviderSelection, StargazerBuilder, TranslationMethod};

// =============================================================================
// Config files
// =============================================================================

#[test]
fn load_explicit_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
            [providers]
            selection = "template"
            timeout_secs = 12

            [context]
            enabled = true
            top_k = 1

            [translation]
            method = "placeholder"
        "#,
    )
    .unwrap();

    let config = Config::load(Some(path.as_path())).unwrap();
    assert_eq!(
        config.providers.selection,
        ProviderSelection::Named("template".into())
    );
    assert_eq!(config.providers.timeout(), Duration::from_secs(12));
    assert!(config.context.enabled);
    assert_eq!(config.context.top_k, 1);
    assert_eq!(config.translation.method, TranslationMethod::Placeholder);
}

#[test]
fn malformed_config_is_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[providers\nselection = ").unwrap();

    let err = Config::load_from_path(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn unknown_translation_method_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[translation]\nmethod = \"babelfish\"\n").unwrap();

    assert!(Config::load_from_path(&path).is_err());
}

// =============================================================================
// Secrets files
// =============================================================================

#[cfg(unix)]
fn write_secrets(mode: u32) -> (tempfile::TempDir, std::path::PathBuf) {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("secrets.toml");
    fs::write(
        &path,
        r#"
            [huggingface]
            api_key = "hf-file-key"
        "#,
    )
    .unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
    (dir, path)
}

#[cfg(unix)]
#[test]
fn secrets_with_owner_only_permissions_load() {
    let (_dir, path) = write_secrets(0o600);
    let secrets = Secrets::load_from_path(&path).unwrap();
    assert_eq!(
        secrets.api_key("huggingface"),
        Some("hf-file-key".to_string())
    );
}

#[cfg(unix)]
#[test]
fn secrets_readable_by_others_rejected() {
    let (_dir, path) = write_secrets(0o644);
    let err = Secrets::load_from_path(&path).unwrap_err();
    assert!(err.to_string().contains("insecure permissions"));
}

// =============================================================================
// Config into builder
// =============================================================================

#[cfg(unix)]
#[test]
fn config_and_secrets_drive_the_builder() {
    let (_dir, secrets_path) = write_secrets(0o600);
    let secrets = Secrets::load_from_path(&secrets_path).unwrap();

    let config: Config = toml::from_str(
        r#"
            [translation]
            method = "nllb"
        "#,
    )
    .unwrap();

    let engine = StargazerBuilder::from_config(&config, &secrets)
        .build()
        .unwrap();

    let names = engine.provider_names();
    assert!(names.contains(&"huggingface"));
    assert_eq!(names.last(), Some(&"template"));
    assert!(
        engine
            .translation_methods()
            .contains(&TranslationMethod::Nllb)
    );
}

#[test]
fn named_method_without_backend_fails_build() {
    let config: Config = toml::from_str("[translation]\nmethod = \"google\"\n").unwrap();
    let result = StargazerBuilder::from_config(&config, &Secrets::default()).build();
    // GOOGLE_TRANSLATE_API_KEY would make the backend available.
    if std::env::var("GOOGLE_TRANSLATE_API_KEY").is_err() {
        assert!(result.is_err());
    }
}
