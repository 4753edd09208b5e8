//! Configuration loading from disk and the environment.

use std::env;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load a configuration from a TOML file.
///
/// The result is not yet validated: callers apply env overrides first and
/// then call [`finalize`].
pub fn load_config(path: &Path) -> Result<RouterConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: RouterConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Override origin base URLs from the environment.
///
/// Each origin's provenance tag names its variable: provenance `webflow`
/// reads `WEBFLOW_URL`, `webflow-cdn` reads `WEBFLOW_CDN_URL`, and so on.
/// Read once at startup; the mappings are immutable afterwards.
pub fn apply_env_overrides(config: &mut RouterConfig) {
    if let Some(url) = env_url(&config.origins.primary.provenance) {
        config.origins.primary.url = url;
    }
    if let Some(url) = env_url(&config.origins.fallback.provenance) {
        config.origins.fallback.url = url;
    }
    for entry in &mut config.origins.cdn {
        if let Some(url) = env_url(&entry.provenance) {
            entry.url = url;
        }
    }
}

fn env_url(provenance: &str) -> Option<String> {
    let var = format!("{}_URL", provenance.to_uppercase().replace('-', "_"));
    env::var(&var).ok().filter(|v| !v.is_empty())
}

/// Run semantic validation, turning the error list into a [`ConfigError`].
pub fn finalize(config: &RouterConfig) -> Result<(), ConfigError> {
    validate_config(config).map_err(ConfigError::Validation)
}
