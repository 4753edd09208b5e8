//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Enforce the origin-mapping invariants the pipeline relies on:
//!   non-overlapping CDN prefixes and non-substring origin URLs
//! - Validate value ranges (timeouts > 0, addresses parseable)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs after env overrides, before the config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::RouterConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid bind address `{0}`")]
    InvalidBindAddress(String),

    #[error("invalid metrics address `{0}`")]
    InvalidMetricsAddress(String),

    #[error("origin `{provenance}` has invalid base url `{url}`: {reason}")]
    InvalidOriginUrl {
        provenance: String,
        url: String,
        reason: String,
    },

    #[error("cdn prefix `{0}` must be non-empty and start with '/'")]
    BadCdnPrefix(String),

    #[error("cdn prefixes `{0}` and `{1}` overlap; priority between them would be ambiguous")]
    OverlappingCdnPrefixes(String, String),

    #[error("cdn origin urls `{0}` and `{1}` conflict: one contains the other, so body rewriting would depend on application order")]
    ConflictingCdnUrls(String, String),

    #[error("timeout `{0}` must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("html_buffer_limit must be greater than zero")]
    ZeroHtmlBufferLimit,
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    check_origin_url(
        &config.origins.primary.provenance,
        &config.origins.primary.url,
        &mut errors,
    );
    check_origin_url(
        &config.origins.fallback.provenance,
        &config.origins.fallback.url,
        &mut errors,
    );

    for entry in &config.origins.cdn {
        check_origin_url(&entry.provenance, &entry.url, &mut errors);
        if entry.prefix.is_empty() || !entry.prefix.starts_with('/') || entry.prefix == "/" {
            errors.push(ValidationError::BadCdnPrefix(entry.prefix.clone()));
        }
    }

    // Pairwise invariants: prefixes must not shadow each other, and no
    // origin URL may contain another, or rewrite order becomes observable.
    for (i, a) in config.origins.cdn.iter().enumerate() {
        for b in config.origins.cdn.iter().skip(i + 1) {
            if a.prefix.starts_with(&b.prefix) || b.prefix.starts_with(&a.prefix) {
                errors.push(ValidationError::OverlappingCdnPrefixes(
                    a.prefix.clone(),
                    b.prefix.clone(),
                ));
            }
            let a_url = a.url.trim_end_matches('/');
            let b_url = b.url.trim_end_matches('/');
            if a_url.contains(b_url) || b_url.contains(a_url) {
                errors.push(ValidationError::ConflictingCdnUrls(
                    a.url.clone(),
                    b.url.clone(),
                ));
            }
        }
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("connect_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("request_secs"));
    }
    if config.proxy.html_buffer_limit == 0 {
        errors.push(ValidationError::ZeroHtmlBufferLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_origin_url(provenance: &str, url: &str, errors: &mut Vec<ValidationError>) {
    match Url::parse(url) {
        Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => {}
        Ok(parsed) => errors.push(ValidationError::InvalidOriginUrl {
            provenance: provenance.to_string(),
            url: url.to_string(),
            reason: format!("unsupported scheme `{}`", parsed.scheme()),
        }),
        Err(e) => errors.push(ValidationError::InvalidOriginUrl {
            provenance: provenance.to_string(),
            url: url.to_string(),
            reason: e.to_string(),
        }),
    }
}
