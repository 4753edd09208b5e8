//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the edge router.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Listener configuration (bind address, connection limits).
    pub listener: ListenerConfig,

    /// Upstream origin definitions and routing rules.
    pub origins: OriginsConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Proxying limits (redirect hops, HTML buffering).
    pub proxy: ProxyLimits,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Maximum concurrently served requests; excess requests queue
    /// (backpressure) rather than being rejected.
    pub max_connections: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_connections: 10_000,
        }
    }
}

/// Upstream origins and the rules that select between them.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OriginsConfig {
    /// Page origin serving the front-end paths and the blog.
    pub primary: PageOriginConfig,

    /// Page origin serving everything else.
    pub fallback: PageOriginConfig,

    /// CDN origin mappings, in priority order. Each reserves a local path
    /// prefix that maps to a remote CDN base URL.
    pub cdn: Vec<CdnOriginConfig>,

    /// Exact request paths served by the primary origin.
    pub frontend_paths: Vec<String>,

    /// Path prefix (the blog) served by the primary origin.
    pub blog_prefix: String,
}

impl Default for OriginsConfig {
    fn default() -> Self {
        Self {
            primary: PageOriginConfig {
                url: "https://site.webflow.io".to_string(),
                provenance: "webflow".to_string(),
            },
            fallback: PageOriginConfig {
                url: "https://blog.example.com".to_string(),
                provenance: "wordpress".to_string(),
            },
            cdn: vec![
                CdnOriginConfig {
                    prefix: "/_wfcdn".to_string(),
                    url: "https://cdn.prod.website-files.com".to_string(),
                    provenance: "webflow-cdn".to_string(),
                },
                CdnOriginConfig {
                    prefix: "/_jsdcdn".to_string(),
                    url: "https://cdn.jsdelivr.net".to_string(),
                    provenance: "jsdelivr-cdn".to_string(),
                },
            ],
            frontend_paths: vec![
                "/".to_string(),
                "/about".to_string(),
                "/pricing".to_string(),
            ],
            blog_prefix: "/blog".to_string(),
        }
    }
}

/// A page-rendering origin.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PageOriginConfig {
    /// Absolute origin base URL (scheme + authority, no trailing slash).
    pub url: String,

    /// Provenance tag reported in the `x-proxy-origin` response header.
    pub provenance: String,
}

/// One CDN origin mapping entry.
///
/// Registration order in the config file defines priority when more than
/// one prefix could serve a bare asset path.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CdnOriginConfig {
    /// Reserved local path prefix (e.g., "/_wfcdn").
    pub prefix: String,

    /// Absolute CDN origin base URL.
    pub url: String,

    /// Provenance tag reported in the `x-proxy-origin` response header.
    pub provenance: String,
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
        }
    }
}

/// Limits applied while proxying.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxyLimits {
    /// Maximum redirect hops followed per upstream fetch.
    pub max_redirects: usize,

    /// Maximum HTML body size buffered for rewriting, in bytes.
    /// Larger HTML responses fail the request rather than stream unrewritten.
    pub html_buffer_limit: usize,
}

impl Default for ProxyLimits {
    fn default() -> Self {
        Self {
            max_redirects: 5,
            html_buffer_limit: 8 * 1024 * 1024, // 8 MiB
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
