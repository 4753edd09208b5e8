//! Origin registry: maps classifications to upstream origins.
//!
//! # Responsibilities
//! - Produce the ordered list of CDN candidates for an asset path,
//!   with the reserved prefix stripped from the forwarded path
//! - Resolve the page origin for any path (total, never fails)
//!
//! # Design Decisions
//! - Immutable after construction; shared by reference across requests
//! - Base URLs normalized (no trailing slash) so upstream targets and
//!   body rewriting concatenate cleanly
//! - Page resolution is a policy decision: unmatched paths go to the
//!   fallback origin rather than erroring

use crate::config::schema::OriginsConfig;
use crate::routing::classifier::RouteClass;

/// One entry of the ordered CDN origin mapping.
#[derive(Debug, Clone)]
pub struct CdnOrigin {
    /// Reserved local path prefix, e.g. `/_wfcdn`.
    pub prefix: String,
    /// Absolute origin base URL, normalized without a trailing slash.
    pub base_url: String,
    /// Provenance tag for the `x-proxy-origin` header.
    pub provenance: String,
}

/// A page-rendering origin.
#[derive(Debug, Clone)]
pub struct PageOrigin {
    /// Absolute origin base URL, normalized without a trailing slash.
    pub base_url: String,
    /// Provenance tag for the `x-proxy-origin` header.
    pub provenance: String,
}

/// A prioritized upstream candidate for an asset request.
#[derive(Debug)]
pub struct AssetCandidate<'a> {
    pub origin: &'a CdnOrigin,
    /// Request path with the matched prefix already stripped.
    pub upstream_path: String,
}

/// Static mapping from route classification to upstream origins.
///
/// Constructed once at startup from validated configuration; read-only for
/// the process lifetime, so it needs no synchronization.
#[derive(Debug)]
pub struct OriginRegistry {
    cdn: Vec<CdnOrigin>,
    primary: PageOrigin,
    fallback: PageOrigin,
    frontend_paths: Vec<String>,
    blog_prefix: String,
}

impl OriginRegistry {
    /// Build the registry from validated configuration.
    pub fn from_config(origins: &OriginsConfig) -> Self {
        let cdn = origins
            .cdn
            .iter()
            .map(|entry| CdnOrigin {
                prefix: entry.prefix.clone(),
                base_url: entry.url.trim_end_matches('/').to_string(),
                provenance: entry.provenance.clone(),
            })
            .collect();

        Self {
            cdn,
            primary: PageOrigin {
                base_url: origins.primary.url.trim_end_matches('/').to_string(),
                provenance: origins.primary.provenance.clone(),
            },
            fallback: PageOrigin {
                base_url: origins.fallback.url.trim_end_matches('/').to_string(),
                provenance: origins.fallback.provenance.clone(),
            },
            frontend_paths: origins.frontend_paths.clone(),
            blog_prefix: origins.blog_prefix.clone(),
        }
    }

    /// The ordered CDN origin mapping, as configured.
    pub fn cdn_origins(&self) -> &[CdnOrigin] {
        &self.cdn
    }

    /// CDN candidates for an asset path, in priority order.
    ///
    /// A recognized prefix yields exactly one candidate. A bare extension
    /// match tries each configured mapping whose prefix the path starts
    /// with. An empty result means the asset path falls through to the
    /// page origin entirely.
    pub fn asset_candidates(&self, path: &str, class: &RouteClass) -> Vec<AssetCandidate<'_>> {
        let tagged = match class {
            RouteClass::Asset { cdn_prefix } => cdn_prefix.as_deref(),
            RouteClass::Page => return Vec::new(),
        };

        match tagged {
            Some(prefix) => self
                .cdn
                .iter()
                .filter(|origin| origin.prefix == prefix)
                .map(|origin| AssetCandidate {
                    origin,
                    upstream_path: strip_prefix(path, &origin.prefix),
                })
                .collect(),
            None => self
                .cdn
                .iter()
                .filter(|origin| path.starts_with(&origin.prefix))
                .map(|origin| AssetCandidate {
                    origin,
                    upstream_path: strip_prefix(path, &origin.prefix),
                })
                .collect(),
        }
    }

    /// Resolve the page origin for a path.
    ///
    /// The primary origin serves the known front-end paths (exact match)
    /// and everything under the blog prefix; all other paths resolve to
    /// the fallback origin.
    pub fn page_origin(&self, path: &str) -> &PageOrigin {
        let is_blog = path == self.blog_prefix
            || (path.starts_with(&self.blog_prefix)
                && path.as_bytes().get(self.blog_prefix.len()) == Some(&b'/'));

        if is_blog || self.frontend_paths.iter().any(|p| p == path) {
            &self.primary
        } else {
            &self.fallback
        }
    }
}

/// Strip a matched prefix, keeping the result rooted at `/`.
fn strip_prefix(path: &str, prefix: &str) -> String {
    let rest = path.strip_prefix(prefix).unwrap_or(path);
    if rest.starts_with('/') {
        rest.to_string()
    } else {
        format!("/{rest}")
    }
}
