//! Request path classification.
//!
//! # Responsibilities
//! - Decide whether a path names a static asset or a page route
//! - Tag asset paths that carry a reserved CDN prefix
//!
//! # Design Decisions
//! - Extension matching is case-insensitive on the path suffix
//! - Prefix tagging requires a `/` after the prefix, so `/_cdnx.js`
//!   does not match prefix `/_cdn`
//! - Total over arbitrary input: no extension match means Page,
//!   regardless of prefix content

/// File extensions treated as static assets. Exhaustive and fixed.
pub const ASSET_EXTENSIONS: &[&str] = &[
    ".js", ".css", ".png", ".jpg", ".jpeg", ".gif", ".svg", ".webp", ".avif", ".woff", ".woff2",
    ".ttf", ".eot", ".ico", ".json", ".map",
];

/// Per-request route classification. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteClass {
    /// Static asset path; carries the reserved CDN prefix when present.
    Asset { cdn_prefix: Option<String> },
    /// Page/application route (the default).
    Page,
}

/// Classifies request paths against the configured CDN prefixes.
#[derive(Debug, Clone)]
pub struct PathClassifier {
    prefixes: Vec<String>,
}

impl PathClassifier {
    /// Create a classifier for the given CDN prefixes (in priority order).
    pub fn new(prefixes: Vec<String>) -> Self {
        Self { prefixes }
    }

    /// Classify a request path.
    pub fn classify(&self, path: &str) -> RouteClass {
        if !has_asset_extension(path) {
            return RouteClass::Page;
        }

        let cdn_prefix = self
            .prefixes
            .iter()
            .find(|prefix| {
                path.len() > prefix.len()
                    && path.starts_with(prefix.as_str())
                    && path.as_bytes()[prefix.len()] == b'/'
            })
            .cloned();

        RouteClass::Asset { cdn_prefix }
    }
}

/// True when the path's lower-cased suffix is a known asset extension.
pub fn has_asset_extension(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    ASSET_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> PathClassifier {
        PathClassifier::new(vec!["/_wfcdn".into(), "/_jsdcdn".into()])
    }

    #[test]
    fn asset_extensions_match_any_case() {
        let c = classifier();
        assert_eq!(
            c.classify("/app.js"),
            RouteClass::Asset { cdn_prefix: None }
        );
        assert_eq!(
            c.classify("/images/LOGO.PNG"),
            RouteClass::Asset { cdn_prefix: None }
        );
        assert_eq!(
            c.classify("/fonts/brand.WOFF2"),
            RouteClass::Asset { cdn_prefix: None }
        );
    }

    #[test]
    fn non_asset_paths_are_pages() {
        let c = classifier();
        assert_eq!(c.classify("/"), RouteClass::Page);
        assert_eq!(c.classify(""), RouteClass::Page);
        assert_eq!(c.classify("/blog/my-post"), RouteClass::Page);
        assert_eq!(c.classify("/contact"), RouteClass::Page);
        // Trailing slash after an extension is no longer an asset suffix.
        assert_eq!(c.classify("/app.js/"), RouteClass::Page);
    }

    #[test]
    fn prefix_is_tagged_when_followed_by_separator() {
        let c = classifier();
        assert_eq!(
            c.classify("/_wfcdn/img/logo.svg"),
            RouteClass::Asset {
                cdn_prefix: Some("/_wfcdn".into())
            }
        );
        // Prefix must be followed by '/', not merely be a textual prefix.
        assert_eq!(
            c.classify("/_wfcdnx/logo.svg"),
            RouteClass::Asset { cdn_prefix: None }
        );
    }

    #[test]
    fn prefix_without_extension_is_still_a_page() {
        let c = classifier();
        assert_eq!(c.classify("/_wfcdn/some/page"), RouteClass::Page);
        assert_eq!(c.classify("/_wfcdn"), RouteClass::Page);
    }
}
