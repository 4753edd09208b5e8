//! Asset content-type verification.
//!
//! Guards against treating a non-asset response (a CDN error page, say) as
//! cacheable asset content. A failed check falls through to the page path;
//! it never errors.

/// Substrings that confirm an asset response.
const ASSET_CONTENT_TYPES: &[&str] = &[
    "javascript",
    "css",
    "image/",
    "font/",
    "application/font",
    "application/json",
    "application/octet-stream",
];

/// True when the declared content type confirms asset content.
///
/// Matching is case-sensitive substring containment; an absent header is
/// never an asset.
pub fn is_asset_response(content_type: Option<&str>) -> bool {
    match content_type {
        Some(value) => ASSET_CONTENT_TYPES.iter().any(|t| value.contains(t)),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_asset_types() {
        assert!(is_asset_response(Some("application/javascript")));
        assert!(is_asset_response(Some("text/javascript; charset=utf-8")));
        assert!(is_asset_response(Some("text/css")));
        assert!(is_asset_response(Some("image/png")));
        assert!(is_asset_response(Some("font/woff2")));
        assert!(is_asset_response(Some("application/font-woff")));
        assert!(is_asset_response(Some("application/json")));
        assert!(is_asset_response(Some("application/octet-stream")));
    }

    #[test]
    fn rejects_non_asset_types() {
        assert!(!is_asset_response(Some("text/html; charset=utf-8")));
        assert!(!is_asset_response(Some("text/plain")));
        assert!(!is_asset_response(None));
    }
}
