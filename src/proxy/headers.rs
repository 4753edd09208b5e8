//! Header policy for proxied requests and responses.
//!
//! Every response the router returns carries a deterministic
//! `cache-control` and `x-proxy-origin` pair; outbound requests get their
//! `host` rewritten to the upstream authority and hop-by-hop headers
//! stripped.

use axum::http::header::{HeaderMap, HeaderName, HeaderValue, CACHE_CONTROL, CONTENT_LENGTH, HOST};

/// Advisory caching applied to every proxied response.
pub const CACHE_CONTROL_IMMUTABLE: &str = "public, max-age=31536000, immutable";

/// Provenance header naming the upstream that served the response.
pub const X_PROXY_ORIGIN: &str = "x-proxy-origin";

/// Headers that must not be forwarded upstream.
const HOP_BY_HOP: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailers",
    "upgrade",
];

/// Policy for a verified asset response: provenance, immutable caching,
/// and no stale `content-length`.
pub fn apply_asset_policy(headers: &mut HeaderMap, provenance: &str) {
    set_policy_headers(headers, provenance);
    headers.remove(CONTENT_LENGTH);
}

/// Policy for a page response streamed through unmodified.
pub fn apply_page_policy(headers: &mut HeaderMap, provenance: &str) {
    set_policy_headers(headers, provenance);
}

/// Policy for a rewritten HTML response: the declared length no longer
/// matches the rewritten byte length.
pub fn apply_rewritten_html_policy(headers: &mut HeaderMap, provenance: &str) {
    set_policy_headers(headers, provenance);
    headers.remove(CONTENT_LENGTH);
}

fn set_policy_headers(headers: &mut HeaderMap, provenance: &str) {
    headers.insert(CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL_IMMUTABLE));
    if let Ok(value) = HeaderValue::from_str(provenance) {
        headers.insert(HeaderName::from_static(X_PROXY_ORIGIN), value);
    }
}

/// Prepare client headers for forwarding: strip hop-by-hop headers and
/// rewrite `host` to the upstream authority.
pub fn prepare_forward_headers(headers: &mut HeaderMap, upstream_authority: &str) {
    for name in HOP_BY_HOP {
        headers.remove(*name);
    }
    if let Ok(value) = HeaderValue::from_str(upstream_authority) {
        headers.insert(HOST, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_policy_sets_headers_and_drops_length() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("123"));

        apply_asset_policy(&mut headers, "webflow-cdn");

        assert_eq!(headers.get(CACHE_CONTROL).unwrap(), CACHE_CONTROL_IMMUTABLE);
        assert_eq!(headers.get(X_PROXY_ORIGIN).unwrap(), "webflow-cdn");
        assert!(headers.get(CONTENT_LENGTH).is_none());
    }

    #[test]
    fn page_policy_keeps_length() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("123"));

        apply_page_policy(&mut headers, "wordpress");

        assert_eq!(headers.get(X_PROXY_ORIGIN).unwrap(), "wordpress");
        assert_eq!(headers.get(CONTENT_LENGTH).unwrap(), "123");
    }

    #[test]
    fn forwarding_rewrites_host_and_strips_hop_by_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_static("public.example.com"));
        headers.insert("connection", HeaderValue::from_static("keep-alive"));
        headers.insert("te", HeaderValue::from_static("trailers"));
        headers.insert("accept", HeaderValue::from_static("text/html"));

        prepare_forward_headers(&mut headers, "origin.internal:8443");

        assert_eq!(headers.get(HOST).unwrap(), "origin.internal:8443");
        assert!(headers.get("connection").is_none());
        assert!(headers.get("te").is_none());
        assert_eq!(headers.get("accept").unwrap(), "text/html");
    }
}
