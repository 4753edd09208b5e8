//! Error types for the proxy pipeline.
//!
//! # Design Decisions
//! - Asset-path failures are not errors: they are modeled as fallthrough
//!   outcomes inside the pipeline and never reach this type.
//! - Errors that do reach the client map to 502 Bad Gateway; the proxy
//!   never answers an upstream failure with an empty 200.

use axum::http::header::{HeaderName, HeaderValue, CACHE_CONTROL};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::proxy::headers::X_PROXY_ORIGIN;

/// Fatal errors produced while proxying a single request.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The page/default origin could not be reached. Asset origins failing
    /// is recoverable and handled inside the pipeline; this is not.
    #[error("upstream request to {origin} failed: {source}")]
    Upstream {
        origin: String,
        #[source]
        source: crate::proxy::upstream::FetchError,
    },

    /// An upstream URL could not be assembled from the configured origin
    /// base and the request path.
    #[error("invalid upstream uri `{0}`")]
    InvalidUri(String),

    /// The upstream HTML body could not be fully read (or exceeded the
    /// configured buffer limit) before rewriting.
    #[error("failed to buffer upstream body: {0}")]
    BodyRead(#[source] axum::Error),

    /// The upstream declared `text/html` but the body was not valid UTF-8.
    /// Partially rewritten content must never be returned.
    #[error("upstream html body is not valid utf-8")]
    BodyDecode,
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        // Error responses carry the same header pair as every other
        // response: never cacheable, tagged with the error provenance.
        let mut response = (StatusCode::BAD_GATEWAY, "upstream request failed").into_response();
        let headers = response.headers_mut();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
        headers.insert(
            HeaderName::from_static(X_PROXY_ORIGIN),
            HeaderValue::from_static("error"),
        );
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_responses_carry_the_header_policy() {
        let response = ProxyError::InvalidUri("http://".into()).into_response();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(response.headers().get(CACHE_CONTROL).unwrap(), "no-store");
        assert_eq!(response.headers().get(X_PROXY_ORIGIN).unwrap(), "error");
    }
}
