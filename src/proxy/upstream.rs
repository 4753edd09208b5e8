//! Upstream fetch client.
//!
//! # Responsibilities
//! - Issue requests to origin servers over the shared hyper client
//! - Follow redirects up to a bounded hop count, resolving relative
//!   `location` values against the current target
//!
//! # Design Decisions
//! - Connection pooling comes from the hyper-util legacy client
//! - The connector serves both `http` and `https` origins; TLS uses
//!   rustls with webpki roots
//! - Streamed request bodies cannot be replayed, so redirected hops are
//!   re-issued without a body as GET (HEAD stays HEAD)

use std::time::Duration;

use axum::body::Body;
use axum::http::header::{HeaderValue, HOST, LOCATION};
use axum::http::{Method, Request, Response, StatusCode, Uri};
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use thiserror::Error;
use url::Url;

/// Errors from a single upstream fetch (including its redirect chain).
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] hyper_util::client::legacy::Error),

    #[error("invalid redirect location `{0}`")]
    BadRedirect(String),
}

/// HTTP client for origin fetches, with redirect following.
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client<HttpsConnector<HttpConnector>, Body>,
    max_redirects: usize,
}

impl UpstreamClient {
    pub fn new(max_redirects: usize, connect_timeout: Duration) -> Self {
        let mut http = HttpConnector::new();
        http.enforce_http(false);
        http.set_connect_timeout(Some(connect_timeout));

        let https = hyper_rustls::HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_all_versions()
            .wrap_connector(http);

        let client = Client::builder(TokioExecutor::new()).build(https);
        Self {
            client,
            max_redirects,
        }
    }

    /// Issue a body-less GET, following redirects. Used for asset fetches,
    /// where the client's method is never forwarded.
    pub async fn get(&self, uri: Uri) -> Result<Response<Body>, FetchError> {
        let req = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .map_err(|e| FetchError::BadRedirect(e.to_string()))?;
        self.request(req).await
    }

    /// Issue a request, following up to `max_redirects` redirect hops.
    pub async fn request(&self, req: Request<Body>) -> Result<Response<Body>, FetchError> {
        let method = req.method().clone();
        let mut headers = req.headers().clone();
        let mut uri = req.uri().clone();

        let mut response = self.client.request(req).await?;
        let mut hops = 0;

        while is_redirect(response.status()) && hops < self.max_redirects {
            let location = match response.headers().get(LOCATION).and_then(|v| v.to_str().ok()) {
                Some(l) => l.to_string(),
                None => break,
            };
            let next = resolve_location(&uri, &location)?;

            tracing::debug!(from = %uri, to = %next, "following upstream redirect");

            if let Some(authority) = next.authority() {
                if let Ok(value) = HeaderValue::from_str(authority.as_str()) {
                    headers.insert(HOST, value);
                }
            }

            let next_method = if method == Method::HEAD {
                Method::HEAD
            } else {
                Method::GET
            };
            let mut builder = Request::builder().method(next_method).uri(next.clone());
            if let Some(h) = builder.headers_mut() {
                *h = headers.clone();
            }
            let next_req = builder
                .body(Body::empty())
                .map_err(|_| FetchError::BadRedirect(location.clone()))?;

            uri = next;
            hops += 1;
            response = self.client.request(next_req).await?;
        }

        let (parts, body) = response.into_parts();
        Ok(Response::from_parts(parts, Body::new(body)))
    }
}

fn is_redirect(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::MOVED_PERMANENTLY
            | StatusCode::FOUND
            | StatusCode::SEE_OTHER
            | StatusCode::TEMPORARY_REDIRECT
            | StatusCode::PERMANENT_REDIRECT
    )
}

/// Resolve a `location` header value against the current target.
fn resolve_location(current: &Uri, location: &str) -> Result<Uri, FetchError> {
    let base = Url::parse(&current.to_string())
        .map_err(|_| FetchError::BadRedirect(location.to_string()))?;
    let joined = base
        .join(location)
        .map_err(|_| FetchError::BadRedirect(location.to_string()))?;
    joined
        .as_str()
        .parse::<Uri>()
        .map_err(|_| FetchError::BadRedirect(location.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_absolute_location() {
        let current: Uri = "http://a.example.com/x".parse().unwrap();
        let next = resolve_location(&current, "https://b.example.com/y").unwrap();
        assert_eq!(next.to_string(), "https://b.example.com/y");
    }

    #[test]
    fn resolves_relative_location_against_current_target() {
        let current: Uri = "http://a.example.com/dir/page".parse().unwrap();
        let next = resolve_location(&current, "/other").unwrap();
        assert_eq!(next.to_string(), "http://a.example.com/other");

        let sibling = resolve_location(&current, "sibling").unwrap();
        assert_eq!(sibling.to_string(), "http://a.example.com/dir/sibling");
    }

    #[test]
    fn rejects_unparseable_location() {
        let current: Uri = "http://a.example.com/".parse().unwrap();
        assert!(resolve_location(&current, "http://[broken").is_err());
    }

    #[tokio::test]
    async fn https_uris_reach_the_connect_stage() {
        // An http-only connector rejects https URIs with a scheme error
        // before any I/O. Against a refusing port, a TLS-capable client
        // must instead fail at the TCP connect.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = UpstreamClient::new(0, Duration::from_millis(200));
        let err = client
            .get(format!("https://{addr}/app.js").parse().unwrap())
            .await
            .unwrap_err();

        let mut chain = String::new();
        let mut source: Option<&(dyn std::error::Error + 'static)> = Some(&err);
        while let Some(e) = source {
            chain.push_str(&e.to_string());
            chain.push(' ');
            source = e.source();
        }
        assert!(
            !chain.contains("scheme"),
            "https fetch must fail at connect, not scheme validation: {chain}"
        );
    }
}
