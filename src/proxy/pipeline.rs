//! The per-request proxy pipeline.
//!
//! # Responsibilities
//! - Classify the incoming path and pick the upstream origin
//! - Try CDN candidates in priority order for asset paths
//! - Forward page requests with method, headers, and body intact
//! - Rewrite HTML bodies and apply the response header policy
//!
//! # Design Decisions
//! - Asset failures are an explicit tagged outcome, not control flow
//!   hidden in conditionals, so the fallback contract is testable
//! - The pipeline holds the only cross-request state (classifier,
//!   registry, client), all of it immutable after construction

use std::time::Duration;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, Response, Uri};

use crate::config::schema::RouterConfig;
use crate::error::ProxyError;
use crate::proxy::content_type::is_asset_response;
use crate::proxy::headers::{
    apply_asset_policy, apply_page_policy, apply_rewritten_html_policy, prepare_forward_headers,
};
use crate::proxy::rewrite::rewrite_html;
use crate::proxy::upstream::UpstreamClient;
use crate::routing::classifier::{PathClassifier, RouteClass};
use crate::routing::registry::OriginRegistry;

/// Why an asset path fell through to the page origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallThroughReason {
    /// No configured CDN prefix matched the path.
    NoCandidates,
    /// Every candidate answered, but none with asset content.
    NotAssetContentType,
    /// The last attempted candidate was unreachable.
    FetchFailed,
}

/// Outcome of the asset leg of the pipeline.
#[derive(Debug)]
pub enum AssetOutcome {
    Served(Response<Body>),
    FallThrough(FallThroughReason),
}

/// Orchestrates classification, origin selection, forwarding, and
/// response transformation for one request at a time.
pub struct ProxyPipeline {
    classifier: PathClassifier,
    registry: OriginRegistry,
    client: UpstreamClient,
    html_buffer_limit: usize,
}

impl ProxyPipeline {
    /// Build the pipeline from validated configuration.
    pub fn from_config(config: &RouterConfig) -> Self {
        let prefixes = config
            .origins
            .cdn
            .iter()
            .map(|entry| entry.prefix.clone())
            .collect();

        Self {
            classifier: PathClassifier::new(prefixes),
            registry: OriginRegistry::from_config(&config.origins),
            client: UpstreamClient::new(
                config.proxy.max_redirects,
                Duration::from_secs(config.timeouts.connect_secs),
            ),
            html_buffer_limit: config.proxy.html_buffer_limit,
        }
    }

    /// Proxy one request end to end.
    pub async fn handle(&self, req: Request<Body>) -> Result<Response<Body>, ProxyError> {
        let path = req.uri().path().to_string();
        let query = req.uri().query().map(str::to_string);
        let class = self.classifier.classify(&path);

        if matches!(class, RouteClass::Asset { .. }) {
            match self.try_asset(&path, query.as_deref(), &class).await {
                AssetOutcome::Served(response) => return Ok(response),
                AssetOutcome::FallThrough(reason) => {
                    tracing::debug!(path = %path, reason = ?reason, "asset path fell through to page origin");
                }
            }
        }

        self.proxy_page(req).await
    }

    /// Try each CDN candidate in priority order.
    ///
    /// Asset fetches are always body-less GETs; the client's method is not
    /// forwarded. The first candidate whose response verifies as asset
    /// content wins. Any failure here is recoverable.
    async fn try_asset(&self, path: &str, query: Option<&str>, class: &RouteClass) -> AssetOutcome {
        let candidates = self.registry.asset_candidates(path, class);
        if candidates.is_empty() {
            return AssetOutcome::FallThrough(FallThroughReason::NoCandidates);
        }

        let mut reason = FallThroughReason::FetchFailed;
        for candidate in candidates {
            let target = format!(
                "{}{}{}",
                candidate.origin.base_url,
                candidate.upstream_path,
                query_suffix(query)
            );
            let uri: Uri = match target.parse() {
                Ok(uri) => uri,
                Err(_) => {
                    tracing::warn!(url = %target, "skipping unparseable asset target");
                    continue;
                }
            };

            match self.client.get(uri).await {
                Ok(response) => {
                    let content_type = response
                        .headers()
                        .get(CONTENT_TYPE)
                        .and_then(|v| v.to_str().ok());
                    if is_asset_response(content_type) {
                        let (mut parts, body) = response.into_parts();
                        apply_asset_policy(&mut parts.headers, &candidate.origin.provenance);
                        return AssetOutcome::Served(Response::from_parts(parts, chunked(body)));
                    }
                    tracing::debug!(
                        origin = %candidate.origin.provenance,
                        content_type = content_type.unwrap_or("<absent>"),
                        "response did not verify as asset content"
                    );
                    reason = FallThroughReason::NotAssetContentType;
                }
                Err(e) => {
                    tracing::warn!(
                        origin = %candidate.origin.provenance,
                        error = %e,
                        "asset origin fetch failed"
                    );
                    reason = FallThroughReason::FetchFailed;
                }
            }
        }

        AssetOutcome::FallThrough(reason)
    }

    /// Forward to the resolved page origin. Failure here is fatal.
    async fn proxy_page(&self, req: Request<Body>) -> Result<Response<Body>, ProxyError> {
        let path = req.uri().path().to_string();
        let query = req.uri().query().map(str::to_string);
        let origin = self.registry.page_origin(&path);

        let target_str = format!(
            "{}{}{}",
            origin.base_url,
            path,
            query_suffix(query.as_deref())
        );
        let target: Uri = target_str
            .parse()
            .map_err(|_| ProxyError::InvalidUri(target_str.clone()))?;
        let authority = target
            .authority()
            .map(|a| a.as_str().to_string())
            .ok_or_else(|| ProxyError::InvalidUri(target_str.clone()))?;

        let (mut parts, body) = req.into_parts();
        prepare_forward_headers(&mut parts.headers, &authority);

        // GET/HEAD never carry a body upstream.
        let forward_body = if parts.method == Method::GET || parts.method == Method::HEAD {
            Body::empty()
        } else {
            body
        };

        let mut builder = Request::builder().method(parts.method.clone()).uri(target);
        if let Some(headers) = builder.headers_mut() {
            *headers = parts.headers.clone();
        }
        let upstream_req = builder
            .body(forward_body)
            .map_err(|_| ProxyError::InvalidUri(target_str))?;

        let response =
            self.client
                .request(upstream_req)
                .await
                .map_err(|source| ProxyError::Upstream {
                    origin: origin.provenance.clone(),
                    source,
                })?;

        let is_html = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("text/html"));

        if is_html {
            self.rewrite_html_response(response, &origin.provenance)
                .await
        } else {
            let (mut parts, body) = response.into_parts();
            apply_page_policy(&mut parts.headers, &origin.provenance);
            Ok(Response::from_parts(parts, body))
        }
    }

    /// Buffer an HTML response, rewrite CDN origin URLs, and re-emit it.
    ///
    /// HTML is the one case that cannot stream: the whole body must be in
    /// memory before substitution, bounded by `html_buffer_limit`.
    async fn rewrite_html_response(
        &self,
        response: Response<Body>,
        provenance: &str,
    ) -> Result<Response<Body>, ProxyError> {
        let (mut parts, body) = response.into_parts();
        let bytes = axum::body::to_bytes(body, self.html_buffer_limit)
            .await
            .map_err(ProxyError::BodyRead)?;
        let text = std::str::from_utf8(&bytes).map_err(|_| ProxyError::BodyDecode)?;

        let rewritten = rewrite_html(text, self.registry.cdn_origins());
        apply_rewritten_html_policy(&mut parts.headers, provenance);

        Ok(Response::from_parts(parts, chunked(Body::from(rewritten))))
    }
}

/// Re-wrap a body as a stream with an inexact size hint.
///
/// Removing `content-length` from the header map is not enough: hyper
/// re-synthesizes the header from the body's exact size hint when
/// serializing the response. A stream-backed body forces chunked
/// transfer instead.
fn chunked(body: Body) -> Body {
    Body::from_stream(body.into_data_stream())
}

fn query_suffix(query: Option<&str>) -> String {
    match query {
        Some(q) => format!("?{q}"),
        None => String::new(),
    }
}
