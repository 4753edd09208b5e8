//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the catch-all proxy handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Dispatch every request into the proxy pipeline
//! - Observability (metrics, request IDs)

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::RouterConfig;
use crate::observability::metrics;
use crate::proxy::headers::X_PROXY_ORIGIN;
use crate::proxy::ProxyPipeline;

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ProxyPipeline>,
}

/// HTTP server for the edge router.
pub struct HttpServer {
    router: Router,
    config: RouterConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RouterConfig) -> Self {
        let pipeline = Arc::new(ProxyPipeline::from_config(&config));
        let state = AppState { pipeline };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &RouterConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            // Outermost: requests past the cap queue on one shared
            // semaphore instead of piling into the pipeline.
            .layer(GlobalConcurrencyLimitLayer::new(
                config.listener.max_connections,
            ))
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }
}

/// Main proxy handler. Delegates to the pipeline and records metrics.
async fn proxy_handler(
    State(state): State<AppState>,
    ConnectInfo(remote): ConnectInfo<SocketAddr>,
    request: Request<Body>,
) -> Response {
    let start = Instant::now();
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        remote = %remote,
        "proxying request"
    );

    match state.pipeline.handle(request).await {
        Ok(response) => {
            let origin = response
                .headers()
                .get(X_PROXY_ORIGIN)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("unknown")
                .to_string();
            let status = response.status().as_u16();

            metrics::record_request(&method, status, &origin, start);
            tracing::debug!(
                request_id = %request_id,
                status = status,
                origin = %origin,
                "request served"
            );
            response
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                path = %path,
                error = %e,
                "proxy pipeline failed"
            );
            metrics::record_request(&method, 502, "error", start);
            e.into_response()
        }
    }
}
