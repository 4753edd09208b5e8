//! Structured logging setup.
//!
//! # Design Decisions
//! - `RUST_LOG` always wins; the config file's `log_level` is only the
//!   fallback when the environment says nothing

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber.
///
/// `log_level` comes from `observability.log_level` in the config file
/// and scopes this crate; middleware logging stays at debug.
pub fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter(log_level))),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// The filter directive used when `RUST_LOG` is unset.
pub fn default_filter(log_level: &str) -> String {
    format!("edge_router={log_level},tower_http=debug")
}
