//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! proxy_handler produces:
//!     → tracing events (structured, request_id + path + origin fields)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout via tracing-subscriber)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Metrics are cheap (atomic increments), labeled by method, status,
//!   and the provenance tag of the origin that served the response

pub mod logging;
pub mod metrics;
