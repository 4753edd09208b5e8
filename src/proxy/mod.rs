//! Proxying subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request
//!     → pipeline.rs (classify, orchestrate)
//!     → upstream.rs (fetch with redirect following)
//!     → content_type.rs (confirm asset responses)
//!     → rewrite.rs (HTML body rewriting)
//!     → headers.rs (cache-control, provenance, host, content-length)
//!     → Response to client
//! ```
//!
//! # Design Decisions
//! - Asset failures are a tagged fallthrough, not an error path
//! - Assets and non-HTML pages stream; only HTML is buffered (for rewrite)
//! - Page-origin failure is fatal and surfaces as 502, never an empty 200

pub mod content_type;
pub mod headers;
pub mod pipeline;
pub mod rewrite;
pub mod upstream;

pub use pipeline::{AssetOutcome, FallThroughReason, ProxyPipeline};
pub use upstream::UpstreamClient;
