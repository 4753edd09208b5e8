//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → classifier.rs (asset vs page, CDN prefix tag)
//!     → registry.rs (ordered CDN candidates, or page origin)
//!     → Return: origin base URL + provenance tag
//!
//! Registry construction (at startup):
//!     OriginsConfig
//!     → Normalize base URLs
//!     → Freeze as immutable OriginRegistry
//! ```
//!
//! # Design Decisions
//! - Classification is a total pure function; unknown input is always Page
//! - CDN mappings are an ordered sequence, not a map: registration order
//!   is the priority order when several prefixes could serve a path
//! - Registry is immutable after construction (thread-safe without locks)
//! - No regex in the hot path (suffix and prefix matching only)

pub mod classifier;
pub mod registry;

pub use classifier::{PathClassifier, RouteClass, ASSET_EXTENSIONS};
pub use registry::{AssetCandidate, CdnOrigin, OriginRegistry, PageOrigin};
