//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → env overrides (WEBFLOW_URL, WORDPRESS_URL, ...)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → shared via Arc to the pipeline
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; origin mappings never change at runtime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Environment variables override origin URLs, read once at startup

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{apply_env_overrides, load_config, ConfigError};
pub use schema::{
    CdnOriginConfig, ListenerConfig, ObservabilityConfig, OriginsConfig, PageOriginConfig,
    ProxyLimits, RouterConfig, TimeoutConfig,
};
