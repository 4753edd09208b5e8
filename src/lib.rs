//! Edge Origin Router Library
//!
//! An edge request router that fronts a page-rendering origin and one or
//! more asset/CDN origins, presenting them as a single logical host.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;
pub mod routing;

pub use config::RouterConfig;
pub use error::ProxyError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
