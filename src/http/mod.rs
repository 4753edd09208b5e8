//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, request ID)
//!     → proxy pipeline (classify, fetch, transform)
//!     → Response to client
//! ```

pub mod server;

pub use server::HttpServer;
