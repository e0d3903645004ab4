//! Error types for the request/response engine.
//!
//! Errors are grouped by the component that raises them:
//! - **Fetch**: connection, TLS, socket I/O and deadline failures, plus cache
//!   persistence failures surfaced while resolving
//! - **Cache**: reading or writing the cache file
//! - **Render**: responses that cannot be split into headers and body
//! - **Search**: results pages that cannot be fetched or split
//! - **Initialization**: logger and TLS setup

mod types;

// Re-export public API
pub use types::{CacheError, FetchError, InitializationError, RenderError, SearchError};
