//! Application initialization.
//!
//! This module provides the functions the binary calls before doing any work:
//! - Logger setup (plain or JSON lines)
//! - TLS client configuration for the socket transport

mod logger;
mod tls;

// Re-export public API
pub use logger::init_logger_with;
pub use tls::init_tls_config;
