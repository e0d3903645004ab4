//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (redirect budget, timeouts, wire header values, etc.)
//! - Library configuration and logging option types

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel};
