//! Error type definitions.

use std::time::Duration;

use log::SetLoggerError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error building the TLS client configuration.
    #[error("TLS configuration error: {0}")]
    TlsConfigError(#[from] rustls::Error),
}

/// Error types for reading and writing the response cache file.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The cache file or its directory could not be read or written.
    #[error("Cache file I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The table could not be serialized, or the file is not a JSON object of strings.
    #[error("Cache serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Error types raised while performing a request.
///
/// None of these are retried; they abort the command.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The TCP connection could not be established.
    #[error("Failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The host is not usable as a TLS server name.
    #[error("Invalid server name for TLS: {0}")]
    InvalidServerName(String),

    /// The TLS handshake failed.
    #[error("TLS handshake with {host} failed: {source}")]
    Tls {
        host: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing the request or reading the response failed.
    #[error("Socket I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The exchange did not complete before its deadline.
    #[error("Request to {host} timed out after {timeout:?}")]
    Timeout { host: String, timeout: Duration },

    /// A fetched response could not be persisted.
    #[error(transparent)]
    Cache(#[from] CacheError),
}

impl FetchError {
    /// Returns true when the request hit its deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Timeout { .. })
    }
}

/// Error types raised while rendering a raw response.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RenderError {
    /// The raw response has no `\r\n\r\n` boundary.
    #[error("Response has no blank line separating headers from body")]
    MissingHeaderBoundary,
}

/// Error types raised while running a search.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The results page could not be fetched.
    #[error("Failed to fetch search results for '{term}'")]
    Fetch {
        term: String,
        #[source]
        source: FetchError,
    },

    /// The results page has no header/body boundary.
    #[error("Malformed search results page")]
    Render(#[from] RenderError),
}
