//! Configuration constants.
//!
//! This module defines the constants used throughout the client, including the
//! redirect budget, request deadline, wire header values and the search endpoint.

/// Client identifier sent as the `User-Agent` header on every request
pub const DEFAULT_USER_AGENT: &str = concat!("go2web/", env!("CARGO_PKG_VERSION"));

/// Default location of the response cache file
pub const DEFAULT_CACHE_FILE: &str = ".go2web_cache.json";

// Network operation timeouts
/// Deadline for a single request/response exchange in seconds
/// Covers TCP connect, TLS handshake, writing the request and reading until close
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// Redirect handling
/// Maximum number of redirect hops to follow
/// A redirect cycle terminates after this many hops with the last response returned as-is
pub const DEFAULT_REDIRECT_BUDGET: usize = 12;
/// Status codes that are followed when a `Location` header is present
pub const REDIRECT_STATUS_CODES: [u16; 5] = [301, 302, 303, 307, 308];

// Default ports
pub const HTTP_PORT: u16 = 80;
pub const HTTPS_PORT: u16 = 443;

// Accept header values
/// Accept header used for page fetches and searches
pub const ACCEPT_HTML: &str = "text/html";
/// Accept header used for `--json` fetches
pub const ACCEPT_JSON: &str = "application/json";

// Search provider
/// Query endpoint of the search provider; the form-encoded term is appended
pub const SEARCH_ENDPOINT: &str = "https://html.duckduckgo.com/html/?q=";
/// Class marker carried by result anchors on the results page
pub const SEARCH_RESULT_CLASS: &str = "result__a";
/// Query parameter that wraps the real destination of a result link
pub const SEARCH_TRACKING_PARAM: &str = "uddg";
/// Number of results kept from a results page
pub const MAX_SEARCH_RESULTS: usize = 10;

// Response framing
/// Separator between the header block and the body of a raw response
pub const HEADER_BODY_SEPARATOR: &str = "\r\n\r\n";
/// Read buffer size for socket reads
pub const READ_BUFFER_SIZE: usize = 8 * 1024;
