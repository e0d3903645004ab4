//! go2web library: a socket-level HTTP client with redirects, caching and search
//!
//! This library fetches pages over raw TCP/TLS sockets with hand-written
//! HTTP/1.1 requests, follows redirects up to a fixed budget, caches final
//! responses in a JSON file, and renders bodies as readable text (HTML) or
//! pretty-printed JSON. It can also search the web and return the top ten
//! results.
//!
//! # Example
//!
//! ```no_run
//! use go2web::{Client, Config, ACCEPT_JSON};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> anyhow::Result<()> {
//! let mut client = Client::new(&Config::default())?;
//!
//! let output = client.fetch("https://httpbin.org/json", ACCEPT_JSON).await?;
//! println!("{}", output.text);
//!
//! for result in client.search("rust programming").await? {
//!     println!("{result}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! Requests are async and require a Tokio runtime. A current-thread runtime is
//! enough: every request is awaited one after another.

pub mod cache;
mod client;
pub mod config;
pub mod error_handling;
pub mod fetch;
pub mod http;
pub mod initialization;
pub mod render;
pub mod search;
pub mod url;

#[cfg(test)]
mod test_helpers;

// Re-export public API
pub use cache::ResponseCache;
pub use client::Client;
pub use config::{Config, LogFormat, LogLevel, ACCEPT_HTML, ACCEPT_JSON};
pub use error_handling::{CacheError, FetchError, RenderError, SearchError};
pub use render::{ContentKind, RenderedOutput};
pub use search::SearchResult;
