//! Fetching with redirect resolution and caching.
//!
//! [`RedirectResolver`] owns the transport and the response cache. Every page
//! fetch and search query goes through it.

mod redirects;

pub use redirects::{resolve_location, RedirectResolver};
