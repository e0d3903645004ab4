//! Library facade: page fetches and searches over one resolver and cache.

use anyhow::{Context, Result};
use log::debug;

use crate::cache::ResponseCache;
use crate::config::Config;
use crate::fetch::RedirectResolver;
use crate::http::{TcpTransport, Transport};
use crate::render::{render, RenderedOutput};
use crate::search::{SearchClient, SearchResult};
use crate::url::Url;

/// An HTTP client bound to a transport and a response cache.
///
/// # Example
///
/// ```no_run
/// use go2web::{Client, Config, ACCEPT_HTML};
///
/// # async fn example() -> anyhow::Result<()> {
/// let mut client = Client::new(&Config::default())?;
/// let page = client.fetch("example.com", ACCEPT_HTML).await?;
/// println!("{page}");
///
/// for result in client.search("rust sockets").await? {
///     println!("{result}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct Client<T = TcpTransport> {
    resolver: RedirectResolver<T>,
}

impl Client<TcpTransport> {
    /// Creates a socket-backed client, opening the cache file named in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS configuration cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        let transport = TcpTransport::new().context("Failed to initialize TLS transport")?;
        let cache = match &config.cache_path {
            Some(path) => ResponseCache::open(path),
            None => ResponseCache::in_memory(),
        };
        debug!("Using cache with {} entries", cache.len());
        Ok(Self::with_transport(transport, cache, config))
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(transport: T, cache: ResponseCache, config: &Config) -> Self {
        Self {
            resolver: RedirectResolver::new(transport, cache, config),
        }
    }

    /// Fetches `url` (normalized first) and renders the final response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, times out, the cache cannot be
    /// written, or the response has no header/body boundary.
    pub async fn fetch(&mut self, url: &str, accept: &str) -> Result<RenderedOutput> {
        let url = Url::parse(url);
        let raw = self
            .resolver
            .resolve(&url, accept)
            .await
            .with_context(|| format!("Failed to fetch {url}"))?;
        render(&raw).with_context(|| format!("Failed to render response from {url}"))
    }

    /// Searches the web and returns up to ten ranked results.
    ///
    /// # Errors
    ///
    /// Returns an error if the results page cannot be fetched or parsed.
    pub async fn search(&mut self, term: &str) -> Result<Vec<SearchResult>> {
        Ok(SearchClient::new(&mut self.resolver).search(term).await?)
    }

    pub fn resolver(&self) -> &RedirectResolver<T> {
        &self.resolver
    }
}
