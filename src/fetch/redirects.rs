//! HTTP redirect chain resolution.
//!
//! Redirects are followed manually: each hop is a fresh transport call, the
//! cache is consulted before every hop, and only the final response of a chain
//! is stored.

use std::time::Duration;

use log::{debug, info, warn};

use crate::cache::{cache_key, ResponseCache};
use crate::config::Config;
use crate::error_handling::FetchError;
use crate::http::{find_header, is_redirect, parse_status_code, HttpRequest, Transport};
use crate::url::{split_scheme, Url};

/// Follows redirects for a request, up to a fixed budget.
pub struct RedirectResolver<T> {
    transport: T,
    cache: ResponseCache,
    user_agent: String,
    budget: usize,
    deadline: Duration,
}

impl<T: Transport> RedirectResolver<T> {
    pub fn new(transport: T, cache: ResponseCache, config: &Config) -> Self {
        Self {
            transport,
            cache,
            user_agent: config.user_agent.clone(),
            budget: config.max_redirects,
            deadline: config.timeout(),
        }
    }

    /// Resolves `url` with the configured redirect budget.
    ///
    /// # Errors
    ///
    /// Returns a `FetchError` if any hop fails at the network level or the final
    /// response cannot be written to the cache file.
    pub async fn resolve(&mut self, url: &Url, accept: &str) -> Result<String, FetchError> {
        self.resolve_with_budget(url, accept, self.budget).await
    }

    /// Resolves `url`, following at most `budget` redirects.
    ///
    /// A cache hit returns the stored raw response immediately, even when that
    /// response is itself a redirect. On a miss the response is fetched; a
    /// `301/302/303/307/308` with a `Location` header is followed while budget
    /// remains. Anything else (including an exhausted budget) is cached under the
    /// current hop's key and returned.
    ///
    /// At most `budget + 1` transport calls are made.
    pub async fn resolve_with_budget(
        &mut self,
        url: &Url,
        accept: &str,
        budget: usize,
    ) -> Result<String, FetchError> {
        let mut target = url.clone();
        let mut remaining = budget;

        loop {
            let key = cache_key(&target.host, &target.path, accept);
            if let Some(cached) = self.cache.get(&key) {
                info!("Cache hit for {target}");
                return Ok(cached.to_string());
            }

            let request = HttpRequest::get(target.clone(), self.user_agent.as_str(), accept);
            let raw = self.transport.send(&request, self.deadline).await?;

            let status_code = parse_status_code(&raw);
            debug!("{target} answered with status {status_code}");

            if is_redirect(status_code) {
                match find_header(&raw, "Location") {
                    Some(location) if remaining > 0 => match resolve_location(&target, location) {
                        Some(next) => {
                            info!("Redirecting ({status_code}) {target} -> {next}");
                            target = next;
                            remaining -= 1;
                            continue;
                        }
                        None => warn!("Not following {target} -> {location}: unsupported scheme"),
                    },
                    Some(_) => {
                        warn!("Redirect budget of {budget} exhausted at {target}, returning as-is");
                    }
                    None => {
                        warn!(
                            "Redirect status {status_code} for {target} but no Location header"
                        );
                    }
                }
            }

            self.cache.put(key, raw.clone())?;
            return Ok(raw);
        }
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

/// Computes the next hop from a `Location` header value.
///
/// Absolute `http`/`https` locations are parsed on their own. Protocol-relative
/// locations (`//host/path`) keep the current scheme. Absolute locations with
/// any other scheme (`ftp://`, `mailto:`) cannot be followed and yield `None`.
/// Anything else keeps the current scheme and host and becomes the new path.
pub fn resolve_location(current: &Url, location: &str) -> Option<Url> {
    let location = location.trim();
    if split_scheme(location).is_some() {
        return Some(Url::parse(location));
    }
    if let Some(rest) = location.strip_prefix("//") {
        return Some(Url::parse(&format!("{}://{rest}", current.scheme.as_str())));
    }
    if has_foreign_scheme(location) {
        return None;
    }

    let path = if location.starts_with('/') {
        location.to_string()
    } else {
        format!("/{location}")
    };
    Some(Url {
        scheme: current.scheme,
        host: current.host.clone(),
        path,
    })
}

/// True for `scheme:...` where the scheme is not http(s).
fn has_foreign_scheme(location: &str) -> bool {
    let Some((scheme, _)) = location.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
