//! URL normalization.
//!
//! Turns whatever the user typed (`example.com/a`, `https://x.com`, ...) into a
//! scheme/host/path triple. Parsing never fails: a malformed host is passed
//! through unchecked and surfaces later as a connection error.

use std::fmt;

use crate::config::{HTTPS_PORT, HTTP_PORT};

/// URL scheme understood by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    /// Scheme name as it appears before `://`.
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }

    /// Port used when the host carries no explicit port.
    pub fn default_port(self) -> u16 {
        match self {
            Scheme::Http => HTTP_PORT,
            Scheme::Https => HTTPS_PORT,
        }
    }

    pub fn is_tls(self) -> bool {
        self == Scheme::Https
    }
}

/// A normalized request target.
///
/// `path` always begins with `/` and includes the query string, if any.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Url {
    pub scheme: Scheme,
    pub host: String,
    pub path: String,
}

impl Url {
    /// Normalizes a user-supplied string.
    ///
    /// Inputs without an `http://` or `https://` prefix are treated as `http`.
    /// The host ends at the first `/` or `?`; an empty path becomes `/`. A
    /// `#fragment` is dropped because it is never sent on the wire.
    ///
    /// # Examples
    ///
    /// ```
    /// use go2web::url::{Scheme, Url};
    ///
    /// let url = Url::parse("example.com/a");
    /// assert_eq!(url.scheme, Scheme::Http);
    /// assert_eq!(url.host, "example.com");
    /// assert_eq!(url.path, "/a");
    /// ```
    pub fn parse(input: &str) -> Url {
        let input = input.trim();
        let (scheme, rest) = match split_scheme(input) {
            Some((scheme, rest)) => (scheme, rest),
            None => (Scheme::Http, input),
        };

        let split_at = rest.find(['/', '?']).unwrap_or(rest.len());
        let (host, path) = rest.split_at(split_at);

        let path = match path.find('#') {
            Some(idx) => &path[..idx],
            None => path,
        };
        let path = if path.is_empty() {
            "/".to_string()
        } else if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };

        Url {
            scheme,
            host: host.to_string(),
            path,
        }
    }

    /// Splits an explicit `host:port` authority.
    ///
    /// Returns the bare host name (used for SNI, IPv6 brackets removed with or
    /// without a port) and the port to connect to.
    /// Anything after the last `:` that is not a valid port is left in the host.
    pub fn host_and_port(&self) -> (&str, u16) {
        if let Some((name, port)) = self.host.rsplit_once(':') {
            // An unbracketed IPv6 literal has more colons; leave it alone
            let is_ipv6_literal = name.contains(':') && !name.starts_with('[');
            if !is_ipv6_literal {
                if let Ok(port) = port.parse::<u16>() {
                    let name = name.trim_start_matches('[').trim_end_matches(']');
                    return (name, port);
                }
            }
        }
        let bare = self
            .host
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .unwrap_or(&self.host);
        (bare, self.scheme.default_port())
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}{}", self.scheme.as_str(), self.host, self.path)
    }
}

/// Recognizes an `http://` / `https://` prefix, ignoring ASCII case.
pub(crate) fn split_scheme(input: &str) -> Option<(Scheme, &str)> {
    for (prefix, scheme) in [("https://", Scheme::Https), ("http://", Scheme::Http)] {
        if input.len() >= prefix.len()
            && input.is_char_boundary(prefix.len())
            && input[..prefix.len()].eq_ignore_ascii_case(prefix)
        {
            return Some((scheme, &input[prefix.len()..]));
        }
    }
    None
}
