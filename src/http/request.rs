//! Request construction.

use std::fmt;

use crate::url::Url;

/// Request methods the client can send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
        }
    }
}

/// An immutable GET request for one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    method: Method,
    url: Url,
    user_agent: String,
    accept: String,
}

impl HttpRequest {
    pub fn get(url: Url, user_agent: impl Into<String>, accept: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url,
            user_agent: user_agent.into(),
            accept: accept.into(),
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn accept(&self) -> &str {
        &self.accept
    }

    /// Header set sent with every request, in wire order.
    ///
    /// `Accept-Encoding: identity` keeps bodies unencoded since nothing here
    /// decompresses them; `Connection: close` is what lets the transport read
    /// until the peer hangs up.
    pub fn headers(&self) -> [(&'static str, &str); 5] {
        [
            ("Host", self.url.host.as_str()),
            ("User-Agent", self.user_agent.as_str()),
            ("Accept", self.accept.as_str()),
            ("Accept-Encoding", "identity"),
            ("Connection", "close"),
        ]
    }

    /// Serializes the request as literal HTTP/1.1 text.
    pub fn to_wire(&self) -> String {
        let mut wire = format!("{} {} HTTP/1.1\r\n", self.method, self.url.path);
        for (name, value) in self.headers() {
            wire.push_str(name);
            wire.push_str(": ");
            wire.push_str(value);
            wire.push_str("\r\n");
        }
        wire.push_str("\r\n");
        wire
    }
}
