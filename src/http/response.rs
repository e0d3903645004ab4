//! Response parsing over raw response text.
//!
//! Responses are kept as the raw text read from the socket (that is also what
//! the cache stores). These helpers pull the status code and headers out of it
//! on demand.

use crate::config::{HEADER_BODY_SEPARATOR, REDIRECT_STATUS_CODES};
use crate::error_handling::RenderError;

/// A response split into status, headers and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status_code: u16,
    headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// Splits raw response text at the first blank line.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::MissingHeaderBoundary` if there is no `\r\n\r\n`.
    pub fn parse(raw: &str) -> Result<Self, RenderError> {
        let (head, body) = raw
            .split_once(HEADER_BODY_SEPARATOR)
            .ok_or(RenderError::MissingHeaderBoundary)?;

        let headers = header_lines(head)
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        Ok(Self {
            status_code: parse_status_code(head),
            headers,
            body: body.to_string(),
        })
    }

    /// Looks up a header by name, ignoring ASCII case. First occurrence wins.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}

/// Parses the numeric status code from the status line.
///
/// Anything that is not `HTTP/<version> <code>` yields 0, which callers treat
/// as a non-redirect.
pub fn parse_status_code(raw: &str) -> u16 {
    let status_line = raw.lines().next().unwrap_or("");
    let mut parts = status_line.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(version), Some(code)) if version.starts_with("HTTP/") => {
            code.parse().unwrap_or(0)
        }
        _ => 0,
    }
}

/// Finds a header in raw response text without requiring a body boundary.
pub fn find_header<'a>(raw: &'a str, name: &str) -> Option<&'a str> {
    let head = match raw.find(HEADER_BODY_SEPARATOR) {
        Some(idx) => &raw[..idx],
        None => raw,
    };
    header_lines(head)
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, v)| v)
}

pub fn is_redirect(status_code: u16) -> bool {
    REDIRECT_STATUS_CODES.contains(&status_code)
}

/// Header `(name, value)` pairs of a header block, skipping the status line.
fn header_lines(head: &str) -> impl Iterator<Item = (&str, &str)> {
    head.lines()
        .skip(1)
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name.trim(), value.trim()))
}
