//! Shared test helpers.
//!
//! Provides a scripted transport that answers from a fixed URL → response table
//! and records every request it receives, plus builders for raw responses.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::error_handling::FetchError;
use crate::http::{HttpRequest, Transport};

/// Transport that serves canned raw responses keyed by the full request URL.
///
/// Unknown URLs fail with a connection-refused `FetchError::Connect`.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: HashMap<String, String>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the raw response served for `url` (normalized `scheme://host/path`).
    pub fn route(mut self, url: &str, raw_response: String) -> Self {
        self.routes.insert(url.to_string(), raw_response);
        self
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().expect("requests lock").len()
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: &HttpRequest, _deadline: Duration) -> Result<String, FetchError> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(request.clone());

        let url = request.url().to_string();
        self.routes
            .get(&url)
            .cloned()
            .ok_or_else(|| FetchError::Connect {
                addr: url,
                source: std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "no route"),
            })
    }
}

/// A redirect response pointing at `location`.
pub fn redirect(status_code: u16, location: &str) -> String {
    format!(
        "HTTP/1.1 {status_code} Redirect\r\nLocation: {location}\r\nContent-Length: 0\r\n\r\n"
    )
}

/// A 200 response with an HTML content type.
pub fn ok_html(body: &str) -> String {
    format!("HTTP/1.1 200 OK\r\nContent-Type: text/html; charset=utf-8\r\n\r\n{body}")
}

/// A 200 response with a JSON content type.
pub fn ok_json(body: &str) -> String {
    format!("HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\r\n{body}")
}
