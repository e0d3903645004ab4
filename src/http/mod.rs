//! Socket-level HTTP.
//!
//! - [`request`]: [`HttpRequest`] and its literal HTTP/1.1 wire form
//! - [`response`]: status-line and header parsing over raw response text
//! - [`transport`]: the [`Transport`] seam and the TCP/TLS implementation

pub mod request;
pub mod response;
pub mod transport;

pub use request::{HttpRequest, Method};
pub use response::{find_header, is_redirect, parse_status_code, HttpResponse};
pub use transport::{TcpTransport, Transport};
