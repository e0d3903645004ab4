//! Request transport over raw TCP and TLS sockets.
//!
//! The transport writes a literal HTTP/1.1 request and reads until the peer
//! closes the connection. There is no `Content-Length` or chunked framing, so
//! it is only correct for `Connection: close` responses with unencoded bodies.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, error};
use rustls::pki_types::ServerName;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio_rustls::rustls::ClientConfig;
use tokio_rustls::TlsConnector;

use crate::config::READ_BUFFER_SIZE;
use crate::error_handling::{FetchError, InitializationError};
use crate::http::request::HttpRequest;
use crate::initialization::init_tls_config;

/// Sends one request and returns the raw response text.
///
/// Implementations must give up once `deadline` has elapsed and report it as
/// `FetchError::Timeout`.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: &HttpRequest, deadline: Duration) -> Result<String, FetchError>;
}

/// Transport that opens a fresh socket per request.
///
/// `http` URLs go over plaintext TCP (port 80 unless the host names one);
/// `https` URLs are wrapped in TLS with SNI set to the host.
#[derive(Clone)]
pub struct TcpTransport {
    tls_config: Arc<ClientConfig>,
}

impl TcpTransport {
    /// Creates a transport trusting the bundled webpki root store.
    ///
    /// # Errors
    ///
    /// Returns an `InitializationError` if the TLS configuration cannot be built.
    pub fn new() -> Result<Self, InitializationError> {
        Ok(Self::with_tls_config(init_tls_config()?))
    }

    pub fn with_tls_config(tls_config: Arc<ClientConfig>) -> Self {
        Self { tls_config }
    }

    async fn exchange(&self, request: &HttpRequest) -> Result<Vec<u8>, FetchError> {
        let url = request.url();
        let (host, port) = url.host_and_port();
        let addr = format!("{host}:{port}");

        debug!("Connecting to {addr}");
        let mut sock = TcpStream::connect((host, port))
            .await
            .map_err(|source| {
                error!("Failed to connect to {addr} - {source}");
                FetchError::Connect {
                    addr: addr.clone(),
                    source,
                }
            })?;

        let wire = request.to_wire();
        log::trace!("Request:\n{wire}");

        if !url.scheme.is_tls() {
            return write_and_read(&mut sock, wire.as_bytes()).await;
        }

        let server_name = ServerName::try_from(host.to_string())
            .map_err(|e| FetchError::InvalidServerName(format!("{host}: {e}")))?;
        let connector = TlsConnector::from(Arc::clone(&self.tls_config));
        let mut tls_stream = connector
            .connect(server_name, sock)
            .await
            .map_err(|source| {
                error!("TLS connection failed for {host}: {source}");
                FetchError::Tls {
                    host: host.to_string(),
                    source,
                }
            })?;

        write_and_read(&mut tls_stream, wire.as_bytes()).await
    }
}

impl Transport for TcpTransport {
    async fn send(&self, request: &HttpRequest, deadline: Duration) -> Result<String, FetchError> {
        let host = &request.url().host;
        match tokio::time::timeout(deadline, self.exchange(request)).await {
            Ok(bytes) => {
                let bytes = bytes?;
                debug!("Received {} bytes from {host}", bytes.len());
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
            Err(_) => {
                error!("Request to {host} timed out after {deadline:?}");
                Err(FetchError::Timeout {
                    host: host.clone(),
                    timeout: deadline,
                })
            }
        }
    }
}

/// Writes the request and reads until the peer closes.
async fn write_and_read<S>(stream: &mut S, request: &[u8]) -> Result<Vec<u8>, FetchError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    stream.write_all(request).await?;
    stream.flush().await?;

    let mut response = Vec::new();
    let mut buf = vec![0u8; READ_BUFFER_SIZE];
    loop {
        match stream.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => response.extend_from_slice(&buf[..n]),
            // Many servers drop the TLS connection without close_notify after the body
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof && !response.is_empty() => break,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(response)
}
