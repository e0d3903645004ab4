//! TLS client configuration.

use std::sync::Arc;

use rustls::crypto::ring::default_provider;
use tokio_rustls::rustls::{ClientConfig, RootCertStore};

use crate::error_handling::InitializationError;

/// Builds the rustls client configuration used for `https` requests.
///
/// Trust anchors come from the bundled `webpki-roots` store. The ring provider
/// is passed explicitly so no process-wide default provider has to be installed.
///
/// # Errors
///
/// Returns `InitializationError::TlsConfigError` if the provider rejects the
/// default protocol versions.
pub fn init_tls_config() -> Result<Arc<ClientConfig>, InitializationError> {
    let mut root_store = RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    let config = ClientConfig::builder_with_provider(Arc::new(default_provider()))
        .with_safe_default_protocol_versions()?
        .with_root_certificates(root_store)
        .with_no_client_auth();

    Ok(Arc::new(config))
}
