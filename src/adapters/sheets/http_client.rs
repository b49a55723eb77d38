use error_stack::ResultExt;
use google_sheets4::{hyper, hyper_rustls};
use thiserror::Error;

pub type HttpsConnector = hyper_rustls::HttpsConnector<hyper::client::HttpConnector>;
pub type HttpsClient = hyper::Client<HttpsConnector>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HttpClientError {
    #[error("Failed to load the platform TLS root certificates")]
    NativeRoots,
}

/// HTTPS client trusting the platform roots. Built once at startup; clones share
/// the connection pool.
pub fn http_client() -> error_stack::Result<HttpsClient, HttpClientError> {
    let connector = hyper_rustls::HttpsConnectorBuilder::new()
        .with_native_roots()
        .change_context(HttpClientError::NativeRoots)
        .attach_printable("Set SSL_CERT_FILE or install the system CA bundle")?
        .https_or_http()
        .enable_http1()
        .build();

    Ok(hyper::Client::builder().build(connector))
}
