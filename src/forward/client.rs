//! Upstream HTTP client creation.
//!
//! One client is shared by both forwarders. It speaks plain HTTP and HTTPS
//! (rustls, bundled webpki roots) over HTTP/1.1 and never follows redirects.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use hyper_rustls::{ConfigBuilderExt, HttpsConnector};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

/// Type alias for the client used to reach upstreams.
pub type UpstreamClient = Client<HttpsConnector<HttpConnector>, Body>;

/// Build the shared client. `connect_timeout` bounds TCP connection setup.
pub fn build_client(connect_timeout: Duration) -> Result<UpstreamClient, rustls::Error> {
    let tls = rustls::ClientConfig::builder_with_provider(Arc::new(
        rustls::crypto::ring::default_provider(),
    ))
    .with_safe_default_protocol_versions()?
    .with_webpki_roots()
    .with_no_client_auth();

    let mut http = HttpConnector::new();
    http.enforce_http(false);
    http.set_nodelay(true);
    http.set_connect_timeout(Some(connect_timeout));

    let https = hyper_rustls::HttpsConnectorBuilder::new()
        .with_tls_config(tls)
        .https_or_http()
        .enable_http1()
        .wrap_connector(http);

    Ok(Client::builder(TokioExecutor::new()).build(https))
}
