//! HTTP transport used by [`CloudAtCostClient`](crate::CloudAtCostClient).
//!
//! The client only needs "send this request, give me status and body". That
//! seam is the [`Transport`] trait; [`HttpTransport`] is the reqwest version.

use async_trait::async_trait;
use cac_core::{ClientConfig, Error, HttpMethod, Result};
use reqwest::{Client, ClientBuilder};
use tracing::{debug, warn};
use url::Url;

const USER_AGENT: &str = concat!("cac-client/", env!("CARGO_PKG_VERSION"));

/// Fully resolved request, credentials already merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Endpoint URL without query string
    pub url: Url,
    /// Parameters, sent as query string (GET) or form body (POST)
    pub params: Vec<(String, String)>,
}

/// Status line and body of a received response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body, undecoded
    pub body: String,
}

/// Sends prepared requests to the panel.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and return whatever the server answered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoResponse`] when no status line was received, and
    /// [`Error::IncompleteResponse`] when the status arrived but the body did not.
    async fn send(&self, request: PreparedRequest) -> Result<RawResponse>;
}

/// reqwest-backed [`Transport`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    /// Build the HTTP client described by `config`. No network I/O happens here.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the CA certificate cannot be loaded or
    /// the client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = ClientBuilder::new().user_agent(USER_AGENT);

        if !config.tls_verify {
            warn!("TLS verification disabled for CloudAtCost client");
            builder = builder
                .danger_accept_invalid_certs(true)
                .danger_accept_invalid_hostnames(true);
        }

        if let Some(ca_cert) = &config.tls_ca_cert {
            debug!("loading CloudAtCost CA certificate from {}", ca_cert.display());
            let bytes = std::fs::read(ca_cert).map_err(|err| {
                Error::ConfigError(format!(
                    "Failed to read CA certificate {}: {err}",
                    ca_cert.display()
                ))
            })?;
            let cert = reqwest::Certificate::from_pem(&bytes)
                .map_err(|err| Error::ConfigError(format!("Invalid CA certificate: {err}")))?;
            builder = builder.add_root_certificate(cert);
        }

        let http = builder
            .build()
            .map_err(|err| Error::ConfigError(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: PreparedRequest) -> Result<RawResponse> {
        let PreparedRequest {
            method,
            url,
            params,
        } = request;

        let builder = match method {
            HttpMethod::Get => self.http.get(url).query(&params),
            HttpMethod::Post => self.http.post(url).form(&params),
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| Error::IncompleteResponse {
                status,
                reason: err.to_string(),
            })?;

        Ok(RawResponse { status, body })
    }
}
