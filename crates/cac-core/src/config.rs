//! Configuration structures for CloudAtCost clients.
//!
//! The panel lives at a single fixed URL, so the defaults are usable as-is.
//! Overrides exist for pointing a client at a proxy or a mock server.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;
use validator::Validate;

/// Base URL of the CloudAtCost panel API.
pub const DEFAULT_BASE_URL: &str = "https://panel.cloudatcost.com/api/";

/// API version segment appended to the base URL.
pub const DEFAULT_API_VERSION: &str = "v1";

/// Configuration for a CloudAtCost client instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ClientConfig {
    /// API base URL, without the version segment
    #[validate(url)]
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API version segment (e.g. `v1`)
    #[validate(length(min = 1))]
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Whether to verify TLS certificates and hostnames
    #[serde(default = "default_tls_verify")]
    pub tls_verify: bool,

    /// Optional path to custom CA certificate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_ca_cert: Option<PathBuf>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

const fn default_tls_verify() -> bool {
    true
}

impl ClientConfig {
    /// Create a configuration for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn new(base_url: impl Into<String>) -> Result<Self, Error> {
        let config = Self {
            base_url: base_url.into(),
            ..Self::default()
        };

        config
            .validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))?;

        Ok(config)
    }

    /// Set the API version segment.
    #[must_use]
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Set whether to verify TLS certificates.
    ///
    /// Turning verification off accepts any certificate for any host.
    #[must_use]
    pub const fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Set custom CA certificate path.
    #[must_use]
    pub fn with_ca_cert(mut self, path: PathBuf) -> Self {
        self.tls_ca_cert = Some(path);
        self
    }

    /// Parse the base URL, guaranteeing a trailing slash so joins append.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn parse_base_url(&self) -> Result<Url, Error> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| Error::ConfigError(format!("Invalid base URL: {e}")))?;

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(url)
    }

    /// Full URL for an endpoint path such as `/listservers.php`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or the joined path is invalid.
    pub fn endpoint_url(&self, path: &str) -> Result<Url, Error> {
        let relative = format!(
            "{}/{}",
            self.api_version.trim_matches('/'),
            path.trim_start_matches('/')
        );

        self.parse_base_url()?
            .join(&relative)
            .map_err(|e| Error::InvalidEndpoint(format!("Invalid endpoint path `{path}`: {e}")))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_version: default_api_version(),
            tls_verify: default_tls_verify(),
            tls_ca_cert: None,
        }
    }
}
