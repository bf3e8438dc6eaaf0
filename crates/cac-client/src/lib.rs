//! CloudAtCost panel API client.
//!
//! Thin asynchronous binding: every operation maps to one panel endpoint,
//! merges the account credentials into the request, and hands back the raw
//! response body. HTTP status codes are classified into [`Error`] variants.
//!
//! ```no_run
//! # async fn run() -> cac_client::Result<()> {
//! use cac_client::{CloudAtCostClient, PowerAction};
//!
//! let client = CloudAtCostClient::from_env()?;
//! let servers = client.list_servers().await?;
//! client.power_control("254123456", PowerAction::Reset).await?;
//! # let _ = servers;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub mod client;
pub mod transport;

pub use cac_core::{
    BuildServerRequest, ClientConfig, Credentials, Endpoint, Error, ExposeSecret, HttpMethod,
    PowerAction, RequestParams, RunMode, SecretString, ServerId,
};
pub use client::{ApiResponse, CloudAtCostClient, CloudAtCostClientBuilder};
pub use transport::{HttpTransport, PreparedRequest, RawResponse, Transport};

/// Convenient result alias that reuses the shared CloudAtCost error type.
pub type Result<T> = cac_core::Result<T>;
