//! # cac-core
//!
//! Core types and utilities for working with the CloudAtCost panel API.
//!
//! ## Modules
//!
//! - [`error`] - Error type and HTTP status classification targets
//! - [`credentials`] - Login/API key pair and environment fallback
//! - [`config`] - Client configuration (base URL, version, TLS)
//! - [`types`] - Endpoints and enumerated request values
//! - [`params`] - Ordered request parameters and credential merging

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod credentials;
pub mod error;
pub mod params;
pub mod types;

// Re-export commonly used types
pub use config::ClientConfig;
pub use credentials::Credentials;
pub use error::{Error, Result};
pub use params::RequestParams;
pub use secrecy::{ExposeSecret, SecretString};
pub use types::{BuildServerRequest, Endpoint, HttpMethod, PowerAction, RunMode, ServerId};
