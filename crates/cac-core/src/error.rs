//! Error types for CloudAtCost operations.
//!
//! Errors come from two places: local validation, which always fails before any
//! network I/O, and the remote panel, which is classified strictly by HTTP status.

use std::convert::Infallible;
use thiserror::Error;

/// Main error type for CloudAtCost operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Login or API key missing from both the arguments and the environment
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Power action outside `poweron`, `poweroff` and `reset`
    #[error("Unsupported power operation: {0}")]
    UnsupportedPowerOperation(String),

    /// Run mode outside `normal` and `safe`
    #[error("Unsupported run mode: {0}")]
    UnsupportedRunMode(String),

    /// HTTP method other than GET or POST
    #[error("Unsupported HTTP request method: {0}")]
    UnsupportedMethod(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Endpoint URL could not be built
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Transport failed before any status line was received
    #[error("No response received: {0}")]
    NoResponse(String),

    /// Status line received, body could not be read
    #[error("Incomplete response (HTTP {status}): {reason}")]
    IncompleteResponse {
        /// HTTP status code that was received
        status: u16,
        /// Why the body read failed
        reason: String,
    },

    /// HTTP 400
    #[error("Invalid API URL")]
    InvalidApiUrl,

    /// HTTP 403
    #[error("Invalid or missing API key")]
    InvalidApiKey,

    /// HTTP 412, returned by the panel for wrong credentials
    #[error("Request failed")]
    RequestFailed,

    /// HTTP 500
    #[error("Internal server error")]
    InternalServerError,

    /// HTTP 503
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Any status the panel is not documented to return
    #[error("Unsupported HTTP response code: {0}")]
    UnsupportedResponseCode(u16),
}

/// Specialized result type for CloudAtCost operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials(_) => "INVALID_CREDENTIALS",
            Self::UnsupportedPowerOperation(_) => "UNSUPPORTED_POWER_OPERATION",
            Self::UnsupportedRunMode(_) => "UNSUPPORTED_RUN_MODE",
            Self::UnsupportedMethod(_) => "UNSUPPORTED_METHOD",
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
            Self::NoResponse(_) => "NO_RESPONSE",
            Self::IncompleteResponse { .. } => "INCOMPLETE_RESPONSE",
            Self::InvalidApiUrl => "INVALID_API_URL",
            Self::InvalidApiKey => "INVALID_API_KEY",
            Self::RequestFailed => "REQUEST_FAILED",
            Self::InternalServerError => "INTERNAL_SERVER_ERROR",
            Self::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            Self::UnsupportedResponseCode(_) => "UNSUPPORTED_RESPONSE_CODE",
        }
    }

    /// HTTP status that produced this error, if it came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::InvalidApiUrl => Some(400),
            Self::InvalidApiKey => Some(403),
            Self::RequestFailed => Some(412),
            Self::InternalServerError => Some(500),
            Self::RateLimitExceeded => Some(503),
            Self::UnsupportedResponseCode(status) | Self::IncompleteResponse { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// Returns true for failures raised before any request was sent.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials(_)
                | Self::UnsupportedPowerOperation(_)
                | Self::UnsupportedRunMode(_)
                | Self::UnsupportedMethod(_)
                | Self::ConfigError(_)
                | Self::InvalidEndpoint(_)
        )
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::ConfigError(err.to_string())
        } else {
            Self::NoResponse(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ConfigError(err.to_string())
    }
}

// Lets typed enum arguments flow through the same `TryInto` bound as strings.
impl From<Infallible> for Error {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(Error::InvalidApiUrl.to_string(), "Invalid API URL");
        assert_eq!(
            Error::InvalidApiKey.to_string(),
            "Invalid or missing API key"
        );
        assert_eq!(Error::RequestFailed.to_string(), "Request failed");
        assert_eq!(
            Error::InternalServerError.to_string(),
            "Internal server error"
        );
        assert_eq!(Error::RateLimitExceeded.to_string(), "Rate limit exceeded");
        assert_eq!(
            Error::UnsupportedResponseCode(418).to_string(),
            "Unsupported HTTP response code: 418"
        );
        assert_eq!(
            Error::UnsupportedPowerOperation("reboot".to_string()).to_string(),
            "Unsupported power operation: reboot"
        );
    }

    #[test]
    fn test_status_for_remote_errors() {
        assert_eq!(Error::InvalidApiUrl.status(), Some(400));
        assert_eq!(Error::InvalidApiKey.status(), Some(403));
        assert_eq!(Error::RequestFailed.status(), Some(412));
        assert_eq!(Error::InternalServerError.status(), Some(500));
        assert_eq!(Error::RateLimitExceeded.status(), Some(503));
        assert_eq!(Error::UnsupportedResponseCode(418).status(), Some(418));
        assert_eq!(Error::NoResponse("refused".to_string()).status(), None);
        assert_eq!(
            Error::IncompleteResponse {
                status: 412,
                reason: "truncated".to_string()
            }
            .status(),
            Some(412)
        );
        assert_eq!(Error::UnsupportedRunMode("fast".to_string()).status(), None);
    }

    #[test]
    fn test_is_local() {
        assert!(Error::InvalidCredentials("missing".to_string()).is_local());
        assert!(Error::UnsupportedMethod("PUT".to_string()).is_local());
        assert!(Error::UnsupportedPowerOperation("reboot".to_string()).is_local());

        assert!(!Error::RequestFailed.is_local());
        assert!(!Error::NoResponse("refused".to_string()).is_local());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            Error::InvalidCredentials("test".to_string()).error_code(),
            "INVALID_CREDENTIALS"
        );
        assert_eq!(Error::RateLimitExceeded.error_code(), "RATE_LIMIT_EXCEEDED");
        assert_eq!(
            Error::UnsupportedResponseCode(302).error_code(),
            "UNSUPPORTED_RESPONSE_CODE"
        );
    }

    #[test]
    fn test_from_reqwest_builder_error() {
        let err = reqwest::Client::new().get("not a url").build().unwrap_err();
        let cac_err: Error = err.into();
        assert!(matches!(cac_err, Error::ConfigError(_)));
        assert!(cac_err.is_local());
    }

    #[test]
    fn test_from_url_parse_error() {
        let err = url::Url::parse("not a url").unwrap_err();
        let cac_err: Error = err.into();
        assert!(matches!(cac_err, Error::InvalidEndpoint(_)));
    }
}
