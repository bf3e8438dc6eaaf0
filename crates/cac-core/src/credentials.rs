//! API credentials.
//!
//! Every panel request carries the account login and API key as ordinary
//! request parameters. The key is kept in a [`SecretString`] so it never shows
//! up in `Debug` output.

use secrecy::{ExposeSecret, SecretString};

use crate::error::{Error, Result};

/// Environment variable holding the account login.
pub const LOGIN_ENV: &str = "CAC_LOGIN";

/// Environment variable holding the API key.
pub const KEY_ENV: &str = "CAC_KEY";

/// Parameter name the login is sent under.
pub const LOGIN_PARAM: &str = "login";

/// Parameter name the API key is sent under.
pub const KEY_PARAM: &str = "key";

/// Login and API key pair.
#[derive(Debug)]
pub struct Credentials {
    login: String,
    key: SecretString,
}

impl Credentials {
    /// Create credentials from explicit values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCredentials`] if either value is empty.
    pub fn new(login: impl Into<String>, key: impl Into<String>) -> Result<Self> {
        let login = login.into();
        let key = key.into();

        if login.is_empty() || key.is_empty() {
            return Err(Error::InvalidCredentials(
                "login and key must not be empty".to_string(),
            ));
        }

        Ok(Self {
            login,
            key: SecretString::from(key),
        })
    }

    /// Read credentials from `CAC_LOGIN` and `CAC_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCredentials`] if either variable is unset or empty.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read credentials through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCredentials`] if either variable is missing or empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        match (lookup(LOGIN_ENV), lookup(KEY_ENV)) {
            (Some(login), Some(key)) => Self::new(login, key),
            _ => Err(Error::InvalidCredentials(format!(
                "undefined login or key; pass both explicitly or set {LOGIN_ENV} and {KEY_ENV}"
            ))),
        }
    }

    /// Use the explicit pair when both halves are given, otherwise fall back to
    /// the environment for both.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCredentials`] if neither source yields a full pair.
    pub fn resolve(login: Option<String>, key: Option<String>) -> Result<Self> {
        Self::resolve_with(login, key, |name| std::env::var(name).ok())
    }

    /// [`Credentials::resolve`] with a custom variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCredentials`] if neither source yields a full pair.
    pub fn resolve_with<F>(login: Option<String>, key: Option<String>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        match (login, key) {
            (Some(login), Some(key)) => Self::new(login, key),
            _ => Self::from_lookup(lookup),
        }
    }

    /// Account login.
    #[must_use]
    pub fn login(&self) -> &str {
        &self.login
    }

    /// API key.
    #[must_use]
    pub const fn key(&self) -> &SecretString {
        &self.key
    }

    /// Parameter pairs appended to every request.
    #[must_use]
    pub fn as_params(&self) -> [(&'static str, &str); 2] {
        [
            (LOGIN_PARAM, self.login.as_str()),
            (KEY_PARAM, self.key.expose_secret()),
        ]
    }
}
