//! Environment fallback for credentials.
//!
//! Kept in its own test binary, and in a single test, because it mutates the
//! process environment.

use cac_client::{CloudAtCostClient, Error, ExposeSecret};

#[test]
fn falls_back_to_environment() {
    std::env::set_var("CAC_LOGIN", "env@example.com");
    std::env::set_var("CAC_KEY", "EnvApiKey");

    let client = CloudAtCostClient::from_env().unwrap();
    assert_eq!(client.login(), "env@example.com");
    assert_eq!(client.key().expose_secret(), "EnvApiKey");

    // Half an explicit pair is ignored in favour of the environment.
    let client = CloudAtCostClient::builder()
        .with_login("explicit@example.com")
        .build()
        .unwrap();
    assert_eq!(client.login(), "env@example.com");

    // An explicit pair wins over the environment.
    let client = CloudAtCostClient::new("explicit@example.com", "ExplicitKey").unwrap();
    assert_eq!(client.login(), "explicit@example.com");
    assert_eq!(client.key().expose_secret(), "ExplicitKey");

    std::env::remove_var("CAC_KEY");
    let err = CloudAtCostClient::from_env().unwrap_err();
    assert!(matches!(err, Error::InvalidCredentials(_)));

    std::env::remove_var("CAC_LOGIN");
    let err = CloudAtCostClient::from_env().unwrap_err();
    assert!(matches!(err, Error::InvalidCredentials(_)));
}
