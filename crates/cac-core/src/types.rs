//! Core CloudAtCost domain types.
//!
//! The panel accepts a handful of enumerated string values. They are modelled as
//! closed enums here and validated once, at the boundary where strings come in.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// HTTP methods the panel API is called with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// Parameters travel in the query string
    Get,
    /// Parameters travel in a form-encoded body
    Post,
}

impl HttpMethod {
    /// Returns the method name as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl FromStr for HttpMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("GET") {
            Ok(Self::Get)
        } else if s.eq_ignore_ascii_case("POST") {
            Ok(Self::Post)
        } else {
            Err(Error::UnsupportedMethod(s.to_string()))
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Server power operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerAction {
    /// Boot the server
    PowerOn,
    /// Hard power off
    PowerOff,
    /// Power cycle
    Reset,
}

impl PowerAction {
    /// Returns the value sent in the `action` parameter.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PowerOn => "poweron",
            Self::PowerOff => "poweroff",
            Self::Reset => "reset",
        }
    }

    /// Returns all supported actions.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::PowerOn, Self::PowerOff, Self::Reset]
    }
}

impl FromStr for PowerAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| Error::UnsupportedPowerOperation(s.to_string()))
    }
}

impl fmt::Display for PowerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Server run modes.
///
/// `Safe` makes the panel power the server off after 7 days of idle usage;
/// `Normal` keeps it running indefinitely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunMode {
    /// Keep the server on indefinitely
    Normal,
    /// Power off after 7 idle days
    Safe,
}

impl RunMode {
    /// Returns the value sent in the `mode` parameter.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Safe => "safe",
        }
    }
}

impl FromStr for RunMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "normal" => Ok(Self::Normal),
            "safe" => Ok(Self::Safe),
            _ => Err(Error::UnsupportedRunMode(s.to_string())),
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Implements `TryFrom<&str>` and `TryFrom<String>` by delegating to `FromStr`.
macro_rules! try_from_str {
    ($($name:ident),+ $(,)?) => {
        $(
            impl TryFrom<&str> for $name {
                type Error = Error;

                fn try_from(value: &str) -> Result<Self> {
                    value.parse()
                }
            }

            impl TryFrom<String> for $name {
                type Error = Error;

                fn try_from(value: String) -> Result<Self> {
                    value.parse()
                }
            }
        )+
    };
}

try_from_str!(HttpMethod, PowerAction, RunMode);

/// Panel API endpoints, relative to the versioned base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// All servers on the account
    ListServers,
    /// Installable OS templates
    ListTemplates,
    /// Tasks currently in operation
    ListTasks,
    /// Power on, power off or reset a server
    PowerOperation,
    /// Switch between normal and safe run mode
    RunMode,
    /// Change a server label
    RenameServer,
    /// Change reverse DNS and hostname
    ReverseDns,
    /// Request a console URL
    Console,
    /// CloudPro: build a server from pooled resources
    CloudProBuild,
    /// CloudPro: delete a server and return its resources
    CloudProDelete,
    /// CloudPro: resource pool usage
    CloudProResources,
}

impl Endpoint {
    /// Path of the endpoint below the API version segment.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::ListServers => "/listservers.php",
            Self::ListTemplates => "/listtemplates.php",
            Self::ListTasks => "/listtasks.php",
            Self::PowerOperation => "/powerop.php",
            Self::RunMode => "/runmode.php",
            Self::RenameServer => "/renameserver.php",
            Self::ReverseDns => "/rdns.php",
            Self::Console => "/console.php",
            Self::CloudProBuild => "/cloudpro/build.php",
            Self::CloudProDelete => "/cloudpro/delete.php",
            Self::CloudProResources => "/cloudpro/resources.php",
        }
    }

    /// HTTP method the endpoint expects.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        match self {
            Self::ListServers
            | Self::ListTemplates
            | Self::ListTasks
            | Self::CloudProResources => HttpMethod::Get,
            Self::PowerOperation
            | Self::RunMode
            | Self::RenameServer
            | Self::ReverseDns
            | Self::Console
            | Self::CloudProBuild
            | Self::CloudProDelete => HttpMethod::Post,
        }
    }
}

/// Server identifier (`sid`) as assigned by the panel.
///
/// Kept as an opaque string; the panel hands out numeric ids but the client
/// never interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServerId(String);

impl ServerId {
    /// Wraps a server identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ServerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ServerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for ServerId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for ServerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// CloudPro build request.
///
/// Values are passed through untouched; the panel decides what it accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildServerRequest {
    /// CPU count
    pub cpu: String,
    /// RAM amount
    pub ram: String,
    /// Storage amount
    pub storage: String,
    /// OS template identifier (sent as `os`)
    pub template_id: String,
}

impl BuildServerRequest {
    /// Create a build request from anything string-like or numeric.
    #[must_use]
    pub fn new(
        cpu: impl ToString,
        ram: impl ToString,
        storage: impl ToString,
        template_id: impl ToString,
    ) -> Self {
        Self {
            cpu: cpu.to_string(),
            ram: ram.to_string(),
            storage: storage.to_string(),
            template_id: template_id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_method_parse_is_case_insensitive() {
        assert_eq!("GET".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("Post".parse::<HttpMethod>().unwrap(), HttpMethod::Post);
    }

    #[test]
    fn test_http_method_rejects_others() {
        let err = "PUT".parse::<HttpMethod>().unwrap_err();
        assert_eq!(err, Error::UnsupportedMethod("PUT".to_string()));
        assert!(HttpMethod::try_from("DELETE").is_err());
    }

    #[test]
    fn test_power_action_parse() {
        assert_eq!("poweron".parse::<PowerAction>().unwrap(), PowerAction::PowerOn);
        assert_eq!(
            PowerAction::try_from("poweroff").unwrap(),
            PowerAction::PowerOff
        );
        assert_eq!(
            PowerAction::try_from("reset".to_string()).unwrap(),
            PowerAction::Reset
        );
    }

    #[test]
    fn test_power_action_rejects_reboot() {
        let err = "reboot".parse::<PowerAction>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedPowerOperation(ref v) if v == "reboot"));

        // Values are matched exactly.
        assert!("PowerOn".parse::<PowerAction>().is_err());
    }

    #[test]
    fn test_run_mode_parse() {
        assert_eq!("safe".parse::<RunMode>().unwrap(), RunMode::Safe);
        assert_eq!("normal".parse::<RunMode>().unwrap(), RunMode::Normal);

        let err = "turbo".parse::<RunMode>().unwrap_err();
        assert_eq!(err, Error::UnsupportedRunMode("turbo".to_string()));
    }

    #[test]
    fn test_wire_values() {
        assert_eq!(PowerAction::PowerOff.to_string(), "poweroff");
        assert_eq!(RunMode::Safe.to_string(), "safe");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
    }

    #[test]
    fn test_endpoint_catalogue() {
        assert_eq!(Endpoint::ListServers.path(), "/listservers.php");
        assert_eq!(Endpoint::ListServers.method(), HttpMethod::Get);
        assert_eq!(Endpoint::ReverseDns.path(), "/rdns.php");
        assert_eq!(Endpoint::ReverseDns.method(), HttpMethod::Post);
        assert_eq!(Endpoint::CloudProBuild.path(), "/cloudpro/build.php");
        assert_eq!(Endpoint::CloudProResources.method(), HttpMethod::Get);
        assert_eq!(Endpoint::CloudProDelete.method(), HttpMethod::Post);
    }

    #[test]
    fn test_server_id_conversions() {
        assert_eq!(ServerId::from(254_123_456_u64).as_str(), "254123456");
        assert_eq!(ServerId::from("42").to_string(), "42");
        assert_eq!(ServerId::new(String::from("7")), ServerId::from("7"));
    }

    #[test]
    fn test_build_request_passes_values_through() {
        let request = BuildServerRequest::new(2, "1024", 20, 26);
        assert_eq!(request.cpu, "2");
        assert_eq!(request.ram, "1024");
        assert_eq!(request.storage, "20");
        assert_eq!(request.template_id, "26");
    }
}
