//! REST API server settings.

use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddrV4};

use super::ConfigError;
use super::de::{one_or_many, optional_text, text};

const DEFAULT_PORT: u16 = 8080;

/// Detail level of API server access logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiVerbosity {
    #[default]
    Error,
    Info,
}

/// Remote control over HTTP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiServerConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub listen_ip_address: Option<Ipv4Addr>,
    #[serde(default)]
    pub listen_port: Option<u16>,
    #[serde(default, deserialize_with = "text::deserialize")]
    pub username: String,
    #[serde(default, deserialize_with = "text::deserialize")]
    pub password: String,
    #[serde(default, deserialize_with = "optional_text::deserialize")]
    pub jwt_secret_key: Option<String>,
    #[serde(default, deserialize_with = "one_or_many::deserialize")]
    pub ws_token: Vec<String>,
    #[serde(default, rename = "CORS_origins", alias = "cors_origins")]
    pub cors_origins: Vec<String>,
    #[serde(default)]
    pub verbosity: ApiVerbosity,
}

impl ApiServerConfig {
    /// Address the server binds to, falling back to localhost:8080 for a
    /// disabled server that leaves it out.
    pub fn listen_address(&self) -> SocketAddrV4 {
        SocketAddrV4::new(
            self.listen_ip_address.unwrap_or(Ipv4Addr::LOCALHOST),
            self.listen_port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Returns true if the server accepts connections from other hosts.
    pub fn is_exposed(&self) -> bool {
        !self.listen_address().ip().is_loopback()
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if let Some(port) = self.listen_port {
            if port < 1024 {
                return Err(ConfigError::invalid(
                    "api_server.listen_port",
                    "must be between 1024 and 65535",
                ));
            }
        }

        // A disabled server may be sketched out partially.
        if !self.enabled {
            return Ok(());
        }
        if self.listen_ip_address.is_none() {
            return Err(ConfigError::missing("api_server.listen_ip_address"));
        }
        if self.listen_port.is_none() {
            return Err(ConfigError::missing("api_server.listen_port"));
        }
        if self.username.is_empty() {
            return Err(ConfigError::missing("api_server.username"));
        }
        if self.password.is_empty() {
            return Err(ConfigError::missing("api_server.password"));
        }
        Ok(())
    }
}
