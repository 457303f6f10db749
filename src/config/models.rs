use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub principal: PrincipalConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,
    #[serde(default)]
    pub api: ApiLimits,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            data_path: default_data_path(),
            api: ApiLimits::default(),
        }
    }
}

/// API request limits
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiLimits {
    #[serde(default = "default_max_payload_bytes")]
    pub max_payload_bytes: usize,
}

impl Default for ApiLimits {
    fn default() -> Self {
        Self {
            max_payload_bytes: default_max_payload_bytes(),
        }
    }
}

/// The account programmers are attached to.
///
/// There is no login flow; the server resolves this username into a user
/// record at startup and hands it to the handlers as the request principal.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PrincipalConfig {
    #[serde(default = "default_principal_username")]
    pub username: String,
}

impl Default for PrincipalConfig {
    fn default() -> Self {
        Self {
            username: default_principal_username(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    "0.0.0.0:8080".parse().unwrap()
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data/store")
}

fn default_max_payload_bytes() -> usize {
    64 * 1024 // 64 KB
}

fn default_principal_username() -> String {
    "weaverryan".to_string()
}
