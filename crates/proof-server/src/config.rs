//! Server settings read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_ALLOWLIST_PATH: &str = "script/data/whitelist-data.json";
pub const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("PROOF_SERVER_ADDR={value:?} is not a socket address: {source}")]
    Addr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    /// `ALLOWLIST_PATH`
    pub allowlist_path: PathBuf,
    /// `PROOF_SERVER_ADDR`
    pub addr: SocketAddr,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let allowlist_path = lookup("ALLOWLIST_PATH")
            .unwrap_or_else(|| DEFAULT_ALLOWLIST_PATH.to_string())
            .into();

        let addr = lookup("PROOF_SERVER_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr
            .parse()
            .map_err(|source| ConfigError::Addr { value: addr, source })?;

        Ok(Self {
            allowlist_path,
            addr,
        })
    }
}
