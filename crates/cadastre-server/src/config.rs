use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Which store adapter backs the registry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StoreBackend {
    /// Typed in-memory tables.
    #[default]
    Memory,
    /// Composite-keyed world-state database.
    WorldState,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub backend: StoreBackend,
    /// Accept anonymous mutations (development mode). When false, a bearer
    /// token from the `tokens` table is required for every mutation.
    pub allow_anonymous: bool,
    /// Bearer token -> party id. Non-empty table switches authentication
    /// from allow-all to the static token provider.
    pub tokens: HashMap<String, String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8470".parse().expect("static addr is valid"),
            backend: StoreBackend::Memory,
            allow_anonymous: true,
            tokens: HashMap::new(),
        }
    }
}

impl ServerConfig {
    /// Parse a TOML configuration document.
    pub fn from_toml_str(raw: &str) -> ServerResult<Self> {
        toml::from_str(raw).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ServerResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }
}
