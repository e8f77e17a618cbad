//! Client configuration, loadable from TOML.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Cluster, ConfirmationStatus};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid RPC URL {0:?}: expected http:// or https://")]
    InvalidRpcUrl(String),

    #[error("timeout must be greater than zero")]
    ZeroTimeout,
}

/// Connection settings for [`crate::RegistryClient`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub cluster: Cluster,

    /// Overrides the cluster's public endpoint when set.
    pub custom_rpc_url: Option<String>,

    /// Per-request timeout in milliseconds. Not enforced here: `RpcClient`
    /// transports read it (see [`ClientConfig::timeout`]) and report an
    /// expired request as `RpcError::Timeout`.
    pub timeout_ms: u64,

    pub commitment: ConfirmationStatus,

    pub enable_retry: bool,

    /// Extra submission attempts after the first, when `enable_retry` is set.
    pub max_retries: u32,
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_max_retries() -> u32 {
    3
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            cluster: Cluster::Devnet,
            custom_rpc_url: None,
            timeout_ms: default_timeout_ms(),
            commitment: ConfirmationStatus::Confirmed,
            enable_retry: true,
            max_retries: default_max_retries(),
        }
    }
}

impl ClientConfig {
    /// Default settings against `cluster`.
    pub fn for_cluster(cluster: Cluster) -> Self {
        Self {
            cluster,
            ..Self::default()
        }
    }

    /// The endpoint requests go to.
    pub fn rpc_url(&self) -> &str {
        self.custom_rpc_url
            .as_deref()
            .unwrap_or_else(|| self.cluster.rpc_url())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.rpc_url();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidRpcUrl(url.to_string()));
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: ClientConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// The per-request timeout for transports.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Number of submission attempts, including the first.
    pub fn attempts(&self) -> u32 {
        if self.enable_retry {
            self.max_retries.saturating_add(1)
        } else {
            1
        }
    }
}
