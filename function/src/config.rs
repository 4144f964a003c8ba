//! Configuration file parser for FcProxy
//!
//! Supports fcproxy.yml with the outbound forwarding policy. Every field
//! is optional; an absent file yields the default policy.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use anyhow::{Context, Result};

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FcProxyConfig {
    /// Outbound request policy
    #[serde(default)]
    pub forward: ForwardPolicy,
}

/// Transport policy applied uniformly to every outbound request.
///
/// Redirects are never followed; a 3xx from the origin is returned as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForwardPolicy {
    /// Wall-clock limit for the whole round trip, body included
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Skip origin certificate validation
    #[serde(default = "default_true")]
    pub accept_invalid_certs: bool,

    /// Append gateway query parameters to the outbound target
    #[serde(default)]
    pub forward_query: bool,
}

impl Default for ForwardPolicy {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            accept_invalid_certs: true,
            forward_query: false,
        }
    }
}

impl ForwardPolicy {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

impl FcProxyConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: FcProxyConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if self.forward.timeout_secs == 0 {
            anyhow::bail!("forward.timeout_secs must be greater than zero");
        }
        Ok(())
    }

    /// Search for config file in the working directory
    pub fn find_config() -> Option<std::path::PathBuf> {
        ["fcproxy.yml", "fcproxy.yaml"]
            .iter()
            .map(std::path::PathBuf::from)
            .find(|path| path.exists())
    }
}
