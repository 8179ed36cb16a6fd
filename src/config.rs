use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::params::{spec_for, NetworkId, ProfileSpec};

/// Environment variable selecting the network
pub const NETWORK_ENV: &str = "GYL_NETWORK";

/// Environment variable selecting the default log level
pub const LOG_LEVEL_ENV: &str = "GYL_LOG_LEVEL";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid {var}: {reason}")]
    InvalidValue { var: &'static str, reason: String },
    #[error("no parameter profile for network {0}")]
    UnsupportedNetwork(NetworkId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub network: NetworkId,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: NetworkId::Main,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Defaults overridden by the environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`Config::load`] with an explicit variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(network) = lookup(NETWORK_ENV) {
            config.network = network
                .parse()
                .map_err(|reason| ConfigError::InvalidValue { var: NETWORK_ENV, reason })?;
        }
        if let Some(level) = lookup(LOG_LEVEL_ENV) {
            if level.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    var: LOG_LEVEL_ENV,
                    reason: "empty".to_string(),
                });
            }
            config.log_level = level;
        }

        Ok(config)
    }

    /// The static table for the configured network
    pub fn profile_spec(&self) -> Result<&'static ProfileSpec, ConfigError> {
        spec_for(self.network).ok_or(ConfigError::UnsupportedNetwork(self.network))
    }

    pub fn is_mainnet(&self) -> bool {
        matches!(self.network, NetworkId::Main)
    }
}
