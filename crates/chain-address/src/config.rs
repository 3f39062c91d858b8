//! Declarative network definitions.
//!
//! Networks beyond the built-ins can be supplied as JSON:
//!
//! ```json
//! { "networks": [ { "id": "alt.network", "p2pkh_version": 48, "p2sh_version": 5 } ] }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::network::{NetworkDefinition, NetworkError};
use crate::registry::NetworkRegistry;

/// Errors from loading network configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON for a [`NetworkConfig`].
    #[error("invalid network config: {0}")]
    Json(#[from] serde_json::Error),
    /// One entry does not describe a valid network.
    #[error("invalid network {id}: {source}")]
    Network {
        id: String,
        #[source]
        source: NetworkError,
    },
}

/// One network entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub id: String,
    pub p2pkh_version: u8,
    pub p2sh_version: u8,
    /// Defaults to the P2PKH and P2SH versions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acceptable_versions: Option<Vec<u8>>,
}

impl TryFrom<&NetworkSpec> for NetworkDefinition {
    type Error = ConfigError;

    fn try_from(spec: &NetworkSpec) -> Result<Self, Self::Error> {
        match &spec.acceptable_versions {
            None => Ok(NetworkDefinition::new(spec.id.clone(), spec.p2pkh_version, spec.p2sh_version)),
            Some(versions) => NetworkDefinition::with_acceptable_versions(
                spec.id.clone(),
                spec.p2pkh_version,
                spec.p2sh_version,
                versions.clone(),
            )
            .map_err(|source| ConfigError::Network {
                id: spec.id.clone(),
                source,
            }),
        }
    }
}

impl From<&NetworkDefinition> for NetworkSpec {
    fn from(network: &NetworkDefinition) -> Self {
        NetworkSpec {
            id: network.id().to_string(),
            p2pkh_version: network.p2pkh_version(),
            p2sh_version: network.p2sh_version(),
            acceptable_versions: Some(network.acceptable_versions().to_vec()),
        }
    }
}

/// A list of networks to register.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default)]
    pub networks: Vec<NetworkSpec>,
}

impl NetworkConfig {
    /// Parse a JSON config document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render as JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate every entry and build the definitions, in order.
    pub fn definitions(&self) -> Result<Vec<NetworkDefinition>, ConfigError> {
        self.networks.iter().map(NetworkDefinition::try_from).collect()
    }
}

impl NetworkRegistry {
    /// Register every network in `config`.
    ///
    /// Nothing is registered unless all entries are valid, and the valid batch
    /// is added under one write lock. Entries reusing a built-in id are
    /// skipped. Returns the number of networks added.
    pub fn register_config(&self, config: &NetworkConfig) -> Result<usize, ConfigError> {
        let definitions = config.definitions()?;
        let count = self.register_all(definitions);
        log::debug!("registry: registered {} networks from config", count);
        Ok(count)
    }
}
