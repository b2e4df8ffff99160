//! Network registry
//!
//! Maps configured network names to endpoints and hands out connected
//! `EvmChain` handles. Handles are explicit: each one is bound to its
//! network for its whole lifetime, so chain calls never depend on an
//! ambient "current network" being switched first.

use std::collections::HashMap;
use std::path::PathBuf;

use xchain_rs::{EvmChain, RelayError};

use crate::config::{Config, NetworkConfig};

/// The set of networks the harness can target
pub struct NetworkRegistry {
    networks: HashMap<String, NetworkConfig>,
    artifacts_dir: PathBuf,
}

impl NetworkRegistry {
    /// Build the registry from loaded configuration
    pub fn from_config(config: &Config) -> Self {
        let networks = config
            .networks
            .iter()
            .map(|n| (n.name.clone(), n.clone()))
            .collect();

        Self {
            networks,
            artifacts_dir: config.artifacts_dir.clone(),
        }
    }

    /// Look up a configured network by name
    pub fn get(&self, name: &str) -> Result<&NetworkConfig, RelayError> {
        self.networks
            .get(name)
            .ok_or_else(|| RelayError::UnknownNetwork(name.to_string()))
    }

    /// Connect a handle to a configured network
    pub fn connect(&self, name: &str) -> Result<EvmChain, RelayError> {
        let network = self.get(name)?;
        EvmChain::connect(
            &network.name,
            &network.rpc_url,
            network.chain_id,
            &network.private_key,
            &self.artifacts_dir,
        )
    }

    /// Names of all configured networks, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.networks.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn registry() -> NetworkRegistry {
        let key = format!("0x{}", "2".repeat(64));
        let networks = vec![
            NetworkConfig {
                name: "bsc-testnet".to_string(),
                rpc_url: "http://localhost:8545".to_string(),
                chain_id: 97,
                private_key: key.clone(),
            },
            NetworkConfig {
                name: "sapphire-testnet".to_string(),
                rpc_url: "http://localhost:8546".to_string(),
                chain_id: 23295,
                private_key: key,
            },
        ];

        NetworkRegistry {
            networks: networks.into_iter().map(|n| (n.name.clone(), n)).collect(),
            artifacts_dir: PathBuf::from("artifacts"),
        }
    }

    #[test]
    fn test_get_known_network() {
        let registry = registry();
        assert_eq!(registry.get("bsc-testnet").unwrap().chain_id, 97);
    }

    #[test]
    fn test_unknown_network_is_an_error() {
        let registry = registry();
        assert_eq!(
            registry.get("moonbase").unwrap_err(),
            RelayError::UnknownNetwork("moonbase".to_string())
        );
    }

    #[test]
    fn test_names_are_sorted() {
        assert_eq!(registry().names(), vec!["bsc-testnet", "sapphire-testnet"]);
    }

    #[test]
    fn test_connect_builds_a_bound_handle() {
        use xchain_rs::ChainClient;

        let chain = registry().connect("bsc-testnet").unwrap();
        assert_eq!(chain.network(), "bsc-testnet");
        assert_eq!(chain.chain_id(), 97);
    }
}
