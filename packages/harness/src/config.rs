//! Harness configuration
//!
//! Loaded from environment variables, with an optional `.env` file. Every
//! input has a documented default except the signing key; network and signer
//! configuration is environmental, not persisted.

use eyre::{eyre, Result, WrapErr};
use serde::Deserialize;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default message the harness sends across the bridge
pub const DEFAULT_MESSAGE: &str = "Hello from BSC";

/// One configured network endpoint
#[derive(Clone, Deserialize)]
pub struct NetworkConfig {
    /// Name the network is registered under
    pub name: String,
    /// JSON-RPC endpoint URL
    pub rpc_url: String,
    /// Chain ID of the network
    pub chain_id: u64,
    /// Signing key for transactions on this network
    pub private_key: String,
}

/// Custom Debug that redacts the private key to prevent accidental log leakage.
impl fmt::Debug for NetworkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkConfig")
            .field("name", &self.name)
            .field("rpc_url", &self.rpc_url)
            .field("chain_id", &self.chain_id)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Confirmation poller settings
#[derive(Debug, Clone, Deserialize)]
pub struct PollerConfig {
    /// Delay between scan attempts
    pub poll_interval: Duration,
    /// Trailing block window scanned per attempt
    pub lookback_blocks: u64,
    /// Optional overall deadline; `None` polls until an event is found
    pub timeout: Option<Duration>,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(default_poll_interval_secs()),
            lookback_blocks: default_lookback_blocks(),
            timeout: None,
        }
    }
}

/// Main configuration for the harness
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Message text to bridge
    pub message: String,
    /// Network the Ping contract deploys to
    pub origin_network: String,
    /// Network the Pong contract deploys to
    pub dest_network: String,
    /// Chain ID the message bus routes the ping to
    pub dest_chain_id: u64,
    /// Message-bus contract address on the origin network
    pub origin_message_bus: String,
    /// Message-bus contract address on the destination network
    pub dest_message_bus: String,
    /// All configured networks
    pub networks: Vec<NetworkConfig>,
    /// Confirmation poller settings
    pub poller: PollerConfig,
    /// Deploy Ping and Pong concurrently instead of sequentially
    pub parallel_deploy: bool,
    /// Directory holding compiled contract artifacts
    pub artifacts_dir: PathBuf,
}

fn default_poll_interval_secs() -> u64 {
    60
}

fn default_lookback_blocks() -> u64 {
    10
}

fn default_origin() -> (String, String, u64) {
    (
        "bsc-testnet".to_string(),
        "https://data-seed-prebsc-1-s1.binance.org:8545".to_string(),
        97,
    )
}

fn default_dest() -> (String, String, u64) {
    (
        "sapphire-testnet".to_string(),
        "https://testnet.sapphire.oasis.io".to_string(),
        23295,
    )
}

/// Message-bus address of the reference origin deployment
const DEFAULT_ORIGIN_BUS: &str = "0xAd204986D6cB67A5Bc76a3CB8974823F43Cb9AAA";
/// Message-bus address of the reference destination deployment
const DEFAULT_DEST_BUS: &str = "0x9Bb46D5100d2Db4608112026951c9C965b233f4D";

impl Config {
    /// Load configuration from environment variables.
    /// Loads a `.env` file first if present.
    pub fn load() -> Result<Self> {
        Self::load_from_file(".env")
    }

    /// Load from a specific .env file path, then the environment
    pub fn load_from_file(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            dotenvy::from_filename(path)
                .wrap_err_with(|| format!("Failed to load .env file from {}", path))?;
        }
        Self::load_from_env()
    }

    fn load_from_env() -> Result<Self> {
        let (origin_name, origin_rpc_default, origin_chain_default) = default_origin();
        let (dest_name, dest_rpc_default, dest_chain_default) = default_dest();

        let private_key = env::var("PRIVATE_KEY")
            .map_err(|_| eyre!("PRIVATE_KEY environment variable is required"))?;

        let origin = NetworkConfig {
            name: env::var("ORIGIN_NETWORK").unwrap_or(origin_name),
            rpc_url: env::var("ORIGIN_RPC_URL").unwrap_or(origin_rpc_default),
            chain_id: env_parsed("ORIGIN_CHAIN_ID")?.unwrap_or(origin_chain_default),
            private_key: env::var("ORIGIN_PRIVATE_KEY").unwrap_or_else(|_| private_key.clone()),
        };

        let dest = NetworkConfig {
            name: env::var("DEST_NETWORK").unwrap_or(dest_name),
            rpc_url: env::var("DEST_RPC_URL").unwrap_or(dest_rpc_default),
            chain_id: env_parsed("DEST_CHAIN_ID")?.unwrap_or(dest_chain_default),
            private_key: env::var("DEST_PRIVATE_KEY").unwrap_or_else(|_| private_key),
        };

        let dest_chain_id = env_parsed("PING_DEST_CHAIN_ID")?.unwrap_or(dest.chain_id);

        let poller = PollerConfig {
            poll_interval: Duration::from_secs(
                env_parsed("POLL_INTERVAL_SECS")?.unwrap_or_else(default_poll_interval_secs),
            ),
            lookback_blocks: env_parsed("LOOKBACK_BLOCKS")?.unwrap_or_else(default_lookback_blocks),
            timeout: env_parsed("POLL_TIMEOUT_SECS")?.map(Duration::from_secs),
        };

        let config = Config {
            message: env::var("PINGPONG_MESSAGE").unwrap_or_else(|_| DEFAULT_MESSAGE.to_string()),
            origin_network: origin.name.clone(),
            dest_network: dest.name.clone(),
            dest_chain_id,
            origin_message_bus: env::var("ORIGIN_MESSAGE_BUS")
                .unwrap_or_else(|_| DEFAULT_ORIGIN_BUS.to_string()),
            dest_message_bus: env::var("DEST_MESSAGE_BUS")
                .unwrap_or_else(|_| DEFAULT_DEST_BUS.to_string()),
            networks: vec![origin, dest],
            poller,
            parallel_deploy: env_parsed("PARALLEL_DEPLOY")?.unwrap_or(false),
            artifacts_dir: env::var("ARTIFACTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("artifacts")),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.networks.is_empty() {
            return Err(eyre!("at least one network must be configured"));
        }

        for network in &self.networks {
            if network.rpc_url.is_empty() {
                return Err(eyre!("network '{}' has an empty rpc_url", network.name));
            }
            if network.private_key.len() != 66 || !network.private_key.starts_with("0x") {
                return Err(eyre!(
                    "network '{}' private key must be 66 chars (0x + 64 hex chars)",
                    network.name
                ));
            }
        }

        for (label, bus) in [
            ("origin", &self.origin_message_bus),
            ("dest", &self.dest_message_bus),
        ] {
            if bus.len() != 42 || !bus.starts_with("0x") {
                return Err(eyre!(
                    "{} message bus must be a valid hex address (42 chars with 0x prefix)",
                    label
                ));
            }
        }

        if self.message.is_empty() {
            return Err(eyre!("message cannot be empty"));
        }

        if self.poller.lookback_blocks == 0 {
            return Err(eyre!("lookback window must cover at least one block"));
        }

        Ok(())
    }
}

/// Read and parse an optional environment variable
fn env_parsed<T: std::str::FromStr>(key: &str) -> Result<Option<T>>
where
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e| eyre!("{} is invalid: {}", key, e)),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        let key = format!("0x{}", "1".repeat(64));
        Config {
            message: DEFAULT_MESSAGE.to_string(),
            origin_network: "bsc-testnet".to_string(),
            dest_network: "sapphire-testnet".to_string(),
            dest_chain_id: 23295,
            origin_message_bus: DEFAULT_ORIGIN_BUS.to_string(),
            dest_message_bus: DEFAULT_DEST_BUS.to_string(),
            networks: vec![
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
            ],
            poller: PollerConfig::default(),
            parallel_deploy: false,
            artifacts_dir: PathBuf::from("artifacts"),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn test_bad_private_key_rejected() {
        let mut config = test_config();
        config.networks[0].private_key = "0x123".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_bus_address_rejected() {
        let mut config = test_config();
        config.origin_message_bus = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_message_rejected() {
        let mut config = test_config();
        config.message = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_lookback_rejected() {
        let mut config = test_config();
        config.poller.lookback_blocks = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let config = test_config();
        let rendered = format!("{:?}", config.networks[0]);
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("111111"));
    }

    #[test]
    fn test_default_poller() {
        let poller = PollerConfig::default();
        assert_eq!(poller.poll_interval, Duration::from_secs(60));
        assert_eq!(poller.lookback_blocks, 10);
        assert!(poller.timeout.is_none());
    }
}
