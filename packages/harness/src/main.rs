//! PingPong Harness CLI
//!
//! Mirrors the original task set:
//! - `full`   -> deploy + send + verify in one run
//! - `deploy` -> deploy the Ping/Pong pair only
//! - `send`   -> send a ping to an existing deployment
//! - `verify` -> poll an existing Pong for the confirmation event
//! - `status` -> RPC connectivity check for the configured networks

use alloy::primitives::Address;
use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result, WrapErr};
use tracing_subscriber::EnvFilter;

use pingpong_harness::runner::parse_bus_address;
use pingpong_harness::{
    deploy_ping_pong, run_full, send_ping, summarize, Config, ConfirmationPoller, NetworkRegistry,
};
use xchain_rs::{ChainId, VerificationOutcome};

#[derive(Parser)]
#[command(name = "pingpong-harness")]
#[command(about = "Cross-chain ping-pong relay verification harness", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy, send, and verify in one run (default)
    Full {
        /// Message to bridge
        #[arg(long)]
        message: Option<String>,

        /// Chain ID the bus should route the ping to
        #[arg(long)]
        dest_chain_id: Option<u64>,
    },

    /// Deploy the Ping and Pong contracts only
    Deploy,

    /// Send a ping to an already-deployed pair
    Send {
        /// Ping contract address on the origin network
        #[arg(long)]
        ping: String,

        /// Pong contract address on the destination network
        #[arg(long)]
        pong: String,

        /// Message to bridge
        #[arg(long)]
        message: Option<String>,

        /// Chain ID the bus should route the ping to
        #[arg(long)]
        dest_chain_id: Option<u64>,
    },

    /// Poll an already-deployed Pong for the confirmation event
    Verify {
        /// Pong contract address on the destination network
        #[arg(long)]
        pong: String,

        /// Message the confirmation payload should decode to
        #[arg(long)]
        message: Option<String>,
    },

    /// Check RPC connectivity for the configured networks
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = Config::load()?;

    match cli.command.unwrap_or(Commands::Full {
        message: None,
        dest_chain_id: None,
    }) {
        Commands::Full {
            message,
            dest_chain_id,
        } => {
            if let Some(message) = message {
                config.message = message;
            }
            if let Some(id) = dest_chain_id {
                config.dest_chain_id = id;
            }
            config.validate()?;

            let summary = run_full(&config).await?;
            summarize(&summary)?;
        }

        Commands::Deploy => {
            let registry = NetworkRegistry::from_config(&config);
            let origin = registry.connect(&config.origin_network)?;
            let dest = registry.connect(&config.dest_network)?;

            let deployment = deploy_ping_pong(
                &origin,
                &dest,
                parse_bus_address("origin", &config.origin_message_bus)?,
                parse_bus_address("dest", &config.dest_message_bus)?,
                config.parallel_deploy,
            )
            .await?;

            println!("Ping: {}  ({})", deployment.ping.address, deployment.ping.network);
            println!("Pong: {}  ({})", deployment.pong.address, deployment.pong.network);
        }

        Commands::Send {
            ping,
            pong,
            message,
            dest_chain_id,
        } => {
            let registry = NetworkRegistry::from_config(&config);
            let origin = registry.connect(&config.origin_network)?;

            let ping: Address = ping.parse().wrap_err("invalid ping address")?;
            let pong: Address = pong.parse().wrap_err("invalid pong address")?;
            let message = message.unwrap_or_else(|| config.message.clone());
            let dest_chain_id = ChainId::new(dest_chain_id.unwrap_or(config.dest_chain_id));

            let result = send_ping(&origin, ping, pong, dest_chain_id, &message).await?;
            println!("Sent: {} (fee attached: {})", result.tx_hash, result.fee_paid);
        }

        Commands::Verify { pong, message } => {
            let registry = NetworkRegistry::from_config(&config);
            let dest = registry.connect(&config.dest_network)?;

            let pong: Address = pong.parse().wrap_err("invalid pong address")?;
            let message = message.unwrap_or_else(|| config.message.clone());

            let poller = ConfirmationPoller::new(&config.poller);
            let outcome = poller.await_confirmation(&dest, pong, &message).await?;

            if let VerificationOutcome::Mismatch { expected, actual } = outcome {
                return Err(eyre!(
                    "verification mismatch: sent {:?}, destination received {:?}",
                    expected,
                    actual
                ));
            }
        }

        Commands::Status => {
            println!("Configured networks:");
            for network in &config.networks {
                let healthy = check_rpc_health(&network.rpc_url).await;
                let dot = if healthy {
                    "\x1b[32m●\x1b[0m"
                } else {
                    "\x1b[31m●\x1b[0m"
                };
                println!(
                    "  {} {} (chain {}): {}",
                    dot,
                    network.name,
                    network.chain_id,
                    if healthy { "healthy" } else { "not responding" }
                );
            }
        }
    }

    Ok(())
}

/// Check that an RPC endpoint answers eth_blockNumber with a result
async fn check_rpc_health(rpc_url: &str) -> bool {
    let client = reqwest::Client::new();
    let response = client
        .post(rpc_url)
        .json(&serde_json::json!({
            "jsonrpc": "2.0",
            "method": "eth_blockNumber",
            "params": [],
            "id": 1
        }))
        .send()
        .await;

    let Ok(response) = response else {
        return false;
    };
    if !response.status().is_success() {
        return false;
    }

    response
        .json::<serde_json::Value>()
        .await
        .map(|body| rpc_reply_is_healthy(&body))
        .unwrap_or(false)
}

/// A healthy JSON-RPC reply carries a result, not an error object
fn rpc_reply_is_healthy(body: &serde_json::Value) -> bool {
    body.get("result").is_some() && body.get("error").is_none()
}
