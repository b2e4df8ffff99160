//! Top-level phase sequencing
//!
//! Runs deploy, send, and verify in order, passing each phase's output to
//! the next. The first failure aborts the run; nothing is rolled back, so a
//! deployed-but-unused contract is an acceptable leftover rather than an
//! error state.

use alloy::primitives::Address;
use eyre::{eyre, Result, WrapErr};
use tracing::{error, info};

use xchain_rs::{ChainClient, ChainId, SendResult, VerificationOutcome};

use crate::config::Config;
use crate::deploy::{deploy_ping_pong, PingPongDeployment};
use crate::networks::NetworkRegistry;
use crate::send::send_ping;
use crate::verify::ConfirmationPoller;

/// Everything a completed run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub deployment: PingPongDeployment,
    pub send: SendResult,
    pub outcome: VerificationOutcome,
}

fn banner() {
    info!("===========================");
}

/// Parse a configured message-bus address
pub fn parse_bus_address(label: &str, raw: &str) -> Result<Address> {
    raw.parse()
        .wrap_err_with(|| format!("{} message bus address '{}' is not a valid address", label, raw))
}

/// Run the full pipeline against the configured networks
pub async fn run_full(config: &Config) -> Result<RunSummary> {
    let registry = NetworkRegistry::from_config(config);
    let origin = registry.connect(&config.origin_network)?;
    let dest = registry.connect(&config.dest_network)?;

    run_phases(&origin, &dest, config).await
}

/// Run the full pipeline over already-connected handles
pub async fn run_phases(
    origin: &dyn ChainClient,
    dest: &dyn ChainClient,
    config: &Config,
) -> Result<RunSummary> {
    let origin_bus = parse_bus_address("origin", &config.origin_message_bus)?;
    let dest_bus = parse_bus_address("dest", &config.dest_message_bus)?;

    banner();
    let deployment = deploy_ping_pong(
        origin,
        dest,
        origin_bus,
        dest_bus,
        config.parallel_deploy,
    )
    .await
    .wrap_err("deploy phase failed")?;

    banner();
    let send = send_ping(
        origin,
        deployment.ping.address,
        deployment.pong.address,
        ChainId::new(config.dest_chain_id),
        &config.message,
    )
    .await
    .wrap_err("send phase failed")?;

    banner();
    let poller = ConfirmationPoller::new(&config.poller);
    let outcome = poller
        .await_confirmation(dest, deployment.pong.address, &config.message)
        .await
        .wrap_err("verify phase failed")?;

    match &outcome {
        VerificationOutcome::Success { text, .. } => {
            info!("Relay verified: message decoded to {:?}", text);
        }
        VerificationOutcome::Mismatch { expected, actual } => {
            error!(
                expected = expected.as_str(),
                actual = actual.as_str(),
                "Relay verification mismatch"
            );
        }
    }

    Ok(RunSummary {
        deployment,
        send,
        outcome,
    })
}

/// Map a finished run to a process result: a mismatch is a failed run
pub fn summarize(summary: &RunSummary) -> Result<()> {
    match &summary.outcome {
        VerificationOutcome::Success { .. } => Ok(()),
        VerificationOutcome::Mismatch { expected, actual } => Err(eyre!(
            "verification mismatch: sent {:?}, destination received {:?}",
            expected,
            actual
        )),
    }
}
