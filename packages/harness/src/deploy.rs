//! Deployment orchestration
//!
//! Deploys the Ping contract on the origin network and the Pong contract on
//! the destination network, each constructed with its own network's
//! message-bus address. The two deployments are independent; the default is
//! sequential so the two deployment logs do not interleave.

use alloy::primitives::Address;
use tracing::info;

use xchain_rs::{ChainClient, ContractKind, DeployedContract, RelayError};

/// Both halves of a deployed ping-pong pair
#[derive(Debug, Clone)]
pub struct PingPongDeployment {
    /// Ping contract on the origin network
    pub ping: DeployedContract,
    /// Pong contract on the destination network
    pub pong: DeployedContract,
}

/// Deploy Ping on `origin` and Pong on `dest`
pub async fn deploy_ping_pong(
    origin: &dyn ChainClient,
    dest: &dyn ChainClient,
    origin_bus: Address,
    dest_bus: Address,
    parallel: bool,
) -> Result<PingPongDeployment, RelayError> {
    info!("Start deployment of PingPong...");

    let (ping, pong) = if parallel {
        tokio::try_join!(
            deploy_one(origin, ContractKind::Ping, origin_bus),
            deploy_one(dest, ContractKind::Pong, dest_bus),
        )?
    } else {
        let ping = deploy_one(origin, ContractKind::Ping, origin_bus).await?;
        let pong = deploy_one(dest, ContractKind::Pong, dest_bus).await?;
        (ping, pong)
    };

    Ok(PingPongDeployment { ping, pong })
}

async fn deploy_one(
    chain: &dyn ChainClient,
    kind: ContractKind,
    message_bus: Address,
) -> Result<DeployedContract, RelayError> {
    info!(network = chain.network(), contract = %kind, "Deploying on {}...", chain.network());

    let address = chain.deploy(kind, message_bus).await?;

    info!(
        network = chain.network(),
        contract = %kind,
        address = %address,
        "{} deployed at: {}",
        kind,
        address
    );

    Ok(DeployedContract {
        network: chain.network().to_string(),
        address,
        message_bus,
    })
}
