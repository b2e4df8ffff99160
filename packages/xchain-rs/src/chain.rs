//! Chain-facing boundary used by every harness phase
//!
//! One implementor per connected network. Each handle is permanently bound
//! to the network it was created for, so every chain call names its target
//! explicitly and there is no ambient "current network" to switch.

use alloy::primitives::{Address, FixedBytes, B256, U256};
use async_trait::async_trait;
use std::fmt;

use crate::error::RelayError;
use crate::types::{ChainId, ConfirmationEvent};

/// Contracts the harness knows how to deploy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractKind {
    /// Origin-side sender half of the bridged flow
    Ping,
    /// Destination-side receiver half
    Pong,
}

impl ContractKind {
    /// Contract name as it appears in compiled artifacts
    pub fn name(&self) -> &'static str {
        match self {
            ContractKind::Ping => "Ping",
            ContractKind::Pong => "Pong",
        }
    }
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Operations the harness needs from a chain
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Name of the network this handle targets
    fn network(&self) -> &str;

    /// Deploy a contract with the network's message-bus address as its
    /// single constructor argument, waiting until the creation transaction
    /// is mined. Returns the created contract's address.
    async fn deploy(
        &self,
        contract: ContractKind,
        message_bus: Address,
    ) -> Result<Address, RelayError>;

    /// Read the message-bus address a Ping contract was constructed with
    async fn message_bus_of(&self, ping: Address) -> Result<Address, RelayError>;

    /// Quote the relay fee the message bus estimates for a payload
    async fn quote_fee(
        &self,
        message_bus: Address,
        payload: FixedBytes<32>,
    ) -> Result<U256, RelayError>;

    /// Submit `sendPing` with `value` attached and wait until it is mined
    async fn send_ping(
        &self,
        ping: Address,
        pong: Address,
        dest_chain_id: ChainId,
        payload: FixedBytes<32>,
        value: U256,
    ) -> Result<B256, RelayError>;

    /// Current block height
    async fn block_number(&self) -> Result<u64, RelayError>;

    /// Scan `[from_block, to_block]` (`to_block = None` means latest) for
    /// MessageReceived logs emitted by `pong`, in block order
    async fn confirmation_events(
        &self,
        pong: Address,
        from_block: u64,
        to_block: Option<u64>,
    ) -> Result<Vec<ConfirmationEvent>, RelayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_kind_names() {
        assert_eq!(ContractKind::Ping.name(), "Ping");
        assert_eq!(ContractKind::Pong.to_string(), "Pong");
    }
}
