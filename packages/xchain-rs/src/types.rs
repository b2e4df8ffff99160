//! Common types for the ping-pong relay flow

use alloy::primitives::{Address, FixedBytes, B256, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric chain identifier as the message bus routes it (`dstChainId`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ChainId(pub u64);

impl ChainId {
    /// Create from u64
    pub fn new(id: u64) -> Self {
        ChainId(id)
    }

    /// Get the raw value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        ChainId(id)
    }
}

/// A contract created on a specific network
///
/// Produced once per deployment and immutable afterwards; downstream phases
/// receive the address by value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployedContract {
    /// Name of the network the contract lives on
    pub network: String,
    /// Deployed contract address
    pub address: Address,
    /// Message-bus address the contract was constructed with
    pub message_bus: Address,
}

/// Outcome of the fee-aware send phase
///
/// "Sent" means accepted by the origin chain, not relayed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendResult {
    /// Hash of the mined send transaction
    pub tx_hash: B256,
    /// Value attached to the transaction (quoted fee with safety margin)
    pub fee_paid: U256,
    /// Chain the message was addressed to
    pub dest_chain_id: ChainId,
}

/// One MessageReceived log observed while polling the destination chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationEvent {
    /// Emitting contract address
    pub address: Address,
    /// Raw fixed-width payload carried by the event
    pub payload: FixedBytes<32>,
    /// Block the event was emitted in
    pub block_number: u64,
}

/// Terminal result of the confirmation poller
///
/// A payload mismatch is a distinct outcome from "event never observed":
/// the former ends the poll, the latter keeps it going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// The relayed payload decoded to the original message
    Success {
        /// Decoded payload text
        text: String,
        /// Block the confirmation event was found in
        block_number: u64,
    },
    /// An event arrived but its payload differs from what was sent
    Mismatch {
        /// The message that was sent
        expected: String,
        /// What the destination contract received
        actual: String,
    },
}

impl VerificationOutcome {
    /// True when the relayed payload matched the original message
    pub fn is_success(&self) -> bool {
        matches!(self, VerificationOutcome::Success { .. })
    }
}
