//! Ping/Pong contract ABI definitions
//!
//! Uses alloy's sol! macro to generate type-safe bindings for the contract
//! surface the harness consumes. The contract implementations themselves are
//! opaque; only these entry points matter here.

use alloy::primitives::{keccak256, B256};
use alloy::sol;

sol! {
    /// Origin-side sender contract
    #[sol(rpc)]
    contract Ping {
        /// Message bus this Ping was deployed against
        function messageBus() public view returns (address);

        /// Send a fixed-width message to a Pong contract on another chain.
        /// The attached value pays the bus relay fee.
        function sendPing(address pong, uint64 dstChainId, bytes32 message) external payable;
    }

    /// Destination-side receiver contract
    #[sol(rpc)]
    contract Pong {
        /// Emitted when the bus delivers a relayed message
        event MessageReceived(bytes32 message);
    }

    /// Message-bus fee estimation interface
    #[sol(rpc)]
    contract IMessageBus {
        /// Estimated relay fee for a message, in the chain's base fee-unit
        function calcFee(bytes calldata message) public view returns (uint256);
    }
}

/// Compute the MessageReceived event signature hash
pub fn message_received_signature() -> B256 {
    // keccak256("MessageReceived(bytes32)")
    keccak256(b"MessageReceived(bytes32)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_is_stable() {
        assert_eq!(
            message_received_signature(),
            keccak256(b"MessageReceived(bytes32)")
        );
        assert_ne!(message_received_signature(), B256::ZERO);
    }
}
