//! Xchain-RS: Shared Cross-Chain Library for the PingPong Relay Harness
//!
//! This crate provides the chain-facing pieces shared by the harness phases:
//!
//! - **Types** - `ChainId`, `DeployedContract`, `SendResult`, `ConfirmationEvent`
//! - **Errors** - The `RelayError` taxonomy every chain operation reports
//! - **Codec** - Fixed-width (32-byte) message encoding/decoding
//! - **Chain Boundary** - The `ChainClient` trait each network handle implements
//! - **EVM Module** - alloy-based implementation: provider, contract bindings,
//!   artifact-driven deployment, event scanning
//! - **Testing Module** - Scripted `MockChain` for harness tests
//!
//! ## Feature Flags
//!
//! - `testing` - Enable the scripted mock chain for tests

pub mod chain;
pub mod codec;
pub mod error;
pub mod evm;
pub mod types;

#[cfg(feature = "testing")]
pub mod testing;

// Re-export commonly used items at the crate root
pub use chain::{ChainClient, ContractKind};
pub use codec::{decode_message, encode_message, MESSAGE_WIDTH};
pub use error::RelayError;
pub use evm::EvmChain;
pub use types::{ChainId, ConfirmationEvent, DeployedContract, SendResult, VerificationOutcome};
