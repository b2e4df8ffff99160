//! EVM chain support
//!
//! alloy-based implementation of the chain boundary: provider construction,
//! contract bindings, artifact-driven deployment and event scanning.

pub mod artifacts;
pub mod client;
pub mod contracts;

pub use artifacts::ContractArtifact;
pub use client::EvmChain;
