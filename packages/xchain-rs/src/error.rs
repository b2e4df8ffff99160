//! Error types for the relay harness
//!
//! Every phase failure maps onto one of these variants. A failed phase aborts
//! the run; only the confirmation poller retries, and solely for the
//! "no event yet" case, which is not an error at all.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    #[error("unknown network '{0}': no endpoint configured under that name")]
    UnknownNetwork(String),

    #[error("message is {len} bytes, exceeds the {max}-byte payload width")]
    MessageTooLong { len: usize, max: usize },

    #[error("deployment of {contract} failed: {reason}")]
    DeploymentFailed { contract: String, reason: String },

    #[error("send transaction failed: {0}")]
    SendFailed(String),

    #[error("message bus rejected the attached fee: {0}")]
    InsufficientFee(String),

    #[error("failed to decode confirmation payload: {0}")]
    EventDecode(String),

    #[error("no confirmation event observed after {waited_secs}s")]
    ConfirmationTimeout { waited_secs: u64 },

    #[error("chain RPC error: {0}")]
    Rpc(String),
}

impl RelayError {
    /// Build a deployment failure for a named contract
    pub fn deployment(contract: impl Into<String>, reason: impl Into<String>) -> Self {
        RelayError::DeploymentFailed {
            contract: contract.into(),
            reason: reason.into(),
        }
    }
}
