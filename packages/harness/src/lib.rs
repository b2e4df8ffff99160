//! PingPong relay verification harness
//!
//! Deploys a Ping/Pong contract pair across two EVM networks bridged by a
//! message bus, sends a fixed-width message from the origin side, and polls
//! the destination side for the confirmation event to prove the relay
//! round-trips the payload intact.

pub mod config;
pub mod deploy;
pub mod networks;
pub mod runner;
pub mod send;
pub mod verify;

pub use config::{Config, NetworkConfig, PollerConfig};
pub use deploy::{deploy_ping_pong, PingPongDeployment};
pub use networks::NetworkRegistry;
pub use runner::{run_full, run_phases, summarize, RunSummary};
pub use send::{send_ping, FEE_SAFETY_MULTIPLIER};
pub use verify::ConfirmationPoller;
