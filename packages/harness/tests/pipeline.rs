//! End-to-end pipeline tests over scripted chains
//!
//! Exercises the full deploy -> send -> verify sequence with in-memory
//! chain clients, checking the wiring between phases rather than any one
//! phase in isolation.

use std::path::PathBuf;
use std::time::Duration;

use alloy::primitives::{Address, U256};

use pingpong_harness::{run_phases, summarize, Config, NetworkConfig, PollerConfig};
use xchain_rs::testing::MockChain;
use xchain_rs::{encode_message, ContractKind, VerificationOutcome};

const ORIGIN_BUS: &str = "0xAd204986D6cB67A5Bc76a3CB8974823F43Cb9AAA";
const DEST_BUS: &str = "0x9Bb46D5100d2Db4608112026951c9C965b233f4D";

fn test_config(message: &str) -> Config {
    let key = format!("0x{}", "2".repeat(64));
    Config {
        message: message.to_string(),
        origin_network: "bsc-testnet".to_string(),
        dest_network: "sapphire-testnet".to_string(),
        dest_chain_id: 23295,
        origin_message_bus: ORIGIN_BUS.to_string(),
        dest_message_bus: DEST_BUS.to_string(),
        networks: vec![
            NetworkConfig {
                name: "bsc-testnet".to_string(),
                rpc_url: "http://localhost:8545".to_string(),
                chain_id: 97,
                private_key: key.clone(),
            },
            NetworkConfig {
                name: "sapphire-testnet".to_string(),
                rpc_url: "http://localhost:8546".to_string(),
                chain_id: 23295,
                private_key: key,
            },
        ],
        poller: PollerConfig {
            poll_interval: Duration::from_millis(0),
            lookback_blocks: 10,
            timeout: None,
        },
        parallel_deploy: false,
        artifacts_dir: PathBuf::from("artifacts"),
    }
}

#[tokio::test]
async fn test_full_pipeline_round_trips_the_message() {
    let config = test_config("Hello from BSC");
    let origin = MockChain::new("bsc-testnet").with_fee(U256::from(500u64));
    let dest = MockChain::new("sapphire-testnet");

    dest.emit_on_scan(2, encode_message("Hello from BSC").unwrap());

    let summary = run_phases(&origin, &dest, &config).await.unwrap();

    // Ping lands on origin with the origin bus, Pong on dest with the dest bus
    let origin_deploys = origin.deployments();
    let dest_deploys = dest.deployments();
    assert_eq!(origin_deploys.len(), 1);
    assert_eq!(dest_deploys.len(), 1);
    assert_eq!(origin_deploys[0].0, ContractKind::Ping);
    assert_eq!(dest_deploys[0].0, ContractKind::Pong);
    assert_eq!(origin_deploys[0].2, ORIGIN_BUS.parse::<Address>().unwrap());
    assert_eq!(dest_deploys[0].2, DEST_BUS.parse::<Address>().unwrap());
    assert_eq!(summary.deployment.ping.address, origin_deploys[0].1);
    assert_eq!(summary.deployment.pong.address, dest_deploys[0].1);

    // The send routes from the deployed Ping to the deployed Pong with
    // double the quoted fee attached
    let sent = origin.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].ping, summary.deployment.ping.address);
    assert_eq!(sent[0].pong, summary.deployment.pong.address);
    assert_eq!(sent[0].dest_chain_id.as_u64(), 23295);
    assert_eq!(sent[0].payload, encode_message("Hello from BSC").unwrap());
    assert_eq!(sent[0].value, U256::from(1_000u64));
    assert_eq!(summary.send.fee_paid, U256::from(1_000u64));

    // The poller kept scanning until the scripted event appeared
    assert_eq!(dest.scan_count(), 2);
    assert!(summary.outcome.is_success());
    assert!(summarize(&summary).is_ok());
}

#[tokio::test]
async fn test_pipeline_reports_mismatch_as_failed_run() {
    let config = test_config("Hello from BSC");
    let origin = MockChain::new("bsc-testnet");
    let dest = MockChain::new("sapphire-testnet");

    dest.emit_on_scan(1, encode_message("Something else").unwrap());

    let summary = run_phases(&origin, &dest, &config).await.unwrap();

    match &summary.outcome {
        VerificationOutcome::Mismatch { expected, actual } => {
            assert_eq!(expected.as_str(), "Hello from BSC");
            assert_eq!(actual.as_str(), "Something else");
        }
        other => panic!("expected a mismatch, got {:?}", other),
    }
    assert!(summarize(&summary).is_err());
}

#[tokio::test]
async fn test_pipeline_rejects_overlong_message() {
    let config = test_config(&"x".repeat(40));
    let origin = MockChain::new("bsc-testnet");
    let dest = MockChain::new("sapphire-testnet");

    let err = run_phases(&origin, &dest, &config).await.unwrap_err();
    assert!(err.to_string().contains("send phase failed"));

    // Deployment happened, but nothing was quoted or sent
    assert_eq!(origin.deployments().len(), 1);
    assert_eq!(origin.quote_count(), 0);
    assert!(origin.sent().is_empty());
}
