//! Testing utilities
//!
//! A scripted in-memory [`ChainClient`] used by unit and integration tests.
//! Deployments hand out deterministic addresses, fee quotes return a fixed
//! value, and the event schedule controls on which scan attempt the
//! confirmation event appears.

use alloy::primitives::{Address, FixedBytes, B256, U256};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::chain::{ChainClient, ContractKind};
use crate::error::RelayError;
use crate::types::{ChainId, ConfirmationEvent};

/// One recorded `sendPing` submission
#[derive(Debug, Clone)]
pub struct SentPing {
    pub ping: Address,
    pub pong: Address,
    pub dest_chain_id: ChainId,
    pub payload: FixedBytes<32>,
    pub value: U256,
}

/// Scripted chain for tests
pub struct MockChain {
    network: String,
    head: AtomicU64,
    quoted_fee: U256,
    message_bus: Address,
    deployments: Mutex<Vec<(ContractKind, Address, Address)>>,
    buses: Mutex<HashMap<Address, Address>>,
    sent: Mutex<Vec<SentPing>>,
    scan_count: AtomicUsize,
    quote_count: AtomicUsize,
    // (scans before the event shows up, payload it carries)
    event_schedule: Mutex<Option<(usize, FixedBytes<32>)>>,
    // scan attempt (1-based) that fails with an RPC error
    scan_failure: Mutex<Option<usize>>,
    deploy_failure: Mutex<Option<String>>,
    send_failure: Mutex<Option<RelayError>>,
    next_address: AtomicU64,
}

impl MockChain {
    /// Create a mock for a named network
    pub fn new(network: &str) -> Self {
        Self {
            network: network.to_string(),
            head: AtomicU64::new(100),
            quoted_fee: U256::from(1_000u64),
            message_bus: Address::with_last_byte(0xbb),
            deployments: Mutex::new(Vec::new()),
            buses: Mutex::new(HashMap::new()),
            sent: Mutex::new(Vec::new()),
            scan_count: AtomicUsize::new(0),
            quote_count: AtomicUsize::new(0),
            event_schedule: Mutex::new(None),
            scan_failure: Mutex::new(None),
            deploy_failure: Mutex::new(None),
            send_failure: Mutex::new(None),
            next_address: AtomicU64::new(1),
        }
    }

    /// Set the fee the message bus quotes
    pub fn with_fee(self, fee: U256) -> Self {
        Self {
            quoted_fee: fee,
            ..self
        }
    }

    /// Set the message-bus address reported for deployed Pings
    pub fn with_message_bus(self, bus: Address) -> Self {
        Self {
            message_bus: bus,
            ..self
        }
    }

    /// Script the confirmation event to appear on the `nth` scan (1-based)
    pub fn emit_on_scan(&self, nth: usize, payload: FixedBytes<32>) {
        assert!(nth >= 1, "scan attempts are 1-based");
        *self.event_schedule.lock().unwrap() = Some((nth, payload));
    }

    /// Script the `nth` scan (1-based) to fail with an RPC error
    pub fn fail_on_scan(&self, nth: usize) {
        assert!(nth >= 1, "scan attempts are 1-based");
        *self.scan_failure.lock().unwrap() = Some(nth);
    }

    /// Script every deployment to fail with the given reason
    pub fn fail_deploys(&self, reason: &str) {
        *self.deploy_failure.lock().unwrap() = Some(reason.to_string());
    }

    /// Script every `sendPing` submission to fail with the given error
    pub fn fail_sends(&self, err: RelayError) {
        *self.send_failure.lock().unwrap() = Some(err);
    }

    /// Number of event scans performed so far
    pub fn scan_count(&self) -> usize {
        self.scan_count.load(Ordering::SeqCst)
    }

    /// Number of fee quotes requested so far
    pub fn quote_count(&self) -> usize {
        self.quote_count.load(Ordering::SeqCst)
    }

    /// Deployments recorded so far as (kind, address, message bus)
    pub fn deployments(&self) -> Vec<(ContractKind, Address, Address)> {
        self.deployments.lock().unwrap().clone()
    }

    /// Send submissions recorded so far
    pub fn sent(&self) -> Vec<SentPing> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChainClient for MockChain {
    fn network(&self) -> &str {
        &self.network
    }

    async fn deploy(
        &self,
        contract: ContractKind,
        message_bus: Address,
    ) -> Result<Address, RelayError> {
        if let Some(reason) = self.deploy_failure.lock().unwrap().clone() {
            return Err(RelayError::deployment(contract.name(), reason));
        }

        let n = self.next_address.fetch_add(1, Ordering::SeqCst);
        let address = Address::with_last_byte(n as u8);
        self.deployments
            .lock()
            .unwrap()
            .push((contract, address, message_bus));
        self.buses.lock().unwrap().insert(address, message_bus);
        Ok(address)
    }

    async fn message_bus_of(&self, ping: Address) -> Result<Address, RelayError> {
        Ok(self
            .buses
            .lock()
            .unwrap()
            .get(&ping)
            .copied()
            .unwrap_or(self.message_bus))
    }

    async fn quote_fee(
        &self,
        _message_bus: Address,
        _payload: FixedBytes<32>,
    ) -> Result<U256, RelayError> {
        self.quote_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.quoted_fee)
    }

    async fn send_ping(
        &self,
        ping: Address,
        pong: Address,
        dest_chain_id: ChainId,
        payload: FixedBytes<32>,
        value: U256,
    ) -> Result<B256, RelayError> {
        if let Some(err) = self.send_failure.lock().unwrap().clone() {
            return Err(err);
        }

        let mut sent = self.sent.lock().unwrap();
        sent.push(SentPing {
            ping,
            pong,
            dest_chain_id,
            payload,
            value,
        });
        Ok(B256::with_last_byte(sent.len() as u8))
    }

    async fn block_number(&self) -> Result<u64, RelayError> {
        // Each call advances the head so polling sees a moving chain
        Ok(self.head.fetch_add(1, Ordering::SeqCst))
    }

    async fn confirmation_events(
        &self,
        pong: Address,
        _from_block: u64,
        _to_block: Option<u64>,
    ) -> Result<Vec<ConfirmationEvent>, RelayError> {
        let attempt = self.scan_count.fetch_add(1, Ordering::SeqCst) + 1;

        if *self.scan_failure.lock().unwrap() == Some(attempt) {
            return Err(RelayError::Rpc("failed to get logs: connection reset".to_string()));
        }

        let schedule = self.event_schedule.lock().unwrap();
        match *schedule {
            Some((nth, payload)) if attempt >= nth => Ok(vec![ConfirmationEvent {
                address: pong,
                payload,
                block_number: self.head.load(Ordering::SeqCst),
            }]),
            _ => Ok(Vec::new()),
        }
    }
}
