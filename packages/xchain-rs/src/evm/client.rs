//! EVM network handle
//!
//! Wraps an alloy provider with signing capabilities and implements the
//! chain boundary on top of it: artifact-driven deployment, contract calls,
//! payable sends and log scanning.

use alloy::{
    network::{Ethereum, EthereumWallet, TransactionBuilder},
    primitives::{Address, Bytes, FixedBytes, B256, U256},
    providers::{Provider, ProviderBuilder, RootProvider},
    rpc::types::{Filter, Log, TransactionRequest},
    signers::local::PrivateKeySigner,
    transports::http::{Client, Http},
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::chain::{ChainClient, ContractKind};
use crate::error::RelayError;
use crate::evm::artifacts::ContractArtifact;
use crate::evm::contracts::{message_received_signature, IMessageBus, Ping};
use crate::types::{ChainId, ConfirmationEvent};

/// A handle bound to one EVM network
///
/// Created per network from the registry; all operations target the RPC
/// endpoint and signer it was constructed with.
pub struct EvmChain {
    /// Network name the handle was registered under
    network: String,
    /// Chain ID of the target network
    chain_id: u64,
    /// Signer's address
    signer_address: Address,
    /// Directory holding compiled contract artifacts
    artifacts_dir: PathBuf,
    /// Provider with wallet attached
    #[allow(clippy::type_complexity)]
    provider: alloy::providers::fillers::FillProvider<
        alloy::providers::fillers::JoinFill<
            alloy::providers::Identity,
            alloy::providers::fillers::WalletFiller<EthereumWallet>,
        >,
        RootProvider<Http<Client>>,
        Http<Client>,
        Ethereum,
    >,
}

impl EvmChain {
    /// Connect to a network endpoint with a signing key
    pub fn connect(
        network: &str,
        rpc_url: &str,
        chain_id: u64,
        private_key: &str,
        artifacts_dir: &Path,
    ) -> Result<Self, RelayError> {
        let signer: PrivateKeySigner = private_key
            .parse()
            .map_err(|e| RelayError::Rpc(format!("invalid private key: {}", e)))?;

        let signer_address = signer.address();
        let wallet = EthereumWallet::from(signer);

        let provider = ProviderBuilder::new().wallet(wallet).on_http(
            rpc_url
                .parse()
                .map_err(|e| RelayError::Rpc(format!("invalid RPC URL '{}': {}", rpc_url, e)))?,
        );

        info!(
            network = network,
            chain_id = chain_id,
            signer = %signer_address,
            "Connected EVM network handle"
        );

        Ok(Self {
            network: network.to_string(),
            chain_id,
            signer_address,
            artifacts_dir: artifacts_dir.to_path_buf(),
            provider,
        })
    }

    /// Chain ID of the target network
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Address of the signing account
    pub fn signer_address(&self) -> Address {
        self.signer_address
    }

    /// Classify a failed send by its revert reason. The bus surfaces an
    /// underpaid relay fee as a revert, which is a different failure from a
    /// plain reverted send.
    fn classify_send_error(message: String) -> RelayError {
        let lowered = message.to_lowercase();
        if lowered.contains("insufficient fee") || lowered.contains("fee too low") {
            RelayError::InsufficientFee(message)
        } else {
            RelayError::SendFailed(message)
        }
    }

    /// Extract one confirmation event from a raw log
    fn parse_confirmation_log(log: &Log) -> Result<ConfirmationEvent, RelayError> {
        let data = log.data().data.as_ref();
        // MessageReceived carries exactly one bytes32 word; anything else is
        // a different event shape that happens to share the signature filter.
        if data.len() != 32 {
            return Err(RelayError::EventDecode(format!(
                "MessageReceived data is {} bytes, expected exactly 32",
                data.len()
            )));
        }

        let block_number = log
            .block_number
            .ok_or_else(|| RelayError::EventDecode("log has no block number".to_string()))?;

        Ok(ConfirmationEvent {
            address: log.address(),
            payload: FixedBytes::<32>::from_slice(data),
            block_number,
        })
    }
}

#[async_trait]
impl ChainClient for EvmChain {
    fn network(&self) -> &str {
        &self.network
    }

    async fn deploy(
        &self,
        contract: ContractKind,
        message_bus: Address,
    ) -> Result<Address, RelayError> {
        let artifact = ContractArtifact::load(&self.artifacts_dir, contract)?;

        // Single constructor argument: the message-bus address, ABI-encoded
        // as a left-padded 32-byte word appended to the creation code.
        let mut code = artifact.bytecode.to_vec();
        let mut word = [0u8; 32];
        word[12..32].copy_from_slice(message_bus.as_slice());
        code.extend_from_slice(&word);

        debug!(
            network = %self.network,
            contract = %contract,
            message_bus = %message_bus,
            code_len = code.len(),
            "Submitting contract creation"
        );

        let tx = TransactionRequest::default().with_deploy_code(Bytes::from(code));

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| RelayError::deployment(contract.name(), e.to_string()))?;

        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| RelayError::deployment(contract.name(), e.to_string()))?;

        if !receipt.status() {
            return Err(RelayError::deployment(
                contract.name(),
                "creation transaction reverted",
            ));
        }

        let address = receipt.contract_address.ok_or_else(|| {
            RelayError::deployment(contract.name(), "receipt carries no contract address")
        })?;

        info!(
            network = %self.network,
            contract = %contract,
            address = %address,
            "Contract deployed"
        );

        Ok(address)
    }

    async fn message_bus_of(&self, ping: Address) -> Result<Address, RelayError> {
        let contract = Ping::new(ping, &self.provider);
        let result = contract
            .messageBus()
            .call()
            .await
            .map_err(|e| RelayError::Rpc(format!("messageBus() call failed: {}", e)))?;
        Ok(result._0)
    }

    async fn quote_fee(
        &self,
        message_bus: Address,
        payload: FixedBytes<32>,
    ) -> Result<U256, RelayError> {
        let bus = IMessageBus::new(message_bus, &self.provider);
        let result = bus
            .calcFee(Bytes::copy_from_slice(payload.as_slice()))
            .call()
            .await
            .map_err(|e| RelayError::Rpc(format!("calcFee() call failed: {}", e)))?;
        Ok(result._0)
    }

    async fn send_ping(
        &self,
        ping: Address,
        pong: Address,
        dest_chain_id: ChainId,
        payload: FixedBytes<32>,
        value: U256,
    ) -> Result<B256, RelayError> {
        let contract = Ping::new(ping, &self.provider);
        let call = contract
            .sendPing(pong, dest_chain_id.as_u64(), payload)
            .value(value);

        let pending = call
            .send()
            .await
            .map_err(|e| Self::classify_send_error(e.to_string()))?;

        let tx_hash = *pending.tx_hash();
        debug!(network = %self.network, tx_hash = %tx_hash, "sendPing submitted, waiting for receipt");

        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| RelayError::SendFailed(e.to_string()))?;

        if !receipt.status() {
            return Err(RelayError::SendFailed(
                "send transaction reverted".to_string(),
            ));
        }

        Ok(receipt.transaction_hash)
    }

    async fn block_number(&self) -> Result<u64, RelayError> {
        self.provider
            .get_block_number()
            .await
            .map_err(|e| RelayError::Rpc(format!("failed to get block number: {}", e)))
    }

    async fn confirmation_events(
        &self,
        pong: Address,
        from_block: u64,
        to_block: Option<u64>,
    ) -> Result<Vec<ConfirmationEvent>, RelayError> {
        let mut filter = Filter::new().address(pong).from_block(from_block);
        if let Some(to) = to_block {
            filter = filter.to_block(to);
        }

        let logs = self
            .provider
            .get_logs(&filter)
            .await
            .map_err(|e| RelayError::Rpc(format!("failed to get logs: {}", e)))?;

        let signature = message_received_signature();
        let mut events = Vec::new();

        for log in logs {
            let topics = log.topics();
            if topics.is_empty() || topics[0] != signature {
                continue;
            }
            events.push(Self::parse_confirmation_log(&log)?);
        }

        Ok(events)
    }
}
