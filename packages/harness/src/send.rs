//! Fee-aware message sending
//!
//! Encodes the message, asks the origin contract's message bus for a relay
//! fee quote, doubles it, and submits `sendPing` with that value attached.

use alloy::primitives::{utils::format_ether, Address, U256};
use tracing::info;

use xchain_rs::{encode_message, ChainClient, ChainId, RelayError, SendResult};

/// Safety multiplier applied to the quoted relay fee.
///
/// The bus quote is a best-effort estimate taken before the send; if the fee
/// drifts upward in between, an underpaid message fails to relay while the
/// transaction itself still succeeds. Doubling the quote absorbs the drift.
pub const FEE_SAFETY_MULTIPLIER: u64 = 2;

/// Send `message` from a deployed Ping to a Pong on the destination chain
pub async fn send_ping(
    origin: &dyn ChainClient,
    ping: Address,
    pong: Address,
    dest_chain_id: ChainId,
    message: &str,
) -> Result<SendResult, RelayError> {
    info!(
        network = origin.network(),
        message,
        "Sending message on {}...",
        origin.network()
    );

    let payload = encode_message(message)?;

    let message_bus = origin.message_bus_of(ping).await?;

    info!(message_bus = %message_bus, "Calculating fee...");
    let quoted = origin.quote_fee(message_bus, payload).await?;

    let fee = quoted
        .checked_mul(U256::from(FEE_SAFETY_MULTIPLIER))
        .ok_or_else(|| RelayError::SendFailed("fee quote overflows the value field".to_string()))?;

    info!(
        quoted = %quoted,
        attached = %fee,
        "Fee: {} (native units)",
        format_ether(fee)
    );

    let tx_hash = origin
        .send_ping(ping, pong, dest_chain_id, payload, fee)
        .await?;

    info!(tx_hash = %tx_hash, "Message sent");

    Ok(SendResult {
        tx_hash,
        fee_paid: fee,
        dest_chain_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use xchain_rs::testing::MockChain;

    fn addr(b: u8) -> Address {
        Address::with_last_byte(b)
    }

    #[tokio::test]
    async fn test_attached_value_is_exactly_twice_the_quote() {
        for quote in [0u64, 1, 7, 1_000, u64::MAX / 2] {
            let chain = MockChain::new("bsc-testnet").with_fee(U256::from(quote));

            let result = send_ping(&chain, addr(1), addr(2), ChainId::new(23295), "ping")
                .await
                .unwrap();

            let expected = U256::from(quote) * U256::from(2u64);
            assert_eq!(result.fee_paid, expected);

            let sent = chain.sent();
            assert_eq!(sent.len(), 1);
            assert_eq!(sent[0].value, expected);
        }
    }

    #[tokio::test]
    async fn test_payload_and_routing_are_forwarded() {
        let chain = MockChain::new("bsc-testnet");
        let result = send_ping(&chain, addr(1), addr(2), ChainId::new(23295), "Hello from BSC")
            .await
            .unwrap();

        assert_eq!(result.dest_chain_id, ChainId::new(23295));

        let sent = chain.sent();
        assert_eq!(sent[0].ping, addr(1));
        assert_eq!(sent[0].pong, addr(2));
        assert_eq!(sent[0].payload, encode_message("Hello from BSC").unwrap());
        assert_eq!(chain.quote_count(), 1);
    }

    #[tokio::test]
    async fn test_send_failure_is_surfaced_unchanged() {
        let chain = MockChain::new("bsc-testnet");
        chain.fail_sends(RelayError::InsufficientFee(
            "execution reverted: insufficient fee".to_string(),
        ));

        let err = send_ping(&chain, addr(1), addr(2), ChainId::new(23295), "ping")
            .await
            .unwrap_err();

        assert!(matches!(err, RelayError::InsufficientFee(_)));
        // the fee was quoted, but the failed send recorded nothing
        assert_eq!(chain.quote_count(), 1);
        assert!(chain.sent().is_empty());
    }

    #[tokio::test]
    async fn test_oversized_message_fails_before_any_chain_call() {
        let chain = MockChain::new("bsc-testnet");
        let long = "x".repeat(33);

        let err = send_ping(&chain, addr(1), addr(2), ChainId::new(1), &long)
            .await
            .unwrap_err();

        assert!(matches!(err, RelayError::MessageTooLong { len: 33, .. }));
        assert_eq!(chain.quote_count(), 0);
        assert!(chain.sent().is_empty());
    }
}
