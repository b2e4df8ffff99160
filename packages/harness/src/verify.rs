//! Confirmation polling
//!
//! Scans a trailing block window on the destination chain for the
//! MessageReceived event, sleeping between attempts. Scanning only the
//! trailing window bounds query cost; polling starts right after the send,
//! so nothing older than the window can be the event we are waiting for.
//!
//! Two states: polling, done. "No event yet" re-polls; everything else
//! terminates. A payload mismatch is a terminal outcome, not an error, and
//! a chain-access failure aborts the poll rather than being retried.

use alloy::primitives::Address;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, info};

use xchain_rs::{decode_message, ChainClient, RelayError, VerificationOutcome};

use crate::config::PollerConfig;

/// Polls the destination chain until the confirmation event shows up
pub struct ConfirmationPoller {
    poll_interval: Duration,
    lookback_blocks: u64,
    timeout: Option<Duration>,
}

impl ConfirmationPoller {
    /// Build a poller from configuration
    pub fn new(config: &PollerConfig) -> Self {
        Self {
            poll_interval: config.poll_interval,
            lookback_blocks: config.lookback_blocks,
            timeout: config.timeout,
        }
    }

    /// Poll until a MessageReceived event appears on `pong`, then compare
    /// its decoded payload against `original`.
    ///
    /// Without a configured deadline this polls indefinitely; with one, it
    /// fails with [`RelayError::ConfirmationTimeout`] once the deadline
    /// passes with no event observed.
    pub async fn await_confirmation(
        &self,
        dest: &dyn ChainClient,
        pong: Address,
        original: &str,
    ) -> Result<VerificationOutcome, RelayError> {
        info!(
            network = dest.network(),
            pong = %pong,
            "Verifying message on {}...",
            dest.network()
        );

        let started = Instant::now();
        let mut attempts: u64 = 0;

        loop {
            let head = dest.block_number().await?;
            let from_block = head.saturating_sub(self.lookback_blocks);

            let events = dest.confirmation_events(pong, from_block, None).await?;
            attempts += 1;

            if let Some(event) = events.into_iter().min_by_key(|e| e.block_number) {
                let actual = decode_message(&event.payload)?;

                return Ok(if actual == original {
                    info!(
                        block_number = event.block_number,
                        "Message received with: {}", actual
                    );
                    VerificationOutcome::Success {
                        text: actual,
                        block_number: event.block_number,
                    }
                } else {
                    VerificationOutcome::Mismatch {
                        expected: original.to_string(),
                        actual,
                    }
                });
            }

            debug!(attempts, from_block, "Listening for event...");

            if let Some(limit) = self.timeout {
                if started.elapsed() >= limit {
                    return Err(RelayError::ConfirmationTimeout {
                        waited_secs: started.elapsed().as_secs(),
                    });
                }
            }

            sleep(self.poll_interval).await;
        }
    }
}
