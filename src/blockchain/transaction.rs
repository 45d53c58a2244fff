//! Transaction confirmation monitoring.
//!
//! # Responsibilities
//! - Poll for the receipt of a submitted transaction
//! - Treat reverted receipts as errors
//! - Wait until the requested number of confirmations has been observed
//!
//! There is no timeout unless `confirmation_timeout_secs` is configured; a
//! stalled network keeps the caller waiting.

use alloy::primitives::TxHash;
use std::future::Future;
use std::time::Duration;
use tokio::time::{interval, timeout, MissedTickBehavior};

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::types::{
    confirmations_at, BlockchainError, BlockchainResult, ConfirmationStatus,
};

/// Something that can block until a transaction is confirmed.
pub trait Confirmer {
    /// Wait for `required` confirmations of `tx_hash`, returning the block
    /// number the transaction was mined in.
    fn wait_for_confirmations(
        &self,
        tx_hash: TxHash,
        required: u64,
    ) -> impl Future<Output = BlockchainResult<u64>> + Send;
}

/// Polls the chain for receipts and confirmation depth.
#[derive(Debug, Clone)]
pub struct ConfirmationWaiter {
    client: BlockchainClient,
    poll_interval: Duration,
    max_wait: Option<Duration>,
}

impl ConfirmationWaiter {
    /// Create a waiter using the client's configured poll interval and timeout.
    pub fn new(client: BlockchainClient) -> Self {
        let config = client.config();
        let poll_interval = Duration::from_millis(config.confirmation_poll_ms);
        let max_wait = config.confirmation_timeout_secs.map(Duration::from_secs);
        Self {
            client,
            poll_interval,
            max_wait,
        }
    }

    /// Check the current confirmation status once.
    pub async fn status(&self, tx_hash: TxHash, required: u64) -> BlockchainResult<ConfirmationStatus> {
        let receipt = match self.client.get_transaction_receipt(tx_hash).await? {
            Some(r) => r,
            None => return Ok(ConfirmationStatus::Pending),
        };

        let current_block = self.client.get_block_number().await?;
        receipt_status(tx_hash, receipt.status(), receipt.block_number, current_block, required)
    }

    async fn poll_until_confirmed(&self, tx_hash: TxHash, required: u64) -> BlockchainResult<u64> {
        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            match self.status(tx_hash, required).await? {
                ConfirmationStatus::Confirmed { block_number } => return Ok(block_number),
                ConfirmationStatus::Pending => {
                    tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
                }
                ConfirmationStatus::Confirming { current, required } => {
                    tracing::debug!(
                        tx_hash = %tx_hash,
                        confirmations = current,
                        required = required,
                        "Waiting for confirmations"
                    );
                }
            }
        }
    }
}

/// Classify a mined receipt against the current head.
///
/// A reverted receipt is an error however deep it is buried; a receipt
/// without a block number counts as mined at the head.
pub fn receipt_status(
    tx_hash: TxHash,
    succeeded: bool,
    tx_block: Option<u64>,
    current_block: u64,
    required: u64,
) -> BlockchainResult<ConfirmationStatus> {
    if !succeeded {
        return Err(BlockchainError::Reverted(tx_hash));
    }

    let tx_block = tx_block.unwrap_or(current_block);
    let current = confirmations_at(tx_block, current_block);
    if current >= required {
        Ok(ConfirmationStatus::Confirmed { block_number: tx_block })
    } else {
        Ok(ConfirmationStatus::Confirming { current, required })
    }
}

impl Confirmer for ConfirmationWaiter {
    async fn wait_for_confirmations(&self, tx_hash: TxHash, required: u64) -> BlockchainResult<u64> {
        let block_number = match self.max_wait {
            Some(limit) => timeout(limit, self.poll_until_confirmed(tx_hash, required))
                .await
                .map_err(|_| BlockchainError::ConfirmationTimeout {
                    tx_hash,
                    secs: limit.as_secs(),
                })??,
            None => self.poll_until_confirmed(tx_hash, required).await?,
        };

        tracing::info!(
            tx_hash = %tx_hash,
            block_number = block_number,
            confirmations = required,
            "Transaction confirmed"
        );
        Ok(block_number)
    }
}
