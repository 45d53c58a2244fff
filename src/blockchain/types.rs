//! Chain-specific types and error definitions.

use alloy::primitives::TxHash;
use thiserror::Error;

pub use crate::config::schema::BlockchainConfig;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Transaction was not confirmed within the configured wait.
    #[error("Transaction {tx_hash} not confirmed after {secs} seconds")]
    ConfirmationTimeout { tx_hash: TxHash, secs: u64 },

    /// Transaction was reverted on-chain.
    #[error("Transaction reverted: {0}")]
    Reverted(TxHash),

    /// Contract call failed (revert on eth_call, ABI decode, submission).
    #[error("Contract call {method} failed: {message}")]
    Contract { method: &'static str, message: String },

    /// Invalid private key format or missing key.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },

    /// A block, receipt or field the node should have returned is missing.
    #[error("Not available: {0}")]
    NotAvailable(String),
}

impl BlockchainError {
    /// Wrap a contract-call error with the method name.
    pub fn contract(method: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Contract {
            method,
            message: err.to_string(),
        }
    }
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// Transaction confirmation status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationStatus {
    /// Transaction is not yet mined.
    Pending,
    /// Transaction has been mined but not enough confirmations.
    Confirming { current: u64, required: u64 },
    /// Transaction is confirmed with required block depth.
    Confirmed { block_number: u64 },
}

/// Number of confirmations a transaction mined in `tx_block` has at
/// `current_block`. The inclusion block itself counts as the first.
pub fn confirmations_at(tx_block: u64, current_block: u64) -> u64 {
    if current_block < tx_block {
        0
    } else {
        current_block - tx_block + 1
    }
}
