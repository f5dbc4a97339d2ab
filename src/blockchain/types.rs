//! Shared blockchain types: chain id, receipt summary and the error enum.

use alloy::primitives::{Address, TxHash};
use thiserror::Error;

pub use crate::config::schema::NetworkConfig;

/// EIP-155 chain id as reported by `eth_chainId`.
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

    /// No receipt appeared within the configured wait.
    #[error("Transaction {tx_hash} has no receipt after {waited_secs} seconds")]
    ReceiptTimeout { tx_hash: TxHash, waited_secs: u64 },

    /// Transaction was reverted on-chain.
    #[error("Transaction reverted: {0}")]
    Reverted(TxHash),

    /// Receipt of a contract creation carried no contract address.
    #[error("Receipt for {0} has no contract address")]
    MissingContractAddress(TxHash),

    /// Invalid private key format or signing failure.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// The parts of a transaction receipt a deployment cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployReceipt {
    pub tx_hash: TxHash,
    pub contract_address: Option<Address>,
    pub block_number: Option<u64>,
    pub gas_used: u64,
    pub success: bool,
}
