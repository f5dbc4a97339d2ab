//! Deployment events, outcomes and errors.

use alloy::primitives::{Address, TxHash, U256};
use thiserror::Error;

use crate::blockchain::address::to_checksum_address;
use crate::blockchain::{AddressError, BlockchainError};
use crate::compiler::CompileError;
use crate::config::DeployConfig;

/// Progress notifications emitted while a deployment runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployEvent {
    /// Source compiled.
    Compiled { bytecode_len: usize },
    /// Sender address derived from the configured identifier.
    AddressResolved { address: Address, account_id: String },
    /// Sender balance in wei.
    Balance { wei: U256 },
    /// Nonce and gas price fetched, transaction being assembled.
    Building { nonce: u64, gas_price: u128 },
    Signing,
    Broadcasting,
    /// Transaction accepted by the node.
    AwaitingReceipt { tx_hash: TxHash },
}

/// How a deployment run ended, when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    /// Contract created.
    Deployed {
        contract_address: Address,
        tx_hash: TxHash,
        block_number: Option<u64>,
        gas_used: u64,
    },
    /// The sender has no funds; nothing was built, signed or sent.
    Unfunded { address: Address },
}

/// Any failure inside the deployment flow.
#[derive(Debug, Error)]
pub enum DeployError {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error("invalid sender address: {0}")]
    Address(#[from] AddressError),

    #[error(transparent)]
    Blockchain(#[from] BlockchainError),

    #[error("configured address {configured} does not belong to the private key (key address {signer})")]
    SenderMismatch { configured: Address, signer: Address },
}

/// Context printed alongside a failed deployment.
///
/// Holds nothing secret; the private key is never part of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugContext {
    pub rpc_url: String,
    pub chain_id: u64,
    pub address: String,
    pub account_id: String,
}

impl DebugContext {
    /// Build the context from configuration, checksumming the address when it parses.
    pub fn from_config(config: &DeployConfig) -> Self {
        let raw = &config.account.address;
        Self {
            rpc_url: config.network.rpc_url.clone(),
            chain_id: config.network.chain_id,
            address: to_checksum_address(raw).unwrap_or_else(|_| raw.clone()),
            account_id: config.account.account_id.clone(),
        }
    }
}

impl std::fmt::Display for DebugContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "RPC URL: {}", self.rpc_url)?;
        writeln!(f, "Chain ID: {}", self.chain_id)?;
        writeln!(f, "Address: {}", self.address)?;
        write!(f, "Account ID: {}", self.account_id)
    }
}
