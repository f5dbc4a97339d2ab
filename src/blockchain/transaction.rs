//! Contract creation transactions and receipt polling.
//!
//! # Responsibilities
//! - Build the unsigned contract creation transaction
//! - Poll for the receipt of a broadcast transaction
//!
//! Legacy (type 0) transactions are used because the Hedera JSON-RPC relay
//! prices gas with a single `gasPrice`.

use alloy::consensus::TxLegacy;
use alloy::primitives::{Address, Bytes, TxHash, TxKind, U256};
use std::time::Duration;
use tokio::time::{interval, timeout, MissedTickBehavior};

use crate::blockchain::client::ChainRpc;
use crate::blockchain::types::{BlockchainError, BlockchainResult, DeployReceipt};

/// Everything that goes into an unsigned deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployRequest {
    pub chain_id: u64,
    pub nonce: u64,
    pub gas_limit: u64,
    /// Gas price in wei.
    pub gas_price: u128,
    /// Creation bytecode followed by any encoded constructor arguments.
    pub payload: Bytes,
}

/// Build the unsigned contract creation transaction.
///
/// Pure: the same request always yields the same signing payload.
pub fn build_deploy_tx(request: &DeployRequest) -> TxLegacy {
    TxLegacy {
        chain_id: Some(request.chain_id),
        nonce: request.nonce,
        gas_price: request.gas_price,
        gas_limit: request.gas_limit,
        to: TxKind::Create,
        value: U256::ZERO,
        input: request.payload.clone(),
    }
}

/// A mined, successful contract creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedContract {
    pub contract_address: Address,
    pub receipt: DeployReceipt,
}

/// Wait for a transaction receipt.
///
/// # Arguments
/// * `rpc` - Node to poll
/// * `tx_hash` - Transaction hash to monitor
/// * `wait` - Maximum time to wait for the receipt
/// * `poll_interval` - Delay between `eth_getTransactionReceipt` calls
///
/// A reverted transaction, or a successful one that created no contract, is an error.
pub async fn wait_for_receipt<R: ChainRpc>(
    rpc: &R,
    tx_hash: TxHash,
    wait: Duration,
    poll_interval: Duration,
) -> BlockchainResult<CreatedContract> {
    let result = timeout(wait, async {
        let mut ticker = interval(poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            match rpc.transaction_receipt(tx_hash).await {
                Ok(Some(receipt)) => return Ok(receipt),
                Ok(None) => tracing::debug!(tx_hash = %tx_hash, "Transaction pending"),
                Err(e) => return Err(e),
            }
        }
    })
    .await;

    let receipt = match result {
        Ok(receipt) => receipt?,
        Err(_) => {
            return Err(BlockchainError::ReceiptTimeout {
                tx_hash,
                waited_secs: wait.as_secs(),
            })
        }
    };

    if !receipt.success {
        return Err(BlockchainError::Reverted(tx_hash));
    }
    let Some(contract_address) = receipt.contract_address else {
        return Err(BlockchainError::MissingContractAddress(tx_hash));
    };

    tracing::info!(
        tx_hash = %tx_hash,
        contract_address = %contract_address,
        block_number = ?receipt.block_number,
        gas_used = receipt.gas_used,
        "Receipt received"
    );

    Ok(CreatedContract {
        contract_address,
        receipt,
    })
}
