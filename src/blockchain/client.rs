//! JSON-RPC access for deployments, every call bounded by a timeout.
//!
//! # Responsibilities
//! - Connect to the JSON-RPC endpoint
//! - Query chain state (chain id, balance, nonce, gas price, receipts)
//! - Submit raw signed transactions
//! - Bound every call with the configured timeout
//!
//! Failed calls are reported, never retried.

use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{Provider, ProviderBuilder};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::types::{
    BlockchainError, BlockchainResult, ChainId, DeployReceipt, NetworkConfig,
};

/// The JSON-RPC calls a deployment needs.
///
/// [`BlockchainClient`] is the production implementation; tests substitute
/// in-memory nodes.
pub trait ChainRpc {
    /// `eth_chainId`
    fn chain_id(&self) -> impl Future<Output = BlockchainResult<ChainId>> + Send;

    /// `eth_getBalance` at the latest block.
    fn balance(&self, address: Address) -> impl Future<Output = BlockchainResult<U256>> + Send;

    /// `eth_getTransactionCount` at the latest block.
    fn transaction_count(
        &self,
        address: Address,
    ) -> impl Future<Output = BlockchainResult<u64>> + Send;

    /// `eth_gasPrice`
    fn gas_price(&self) -> impl Future<Output = BlockchainResult<u128>> + Send;

    /// `eth_sendRawTransaction`
    fn send_raw_transaction(
        &self,
        raw: &[u8],
    ) -> impl Future<Output = BlockchainResult<TxHash>> + Send;

    /// `eth_getTransactionReceipt`; `None` while the transaction is pending.
    fn transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> impl Future<Output = BlockchainResult<Option<DeployReceipt>>> + Send;
}

/// Blockchain RPC client wrapper.
#[derive(Clone)]
pub struct BlockchainClient {
    /// Provider for the configured endpoint.
    provider: Arc<dyn Provider + Send + Sync>,
    /// Configuration.
    config: NetworkConfig,
    /// Request timeout duration.
    timeout_duration: Duration,
}

impl BlockchainClient {
    /// Connect to `config.rpc_url`.
    ///
    /// Fails only on a malformed URL. An unreachable node or a chain id
    /// mismatch is logged here and left for the first real call to report.
    pub async fn new(config: NetworkConfig) -> BlockchainResult<Self> {
        let timeout_duration = Duration::from_secs(config.rpc_timeout_secs);

        let url: url::Url = config.rpc_url.parse().map_err(|e| {
            BlockchainError::Rpc(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;
        let provider: Arc<dyn Provider + Send + Sync> =
            Arc::new(ProviderBuilder::new().connect_http(url));

        let client = Self {
            provider,
            config,
            timeout_duration,
        };

        match client.verify_chain_id().await {
            Ok(()) => {
                tracing::info!(
                    rpc_url = %client.config.rpc_url,
                    chain_id = client.config.chain_id,
                    "Connected to JSON-RPC node"
                );
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Connected without confirming the chain id"
                );
            }
        }

        Ok(client)
    }

    /// Verify the connected chain ID matches configuration.
    pub async fn verify_chain_id(&self) -> BlockchainResult<()> {
        let chain_id = self.chain_id().await?;
        if chain_id.0 != self.config.chain_id {
            return Err(BlockchainError::ChainMismatch {
                expected: self.config.chain_id,
                actual: chain_id.0,
            });
        }
        Ok(())
    }

    /// Get the configuration.
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Await an RPC future under the client timeout.
    async fn call<T, E, F>(&self, method: &'static str, fut: F) -> BlockchainResult<T>
    where
        F: std::future::IntoFuture<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(e)) => {
                tracing::warn!(method = method, error = %e, "RPC error");
                Err(BlockchainError::Rpc(format!("{method} failed: {e}")))
            }
            Err(_) => {
                tracing::warn!(method = method, "RPC timeout");
                Err(BlockchainError::Timeout(self.timeout_duration.as_secs()))
            }
        }
    }
}

impl ChainRpc for BlockchainClient {
    async fn chain_id(&self) -> BlockchainResult<ChainId> {
        self.call("eth_chainId", self.provider.get_chain_id())
            .await
            .map(ChainId)
    }

    async fn balance(&self, address: Address) -> BlockchainResult<U256> {
        self.call("eth_getBalance", self.provider.get_balance(address))
            .await
    }

    async fn transaction_count(&self, address: Address) -> BlockchainResult<u64> {
        self.call(
            "eth_getTransactionCount",
            self.provider.get_transaction_count(address),
        )
        .await
    }

    async fn gas_price(&self) -> BlockchainResult<u128> {
        self.call("eth_gasPrice", self.provider.get_gas_price())
            .await
    }

    async fn send_raw_transaction(&self, raw: &[u8]) -> BlockchainResult<TxHash> {
        let pending = self
            .call(
                "eth_sendRawTransaction",
                self.provider.send_raw_transaction(raw),
            )
            .await?;
        Ok(*pending.tx_hash())
    }

    async fn transaction_receipt(&self, tx_hash: TxHash) -> BlockchainResult<Option<DeployReceipt>> {
        let receipt = self
            .call(
                "eth_getTransactionReceipt",
                self.provider.get_transaction_receipt(tx_hash),
            )
            .await?;

        Ok(receipt.map(|r| DeployReceipt {
            tx_hash: r.transaction_hash,
            contract_address: r.contract_address,
            block_number: r.block_number,
            gas_used: r.gas_used,
            success: r.status(),
        }))
    }
}

impl std::fmt::Debug for BlockchainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockchainClient")
            .field("rpc_url", &self.config.rpc_url)
            .field("chain_id", &self.config.chain_id)
            .field("timeout_secs", &self.config.rpc_timeout_secs)
            .finish()
    }
}
