//! The deployment procedure.
//!
//! compile → resolve sender → balance → load key → nonce/gas price → build →
//! sign → broadcast → wait for receipt. Strictly sequential; nothing is retried.
//! The private key is not read until the balance is known to be non-zero.

use alloy::primitives::U256;
use std::time::Duration;

use crate::blockchain::wallet::PRIVATE_KEY_ENV_VAR;
use crate::blockchain::{
    build_deploy_tx, normalize_address, wait_for_receipt, BlockchainClient, BlockchainResult,
    ChainRpc, DeployRequest, Wallet,
};
use crate::compiler::{Compiler, ContractCompiler};
use crate::config::DeployConfig;
use crate::deploy::types::{DeployError, DeployEvent, DeployOutcome};

/// Where the signing key comes from.
#[derive(Debug, Clone)]
pub enum SigningKey {
    /// A key that is already loaded.
    Wallet(Wallet),
    /// Read from this environment variable when a signature is first needed.
    Env(String),
}

impl SigningKey {
    fn load(&self, chain_id: u64) -> BlockchainResult<Wallet> {
        match self {
            Self::Wallet(wallet) => Ok(wallet.clone()),
            Self::Env(var) => Wallet::from_env_var(var, chain_id),
        }
    }
}

impl From<Wallet> for SigningKey {
    fn from(wallet: Wallet) -> Self {
        Self::Wallet(wallet)
    }
}

/// Runs one deployment against a node with a compiler and a signing key.
#[derive(Debug)]
pub struct Deployer<R, C> {
    config: DeployConfig,
    rpc: R,
    compiler: C,
    key: SigningKey,
}

impl<R: ChainRpc, C: Compiler> Deployer<R, C> {
    pub fn new(config: DeployConfig, rpc: R, compiler: C, key: impl Into<SigningKey>) -> Self {
        Self {
            config,
            rpc,
            compiler,
            key: key.into(),
        }
    }

    /// The node this deployer talks to.
    pub fn rpc(&self) -> &R {
        &self.rpc
    }

    /// Run the deployment, reporting progress to `observer`.
    ///
    /// A zero balance ends the run with [`DeployOutcome::Unfunded`] before
    /// the nonce is even fetched.
    pub async fn run<F>(&self, mut observer: F) -> Result<DeployOutcome, DeployError>
    where
        F: FnMut(DeployEvent),
    {
        let source = &self.config.contract.source_path;
        let compiled = self.compiler.compile(source).await?;
        let payload = compiled.deploy_payload()?;
        observer(DeployEvent::Compiled {
            bytecode_len: compiled.bytecode.len(),
        });

        let address = normalize_address(&self.config.account.address)?;
        observer(DeployEvent::AddressResolved {
            address,
            account_id: self.config.account.account_id.clone(),
        });

        let balance = self.rpc.balance(address).await?;
        tracing::info!(address = %address, balance = %balance, "Sender balance");
        observer(DeployEvent::Balance { wei: balance });

        if balance == U256::ZERO {
            tracing::warn!(address = %address, "Sender has no funds, nothing deployed");
            return Ok(DeployOutcome::Unfunded { address });
        }

        let wallet = self.key.load(self.config.network.chain_id)?;
        if address != wallet.address() {
            return Err(DeployError::SenderMismatch {
                configured: address,
                signer: wallet.address(),
            });
        }

        let nonce = self.rpc.transaction_count(address).await?;
        let gas_price = self.rpc.gas_price().await?;
        observer(DeployEvent::Building { nonce, gas_price });

        let request = DeployRequest {
            chain_id: self.config.network.chain_id,
            nonce,
            gas_limit: self.config.transaction.gas_limit,
            gas_price,
            payload,
        };
        let tx = build_deploy_tx(&request);

        observer(DeployEvent::Signing);
        let signed = wallet.sign_deploy(tx)?;

        observer(DeployEvent::Broadcasting);
        let tx_hash = self.rpc.send_raw_transaction(&signed.raw).await?;
        if tx_hash != signed.tx_hash {
            tracing::warn!(
                local = %signed.tx_hash,
                remote = %tx_hash,
                "Node returned a different transaction hash"
            );
        }
        tracing::info!(tx_hash = %tx_hash, nonce = nonce, gas_price = gas_price, "Deployment broadcast");
        observer(DeployEvent::AwaitingReceipt { tx_hash });

        let tx_config = &self.config.transaction;
        let created = wait_for_receipt(
            &self.rpc,
            tx_hash,
            Duration::from_secs(tx_config.receipt_timeout_secs),
            Duration::from_millis(tx_config.receipt_poll_interval_ms),
        )
        .await?;

        Ok(DeployOutcome::Deployed {
            contract_address: created.contract_address,
            tx_hash,
            block_number: created.receipt.block_number,
            gas_used: created.receipt.gas_used,
        })
    }
}

/// Wire the production client and compiler from configuration and run.
///
/// The private key is read from `PRIVATE_KEY` only once the sender is known
/// to be funded, so an unfunded account gets faucet guidance even without a key.
pub async fn deploy_from_config<F>(
    config: &DeployConfig,
    observer: F,
) -> Result<DeployOutcome, DeployError>
where
    F: FnMut(DeployEvent),
{
    let compiler = ContractCompiler::from_config(&config.contract)?;
    let client = BlockchainClient::new(config.network.clone()).await?;

    tracing::debug!(compiler = %compiler.kind(), ?client, "Deployment wired");

    Deployer::new(
        config.clone(),
        client,
        compiler,
        SigningKey::Env(PRIVATE_KEY_ENV_VAR.to_string()),
    )
    .run(observer)
    .await
}
