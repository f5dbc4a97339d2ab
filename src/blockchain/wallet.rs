//! Deployer key handling and EIP-155 signing.
//!
//! The key comes from `PRIVATE_KEY` and nowhere else. It is never logged,
//! serialized or shown by `Debug`.

use alloy::consensus::{SignableTransaction, TxEnvelope, TxLegacy};
use alloy::eips::eip2718::Encodable2718;
use alloy::network::TxSignerSync;
use alloy::primitives::{Address, Bytes, TxHash};
use alloy::signers::local::PrivateKeySigner;

use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// Holds the hex private key of the deploying account.
pub const PRIVATE_KEY_ENV_VAR: &str = "PRIVATE_KEY";

/// A signed transaction ready for `eth_sendRawTransaction`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedDeploy {
    /// Hash of the signed transaction.
    pub tx_hash: TxHash,
    /// EIP-2718 encoded transaction.
    pub raw: Bytes,
}

/// Signing key bound to the chain it signs for.
#[derive(Clone)]
pub struct Wallet {
    signer: PrivateKeySigner,
    /// Folded into every signature (EIP-155).
    chain_id: u64,
}

impl Wallet {
    /// Parse a 32-byte hex key; surrounding whitespace and `0x` are accepted.
    pub fn from_private_key(key: &str, chain_id: u64) -> BlockchainResult<Self> {
        let key = key.trim();
        let signer = key
            .strip_prefix("0x")
            .unwrap_or(key)
            .parse::<PrivateKeySigner>()
            .map_err(|e| BlockchainError::Wallet(format!("Invalid private key: {e}")))?;

        tracing::debug!(sender = %signer.address(), chain_id = chain_id, "Deployer key loaded");

        Ok(Self { signer, chain_id })
    }

    /// Read the key from `PRIVATE_KEY`.
    pub fn from_env(chain_id: u64) -> BlockchainResult<Self> {
        Self::from_env_var(PRIVATE_KEY_ENV_VAR, chain_id)
    }

    /// Read the key from the environment variable `var`.
    pub fn from_env_var(var: &str, chain_id: u64) -> BlockchainResult<Self> {
        match std::env::var(var) {
            Ok(key) if !key.trim().is_empty() => Self::from_private_key(&key, chain_id),
            _ => Err(BlockchainError::Wallet(format!("{var} is not set"))),
        }
    }

    /// Address controlled by the key.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Sign a contract creation transaction.
    ///
    /// The transaction must carry this wallet's chain id; it is what EIP-155
    /// folds into the signature.
    pub fn sign_deploy(&self, mut tx: TxLegacy) -> BlockchainResult<SignedDeploy> {
        if tx.chain_id != Some(self.chain_id) {
            return Err(BlockchainError::ChainMismatch {
                expected: self.chain_id,
                actual: tx.chain_id.unwrap_or_default(),
            });
        }

        let signature = self
            .signer
            .sign_transaction_sync(&mut tx)
            .map_err(|e| BlockchainError::Wallet(format!("Signing failed: {}", e)))?;

        let envelope = TxEnvelope::from(tx.into_signed(signature));
        let tx_hash = *envelope.tx_hash();
        let raw = Bytes::from(envelope.encoded_2718());

        tracing::debug!(tx_hash = %tx_hash, raw_len = raw.len(), "Transaction signed");

        Ok(SignedDeploy { tx_hash, raw })
    }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address())
            .field("chain_id", &self.chain_id)
            .finish_non_exhaustive()
    }
}
