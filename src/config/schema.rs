//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for a deployment.
//! All types derive Serde traits for deserialization from config files.
//! The private key is deliberately absent: it is only ever read from the
//! environment by [`crate::blockchain::Wallet::from_env`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration for a deployment run.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DeployConfig {
    /// JSON-RPC endpoint and chain settings.
    pub network: NetworkConfig,

    /// Deploying account.
    pub account: AccountConfig,

    /// Contract source and compiler selection.
    pub contract: ContractConfig,

    /// Transaction parameters and receipt polling.
    pub transaction: TransactionConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Network configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Chain ID used for EIP-155 signing (296 for Hedera testnet).
    pub chain_id: u64,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Symbol of the native currency, used when printing balances.
    pub currency_symbol: String,

    /// Where to point users whose account has no funds.
    pub faucet_url: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://testnet.hashio.io/api".to_string(),
            chain_id: 296,
            rpc_timeout_secs: 30,
            currency_symbol: "HBAR".to_string(),
            faucet_url: "https://portal.hedera.com/".to_string(),
        }
    }
}

/// Deploying account configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AccountConfig {
    /// EVM address or Hedera long-form identifier of the sender.
    pub address: String,

    /// Hedera account id (e.g. `0.0.12345`), informational only.
    pub account_id: String,
}

/// Contract compiler selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompilerKind {
    Vyper,
    Solc,
}

impl CompilerKind {
    /// Guess the compiler from a source file extension.
    pub fn from_extension(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "vy" => Some(Self::Vyper),
            "sol" => Some(Self::Solc),
            _ => None,
        }
    }

    /// Default executable name looked up on `PATH`.
    pub fn default_binary(&self) -> &'static str {
        match self {
            Self::Vyper => "vyper",
            Self::Solc => "solc",
        }
    }
}

impl std::fmt::Display for CompilerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.default_binary())
    }
}

/// Contract source configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Path to the contract source file.
    pub source_path: PathBuf,

    /// Compiler to use. Inferred from the file extension when unset.
    pub compiler: Option<CompilerKind>,

    /// Explicit compiler executable.
    pub compiler_path: Option<PathBuf>,

    /// Contract to deploy when the source defines several (solc only).
    pub contract_name: Option<String>,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from("favorites.vy"),
            compiler: None,
            compiler_path: None,
            contract_name: None,
        }
    }
}

impl ContractConfig {
    /// The compiler that will actually run for this source.
    pub fn resolved_compiler(&self) -> Option<CompilerKind> {
        self.compiler
            .or_else(|| CompilerKind::from_extension(&self.source_path))
    }
}

/// Transaction configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TransactionConfig {
    /// Gas limit for the contract creation transaction.
    pub gas_limit: u64,

    /// Maximum time to wait for a receipt in seconds.
    pub receipt_timeout_secs: u64,

    /// Receipt polling interval in milliseconds.
    pub receipt_poll_interval_ms: u64,
}

impl Default for TransactionConfig {
    fn default() -> Self {
        Self {
            gas_limit: 3_000_000,
            receipt_timeout_secs: 120,
            receipt_poll_interval_ms: 1000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
