//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! MY_ADDRESS
//!     → address.rs (normalize + checksum)
//! PRIVATE_KEY
//!     → wallet.rs (key loading, signing)
//! RPC_URL
//!     → client.rs (RPC connection with timeouts)
//!     → transaction.rs (build, poll for receipt)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod address;
pub mod client;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use address::{normalize_address, AddressError};
pub use client::{BlockchainClient, ChainRpc};
pub use transaction::{build_deploy_tx, wait_for_receipt, CreatedContract, DeployRequest};
pub use types::{BlockchainError, BlockchainResult, ChainId, DeployReceipt};
pub use wallet::{SignedDeploy, Wallet};
