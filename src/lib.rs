//! Contract deployment library.
//!
//! Compiles a contract source file and deploys it to an EVM-compatible
//! network (Hedera testnet by default) over JSON-RPC.

pub mod blockchain;
pub mod compiler;
pub mod config;
pub mod deploy;
pub mod lifecycle;
pub mod observability;

pub use config::DeployConfig;
pub use deploy::{deploy_from_config, DeployError, DeployOutcome};
