//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env file (optional, never overrides the real environment)
//!     → config file (TOML, optional)
//!     → loader.rs (parse, overlay RPC_URL / MY_ADDRESS / ACCOUNT_ID / ...)
//!     → CLI flags
//!     → validation.rs (semantic checks)
//!     → DeployConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so an environment-only setup works
//! - The private key is not part of the config; it stays in the environment
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config_with, load_env_file, ConfigError};
pub use schema::{
    AccountConfig, CompilerKind, ContractConfig, DeployConfig, NetworkConfig,
    ObservabilityConfig, TransactionConfig,
};
pub use validation::ValidationError;
