//! Deployment subsystem.
//!
//! # Data Flow
//! ```text
//! DeployConfig
//!     → flow.rs (compile, resolve sender, check balance, load key, build, sign,
//!                broadcast, wait for receipt)
//!     → DeployEvent stream
//!     → report.rs (console lines printed by the binary)
//!     → DeployOutcome | DeployError
//! ```

pub mod flow;
pub mod report;
pub mod types;

pub use flow::{deploy_from_config, Deployer, SigningKey};
pub use types::{DebugContext, DeployError, DeployEvent, DeployOutcome};
