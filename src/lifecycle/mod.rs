//! Process lifecycle.
//!
//! # Data Flow
//! ```text
//! CLI options + environment
//!     → startup.rs (.env, config, logging, deployment, report)
//!     → RunStatus → process exit code
//! ```

pub mod startup;

pub use startup::{run, RunStatus, StartupOptions};
