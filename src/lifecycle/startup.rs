//! Startup orchestration.
//!
//! # Responsibilities
//! - Load the `.env` file and layered configuration
//! - Initialize logging
//! - Run the deployment and print the report
//!
//! # Design Decisions
//! - Only configuration errors are fatal; they happen before anything is printed
//! - A failed deployment is reported on stdout and still counts as a normal exit

use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::{load_config_with, load_env_file, ConfigError};
use crate::deploy::report::{describe_event, describe_failure, describe_outcome};
use crate::deploy::{deploy_from_config, DebugContext, DeployError, DeployOutcome};
use crate::observability::init_logging;

/// Command-line choices that override configuration.
#[derive(Debug, Clone, Default)]
pub struct StartupOptions {
    /// TOML configuration file.
    pub config: Option<PathBuf>,
    /// Contract source file.
    pub contract: Option<PathBuf>,
    /// Dotenv file to load instead of `./.env`.
    pub env_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

/// How a run ended.
#[derive(Debug)]
pub enum RunStatus {
    /// Configuration could not be loaded; nothing was attempted.
    ConfigError(ConfigError),
    /// The deployment finished, including the unfunded case.
    Completed(DeployOutcome),
    /// The deployment failed and the failure was reported.
    DeployFailed(DeployError),
}

impl RunStatus {
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::ConfigError(_))
    }

    pub fn exit_code(&self) -> ExitCode {
        if self.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

/// Run one deployment.
///
/// `lookup` resolves environment variables for the configuration overlay;
/// the binary passes `std::env::var`.
pub async fn run<L>(options: StartupOptions, lookup: L) -> RunStatus
where
    L: Fn(&str) -> Option<String>,
{
    let env_file = match load_env_file(options.env_file.as_deref()) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return RunStatus::ConfigError(e);
        }
    };

    let config = match load_config_with(options.config.as_deref(), lookup, |config| {
        if let Some(contract) = options.contract.clone() {
            config.contract.source_path = contract;
        }
        if let Some(level) = options.log_level.clone() {
            config.observability.log_level = level;
        }
    }) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return RunStatus::ConfigError(e);
        }
    };

    init_logging(&config.observability.log_level);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        env_file = ?env_file,
        rpc_url = %config.network.rpc_url,
        chain_id = config.network.chain_id,
        source = %config.contract.source_path.display(),
        "Configuration loaded"
    );

    println!(
        "Let's read in the contract code from {} and deploy it to the blockchain!",
        config.contract.source_path.display()
    );

    let network = &config.network;
    let result = deploy_from_config(&config, |event| {
        println!("{}", describe_event(&event, network));
    })
    .await;

    match result {
        Ok(outcome) => {
            println!("{}", describe_outcome(&outcome, network));
            RunStatus::Completed(outcome)
        }
        Err(e) => {
            tracing::error!(error = %e, "Deployment failed");
            println!("{}", describe_failure(&e, &DebugContext::from_config(&config)));
            RunStatus::DeployFailed(e)
        }
    }
}
