//! contract-deployer
//!
//! Compiles one contract and deploys it over JSON-RPC.
//!
//! # Flow
//!
//! ```text
//!   .env / deploy.toml / environment / flags
//!        │
//!        ▼
//!   ┌─────────┐   ┌──────────┐   ┌─────────┐   ┌─────────┐   ┌──────────┐
//!   │ compile │──▶│ resolve  │──▶│ balance │──▶│ build + │──▶│ receipt  │
//!   │  source │   │  sender  │   │  check  │   │  sign + │   │ polling  │
//!   └─────────┘   └──────────┘   └────┬────┘   │  send   │   └──────────┘
//!                                     │ zero   └─────────┘
//!                                     ▼
//!                              faucet guidance
//! ```
//!
//! The private key is read only after the balance check.
//! Configuration errors exit non-zero. Anything that fails inside the
//! deployment flow is printed with debug context and the process exits normally.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use contract_deployer::lifecycle::{run, StartupOptions};

#[derive(Parser)]
#[command(name = "contract-deployer")]
#[command(about = "Compile a contract and deploy it over JSON-RPC", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Contract source file (overrides config and CONTRACT_PATH).
    #[arg(long)]
    contract: Option<PathBuf>,

    /// Dotenv file to load instead of ./.env.
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

impl From<Cli> for StartupOptions {
    fn from(cli: Cli) -> Self {
        Self {
            config: cli.config,
            contract: cli.contract,
            env_file: cli.env_file,
            log_level: cli.log_level,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let options = StartupOptions::from(Cli::parse());
    run(options, |name| std::env::var(name).ok())
        .await
        .exit_code()
}
