//! Human-readable console report.
//!
//! The binary prints these lines on stdout; structured logs stay on stderr.

use alloy::primitives::utils::format_ether;

use crate::config::NetworkConfig;
use crate::deploy::types::{DebugContext, DeployError, DeployEvent, DeployOutcome};

/// Line(s) printed for a progress event.
pub fn describe_event(event: &DeployEvent, network: &NetworkConfig) -> String {
    match event {
        DeployEvent::Compiled { bytecode_len } => {
            format!("Contract compiled ({bytecode_len} bytes of bytecode)")
        }
        DeployEvent::AddressResolved {
            address,
            account_id,
        } => format!("Using address: {address}\nAccount ID: {account_id}"),
        DeployEvent::Balance { wei } => format!(
            "Account balance: {} {}",
            format_ether(*wei),
            network.currency_symbol
        ),
        DeployEvent::Building { .. } => "Building the transaction...".to_string(),
        DeployEvent::Signing => "Signing transaction...".to_string(),
        DeployEvent::Broadcasting => "Deploying contract...".to_string(),
        DeployEvent::AwaitingReceipt { tx_hash } => {
            format!("Transaction hash: {tx_hash}\nWaiting for transaction to be mined...")
        }
    }
}

/// Line(s) printed when the run ends without error.
pub fn describe_outcome(outcome: &DeployOutcome, network: &NetworkConfig) -> String {
    match outcome {
        DeployOutcome::Deployed {
            contract_address, ..
        } => format!("Contract deployed! Address: {contract_address}"),
        DeployOutcome::Unfunded { address } => [
            format!(
                "Your account has no {}! Please get some testnet {} from the faucet:",
                network.currency_symbol, network.currency_symbol
            ),
            format!("1. Go to {}", network.faucet_url),
            "2. Create an account if you haven't already".to_string(),
            format!(
                "3. Your testnet account should automatically have {}",
                network.currency_symbol
            ),
            format!("4. Your address: {address}"),
        ]
        .join("\n"),
    }
}

/// Lines printed when the deployment flow fails.
pub fn describe_failure(error: &DeployError, context: &DebugContext) -> String {
    format!(
        "An error occurred: {error}\n\
         Please check your credentials and network connection.\n\
         Debug info:\n\
         {context}"
    )
}
