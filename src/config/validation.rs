//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, gas limit > 0)
//! - Check the RPC endpoint is a usable http(s) URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: DeployConfig → Result<(), Vec<ValidationError>>
//! - Runs after environment overrides are applied, before anything touches the network

use thiserror::Error;

use crate::config::schema::DeployConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("network.rpc_url '{url}' is invalid: {reason}")]
    InvalidRpcUrl { url: String, reason: String },

    #[error("{0} must be set (config file or environment)")]
    Missing(&'static str),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("transaction.receipt_poll_interval_ms ({interval_ms}) exceeds receipt timeout ({timeout_secs}s)")]
    PollIntervalTooLong { interval_ms: u64, timeout_secs: u64 },
}

/// Validate a fully layered configuration.
pub fn validate_config(config: &DeployConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match url::Url::parse(&config.network.rpc_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::InvalidRpcUrl {
            url: config.network.rpc_url.clone(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError::InvalidRpcUrl {
            url: config.network.rpc_url.clone(),
            reason: e.to_string(),
        }),
    }

    if config.account.address.trim().is_empty() {
        errors.push(ValidationError::Missing("account.address"));
    }

    let non_zero = [
        ("network.chain_id", config.network.chain_id),
        ("network.rpc_timeout_secs", config.network.rpc_timeout_secs),
        ("transaction.gas_limit", config.transaction.gas_limit),
        ("transaction.receipt_timeout_secs", config.transaction.receipt_timeout_secs),
        ("transaction.receipt_poll_interval_ms", config.transaction.receipt_poll_interval_ms),
    ];
    for (field, value) in non_zero {
        if value == 0 {
            errors.push(ValidationError::Zero(field));
        }
    }

    let tx = &config.transaction;
    if tx.receipt_timeout_secs > 0
        && tx.receipt_poll_interval_ms > tx.receipt_timeout_secs.saturating_mul(1000)
    {
        errors.push(ValidationError::PollIntervalTooLong {
            interval_ms: tx.receipt_poll_interval_ms,
            timeout_secs: tx.receipt_timeout_secs,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> DeployConfig {
        let mut config = DeployConfig::default();
        config.account.address = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".to_string();
        config
    }

    #[test]
    fn test_valid_config_passes() {
        assert_eq!(validate_config(&valid_config()), Ok(()));
    }

    #[test]
    fn test_missing_address() {
        let mut config = valid_config();
        config.account.address = "   ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::Missing("account.address")]);
    }

    #[test]
    fn test_reports_all_errors() {
        let mut config = valid_config();
        config.network.rpc_url = "ws://localhost:8546".to_string();
        config.network.chain_id = 0;
        config.transaction.gas_limit = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].to_string().contains("unsupported scheme 'ws'"));
        assert!(errors.contains(&ValidationError::Zero("network.chain_id")));
        assert!(errors.contains(&ValidationError::Zero("transaction.gas_limit")));
    }

    #[test]
    fn test_unparseable_rpc_url() {
        let mut config = valid_config();
        config.network.rpc_url = "not a url".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::InvalidRpcUrl { .. }));
    }

    #[test]
    fn test_poll_interval_longer_than_timeout() {
        let mut config = valid_config();
        config.transaction.receipt_timeout_secs = 2;
        config.transaction.receipt_poll_interval_ms = 5000;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::PollIntervalTooLong {
                interval_ms: 5000,
                timeout_secs: 2
            }]
        );
    }
}
