//! Configuration loading from disk and the environment.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::DeployConfig;
use crate::config::validation::{validate_config, ValidationError};

/// JSON-RPC endpoint URL.
pub const RPC_URL_ENV_VAR: &str = "RPC_URL";
/// Sender address or Hedera long-form identifier.
pub const ADDRESS_ENV_VAR: &str = "MY_ADDRESS";
/// Hedera account id.
pub const ACCOUNT_ID_ENV_VAR: &str = "ACCOUNT_ID";
/// Chain id override.
pub const CHAIN_ID_ENV_VAR: &str = "CHAIN_ID";
/// Contract source path override.
pub const CONTRACT_PATH_ENV_VAR: &str = "CONTRACT_PATH";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    EnvFile(dotenvy::Error),
    InvalidEnv { var: &'static str, value: String },
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::EnvFile(e) => write!(f, "Env file error: {}", e),
            ConfigError::InvalidEnv { var, value } => {
                write!(f, "Invalid value '{}' for environment variable {}", value, var)
            }
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Populate the process environment from a dotenv file.
///
/// With no explicit path, a `.env` in the working directory is loaded if present.
/// Variables already set in the environment are never overridden.
pub fn load_env_file(path: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    match path {
        Some(path) => dotenvy::from_path(path)
            .map(|()| Some(path.to_path_buf()))
            .map_err(ConfigError::EnvFile),
        None => Ok(dotenvy::dotenv().ok()),
    }
}

/// Parse a TOML configuration file without validating it.
pub fn read_config_file(path: &Path) -> Result<DeployConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}

/// Overlay environment variables onto a configuration.
///
/// `lookup` abstracts `std::env::var` so callers can supply a fixed map. Empty
/// values are treated as unset.
pub fn apply_env_overrides<F>(config: &mut DeployConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(url) = get(RPC_URL_ENV_VAR) {
        config.network.rpc_url = url;
    }
    if let Some(address) = get(ADDRESS_ENV_VAR) {
        config.account.address = address;
    }
    if let Some(account_id) = get(ACCOUNT_ID_ENV_VAR) {
        config.account.account_id = account_id;
    }
    if let Some(chain_id) = get(CHAIN_ID_ENV_VAR) {
        config.network.chain_id = chain_id.trim().parse().map_err(|_| ConfigError::InvalidEnv {
            var: CHAIN_ID_ENV_VAR,
            value: chain_id.clone(),
        })?;
    }
    if let Some(path) = get(CONTRACT_PATH_ENV_VAR) {
        config.contract.source_path = PathBuf::from(path);
    }

    Ok(())
}

/// Load configuration: defaults, then the optional TOML file, then the
/// environment, then caller overrides. The result is validated.
pub fn load_config_with<F, O>(
    path: Option<&Path>,
    lookup: F,
    overrides: O,
) -> Result<DeployConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    O: FnOnce(&mut DeployConfig),
{
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None => DeployConfig::default(),
    };

    apply_env_overrides(&mut config, lookup)?;
    overrides(&mut config);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
