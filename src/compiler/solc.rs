//! Solidity compiler driver.

use alloy::json_abi::JsonAbi;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::compiler::{parse_bytecode, run_compiler, CompileError, CompiledContract, Compiler};

/// Runs `solc --combined-json abi,bin <source>`.
#[derive(Debug, Clone)]
pub struct SolcCompiler {
    binary: PathBuf,
    contract_name: Option<String>,
}

impl SolcCompiler {
    /// `contract_name` picks one contract when the source defines several.
    pub fn new(binary: impl Into<PathBuf>, contract_name: Option<String>) -> Self {
        Self {
            binary: binary.into(),
            contract_name,
        }
    }
}

impl Compiler for SolcCompiler {
    async fn compile(&self, source: &Path) -> Result<CompiledContract, CompileError> {
        let stdout = run_compiler(&self.binary, &["--combined-json", "abi,bin"], source).await?;
        let compiled = parse_combined_json(&stdout, self.contract_name.as_deref())?;

        tracing::info!(
            source = %source.display(),
            bytecode_len = compiled.bytecode.len(),
            "Solidity compilation finished"
        );

        Ok(compiled)
    }
}

#[derive(Debug, Deserialize)]
struct CombinedJson {
    contracts: BTreeMap<String, CombinedContract>,
}

#[derive(Debug, Deserialize)]
struct CombinedContract {
    /// A JSON array, or the same array as a string before solc 0.8.
    abi: Value,
    #[serde(default)]
    bin: String,
}

/// Parse `solc --combined-json abi,bin` output.
///
/// Contracts are keyed `path:Name`. Without an explicit name, the single
/// contract with non-empty bytecode is chosen; interfaces and abstract
/// contracts have none.
pub fn parse_combined_json(
    stdout: &str,
    contract_name: Option<&str>,
) -> Result<CompiledContract, CompileError> {
    let combined: CombinedJson = serde_json::from_str(stdout)?;

    let short_name = |key: &str| key.rsplit(':').next().unwrap_or(key).to_string();

    let (key, contract) = match contract_name {
        Some(name) => combined
            .contracts
            .iter()
            .find(|(key, _)| short_name(key) == name)
            .ok_or_else(|| CompileError::ContractNotFound {
                name: name.to_string(),
                available: combined.contracts.keys().map(|k| short_name(k)).collect(),
            })?,
        None => {
            let deployable: Vec<_> = combined
                .contracts
                .iter()
                .filter(|(_, c)| !c.bin.trim().is_empty())
                .collect();
            match deployable.as_slice() {
                [single] => *single,
                [] => return Err(CompileError::EmptyBytecode),
                many => {
                    return Err(CompileError::AmbiguousContract(
                        many.iter().map(|(key, _)| short_name(key)).collect(),
                    ))
                }
            }
        }
    };

    let abi: JsonAbi = match &contract.abi {
        Value::String(encoded) => serde_json::from_str(encoded)?,
        other => serde_json::from_value(other.clone())?,
    };
    let bytecode = parse_bytecode(&contract.bin)?;

    tracing::debug!(contract = %key, "Selected contract from solc output");

    Ok(CompiledContract { bytecode, abi })
}
