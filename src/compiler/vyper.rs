//! Vyper compiler driver.

use alloy::json_abi::JsonAbi;
use std::path::{Path, PathBuf};

use crate::compiler::{parse_bytecode, run_compiler, CompileError, CompiledContract, Compiler};

/// Output formats requested from `vyper -f`, in output order.
const OUTPUT_FORMATS: &str = "abi,bytecode";

/// Runs `vyper -f abi,bytecode <source>`.
#[derive(Debug, Clone)]
pub struct VyperCompiler {
    binary: PathBuf,
}

impl VyperCompiler {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for VyperCompiler {
    fn default() -> Self {
        Self::new("vyper")
    }
}

impl Compiler for VyperCompiler {
    async fn compile(&self, source: &Path) -> Result<CompiledContract, CompileError> {
        let stdout = run_compiler(&self.binary, &["-f", OUTPUT_FORMATS], source).await?;
        let compiled = parse_output(&stdout)?;

        tracing::info!(
            source = %source.display(),
            bytecode_len = compiled.bytecode.len(),
            functions = compiled.abi.functions().count(),
            "Vyper compilation finished"
        );

        Ok(compiled)
    }
}

/// Parse `vyper -f abi,bytecode` output: one line per requested format.
pub fn parse_output(stdout: &str) -> Result<CompiledContract, CompileError> {
    let mut lines = stdout.lines().map(str::trim).filter(|l| !l.is_empty());

    let abi_line = lines
        .next()
        .ok_or_else(|| CompileError::MalformedOutput("missing ABI line".to_string()))?;
    let bytecode_line = lines
        .next()
        .ok_or_else(|| CompileError::MalformedOutput("missing bytecode line".to_string()))?;

    let abi: JsonAbi = serde_json::from_str(abi_line)?;
    let bytecode = parse_bytecode(bytecode_line)?;

    Ok(CompiledContract { bytecode, abi })
}
