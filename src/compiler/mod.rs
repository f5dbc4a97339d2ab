//! Contract compilation.
//!
//! # Data Flow
//! ```text
//! source file (.vy / .sol)
//!     → vyper.rs / solc.rs (run the external compiler, parse its output)
//!     → CompiledContract (bytecode + ABI)
//!     → deploy_payload() (creation code for the transaction)
//! ```
//!
//! Compilers are external executables driven through `tokio::process`.

pub mod solc;
pub mod vyper;

use alloy::json_abi::JsonAbi;
use alloy::primitives::Bytes;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;

use crate::config::schema::{CompilerKind, ContractConfig};

pub use solc::SolcCompiler;
pub use vyper::VyperCompiler;

/// Bytecode and ABI of a compiled contract.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledContract {
    /// Creation bytecode.
    pub bytecode: Bytes,
    /// Contract ABI.
    pub abi: JsonAbi,
}

impl CompiledContract {
    /// Creation payload for a deployment with an argument-less constructor.
    pub fn deploy_payload(&self) -> Result<Bytes, CompileError> {
        if let Some(constructor) = self.abi.constructor() {
            if !constructor.inputs.is_empty() {
                return Err(CompileError::ConstructorArguments(constructor.inputs.len()));
            }
        }
        Ok(self.bytecode.clone())
    }
}

/// Errors that can occur while compiling a contract.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("contract source {0} not found")]
    SourceNotFound(PathBuf),

    #[error("cannot tell which compiler to use for {0}; set contract.compiler")]
    UnknownCompiler(PathBuf),

    #[error("failed to run {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{binary} exited with {status}: {stderr}")]
    Failed {
        binary: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("unexpected compiler output: {0}")]
    MalformedOutput(String),

    #[error("invalid ABI: {0}")]
    InvalidAbi(#[from] serde_json::Error),

    #[error("compiler produced no bytecode")]
    EmptyBytecode,

    #[error("contract '{name}' not in compiler output (found: {available:?})")]
    ContractNotFound { name: String, available: Vec<String> },

    #[error("source defines several deployable contracts {0:?}; set contract.contract_name")]
    AmbiguousContract(Vec<String>),

    #[error("constructor takes {0} argument(s); only argument-less constructors can be deployed")]
    ConstructorArguments(usize),
}

/// Turns a contract source file into bytecode and ABI.
pub trait Compiler {
    fn compile(
        &self,
        source: &Path,
    ) -> impl Future<Output = Result<CompiledContract, CompileError>> + Send;
}

/// The compiler selected by configuration.
#[derive(Debug, Clone)]
pub enum ContractCompiler {
    Vyper(VyperCompiler),
    Solc(SolcCompiler),
}

impl ContractCompiler {
    /// Pick the compiler for a contract configuration.
    pub fn from_config(config: &ContractConfig) -> Result<Self, CompileError> {
        let kind = config
            .resolved_compiler()
            .ok_or_else(|| CompileError::UnknownCompiler(config.source_path.clone()))?;
        let binary = config
            .compiler_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(kind.default_binary()));

        Ok(match kind {
            CompilerKind::Vyper => Self::Vyper(VyperCompiler::new(binary)),
            CompilerKind::Solc => {
                Self::Solc(SolcCompiler::new(binary, config.contract_name.clone()))
            }
        })
    }

    pub fn kind(&self) -> CompilerKind {
        match self {
            Self::Vyper(_) => CompilerKind::Vyper,
            Self::Solc(_) => CompilerKind::Solc,
        }
    }
}

impl Compiler for ContractCompiler {
    async fn compile(&self, source: &Path) -> Result<CompiledContract, CompileError> {
        match self {
            Self::Vyper(compiler) => compiler.compile(source).await,
            Self::Solc(compiler) => compiler.compile(source).await,
        }
    }
}

/// Run a compiler executable and return its stdout.
pub(crate) async fn run_compiler(
    binary: &Path,
    args: &[&str],
    source: &Path,
) -> Result<String, CompileError> {
    if !tokio::fs::try_exists(source).await.unwrap_or(false) {
        return Err(CompileError::SourceNotFound(source.to_path_buf()));
    }

    let name = binary.display().to_string();
    tracing::debug!(compiler = %name, ?args, source = %source.display(), "Running compiler");

    let output = Command::new(binary)
        .args(args)
        .arg(source)
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|source| CompileError::Spawn {
            binary: name.clone(),
            source,
        })?;

    if !output.status.success() {
        return Err(CompileError::Failed {
            binary: name,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    String::from_utf8(output.stdout)
        .map_err(|_| CompileError::MalformedOutput("stdout is not UTF-8".to_string()))
}

/// Decode hex bytecode, with or without `0x`.
pub(crate) fn parse_bytecode(hex: &str) -> Result<Bytes, CompileError> {
    let hex = hex.trim();
    let digits = hex.strip_prefix("0x").unwrap_or(hex);
    if digits.is_empty() {
        return Err(CompileError::EmptyBytecode);
    }
    digits
        .parse::<Bytes>()
        .map_err(|e| CompileError::MalformedOutput(format!("bytecode is not hex: {e}")))
}
