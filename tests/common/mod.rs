//! Shared utilities for integration testing.

#![allow(dead_code)]

use alloy::json_abi::JsonAbi;
use alloy::primitives::{keccak256, Address, Bytes, TxHash, U256};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use contract_deployer::blockchain::{
    BlockchainError, BlockchainResult, ChainId, ChainRpc, DeployReceipt, Wallet,
};
use contract_deployer::compiler::{CompileError, CompiledContract, Compiler};
use contract_deployer::config::DeployConfig;

/// Anvil's first default account.
pub const TEST_PRIVATE_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const TEST_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

/// Where mock receipts say the contract was created.
pub const CREATED_CONTRACT: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

pub const FAVORITES_ABI: &str = r#"[{"stateMutability":"nonpayable","type":"function","name":"store","inputs":[{"name":"_favorite_number","type":"uint256"}],"outputs":[]},{"stateMutability":"view","type":"function","name":"retrieve","inputs":[],"outputs":[{"name":"","type":"uint256"}]}]"#;

pub fn created_contract() -> Address {
    CREATED_CONTRACT.parse().unwrap()
}

pub fn test_wallet(chain_id: u64) -> Wallet {
    Wallet::from_private_key(TEST_PRIVATE_KEY, chain_id).unwrap()
}

/// Configuration pointing at `rpc_url` with fast receipt polling.
pub fn test_config(rpc_url: &str) -> DeployConfig {
    let mut config = DeployConfig::default();
    config.network.rpc_url = rpc_url.to_string();
    config.network.rpc_timeout_secs = 5;
    config.account.address = TEST_ADDRESS.to_lowercase();
    config.account.account_id = "0.0.4242".to_string();
    config.transaction.receipt_timeout_secs = 5;
    config.transaction.receipt_poll_interval_ms = 20;
    config
}

pub fn favorites_contract() -> CompiledContract {
    CompiledContract {
        bytecode: Bytes::from_static(&[0x34, 0x61, 0x00, 0x1a, 0x57, 0x61, 0x00, 0x0f, 0x56]),
        abi: serde_json::from_str::<JsonAbi>(FAVORITES_ABI).unwrap(),
    }
}

/// Compiler that hands back a fixed artifact.
pub struct FakeCompiler {
    artifact: Option<CompiledContract>,
    calls: AtomicUsize,
}

impl FakeCompiler {
    pub fn returning(artifact: CompiledContract) -> Self {
        Self {
            artifact: Some(artifact),
            calls: AtomicUsize::new(0),
        }
    }

    /// Fails every compilation with an empty-bytecode error.
    pub fn failing() -> Self {
        Self {
            artifact: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Compiler for FakeCompiler {
    async fn compile(&self, _source: &Path) -> Result<CompiledContract, CompileError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.artifact.clone().ok_or(CompileError::EmptyBytecode)
    }
}

/// What the mock node answers to successive receipt polls.
#[derive(Debug, Clone, Copy)]
pub enum ReceiptStep {
    Pending,
    Created,
    Reverted,
    NoContract,
}

/// In-memory node implementing [`ChainRpc`].
pub struct MockRpc {
    pub chain_id: u64,
    pub balance: U256,
    pub nonce: u64,
    pub gas_price: u128,
    receipts: Mutex<VecDeque<ReceiptStep>>,
    calls: Mutex<Vec<&'static str>>,
    sent: Mutex<Vec<Bytes>>,
}

impl MockRpc {
    pub fn funded() -> Self {
        Self {
            chain_id: 296,
            balance: U256::from(10u128.pow(20)),
            nonce: 4,
            gas_price: 540_000_000_000,
            receipts: Mutex::new(VecDeque::from([ReceiptStep::Pending, ReceiptStep::Created])),
            calls: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn with_balance(mut self, balance: U256) -> Self {
        self.balance = balance;
        self
    }

    pub fn with_receipts(self, steps: impl IntoIterator<Item = ReceiptStep>) -> Self {
        *self.receipts.lock().unwrap() = steps.into_iter().collect();
        self
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn sent(&self) -> Vec<Bytes> {
        self.sent.lock().unwrap().clone()
    }

    fn record(&self, method: &'static str) {
        self.calls.lock().unwrap().push(method);
    }
}

impl ChainRpc for MockRpc {
    async fn chain_id(&self) -> BlockchainResult<ChainId> {
        self.record("eth_chainId");
        Ok(ChainId(self.chain_id))
    }

    async fn balance(&self, _address: Address) -> BlockchainResult<U256> {
        self.record("eth_getBalance");
        Ok(self.balance)
    }

    async fn transaction_count(&self, _address: Address) -> BlockchainResult<u64> {
        self.record("eth_getTransactionCount");
        Ok(self.nonce)
    }

    async fn gas_price(&self) -> BlockchainResult<u128> {
        self.record("eth_gasPrice");
        Ok(self.gas_price)
    }

    async fn send_raw_transaction(&self, raw: &[u8]) -> BlockchainResult<TxHash> {
        self.record("eth_sendRawTransaction");
        self.sent.lock().unwrap().push(Bytes::copy_from_slice(raw));
        Ok(keccak256(raw))
    }

    async fn transaction_receipt(&self, tx_hash: TxHash) -> BlockchainResult<Option<DeployReceipt>> {
        self.record("eth_getTransactionReceipt");
        let step = self.receipts.lock().unwrap().pop_front();
        let receipt = |success: bool, contract_address: Option<Address>| DeployReceipt {
            tx_hash,
            contract_address,
            block_number: Some(1200),
            gas_used: 180_000,
            success,
        };
        match step {
            None | Some(ReceiptStep::Pending) => Ok(None),
            Some(ReceiptStep::Created) => Ok(Some(receipt(true, Some(created_contract())))),
            Some(ReceiptStep::Reverted) => Ok(Some(receipt(false, None))),
            Some(ReceiptStep::NoContract) => Ok(Some(receipt(true, None))),
        }
    }
}

/// Node whose every call fails, for error-path tests.
pub struct BrokenRpc;

impl ChainRpc for BrokenRpc {
    async fn chain_id(&self) -> BlockchainResult<ChainId> {
        Err(BlockchainError::Rpc("connection refused".into()))
    }

    async fn balance(&self, _address: Address) -> BlockchainResult<U256> {
        Err(BlockchainError::Rpc("connection refused".into()))
    }

    async fn transaction_count(&self, _address: Address) -> BlockchainResult<u64> {
        Err(BlockchainError::Rpc("connection refused".into()))
    }

    async fn gas_price(&self) -> BlockchainResult<u128> {
        Err(BlockchainError::Rpc("connection refused".into()))
    }

    async fn send_raw_transaction(&self, _raw: &[u8]) -> BlockchainResult<TxHash> {
        Err(BlockchainError::Rpc("connection refused".into()))
    }

    async fn transaction_receipt(&self, _tx_hash: TxHash) -> BlockchainResult<Option<DeployReceipt>> {
        Err(BlockchainError::Rpc("connection refused".into()))
    }
}

/// Start a JSON-RPC node on an ephemeral port.
///
/// `handler` maps `(method, params)` to the `result` value; every response
/// closes the connection.
pub async fn start_mock_rpc<F>(handler: F) -> SocketAddr
where
    F: Fn(&str, &Value) -> Value + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handler = Arc::new(handler);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let handler = handler.clone();
                    tokio::spawn(async move {
                        let Some(body) = read_request_body(&mut socket).await else {
                            return;
                        };
                        let request: Value = match serde_json::from_str(&body) {
                            Ok(request) => request,
                            Err(_) => return,
                        };
                        let method = request["method"].as_str().unwrap_or_default().to_string();
                        let result = handler(&method, &request["params"]);
                        let response = json!({
                            "jsonrpc": "2.0",
                            "id": request["id"].clone(),
                            "result": result,
                        })
                        .to_string();

                        let response_str = format!(
                            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            response.len(),
                            response
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

async fn read_request_body(socket: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = headers
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.trim()
                .eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    String::from_utf8(buf[header_end..header_end + content_length].to_vec()).ok()
}

/// `eth_getTransactionReceipt` result for a successful contract creation.
pub fn receipt_json(tx_hash: &str, from: &str, contract_address: &str) -> Value {
    json!({
        "type": "0x0",
        "status": "0x1",
        "cumulativeGasUsed": "0x2bf20",
        "logs": [],
        "logsBloom": format!("0x{}", "0".repeat(512)),
        "transactionHash": tx_hash,
        "transactionIndex": "0x0",
        "blockHash": format!("0x{}", "ab".repeat(32)),
        "blockNumber": "0x4b0",
        "gasUsed": "0x2bf20",
        "effectiveGasPrice": "0x7dba821800",
        "from": from,
        "to": null,
        "contractAddress": contract_address,
    })
}

/// Write `contents` to `name` inside `dir`.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}
