//! Test helper utilities for CLI integration tests.

#![allow(deprecated)] // Command::cargo_bin deprecation

use std::collections::HashMap;

use alloy::primitives::{hex, Address};
use assert_cmd::Command;
use serde_json::{json, Value};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const POOL: Address = Address::repeat_byte(0x11);
pub const COLLATERAL: Address = Address::repeat_byte(0x22);
pub const QUOTE: Address = Address::repeat_byte(0x33);
pub const POOL_UTILS: Address = Address::repeat_byte(0x44);

/// First anvil account.
pub const TEST_PRIVATE_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// JSON-RPC node answering calls by selector.
#[derive(Clone, Default)]
pub struct NodeMock {
    calls: HashMap<[u8; 4], Vec<u8>>,
    estimate_revert: Option<Vec<u8>>,
}

impl NodeMock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_call(mut self, selector: [u8; 4], returns: Vec<u8>) -> Self {
        self.calls.insert(selector, returns);
        self
    }

    pub fn revert_estimate(mut self, data: Vec<u8>) -> Self {
        self.estimate_revert = Some(data);
        self
    }

    pub async fn start(self) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(self)
            .mount(&server)
            .await;
        server
    }

    fn reply(&self, request: &Value) -> Value {
        let id = request["id"].clone();
        let outcome = match request["method"].as_str().unwrap_or_default() {
            "eth_chainId" => Ok(json!("0x7a69")),
            "eth_blockNumber" => Ok(json!("0x64")),
            "eth_getBlockByNumber" => Ok(block_json()),
            "eth_estimateGas" => match &self.estimate_revert {
                Some(data) => Err(json!({
                    "code": 3,
                    "message": "execution reverted",
                    "data": format!("0x{}", hex::encode(data)),
                })),
                None => Ok(json!("0x5208")),
            },
            "eth_call" => self.call(&request["params"][0]),
            other => Err(json!({ "code": -32601, "message": format!("{other} not supported") })),
        };

        match outcome {
            Ok(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
            Err(error) => json!({ "jsonrpc": "2.0", "id": id, "error": error }),
        }
    }

    fn call(&self, tx: &Value) -> Result<Value, Value> {
        let input = tx["input"].as_str().or_else(|| tx["data"].as_str()).unwrap_or("0x");
        let input = hex::decode(input).unwrap_or_default();
        let selector: Option<[u8; 4]> = input.get(..4).and_then(|s| s.try_into().ok());

        selector
            .and_then(|s| self.calls.get(&s))
            .map(|returns| json!(format!("0x{}", hex::encode(returns))))
            .ok_or_else(|| json!({ "code": -32000, "message": "unexpected call" }))
    }
}

impl Respond for NodeMock {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let Ok(body) = serde_json::from_slice::<Value>(&request.body) else {
            return ResponseTemplate::new(400);
        };

        let reply = match body.as_array() {
            Some(batch) => Value::Array(batch.iter().map(|r| self.reply(r)).collect()),
            None => self.reply(&body),
        };
        ResponseTemplate::new(200).set_body_json(reply)
    }
}

fn block_json() -> Value {
    let zero_hash = format!("0x{}", "00".repeat(32));
    json!({
        "hash": format!("0x{}", "ab".repeat(32)),
        "parentHash": zero_hash,
        "sha3Uncles": "0x1dcc4de8dec75d7aab85b567b6ccd41ad312451b948a7413f0a142fd40d49347",
        "miner": format!("0x{}", "00".repeat(20)),
        "stateRoot": zero_hash,
        "transactionsRoot": zero_hash,
        "receiptsRoot": zero_hash,
        "logsBloom": format!("0x{}", "00".repeat(256)),
        "difficulty": "0x0",
        "number": "0x64",
        "gasLimit": "0x1c9c380",
        "gasUsed": "0x0",
        "timestamp": "0x6553f100",
        "extraData": "0x",
        "mixHash": zero_hash,
        "nonce": "0x0000000000000000",
        "baseFeePerGas": "0x7",
        "totalDifficulty": "0x0",
        "size": "0x220",
        "uncles": [],
        "transactions": []
    })
}

/// Create a CLI command with no RPC or signer configured.
pub fn ajna_cmd() -> Command {
    let mut cmd = Command::cargo_bin("ajna").unwrap();
    cmd.env_remove("ETH_RPC_URL").env_remove("PRIVATE_KEY");
    cmd
}

/// Create a CLI command pointing to a mock node.
pub fn ajna_cmd_with_node(node: &MockServer) -> Command {
    let mut cmd = ajna_cmd();
    cmd.env("ETH_RPC_URL", node.uri())
        .env("AJNA_POOL_UTILS", POOL_UTILS.to_string());
    cmd
}
