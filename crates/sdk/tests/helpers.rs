//! Test helpers: a JSON-RPC node served by wiremock.
//!
//! `eth_call` is answered by selector from a table of ABI-encoded results or
//! revert data, so tests can drive the SDK's reads and gas estimation without
//! a chain.

#![allow(dead_code)]

use std::collections::HashMap;

use ajna_rs_sdk::{AjnaSdk, ProtocolConfig};
use alloy::primitives::{hex, Address};
use serde_json::{json, Value};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const POOL: Address = Address::repeat_byte(0x11);
pub const COLLATERAL: Address = Address::repeat_byte(0x22);
pub const QUOTE: Address = Address::repeat_byte(0x33);
pub const POOL_UTILS: Address = Address::repeat_byte(0x44);
pub const FACTORY: Address = Address::repeat_byte(0x55);
pub const GRANT_FUND: Address = Address::repeat_byte(0x66);
pub const POSITION_MANAGER: Address = Address::repeat_byte(0x77);
pub const LENDER: Address = Address::repeat_byte(0x88);

#[derive(Clone)]
enum Outcome {
    Return(Value),
    Revert(Vec<u8>),
}

impl Outcome {
    fn into_reply(self) -> std::result::Result<Value, Value> {
        match self {
            Self::Return(value) => Ok(value),
            Self::Revert(data) => Err(json!({
                "code": 3,
                "message": "execution reverted",
                "data": format!("0x{}", hex::encode(data)),
            })),
        }
    }
}

/// Canned node state.
#[derive(Clone)]
pub struct RpcMock {
    calls: HashMap<[u8; 4], Outcome>,
    estimate: Outcome,
    block_number: u64,
    timestamp: u64,
}

impl Default for RpcMock {
    fn default() -> Self {
        Self {
            calls: HashMap::new(),
            estimate: Outcome::Return(json!("0x5208")),
            block_number: 100,
            timestamp: 1_700_000_000,
        }
    }
}

impl RpcMock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers calls with `selector` with the encoded `returns`.
    pub fn on_call(mut self, selector: [u8; 4], returns: Vec<u8>) -> Self {
        self.calls.insert(
            selector,
            Outcome::Return(json!(format!("0x{}", hex::encode(returns)))),
        );
        self
    }

    /// Reverts calls with `selector` with `data`.
    pub fn revert_call(mut self, selector: [u8; 4], data: Vec<u8>) -> Self {
        self.calls.insert(selector, Outcome::Revert(data));
        self
    }

    pub fn estimate(mut self, gas: u64) -> Self {
        self.estimate = Outcome::Return(json!(format!("{gas:#x}")));
        self
    }

    pub fn revert_estimate(mut self, data: Vec<u8>) -> Self {
        self.estimate = Outcome::Revert(data);
        self
    }

    pub fn block(mut self, number: u64, timestamp: u64) -> Self {
        self.block_number = number;
        self.timestamp = timestamp;
        self
    }

    /// Starts a server answering with this state.
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
            "eth_blockNumber" => Ok(json!(format!("{:#x}", self.block_number))),
            "eth_getBlockByNumber" => Ok(self.block_json()),
            "eth_estimateGas" => self.estimate.clone().into_reply(),
            "eth_call" => self.call(&request["params"][0]),
            other => Err(json!({ "code": -32601, "message": format!("{other} not supported") })),
        };

        match outcome {
            Ok(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
            Err(error) => json!({ "jsonrpc": "2.0", "id": id, "error": error }),
        }
    }

    fn call(&self, tx: &Value) -> std::result::Result<Value, Value> {
        let input = tx["input"].as_str().or_else(|| tx["data"].as_str()).unwrap_or("0x");
        let input = hex::decode(input).unwrap_or_default();

        let selector: Option<[u8; 4]> = input.get(..4).and_then(|s| s.try_into().ok());
        match selector.and_then(|s| self.calls.get(&s)) {
            Some(outcome) => outcome.clone().into_reply(),
            None => Err(json!({ "code": -32000, "message": "unexpected call" })),
        }
    }

    fn block_json(&self) -> Value {
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
            "number": format!("{:#x}", self.block_number),
            "gasLimit": "0x1c9c380",
            "gasUsed": "0x0",
            "timestamp": format!("{:#x}", self.timestamp),
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
}

impl Respond for RpcMock {
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

/// Configuration pointing at the helper addresses.
pub fn test_config() -> ProtocolConfig {
    ProtocolConfig::new()
        .with_erc20_pool_factory(FACTORY)
        .with_pool_utils(POOL_UTILS)
        .with_grant_fund(GRANT_FUND)
        .with_position_manager(POSITION_MANAGER)
}

/// Read-only SDK connected to `server`.
pub fn sdk_for(server: &MockServer) -> AjnaSdk {
    AjnaSdk::read_only(&server.uri(), test_config()).unwrap()
}
