//! Command implementations.

pub mod codec;
pub mod lend;
pub mod pool;

use ajna_rs_sdk::{AjnaSdk, ProtocolConfig};
use alloy_primitives::Address;
use anyhow::{Context, Result};

pub use codec::{run_buckets, run_index, run_price};
pub use lend::{run_lend_add, run_lend_remove};
pub use pool::{run_pool_info, run_update_interest};

/// Parse a pool address argument.
fn parse_pool(pool: &str) -> Result<Address> {
    pool.parse().context("Invalid pool address")
}

/// Connect a signing client, reading contract addresses from the environment.
fn connect(rpc_url: &str, private_key: &str) -> Result<AjnaSdk> {
    let config = ProtocolConfig::from_env()?;
    tracing::info!(rpc_url, "Connecting to RPC");
    Ok(AjnaSdk::new(rpc_url, private_key, config)?)
}

/// Connect a read-only client, reading contract addresses from the environment.
fn connect_read_only(rpc_url: &str) -> Result<AjnaSdk> {
    let config = ProtocolConfig::from_env()?;
    tracing::info!(rpc_url, "Connecting to RPC");
    Ok(AjnaSdk::read_only(rpc_url, config)?)
}
