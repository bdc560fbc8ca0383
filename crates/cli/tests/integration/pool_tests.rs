//! Pool commands against a mocked node.

use ajna_rs_sdk::contracts::pool::IPool;
use ajna_rs_sdk::contracts::pool_info_utils::IPoolInfoUtils;
use ajna_rs_sdk::pricing::{index_to_price, WAD};
use alloy::primitives::U256;
use alloy::sol_types::{SolCall, SolError, SolValue};
use predicates::prelude::*;
use serde_json::Value;

use super::helpers::{ajna_cmd_with_node, NodeMock, COLLATERAL, POOL, QUOTE, TEST_PRIVATE_KEY};

fn pool_node() -> NodeMock {
    NodeMock::new()
        .on_call(IPool::collateralAddressCall::SELECTOR, COLLATERAL.abi_encode())
        .on_call(IPool::quoteTokenAddressCall::SELECTOR, QUOTE.abi_encode())
}

#[tokio::test]
async fn test_pool_info_json() {
    let node = pool_node()
        .on_call(
            IPoolInfoUtils::poolPricesInfoCall::SELECTOR,
            (
                index_to_price(2000).unwrap(),
                U256::from(2000),
                index_to_price(3000).unwrap(),
                U256::from(3000),
                index_to_price(2100).unwrap(),
                U256::from(2100),
            )
                .abi_encode_params(),
        )
        .on_call(
            IPoolInfoUtils::poolLoansInfoCall::SELECTOR,
            (U256::from(1000) * WAD, U256::from(3), POOL, WAD, WAD).abi_encode_params(),
        )
        .on_call(
            IPoolInfoUtils::poolUtilizationInfoCall::SELECTOR,
            (WAD, WAD * U256::from(2), WAD / U256::from(2), WAD / U256::from(2)).abi_encode_params(),
        )
        .on_call(
            IPool::interestRateInfoCall::SELECTOR,
            (WAD / U256::from(20), U256::from(1_700_000_000u64)).abi_encode_params(),
        )
        .start()
        .await;

    let output = ajna_cmd_with_node(&node)
        .args(["--format", "json", "pool", "info", &POOL.to_string()])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let summary: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["prices"]["hpbIndex"], 2000);
    assert_eq!(summary["prices"]["htpIndex"], 3000);
    assert_eq!(summary["prices"]["lupIndex"], 2100);
    assert_eq!(
        summary["collateral"].as_str().unwrap().to_lowercase(),
        COLLATERAL.to_string().to_lowercase()
    );
}

#[tokio::test]
async fn test_pool_info_without_pool_utils() {
    let node = pool_node().start().await;

    ajna_cmd_with_node(&node)
        .env_remove("AJNA_POOL_UTILS")
        .args(["pool", "info", &POOL.to_string()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No pool info utils address configured"));
}

#[tokio::test]
async fn test_lend_add_reports_decoded_revert() {
    let node = pool_node()
        .revert_estimate(IPool::DustAmountNotExceeded {}.abi_encode())
        .start()
        .await;

    ajna_cmd_with_node(&node)
        .env("PRIVATE_KEY", TEST_PRIVATE_KEY)
        .args(["lend", "add", &POOL.to_string(), "0.000001", "--price", "0.1", "--no-approve"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Transaction reverted: DustAmountNotExceeded()"));
}

#[tokio::test]
async fn test_lend_remove_reports_decoded_revert() {
    let node = pool_node()
        .revert_estimate(IPool::RemoveDepositLockedByAuctionDebt {}.abi_encode())
        .start()
        .await;

    ajna_cmd_with_node(&node)
        .env("PRIVATE_KEY", TEST_PRIVATE_KEY)
        .args(["lend", "remove", &POOL.to_string(), "--index", "2000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Transaction reverted: RemoveDepositLockedByAuctionDebt()",
        ));
}
