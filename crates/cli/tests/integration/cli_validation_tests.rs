//! CLI argument validation tests.
//!
//! These tests verify that the CLI properly validates arguments and provides
//! helpful error messages without requiring network access.

use predicates::prelude::*;

use super::helpers::{ajna_cmd, TEST_PRIVATE_KEY};

#[test]
fn test_help_output() {
    ajna_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("ajna"))
        .stdout(predicate::str::contains("price"))
        .stdout(predicate::str::contains("index"))
        .stdout(predicate::str::contains("buckets"))
        .stdout(predicate::str::contains("pool"))
        .stdout(predicate::str::contains("lend"));
}

#[test]
fn test_pool_help_output() {
    ajna_cmd()
        .args(["pool", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("info"))
        .stdout(predicate::str::contains("update-interest"));
}

#[test]
fn test_lend_help_output() {
    ajna_cmd()
        .args(["lend", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("remove"));
}

#[test]
fn test_invalid_command() {
    ajna_cmd()
        .arg("invalid_command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_price_missing_index() {
    ajna_cmd()
        .arg("price")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_price_rejects_non_numeric_index() {
    ajna_cmd()
        .args(["price", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_invalid_format() {
    ajna_cmd()
        .args(["--format", "xml", "price", "2000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_pool_info_requires_rpc_url() {
    ajna_cmd()
        .args(["pool", "info", "0x1111111111111111111111111111111111111111"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--rpc-url"));
}

#[test]
fn test_lend_add_requires_private_key() {
    ajna_cmd()
        .args([
            "lend",
            "add",
            "0x1111111111111111111111111111111111111111",
            "100",
            "--price",
            "0.1",
            "--rpc-url",
            "http://127.0.0.1:1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--private-key"));
}

#[test]
fn test_lend_add_rejects_price_outside_buckets() {
    // The port is closed: the check must happen before any request.
    ajna_cmd()
        .args([
            "lend",
            "add",
            "0x1111111111111111111111111111111111111111",
            "100",
            "--price",
            "0.00000001",
            "--rpc-url",
            "http://127.0.0.1:1",
            "--private-key",
            TEST_PRIVATE_KEY,
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside the bucket price range"));
}

#[test]
fn test_lend_add_rejects_invalid_pool() {
    ajna_cmd()
        .args([
            "lend",
            "add",
            "not-an-address",
            "100",
            "--price",
            "0.1",
            "--rpc-url",
            "http://127.0.0.1:1",
            "--private-key",
            TEST_PRIVATE_KEY,
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid pool address"));
}

#[test]
fn test_lend_add_rejects_invalid_amount() {
    ajna_cmd()
        .args([
            "lend",
            "add",
            "0x1111111111111111111111111111111111111111",
            "-5",
            "--price",
            "0.1",
            "--rpc-url",
            "http://127.0.0.1:1",
            "--private-key",
            TEST_PRIVATE_KEY,
        ])
        .assert()
        .failure();
}
