//! Offline price and index conversion tests.

use predicates::prelude::*;
use serde_json::Value;

use super::helpers::ajna_cmd;

#[test]
fn test_price_of_index() {
    ajna_cmd()
        .args(["price", "2000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("46776.653369145271678115"));
}

#[test]
fn test_price_of_unit_bucket() {
    ajna_cmd()
        .args(["price", "4156"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1000000000000000000"));
}

#[test]
fn test_price_rejects_index_out_of_range() {
    ajna_cmd()
        .args(["price", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));

    ajna_cmd()
        .args(["price", "7389"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn test_index_of_price() {
    ajna_cmd()
        .args(["index", "0.1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4618"));
}

#[test]
fn test_index_rejects_price_out_of_range() {
    ajna_cmd()
        .args(["index", "0.00000001"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn test_index_json_output() {
    let output = ajna_cmd()
        .args(["--format", "json", "index", "0.1"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let entries: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(entries[0]["index"], 4618);
    assert_eq!(entries[0]["priceWad"], "99834229041488465");
}

#[test]
fn test_buckets_in_range_json() {
    let output = ajna_cmd()
        .args(["--format", "json", "buckets", "--min", "0.99", "--max", "1.01"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let entries: Value = serde_json::from_slice(&output.stdout).unwrap();
    let indices: Vec<u64> = entries
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["index"].as_u64().unwrap())
        .collect();

    // Highest price first, unit bucket included
    assert!(indices.contains(&4156));
    assert!(indices.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_buckets_empty_range() {
    ajna_cmd()
        .args(["buckets", "--min", "2", "--max", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No buckets in range."));
}
