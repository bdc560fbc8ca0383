//! Detail views for a single pool and for mined transactions.

use ajna_rs_sdk::pricing::from_wad;
use ajna_rs_sdk::{PoolPrices, PoolStats, TransactionReceipt};
use alloy_primitives::{Address, U256};
use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;

/// Everything `pool info` reports about a pool.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolSummary {
    pub address: Address,
    pub collateral: Address,
    pub quote: Address,
    pub prices: PoolPrices,
    pub stats: PoolStats,
}

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

fn row(field: &'static str, value: impl ToString) -> FieldRow {
    FieldRow {
        field,
        value: value.to_string(),
    }
}

fn format_percent(wad: U256) -> String {
    let percent = wad.saturating_mul(U256::from(100));
    format!("{}%", from_wad(percent))
}

pub fn format_pool_detail(summary: &PoolSummary) -> String {
    let prices = &summary.prices;
    let stats = &summary.stats;

    let rows = vec![
        row("Pool", summary.address),
        row("Collateral", summary.collateral),
        row("Quote", summary.quote),
        row("HPB", format!("{} (#{})", from_wad(prices.hpb), prices.hpb_index)),
        row("HTP", format!("{} (#{})", from_wad(prices.htp), prices.htp_index)),
        row("LUP", format!("{} (#{})", from_wad(prices.lup), prices.lup_index)),
        row("Pool Size", from_wad(stats.pool_size)),
        row("Loans", stats.loans_count),
        row("Min Debt", from_wad(stats.min_debt_amount)),
        row("Collateralization", format_percent(stats.collateralization)),
        row("Utilization", format_percent(stats.actual_utilization)),
        row("Target Utilization", format_percent(stats.target_utilization)),
        row("Interest Rate", format_percent(stats.interest_rate)),
    ];

    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::left()))
        .to_string()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReceiptSummary {
    tx_hash: String,
    block_number: Option<u64>,
    gas_used: u64,
    status: bool,
}

/// Print a mined transaction.
pub fn print_receipt(receipt: &TransactionReceipt, format: OutputFormat) -> Result<()> {
    let summary = ReceiptSummary {
        tx_hash: format!("{:#x}", receipt.transaction_hash),
        block_number: receipt.block_number,
        gas_used: receipt.gas_used,
        status: receipt.status(),
    };

    match format {
        OutputFormat::Table => {
            println!("{}", "Transaction confirmed!".green().bold());
            println!("  Tx Hash:   {}", summary.tx_hash);
            println!("  Block:     {}", summary.block_number.unwrap_or_default());
            println!("  Gas Used:  {}", format_gas(summary.gas_used));
            println!(
                "  Status:    {}",
                if summary.status { "Success".green() } else { "Failed".red() }
            );
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }

    Ok(())
}

/// Format gas with thousands separators.
fn format_gas(gas: u64) -> String {
    let s = gas.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}
