//! Quote token deposit and withdrawal commands.

use ajna_rs_sdk::pricing::{is_valid_price, price_to_index, to_wad};
use ajna_rs_sdk::LendingPool;
use anyhow::{Context, Result};
use colored::Colorize;

use super::{connect, parse_pool};
use crate::cli::{LendAddArgs, LendRemoveArgs, OutputFormat};
use crate::output::print_receipt;

/// Run the lend add command.
///
/// The price is checked against the bucket range before anything is sent,
/// then the quote token is approved and deposited into the bucket holding
/// the price.
pub async fn run_lend_add(args: &LendAddArgs, format: OutputFormat) -> Result<()> {
    let address = parse_pool(&args.pool)?;
    let amount = to_wad(&args.amount).context("Invalid amount")?;
    let price = to_wad(&args.price).context("Invalid price")?;
    if !is_valid_price(price) {
        anyhow::bail!("Price {} is outside the bucket price range", args.price);
    }
    let index = price_to_index(price)?;

    let sdk = connect(&args.rpc.rpc_url, &args.signer.private_key)?;
    let pool = sdk.fungible_pool(address).await?;

    if !args.no_approve {
        tracing::info!(quote = %pool.quote_address(), %amount, "Approving quote token");
        pool.quote_approve(amount).verify_and_submit().await?;
        if matches!(format, OutputFormat::Table) {
            println!("{} quote token approved", "✓".green());
        }
    }

    tracing::info!(index, %amount, "Adding quote token");
    let receipt = pool
        .add_quote_token(amount, index, args.ttl)
        .await?
        .verify_and_submit()
        .await?;

    print_receipt(&receipt, format)
}

/// Run the lend remove command.
pub async fn run_lend_remove(args: &LendRemoveArgs, format: OutputFormat) -> Result<()> {
    let address = parse_pool(&args.pool)?;
    let max_amount = args
        .amount
        .as_deref()
        .map(to_wad)
        .transpose()
        .context("Invalid amount")?;

    let sdk = connect(&args.rpc.rpc_url, &args.signer.private_key)?;
    let pool = sdk.fungible_pool(address).await?;

    tracing::info!(index = args.index, "Removing quote token");
    let receipt = pool
        .remove_quote_token(max_amount, args.index)?
        .verify_and_submit()
        .await?;

    print_receipt(&receipt, format)
}
