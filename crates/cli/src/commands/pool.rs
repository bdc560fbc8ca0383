//! Pool query and maintenance commands.

use ajna_rs_sdk::LendingPool;
use anyhow::Result;

use super::{connect, connect_read_only, parse_pool};
use crate::cli::{OutputFormat, PoolInfoArgs, UpdateInterestArgs};
use crate::output::{format_pool_detail, print_receipt, PoolSummary};

/// Run the pool info command.
pub async fn run_pool_info(args: &PoolInfoArgs, format: OutputFormat) -> Result<()> {
    let address = parse_pool(&args.pool)?;
    let sdk = connect_read_only(&args.rpc.rpc_url)?;
    let pool = sdk.fungible_pool(address).await?;

    let (prices, stats) = tokio::try_join!(pool.get_prices(), pool.get_stats())?;
    let summary = PoolSummary {
        address,
        collateral: pool.collateral_address(),
        quote: pool.quote_address(),
        prices,
        stats,
    };

    match format {
        OutputFormat::Table => println!("{}", format_pool_detail(&summary)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }

    Ok(())
}

/// Run the update-interest command.
pub async fn run_update_interest(args: &UpdateInterestArgs, format: OutputFormat) -> Result<()> {
    let address = parse_pool(&args.pool)?;
    let sdk = connect(&args.rpc.rpc_url, &args.signer.private_key)?;
    let pool = sdk.fungible_pool(address).await?;

    let receipt = pool.update_interest().verify_and_submit().await?;
    print_receipt(&receipt, format)
}
