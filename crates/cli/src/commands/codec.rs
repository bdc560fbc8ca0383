//! Offline bucket math: price, index and range lookups.

use ajna_rs_sdk::pricing::{buckets_in_price_range, from_wad, index_to_price, price_to_index, to_wad};
use anyhow::{Context, Result};

use crate::cli::{BucketsArgs, IndexArgs, OutputFormat, PriceArgs};
use crate::output::{format_buckets_table, BucketEntry};

fn entry(index: u32) -> Result<BucketEntry> {
    let price = index_to_price(index)?;
    Ok(BucketEntry {
        index,
        price: from_wad(price),
        price_wad: price.to_string(),
    })
}

fn print_entries(entries: &[BucketEntry], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", format_buckets_table(entries)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(entries)?),
    }
    Ok(())
}

/// Run the price command.
pub fn run_price(args: &PriceArgs, format: OutputFormat) -> Result<()> {
    print_entries(&[entry(args.index)?], format)
}

/// Run the index command.
pub fn run_index(args: &IndexArgs, format: OutputFormat) -> Result<()> {
    let price = to_wad(&args.price).context("Invalid price")?;
    let index = price_to_index(price)?;
    print_entries(&[entry(index)?], format)
}

/// Run the buckets command.
pub fn run_buckets(args: &BucketsArgs, format: OutputFormat) -> Result<()> {
    let min = to_wad(&args.min).context("Invalid minimum price")?;
    let max = to_wad(&args.max).context("Invalid maximum price")?;

    let entries = buckets_in_price_range(min, max)?
        .into_iter()
        .map(entry)
        .collect::<Result<Vec<_>>>()?;

    print_entries(&entries, format)
}
