//! Ajna CLI - bucket prices and pool lending.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, LendSubcommand, PoolSubcommand};
use commands::{
    run_buckets, run_index, run_lend_add, run_lend_remove, run_pool_info, run_price,
    run_update_interest,
};

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Price(args) => run_price(&args, cli.format)?,
        Commands::Index(args) => run_index(&args, cli.format)?,
        Commands::Buckets(args) => run_buckets(&args, cli.format)?,
        Commands::Pool { subcommand } => match subcommand {
            PoolSubcommand::Info(args) => {
                run_pool_info(&args, cli.format).await?;
            }
            PoolSubcommand::UpdateInterest(args) => {
                run_update_interest(&args, cli.format).await?;
            }
        },
        Commands::Lend { subcommand } => match subcommand {
            LendSubcommand::Add(args) => {
                run_lend_add(&args, cli.format).await?;
            }
            LendSubcommand::Remove(args) => {
                run_lend_remove(&args, cli.format).await?;
            }
        },
    }

    Ok(())
}
