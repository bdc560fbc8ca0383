//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Ajna CLI - bucket prices and pool lending
#[derive(Parser, Debug)]
#[command(name = "ajna")]
#[command(about = "CLI tool for Ajna bucket prices and lending", long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "table")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Price of a bucket index
    Price(PriceArgs),
    /// Bucket index containing a price
    Index(IndexArgs),
    /// Buckets within a price range
    Buckets(BucketsArgs),
    /// Query and maintain a pool
    Pool {
        #[command(subcommand)]
        subcommand: PoolSubcommand,
    },
    /// Deposit and withdraw quote token
    Lend {
        #[command(subcommand)]
        subcommand: LendSubcommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum PoolSubcommand {
    /// Show pool prices and statistics
    Info(PoolInfoArgs),
    /// Accrue interest and update the pool's rate
    UpdateInterest(UpdateInterestArgs),
}

#[derive(Subcommand, Debug)]
pub enum LendSubcommand {
    /// Approve and deposit quote token at a price
    Add(LendAddArgs),
    /// Withdraw quote token from a bucket
    Remove(LendRemoveArgs),
}

#[derive(Parser, Debug)]
pub struct PriceArgs {
    /// Bucket index (1 to 7388)
    pub index: u32,
}

#[derive(Parser, Debug)]
pub struct IndexArgs {
    /// Price in quote token per collateral (e.g., "0.1")
    pub price: String,
}

#[derive(Parser, Debug)]
pub struct BucketsArgs {
    /// Lowest price to include
    #[arg(long)]
    pub min: String,

    /// Highest price to include
    #[arg(long)]
    pub max: String,
}

#[derive(Args, Debug)]
pub struct RpcArgs {
    /// RPC URL (can also use ETH_RPC_URL env var)
    #[arg(long, env = "ETH_RPC_URL")]
    pub rpc_url: String,
}

#[derive(Args, Debug)]
pub struct SignerArgs {
    /// Private key for signing transactions (can also use PRIVATE_KEY env var)
    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,
}

#[derive(Parser, Debug)]
pub struct PoolInfoArgs {
    /// Pool address
    pub pool: String,

    #[command(flatten)]
    pub rpc: RpcArgs,
}

#[derive(Parser, Debug)]
pub struct UpdateInterestArgs {
    /// Pool address
    pub pool: String,

    #[command(flatten)]
    pub rpc: RpcArgs,

    #[command(flatten)]
    pub signer: SignerArgs,
}

#[derive(Parser, Debug)]
pub struct LendAddArgs {
    /// Pool address
    pub pool: String,

    /// Amount of quote token in human-readable units (e.g., "100.5")
    pub amount: String,

    /// Price to lend at; the deposit lands in the bucket containing it
    #[arg(long)]
    pub price: String,

    /// Seconds before the deposit expires if not yet mined
    #[arg(long)]
    pub ttl: Option<u64>,

    /// Skip the quote token approval
    #[arg(long)]
    pub no_approve: bool,

    #[command(flatten)]
    pub rpc: RpcArgs,

    #[command(flatten)]
    pub signer: SignerArgs,
}

#[derive(Parser, Debug)]
pub struct LendRemoveArgs {
    /// Pool address
    pub pool: String,

    /// Bucket index to withdraw from
    #[arg(long)]
    pub index: u32,

    /// Maximum amount to withdraw; everything redeemable when omitted
    #[arg(long)]
    pub amount: Option<String>,

    #[command(flatten)]
    pub rpc: RpcArgs,

    #[command(flatten)]
    pub signer: SignerArgs,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}
