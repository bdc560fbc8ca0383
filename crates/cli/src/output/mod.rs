//! Output formatting for CLI results.

pub mod detail;
pub mod table;

pub use detail::{format_pool_detail, print_receipt, PoolSummary};
pub use table::{format_buckets_table, BucketEntry};
