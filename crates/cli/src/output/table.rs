//! Table formatting for bucket lists.

use serde::Serialize;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

/// One bucket with its price, as printed by the codec commands.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketEntry {
    pub index: u32,
    pub price: String,
    pub price_wad: String,
}

#[derive(Tabled)]
struct BucketRow {
    #[tabled(rename = "Index")]
    index: u32,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Price (WAD)")]
    price_wad: String,
}

pub fn format_buckets_table(entries: &[BucketEntry]) -> String {
    if entries.is_empty() {
        return "No buckets in range.".to_string();
    }

    let rows: Vec<BucketRow> = entries
        .iter()
        .map(|e| BucketRow {
            index: e.index,
            price: e.price.clone(),
            price_wad: e.price_wad.clone(),
        })
        .collect();

    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::left()))
        .to_string()
}
