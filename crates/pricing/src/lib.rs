//! Ajna bucket pricing
//!
//! This crate converts between Ajna bucket indices and bucket prices using the
//! same fixed-point arithmetic as the pool contracts, so a client-side price
//! always lands in the bucket the contract would pick.
//!
//! # Overview
//!
//! - [`index_to_price`] / [`price_to_index`] walk the 0.5% geometric bucket curve
//! - [`buckets_in_price_range`] lists every bucket inside a price band
//! - [`to_wad`] / [`from_wad`] convert between decimal strings and WAD integers
//! - [`fixed_point`] exposes the signed 59.18-decimal math behind the curve
//!
//! # Example
//!
//! ```rust
//! use ajna_rs_pricing::{from_wad, index_to_price, price_to_index, to_wad};
//!
//! let price = to_wad("0.1").unwrap();
//! let index = price_to_index(price).unwrap();
//! assert_eq!(index, 4618);
//! assert_eq!(from_wad(index_to_price(index).unwrap()), "0.099834229041488465");
//! ```

pub mod error;
pub mod fixed_point;
pub mod numeric;
pub mod pricing;

pub use error::{PricingError, Result};

pub use numeric::{from_wad, to_wad, wdiv, wmul, WAD, WAD_DECIMALS};

pub use pricing::{
    buckets_in_price_range, index_to_price, is_valid_price, price_to_index, FLOAT_STEP,
    MAX_BUCKET_INDEX, MAX_FENWICK_INDEX, MAX_PRICE, MIN_BUCKET_INDEX, MIN_FENWICK_INDEX,
    MIN_PRICE, UNIT_PRICE_INDEX,
};
