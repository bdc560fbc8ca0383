//! Conversions between Fenwick bucket indices and bucket prices.
//!
//! Ajna pools price every bucket on a fixed geometric curve: each bucket is
//! 0.5% cheaper than the one before it. The contract stores deposits in a
//! Fenwick tree whose index 1 is the most expensive bucket and whose index
//! 7388 is the cheapest, and it derives prices from indices (and back) with
//! signed 59.18-decimal fixed-point math. A client that wants the contract to
//! act on the same bucket it computed must do exactly the same math, so every
//! conversion here goes through [`crate::fixed_point`] rather than floats.
//!
//! # Curve
//!
//! ```text
//! bucket_index = 4156 - fenwick_index
//! price        = 1.005 ^ bucket_index          (WAD)
//! ```
//!
//! Fenwick index 4156 therefore sits at exactly 1.0.
//!
//! # Example
//!
//! ```rust
//! use ajna_rs_pricing::{index_to_price, price_to_index};
//! use alloy_primitives::U256;
//!
//! let price = index_to_price(2000).unwrap();
//! assert_eq!(price, U256::from(46_776_653_369_145_271_678_115u128));
//! assert_eq!(price_to_index(price).unwrap(), 2000);
//! ```

use alloy_primitives::{uint, U256};

use crate::error::{PricingError, Result};
use crate::fixed_point::{self, SCALE};

/// Lowest Fenwick index the client may address (highest price).
pub const MIN_FENWICK_INDEX: u32 = 1;

/// Highest Fenwick index (lowest price).
pub const MAX_FENWICK_INDEX: u32 = 7388;

/// Fenwick index whose bucket is priced at exactly 1.0.
pub const UNIT_PRICE_INDEX: u32 = 4156;

/// Exponent applied to [`FLOAT_STEP`] at Fenwick index 0.
pub const MAX_BUCKET_INDEX: i64 = 4156;

/// Exponent applied to [`FLOAT_STEP`] at [`MAX_FENWICK_INDEX`].
pub const MIN_BUCKET_INDEX: i64 = -3232;

/// Ratio between adjacent bucket prices (1.005 in WAD).
pub const FLOAT_STEP: U256 = uint!(1_005_000_000_000_000_000_U256);

/// Curve price at Fenwick index 0, the upper bound accepted by the contract.
pub const MAX_PRICE: U256 = uint!(1_004_968_987_606_512_354_182_109_771_U256);

/// Curve price at [`MAX_FENWICK_INDEX`], the lower bound accepted by the contract.
pub const MIN_PRICE: U256 = uint!(99_836_282_890_U256);

/// `log2(1.005)` as computed by the contract's fixed-point library.
const LOG2_FLOAT_STEP: i128 = 7_195_501_404_203_907;

/// Returns the price of the bucket at `index`.
///
/// Fails with [`PricingError::IndexOutOfRange`] unless
/// `MIN_FENWICK_INDEX <= index <= MAX_FENWICK_INDEX`.
pub fn index_to_price(index: u32) -> Result<U256> {
    if !(MIN_FENWICK_INDEX..=MAX_FENWICK_INDEX).contains(&index) {
        return Err(PricingError::IndexOutOfRange {
            index: i64::from(index),
        });
    }

    let bucket_index = MAX_BUCKET_INDEX - i64::from(index);
    let exponent = fixed_point::mul(fixed_point::from_int(bucket_index), LOG2_FLOAT_STEP)?;
    let price = fixed_point::exp2(exponent)?;

    Ok(U256::from(price.unsigned_abs()))
}

/// Returns the index of the bucket a price resolves to on-chain.
///
/// Above 1.0 a price between two buckets resolves to the more expensive one
/// (the lower index). Below 1.0 the contract rounds to the nearest bucket in
/// log space, so a price just above a cheaper bucket resolves to that bucket.
///
/// Fails with [`PricingError::PriceOutOfRange`] outside
/// `[MIN_PRICE, MAX_PRICE]`, and with [`PricingError::IndexOutOfRange`] for
/// prices above the index-1 bucket.
pub fn price_to_index(price: U256) -> Result<u32> {
    if price < MIN_PRICE || price > MAX_PRICE {
        return Err(PricingError::PriceOutOfRange { price });
    }

    // MAX_PRICE fits comfortably in i128
    let price_fp = i128::try_from(price.saturating_to::<u128>())
        .map_err(|_| PricingError::Overflow("price_to_index"))?;

    let index = fixed_point::div(fixed_point::log2(price_fp)?, LOG2_FLOAT_STEP)?;
    let ceil_index = fixed_point::ceil(index);

    let fenwick_index = if index < 0 && ceil_index - index > SCALE / 2 {
        i128::from(MAX_BUCKET_INDEX) + 1 - fixed_point::to_int(ceil_index)
    } else {
        i128::from(MAX_BUCKET_INDEX) - fixed_point::to_int(ceil_index)
    };

    u32::try_from(fenwick_index)
        .ok()
        .filter(|index| (MIN_FENWICK_INDEX..=MAX_FENWICK_INDEX).contains(index))
        .ok_or(PricingError::IndexOutOfRange {
            index: i64::try_from(fenwick_index).unwrap_or(i64::MAX),
        })
}

/// Returns the indices of all buckets priced within `[min_price, max_price]`,
/// most expensive first.
///
/// Bounds are clamped to the curve, so a range that extends past either end
/// yields the buckets that exist. An empty vector is returned when no bucket
/// price falls inside the range.
pub fn buckets_in_price_range(min_price: U256, max_price: U256) -> Result<Vec<u32>> {
    if min_price > max_price {
        return Ok(Vec::new());
    }

    let highest = index_to_price(MIN_FENWICK_INDEX)?;
    let start = if max_price >= highest {
        MIN_FENWICK_INDEX
    } else if max_price < MIN_PRICE {
        return Ok(Vec::new());
    } else {
        price_to_index(max_price)?
    };

    let mut indices = Vec::new();
    for index in start.saturating_sub(1).max(MIN_FENWICK_INDEX)..=MAX_FENWICK_INDEX {
        let price = index_to_price(index)?;
        if price > max_price {
            continue;
        }
        if price < min_price {
            break;
        }
        indices.push(index);
    }

    Ok(indices)
}

/// Returns `true` when `price` lies strictly above the cheapest bucket and at
/// or below the most expensive one.
pub fn is_valid_price(price: U256) -> bool {
    match (
        index_to_price(MIN_FENWICK_INDEX),
        index_to_price(MAX_FENWICK_INDEX),
    ) {
        (Ok(highest), Ok(lowest)) => price > lowest && price <= highest,
        _ => false,
    }
}
