//! Signed 59.18-decimal fixed-point arithmetic.
//!
//! The pool contracts derive bucket prices with PRBMath's `SD59x18` library.
//! The functions here reproduce that library's rounding behaviour:
//!
//! - [`mul`] rounds half up on the absolute value
//! - [`div`] truncates toward zero
//! - [`log2`] uses the iterative squaring method with 59 fractional bits of work
//! - [`exp2`] multiplies 64 magic factors in 192.64 binary fixed point
//!
//! Values are carried as `i128`, which covers every intermediate the bucket curve
//! produces. Operations that would leave that range report
//! [`PricingError::Overflow`] instead of wrapping.

use alloy_primitives::U256;

use crate::error::{PricingError, Result};

/// One unit in 18-decimal fixed point.
pub const SCALE: i128 = 1_000_000_000_000_000_000;

const HALF_SCALE: i128 = SCALE / 2;

const SCALE_SQUARED: i128 = SCALE * SCALE;

const SCALE_UNSIGNED: u128 = SCALE.unsigned_abs();

/// Below this input `exp2` underflows to zero.
const EXP2_MIN_INPUT: i128 = -59_794_705_707_972_522_261;

/// At or above this input `exp2` no longer fits the 192.64 format.
const EXP2_MAX_INPUT: i128 = 192 * SCALE;

/// `2^(2^-k)` in 64.64 binary fixed point for k = 1..=64, rounded to nearest.
const EXP2_FACTORS: [u128; 64] = [
    0x16A09E667F3BCC909, 0x1306FE0A31B7152DF, 0x1172B83C7D517ADCE, 0x10B5586CF9890F62A,
    0x1059B0D31585743AE, 0x102C9A3E778060EE7, 0x10163DA9FB33356D8, 0x100B1AFA5ABCBED61,
    0x10058C86DA1C09EA2, 0x1002C605E2E8CEC50, 0x100162F3904051FA1, 0x1000B175EFFDC76BA,
    0x100058BA01FB9F96D, 0x10002C5CC37DA9492, 0x1000162E525EE0547, 0x10000B17255775C04,
    0x1000058B91B5BC9AE, 0x100002C5C89D5EC6D, 0x10000162E43F4F831, 0x100000B1721BCFC9A,
    0x10000058B90CF1E6E, 0x1000002C5C863B73F, 0x100000162E430E5A2, 0x1000000B172183551,
    0x100000058B90C0B49, 0x10000002C5C8601CC, 0x1000000162E42FFF0, 0x10000000B17217FBB,
    0x1000000058B90BFCE, 0x100000002C5C85FE3, 0x10000000162E42FF1, 0x100000000B17217F8,
    0x10000000058B90BFC, 0x1000000002C5C85FE, 0x100000000162E42FF, 0x1000000000B17217F,
    0x100000000058B90C0, 0x10000000002C5C860, 0x1000000000162E430, 0x10000000000B17218,
    0x1000000000058B90C, 0x100000000002C5C86, 0x10000000000162E43, 0x100000000000B1721,
    0x10000000000058B91, 0x1000000000002C5C8, 0x100000000000162E4, 0x1000000000000B172,
    0x100000000000058B9, 0x10000000000002C5D, 0x1000000000000162E, 0x10000000000000B17,
    0x1000000000000058C, 0x100000000000002C6, 0x10000000000000163, 0x100000000000000B1,
    0x10000000000000059, 0x1000000000000002C, 0x10000000000000016, 0x1000000000000000B,
    0x10000000000000006, 0x10000000000000003, 0x10000000000000001, 0x10000000000000001,
];

/// Converts a whole number to fixed point.
pub fn from_int(x: i64) -> i128 {
    i128::from(x) * SCALE
}

/// Truncates a fixed-point number toward zero and returns the whole part.
pub fn to_int(x: i128) -> i128 {
    x / SCALE
}

/// Smallest whole fixed-point number greater than or equal to `x`.
pub fn ceil(x: i128) -> i128 {
    let remainder = x % SCALE;
    if remainder == 0 {
        x
    } else if x > 0 {
        x - remainder + SCALE
    } else {
        x - remainder
    }
}

/// Fixed-point product, rounding half up on the magnitude.
pub fn mul(x: i128, y: i128) -> Result<i128> {
    let product = x
        .unsigned_abs()
        .checked_mul(y.unsigned_abs())
        .ok_or(PricingError::Overflow("mul"))?;

    let mut magnitude = product / SCALE_UNSIGNED;
    if product % SCALE_UNSIGNED >= HALF_SCALE.unsigned_abs() {
        magnitude += 1;
    }

    let magnitude = i128::try_from(magnitude).map_err(|_| PricingError::Overflow("mul"))?;
    Ok(if (x < 0) != (y < 0) { -magnitude } else { magnitude })
}

/// Fixed-point quotient, truncated toward zero.
pub fn div(x: i128, y: i128) -> Result<i128> {
    if y == 0 {
        return Err(PricingError::DivisionByZero);
    }

    let magnitude = x
        .unsigned_abs()
        .checked_mul(SCALE_UNSIGNED)
        .ok_or(PricingError::Overflow("div"))?
        / y.unsigned_abs();

    let magnitude = i128::try_from(magnitude).map_err(|_| PricingError::Overflow("div"))?;
    Ok(if (x < 0) != (y < 0) { -magnitude } else { magnitude })
}

/// Binary logarithm.
pub fn log2(x: i128) -> Result<i128> {
    if x <= 0 {
        return Err(PricingError::NonPositiveLogarithm(x));
    }

    // log2(x) = -log2(1/x) for x < 1
    let (x, sign) = if x >= SCALE {
        (x, 1)
    } else {
        (SCALE_SQUARED / x, -1)
    };

    let n = most_significant_bit((x / SCALE).unsigned_abs());
    let mut result = i128::from(n) * SCALE;

    let mut y = x >> n;
    if y == SCALE {
        return Ok(result * sign);
    }

    let mut delta = HALF_SCALE;
    while delta > 0 {
        y = y * y / SCALE;
        if y >= 2 * SCALE {
            result += delta;
            y >>= 1;
        }
        delta >>= 1;
    }

    Ok(result * sign)
}

/// Binary exponent.
pub fn exp2(x: i128) -> Result<i128> {
    if x < 0 {
        if x < EXP2_MIN_INPUT {
            return Ok(0);
        }
        // 2^-x = 1 / 2^x, and 2^x >= 1 for positive x
        return Ok(SCALE_SQUARED / exp2(-x)?);
    }

    if x >= EXP2_MAX_INPUT {
        return Err(PricingError::Overflow("exp2"));
    }

    let x192x64 = (U256::from(x.unsigned_abs()) << 64_usize) / U256::from(SCALE_UNSIGNED);
    let result = exp2_192x64(x192x64)?;

    u128::try_from(result)
        .ok()
        .and_then(|value| i128::try_from(value).ok())
        .ok_or(PricingError::Overflow("exp2"))
}

/// `2^x` for `x` in 192.64 binary fixed point, returned with 18 decimals.
fn exp2_192x64(x: U256) -> Result<U256> {
    // 0.5 in 192.64; the missing factor of two comes back in the final shift
    let mut result = U256::from(1u8) << 191_usize;

    for (bit, factor) in EXP2_FACTORS.iter().enumerate() {
        if x.bit(63 - bit) {
            result = (result * U256::from(*factor)) >> 64_usize;
        }
    }

    let integer_part = (x >> 64_usize).saturating_to::<usize>();
    if integer_part > 191 {
        return Err(PricingError::Overflow("exp2"));
    }

    result *= U256::from(SCALE_UNSIGNED);
    Ok(result >> (191 - integer_part))
}

fn most_significant_bit(x: u128) -> u32 {
    127 - x.leading_zeros()
}
