//! WAD (18-decimal) amount helpers.
//!
//! Pool contracts take and return token amounts, prices and rates as WAD
//! integers. These helpers convert between the decimal strings a user types
//! and those integers, and mirror the contracts' `wmul`/`wdiv` rounding.

use alloy_primitives::utils::{format_units, parse_units};
use alloy_primitives::U256;

use crate::error::{PricingError, Result};

/// Number of decimals in a WAD value.
pub const WAD_DECIMALS: u8 = 18;

/// 1.0 in WAD.
pub const WAD: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Parses a non-negative decimal string (e.g. `"1.5"`) into WAD.
///
/// Fractional digits beyond the 18th are rejected rather than truncated.
pub fn to_wad(amount: &str) -> Result<U256> {
    let trimmed = amount.trim();
    if trimmed.is_empty() || trimmed.starts_with('-') {
        return Err(PricingError::InvalidAmount(amount.to_string()));
    }

    let fraction_digits = trimmed.split_once('.').map_or(0, |(_, fraction)| fraction.len());
    if fraction_digits > usize::from(WAD_DECIMALS) {
        return Err(PricingError::InvalidAmount(amount.to_string()));
    }

    parse_units(trimmed, WAD_DECIMALS)
        .map(|parsed| parsed.get_absolute())
        .map_err(|_| PricingError::InvalidAmount(amount.to_string()))
}

/// Formats a WAD value as a decimal string without trailing zeros.
pub fn from_wad(value: U256) -> String {
    let formatted = format_units(value, WAD_DECIMALS).unwrap_or_else(|_| value.to_string());

    if formatted.contains('.') {
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        formatted
    }
}

/// WAD product rounded half up.
pub fn wmul(x: U256, y: U256) -> Result<U256> {
    x.checked_mul(y)
        .and_then(|product| product.checked_add(WAD / U256::from(2)))
        .map(|product| product / WAD)
        .ok_or(PricingError::Overflow("wmul"))
}

/// WAD quotient rounded half up.
pub fn wdiv(x: U256, y: U256) -> Result<U256> {
    if y.is_zero() {
        return Err(PricingError::DivisionByZero);
    }

    x.checked_mul(WAD)
        .and_then(|scaled| scaled.checked_add(y / U256::from(2)))
        .map(|scaled| scaled / y)
        .ok_or(PricingError::Overflow("wdiv"))
}
