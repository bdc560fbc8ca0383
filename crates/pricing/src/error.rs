//! Error types for the pricing library.

use alloy_primitives::U256;
use thiserror::Error;

use crate::pricing::{MAX_FENWICK_INDEX, MIN_FENWICK_INDEX};

/// Errors raised locally by price and index conversions.
///
/// None of these ever reach the network: they are raised before a call is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// Bucket index outside the Fenwick index range.
    #[error(
        "Bucket index {index} out of range [{}, {}]",
        MIN_FENWICK_INDEX,
        MAX_FENWICK_INDEX
    )]
    IndexOutOfRange { index: i64 },

    /// Price outside the range covered by the bucket curve.
    #[error("Price {price} out of range")]
    PriceOutOfRange { price: U256 },

    /// Logarithm of a non-positive value.
    #[error("Logarithm undefined for non-positive input {0}")]
    NonPositiveLogarithm(i128),

    /// Intermediate fixed-point value overflowed.
    #[error("Fixed-point overflow in {0}")]
    Overflow(&'static str),

    /// Decimal amount could not be parsed.
    #[error("Invalid decimal amount: {0}")]
    InvalidAmount(String),

    /// Division by zero.
    #[error("Division by zero")]
    DivisionByZero,
}

/// Result type alias for pricing operations.
pub type Result<T> = std::result::Result<T, PricingError>;
