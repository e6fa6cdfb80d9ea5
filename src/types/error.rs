//! Error types for ladder construction and updates.
//!
//! Every check runs before any mutation, so a rejected update leaves the
//! ladder exactly as it was. Empty sides are not errors: queries return
//! `None` instead.

use std::fmt;

use thiserror::Error;

/// Why a price was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceRejection {
    /// NaN or infinite
    NotFinite,
    /// Not a whole multiple of the tick size
    OffTick,
    /// Outside the configured dense range, or beyond the tick key range
    OutOfRange,
}

impl fmt::Display for PriceRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceRejection::NotFinite => f.write_str("not finite"),
            PriceRejection::OffTick => f.write_str("not aligned to tick size"),
            PriceRejection::OutOfRange => f.write_str("outside configured range"),
        }
    }
}

/// Errors returned by [`crate::Ladder`] and [`crate::OrderBook`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LadderError {
    /// Price is off-tick, non-finite, or outside the dense range
    #[error("invalid price {price}: {reason}")]
    InvalidPrice {
        /// The rejected price
        price: f64,
        /// What was wrong with it
        reason: PriceRejection,
    },

    /// Size is negative or NaN
    #[error("invalid size {size}: must be a non-negative number")]
    InvalidSize {
        /// The rejected size
        size: f64,
    },

    /// Tick size is zero, negative, or non-finite
    #[error("invalid tick size {tick_size}")]
    InvalidTickSize {
        /// The rejected tick size
        tick_size: f64,
    },

    /// Dense range is inverted or too large to pre-allocate
    #[error("invalid dense range [{min_price}, {max_price}]")]
    InvalidRange {
        /// Lower bound as configured
        min_price: f64,
        /// Upper bound as configured
        max_price: f64,
    },

    /// Bounded mode with a level cap of zero
    #[error("level cap must be at least 1")]
    InvalidCapacity,
}

impl LadderError {
    pub(crate) fn price(price: f64, reason: PriceRejection) -> Self {
        LadderError::InvalidPrice { price, reason }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
