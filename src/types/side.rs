//! Book side and its comparison polarity.
//!
//! ## Polarity
//!
//! - **Bid**: a higher price is better
//! - **Offer**: a lower price is better
//!
//! All comparisons are done on integer tick keys, never on raw `f64` prices.

use std::fmt;

/// Side of the book: Bid or Offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// Resting buy interest - best is the highest price
    #[default]
    Bid,
    /// Resting sell interest - best is the lowest price
    Offer,
}

impl Side {
    /// Tag used when hashing book state
    pub fn to_u8(self) -> u8 {
        match self {
            Side::Bid => 0,
            Side::Offer => 1,
        }
    }

    /// Returns the opposite side
    pub fn opposite(self) -> Self {
        match self {
            Side::Bid => Side::Offer,
            Side::Offer => Side::Bid,
        }
    }

    /// Returns `true` if tick key `a` is strictly better than `b` on this side.
    ///
    /// # Example
    ///
    /// ```
    /// use price_ladder::Side;
    ///
    /// assert!(Side::Bid.is_better(103, 102));
    /// assert!(Side::Offer.is_better(102, 103));
    /// assert!(!Side::Bid.is_better(102, 102));
    /// ```
    #[inline]
    pub fn is_better(self, a: i64, b: i64) -> bool {
        match self {
            Side::Bid => a > b,
            Side::Offer => a < b,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Bid => f.write_str("bid"),
            Side::Offer => f.write_str("offer"),
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
