//! Price level deltas delivered by the upstream feed normalizer.

use crate::types::Side;

/// A single `(side, price, size)` delta.
///
/// `size` is the new resting size at `price`, not a change in size.
/// A size of zero withdraws the resting interest at that price.
///
/// ## Example
///
/// ```
/// use price_ladder::{BookUpdate, Side};
///
/// let update = BookUpdate::bid(102.0, 5.0);
/// assert_eq!(update.side, Side::Bid);
/// assert!(!update.is_withdrawal());
/// assert!(BookUpdate::offer(103.0, 0.0).is_withdrawal());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BookUpdate {
    /// Which ladder the delta applies to
    pub side: Side,
    /// Price of the level
    pub price: f64,
    /// New resting size at the level
    pub size: f64,
}

impl BookUpdate {
    /// Create a new update
    pub fn new(side: Side, price: f64, size: f64) -> Self {
        Self { side, price, size }
    }

    /// Bid-side update
    pub fn bid(price: f64, size: f64) -> Self {
        Self::new(Side::Bid, price, size)
    }

    /// Offer-side update
    pub fn offer(price: f64, size: f64) -> Self {
        Self::new(Side::Offer, price, size)
    }

    /// Returns `true` if this update withdraws the level
    #[inline]
    pub fn is_withdrawal(&self) -> bool {
        self.size == 0.0
    }
}
