//! Price level node for slab-based storage.
//!
//! ## Design
//!
//! A `PriceLevel` is the aggregate resting size at one price point on one
//! side of the book. Levels on a side form a doubly-linked chain sorted by
//! price, so the ladder can step from the best level outward in O(1).
//!
//! ## Links
//!
//! Links are slab keys (`usize`), not references:
//! - `toward_best`: neighbor with the next better price
//! - `away_from_best`: neighbor with the next worse price
//!
//! ```text
//! bids:   103 <-> 102 <-> 101 <-> 100
//!         top                     worst
//! ```
//!
//! ## Order Count
//!
//! `order_count` is an activity counter, not a tally of orders. It goes up
//! when the size at an existing level increases, down when it does not, and
//! is reset to zero when the level is withdrawn.

/// A single price level in a ladder.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceLevel {
    /// Reported price (exact decimal multiple of the tick size)
    pub price: f64,

    /// Integer tick key, used for all comparisons and indexing
    pub ticks: i64,

    /// Resting size at this price (>= 0)
    pub size: f64,

    /// Activity counter, see module docs
    pub order_count: i32,

    /// Next better level (slab key)
    /// None if this is the top of the chain
    pub toward_best: Option<usize>,

    /// Next worse level (slab key)
    /// None if this is the bottom of the chain
    pub away_from_best: Option<usize>,
}

impl PriceLevel {
    /// Create a level that is known to have resting size
    ///
    /// # Example
    ///
    /// ```
    /// use price_ladder::PriceLevel;
    ///
    /// let level = PriceLevel::new(102.0, 102, 5.0);
    /// assert_eq!(level.order_count, 1);
    /// assert!(level.is_unlinked());
    /// ```
    #[inline]
    pub fn new(price: f64, ticks: i64, size: f64) -> Self {
        Self {
            price,
            ticks,
            size,
            order_count: 1,
            toward_best: None,
            away_from_best: None,
        }
    }

    /// Create an empty placeholder level (size and count zero)
    #[inline]
    pub fn empty(price: f64, ticks: i64) -> Self {
        Self {
            price,
            ticks,
            size: 0.0,
            order_count: 0,
            toward_best: None,
            away_from_best: None,
        }
    }

    /// Check if there is resting size at this level
    #[inline]
    pub fn is_active(&self) -> bool {
        self.size > 0.0
    }

    /// Check if this level is not part of any chain
    #[inline]
    pub fn is_unlinked(&self) -> bool {
        self.toward_best.is_none() && self.away_from_best.is_none()
    }

    /// Set a new resting size, adjusting the activity counter
    ///
    /// A size of zero withdraws the level. Otherwise the counter goes up if
    /// the size grew and down if it did not.
    pub fn set_size(&mut self, size: f64) {
        if size == 0.0 {
            self.order_count = 0;
        } else if size > self.size {
            self.order_count = self.order_count.saturating_add(1);
        } else {
            self.order_count = self.order_count.saturating_sub(1);
        }
        self.size = size;
    }

    /// Withdraw all resting interest, keeping the level linked
    #[inline]
    pub fn zero(&mut self) {
        self.size = 0.0;
        self.order_count = 0;
    }

    /// `(price, size)` pair as reported in snapshots
    #[inline]
    pub fn quote(&self) -> (f64, f64) {
        (self.price, self.size)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
