//! Two-sided price-level book.
//!
//! ## Architecture
//!
//! An `OrderBook` owns exactly two [`Ladder`]s of opposite polarity:
//!
//! - **Bids**: best = highest price
//! - **Offers**: best = lowest price
//!
//! Updates are routed to the matching ladder; cross-side values (mid,
//! weighted mid, spread) are derived from each side's best level.
//!
//! ## Empty Results
//!
//! Queries on a side with no resting size return `None`, never a sentinel.
//!
//! ## Threading
//!
//! No internal locking. Drive a book from one serialized update stream; wrap
//! it in a lock if readers run on other threads.
//!
//! ## Example
//!
//! ```
//! use price_ladder::OrderBook;
//!
//! let mut book = OrderBook::sparse(1.0).unwrap();
//!
//! book.update_bid(100.0, 3.0).unwrap();
//! book.update_offer(102.0, 1.0).unwrap();
//!
//! assert_eq!(book.best_bid_price(), Some(100.0));
//! assert_eq!(book.best_offer_price(), Some(102.0));
//! assert_eq!(book.mid(), Some(101.0));
//! assert_eq!(book.weighted_mid(), Some(101.5));
//! assert_eq!(book.spread(), Some(2.0));
//! ```

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::orderbook::{BookConfig, Ladder, PriceLevel};
use crate::types::{BookUpdate, LadderError, Side};

/// Bid and offer ladders for one instrument
#[derive(Debug, Clone)]
pub struct OrderBook {
    config: BookConfig,

    /// Bid ladder (best = highest price)
    bids: Ladder,

    /// Offer ladder (best = lowest price)
    offers: Ladder,
}

impl OrderBook {
    /// Create a book from a [`BookConfig`]
    ///
    /// # Errors
    ///
    /// Any configuration error from [`Ladder::with_mode`].
    pub fn new(config: BookConfig) -> Result<Self, LadderError> {
        Ok(Self {
            config,
            bids: Ladder::with_mode(Side::Bid, config.tick_size, config.mode)?,
            offers: Ladder::with_mode(Side::Offer, config.tick_size, config.mode)?,
        })
    }

    /// Dense book with a node at every tick in `[min_price, max_price]` on both sides
    ///
    /// Every node is allocated up front and kept for the life of the book:
    /// about 100 bytes per tick per side. Ranges wider than
    /// [`crate::orderbook::MAX_DENSE_LEVELS`] ticks are rejected.
    ///
    /// ```
    /// use price_ladder::OrderBook;
    ///
    /// let book = OrderBook::dense(1.0, 100.0, 104.0).unwrap();
    /// assert_eq!(book.bid_ladder().len(), 5);
    /// assert!(book.best_bid_price().is_none());
    /// ```
    pub fn dense(tick_size: f64, min_price: f64, max_price: f64) -> Result<Self, LadderError> {
        Self::new(BookConfig::dense(tick_size, min_price, max_price))
    }

    /// Sparse book, nodes created on demand
    pub fn sparse(tick_size: f64) -> Result<Self, LadderError> {
        Self::new(BookConfig::sparse(tick_size))
    }

    /// Sparse book keeping at most `level_cap` levels per side
    pub fn bounded(level_cap: usize, tick_size: f64) -> Result<Self, LadderError> {
        Self::new(BookConfig::bounded(level_cap, tick_size))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Configuration this book was built with
    #[inline]
    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    /// Get a reference to the bid ladder
    #[inline]
    pub fn bid_ladder(&self) -> &Ladder {
        &self.bids
    }

    /// Get a reference to the offer ladder
    #[inline]
    pub fn offer_ladder(&self) -> &Ladder {
        &self.offers
    }

    /// Get the ladder for `side`
    #[inline]
    pub fn ladder(&self, side: Side) -> &Ladder {
        match side {
            Side::Bid => &self.bids,
            Side::Offer => &self.offers,
        }
    }

    #[inline]
    fn ladder_mut(&mut self, side: Side) -> &mut Ladder {
        match side {
            Side::Bid => &mut self.bids,
            Side::Offer => &mut self.offers,
        }
    }

    /// Check if neither side has resting size
    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.bids.has_liquidity() && !self.offers.has_liquidity()
    }

    // ========================================================================
    // Updates
    // ========================================================================

    /// Set the resting size at a bid price (zero withdraws)
    pub fn update_bid(&mut self, price: f64, size: f64) -> Result<(), LadderError> {
        self.bids.update(price, size)
    }

    /// Set the resting size at an offer price (zero withdraws)
    pub fn update_offer(&mut self, price: f64, size: f64) -> Result<(), LadderError> {
        self.offers.update(price, size)
    }

    /// Set the resting size at `price` on `side`
    pub fn update(&mut self, side: Side, price: f64, size: f64) -> Result<(), LadderError> {
        self.ladder_mut(side).update(price, size)
    }

    /// Apply a feed delta
    ///
    /// ```
    /// use price_ladder::{BookUpdate, OrderBook};
    ///
    /// let mut book = OrderBook::bounded(5, 0.5).unwrap();
    /// book.apply(&BookUpdate::offer(100.5, 2.0)).unwrap();
    /// assert_eq!(book.best_offer_size(), Some(2.0));
    /// ```
    pub fn apply(&mut self, update: &BookUpdate) -> Result<(), LadderError> {
        self.update(update.side, update.price, update.size)
    }

    /// Withdraw everything on both sides
    ///
    /// Dense books keep (and zero) their pre-allocated nodes.
    pub fn clear(&mut self) {
        self.bids.clear();
        self.offers.clear();
        debug!("cleared book");
    }

    // ========================================================================
    // Best Bid/Offer
    // ========================================================================

    /// Get the best bid price (highest price with resting size)
    #[inline]
    pub fn best_bid_price(&self) -> Option<f64> {
        self.bids.best_price()
    }

    /// Get the size at the best bid
    #[inline]
    pub fn best_bid_size(&self) -> Option<f64> {
        self.bids.best_size()
    }

    /// Get the best offer price (lowest price with resting size)
    #[inline]
    pub fn best_offer_price(&self) -> Option<f64> {
        self.offers.best_price()
    }

    /// Get the size at the best offer
    #[inline]
    pub fn best_offer_size(&self) -> Option<f64> {
        self.offers.best_size()
    }

    /// Get the best bid level
    pub fn best_bid_level(&self) -> Option<&PriceLevel> {
        self.bids.best_level()
    }

    /// Get the best offer level
    pub fn best_offer_level(&self) -> Option<&PriceLevel> {
        self.offers.best_level()
    }

    /// Get the bid level at `price`, if one is indexed
    pub fn bid_level(&self, price: f64) -> Result<Option<&PriceLevel>, LadderError> {
        self.bids.level(price)
    }

    /// Get the offer level at `price`, if one is indexed
    pub fn offer_level(&self, price: f64) -> Result<Option<&PriceLevel>, LadderError> {
        self.offers.level(price)
    }

    // ========================================================================
    // Derived Prices
    // ========================================================================

    /// `(best_bid + best_offer) / 2`, or `None` if either side is empty
    pub fn mid(&self) -> Option<f64> {
        let bid = self.bids.best_level()?;
        let offer = self.offers.best_level()?;
        Some((bid.price + offer.price) / 2.0)
    }

    /// Mid weighted by opposite-side size
    ///
    /// `(bid_price * offer_size + offer_price * bid_size) / (bid_size + offer_size)`
    ///
    /// Leans toward the side with less resting size. `None` if either side
    /// is empty or the combined size is zero.
    pub fn weighted_mid(&self) -> Option<f64> {
        let bid = self.bids.best_level()?;
        let offer = self.offers.best_level()?;
        let total = bid.size + offer.size;
        if total <= 0.0 {
            return None;
        }
        Some((bid.price * offer.size + offer.price * bid.size) / total)
    }

    /// `best_offer - best_bid`, or `None` if either side is empty
    ///
    /// Negative when the book is crossed; the book does not reject that.
    pub fn spread(&self) -> Option<f64> {
        match (self.best_bid_price(), self.best_offer_price()) {
            (Some(bid), Some(offer)) => Some(offer - bid),
            _ => None,
        }
    }

    // ========================================================================
    // Depth Snapshots
    // ========================================================================

    /// Bid `(price, size)` pairs, best first (see [`Ladder::snapshot`])
    pub fn bids(&self, levels: i32, actionable_only: bool) -> Vec<(f64, f64)> {
        self.bids.snapshot(levels, actionable_only)
    }

    /// Offer `(price, size)` pairs, best first (see [`Ladder::snapshot`])
    pub fn offers(&self, levels: i32, actionable_only: bool) -> Vec<(f64, f64)> {
        self.offers.snapshot(levels, actionable_only)
    }

    // ========================================================================
    // State Root
    // ========================================================================

    /// SHA-256 over both chains
    ///
    /// Covers every node (tick key, size bits, order count) in chain order
    /// plus which node is best. Two books fed the same updates have the same
    /// root.
    pub fn compute_state_root(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();

        for ladder in [&self.bids, &self.offers] {
            hasher.update([ladder.side().to_u8()]);
            let best = ladder.best_level().map(|level| level.ticks);
            for level in ladder {
                hasher.update(level.ticks.to_le_bytes());
                hasher.update(level.size.to_bits().to_le_bytes());
                hasher.update(level.order_count.to_le_bytes());
                hasher.update([u8::from(best == Some(level.ticks))]);
            }
        }

        let result = hasher.finalize();
        let mut root = [0u8; 32];
        root.copy_from_slice(&result);
        root
    }

    /// Get the state root as a hex string
    pub fn state_root_hex(&self) -> String {
        hex::encode(self.compute_state_root())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orderbook::LadderMode;

    #[test]
    fn test_book_new() {
        let book = OrderBook::sparse(1.0).unwrap();

        assert!(book.is_empty());
        assert!(book.best_bid_price().is_none());
        assert!(book.best_offer_price().is_none());
        assert!(book.best_bid_size().is_none());
        assert!(book.best_offer_size().is_none());
        assert!(book.bids(-1, false).is_empty());
        assert!(book.offers(-1, false).is_empty());
    }

    #[test]
    fn test_book_invalid_config() {
        assert!(OrderBook::sparse(-1.0).is_err());
        assert_eq!(OrderBook::bounded(0, 1.0).unwrap_err(), LadderError::InvalidCapacity);
        assert!(OrderBook::dense(1.0, 10.0, 5.0).is_err());
    }

    #[test]
    fn test_book_config_passthrough() {
        let book = OrderBook::bounded(4, 0.5).unwrap();

        assert_eq!(book.config().level_cap(), Some(4));
        assert_eq!(book.bid_ladder().level_cap(), Some(4));
        assert_eq!(book.offer_ladder().mode(), LadderMode::Sparse { level_cap: Some(4) });
        assert_eq!(book.ladder(Side::Bid).side(), Side::Bid);
        assert_eq!(book.ladder(Side::Offer).side(), Side::Offer);
    }

    #[test]
    fn test_book_sides_are_independent() {
        let mut book = OrderBook::sparse(1.0).unwrap();

        book.update_bid(100.0, 1.0).unwrap();
        assert!(book.offer_level(100.0).unwrap().is_none());
        assert!(book.best_offer_price().is_none());

        book.update_offer(100.0, 2.0).unwrap();
        assert_eq!(book.bid_level(100.0).unwrap().unwrap().size, 1.0);
        assert_eq!(book.offer_level(100.0).unwrap().unwrap().size, 2.0);
    }

    #[test]
    fn test_book_price_priority() {
        let mut book = OrderBook::sparse(1.0).unwrap();

        book.update_bid(99.0, 1.0).unwrap();
        book.update_bid(101.0, 1.0).unwrap();
        book.update_bid(100.0, 1.0).unwrap();
        book.update_offer(104.0, 1.0).unwrap();
        book.update_offer(102.0, 1.0).unwrap();
        book.update_offer(103.0, 1.0).unwrap();

        assert_eq!(book.best_bid_price(), Some(101.0));
        assert_eq!(book.best_offer_price(), Some(102.0));
        assert_eq!(book.bids(-1, false), vec![(101.0, 1.0), (100.0, 1.0), (99.0, 1.0)]);
        assert_eq!(book.offers(-1, false), vec![(102.0, 1.0), (103.0, 1.0), (104.0, 1.0)]);
    }

    #[test]
    fn test_book_mid_and_weighted_mid() {
        let mut book = OrderBook::sparse(0.5).unwrap();
        book.update_bid(100.0, 1.0).unwrap();
        book.update_offer(101.0, 3.0).unwrap();

        assert_eq!(book.mid(), Some(100.5));
        // (100 * 3 + 101 * 1) / 4 = 100.25, leaning toward the thinner bid
        assert_eq!(book.weighted_mid(), Some(100.25));
    }

    #[test]
    fn test_book_derived_need_both_sides() {
        let mut book = OrderBook::sparse(1.0).unwrap();
        book.update_offer(101.0, 3.0).unwrap();

        assert!(book.mid().is_none());
        assert!(book.weighted_mid().is_none());
        assert!(book.spread().is_none());
    }

    #[test]
    fn test_book_spread() {
        let mut book = OrderBook::sparse(1.0).unwrap();
        book.update_bid(100.0, 1.0).unwrap();
        book.update_offer(103.0, 1.0).unwrap();
        assert_eq!(book.spread(), Some(3.0));

        // Crossed books are reported as-is
        book.update_bid(104.0, 1.0).unwrap();
        assert_eq!(book.spread(), Some(-1.0));
    }

    #[test]
    fn test_book_apply_routes_by_side() {
        let mut book = OrderBook::sparse(1.0).unwrap();

        book.apply(&BookUpdate::bid(100.0, 2.0)).unwrap();
        book.apply(&BookUpdate::offer(101.0, 4.0)).unwrap();
        book.update(Side::Offer, 102.0, 1.0).unwrap();

        assert_eq!(book.best_bid_size(), Some(2.0));
        assert_eq!(book.best_offer_size(), Some(4.0));
        assert_eq!(book.offer_ladder().len(), 2);
        assert_eq!(book.bid_ladder().len(), 1);
    }

    #[test]
    fn test_book_best_level_accessors() {
        let mut book = OrderBook::sparse(1.0).unwrap();
        book.update_bid(100.0, 2.0).unwrap();
        book.update_bid(100.0, 3.0).unwrap();

        let level = book.best_bid_level().unwrap();
        assert_eq!(level.price, 100.0);
        assert_eq!(level.order_count, 2);
        assert!(book.best_offer_level().is_none());
        assert!(book.bid_level(100.5).is_err());
    }

    #[test]
    fn test_book_clear_sparse() {
        let mut book = OrderBook::sparse(1.0).unwrap();
        book.update_bid(100.0, 1.0).unwrap();
        book.update_offer(101.0, 1.0).unwrap();

        book.clear();

        assert!(book.is_empty());
        assert!(book.bid_ladder().is_empty());
        assert!(book.offer_ladder().is_empty());
        assert!(book.mid().is_none());
    }

    #[test]
    fn test_book_clear_dense() {
        let mut book = OrderBook::dense(1.0, 100.0, 104.0).unwrap();
        book.update_bid(102.0, 1.0).unwrap();
        book.update_offer(103.0, 1.0).unwrap();

        book.clear();

        assert!(book.is_empty());
        assert_eq!(book.bid_ladder().len(), 5);
        assert_eq!(book.offer_ladder().len(), 5);
        assert!(book.update_bid(104.0, 1.0).is_ok());
        assert!(book.update_bid(105.0, 1.0).is_err());
    }

    #[test]
    fn test_state_root_tracks_state() {
        let mut a = OrderBook::sparse(1.0).unwrap();
        let mut b = OrderBook::sparse(1.0).unwrap();
        assert_eq!(a.compute_state_root(), b.compute_state_root());

        a.update_bid(100.0, 1.0).unwrap();
        assert_ne!(a.compute_state_root(), b.compute_state_root());

        b.update_bid(100.0, 1.0).unwrap();
        assert_eq!(a.state_root_hex(), b.state_root_hex());
        assert_eq!(a.state_root_hex().len(), 64);

        // Same level on the other side is a different state
        let mut c = OrderBook::sparse(1.0).unwrap();
        c.update_offer(100.0, 1.0).unwrap();
        assert_ne!(a.compute_state_root(), c.compute_state_root());
    }
}
