//! # Price Ladder
//!
//! Two-sided price-level book for market-data consumers.
//!
//! ## Architecture
//!
//! - **Types**: Side, tick quantization, feed deltas, errors
//! - **OrderBook**: Bid and offer [`Ladder`]s over slab-allocated price levels
//!
//! ## Design Principles
//!
//! 1. **Integer keys**: Prices are quantized to tick counts before hashing or comparing
//! 2. **O(1) top of book**: Each side keeps a handle to its best level
//! 3. **Local search**: Inserts and best repairs walk outward from the best level
//! 4. **All-or-nothing updates**: Validation precedes mutation
//! 5. **Synchronous**: No locking, no async; one writer per book
//!
//! ## Example
//!
//! ```
//! use price_ladder::OrderBook;
//!
//! let mut book = OrderBook::dense(1.0, 100.0, 104.0).unwrap();
//! book.update_bid(102.0, 5.0).unwrap();
//! book.update_bid(103.0, 3.0).unwrap();
//!
//! assert_eq!(book.best_bid_price(), Some(103.0));
//! assert_eq!(book.bids(1, false), vec![(103.0, 3.0), (102.0, 5.0)]);
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Side, TickSize, BookUpdate, LadderError
pub mod types;

/// Price-level book: ladders and the two-sided book
pub mod orderbook;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use types::{BookUpdate, LadderError, PriceRejection, Side, TickSize};
pub use orderbook::{BookConfig, Ladder, LadderMode, OrderBook, PriceLevel};
