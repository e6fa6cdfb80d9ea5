//! Price-level book module.
//!
//! ## Architecture
//!
//! Each side of the book is a [`Ladder`]:
//!
//! - **Slab-based storage**: O(1) node insertion, removal, and lookup
//! - **Tick index**: integer tick key to slab key, O(1) lookup by price
//! - **Sorted chain**: nodes doubly linked in price order, best first
//!
//! ## Components
//!
//! - [`PriceLevel`]: Aggregate size at one price, plus chain links
//! - [`Ladder`]: One side, with anchor-walk insertion and best repair
//! - [`OrderBook`]: Bid and offer ladders, derived prices
//! - [`BookConfig`] / [`LadderMode`]: Dense, sparse, or bounded construction
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Update existing level | O(1) |
//! | Insert new level | O(k)* |
//! | Withdraw best | O(k)* |
//! | Best bid/offer | O(1) |
//! | Snapshot of n levels | O(n) |
//!
//! *k = distance walked from best; small when updates cluster near the top

pub mod book;
pub mod config;
pub mod ladder;
pub mod level;

pub use book::OrderBook;
pub use config::{BookConfig, LadderMode, MAX_DENSE_LEVELS};
pub use ladder::Ladder;
pub use level::PriceLevel;
