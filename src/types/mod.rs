//! Core data types for the price ladder
//!
//! ## Types
//!
//! - [`Side`]: Bid or Offer, and which direction is "better"
//! - [`TickSize`]: Quantizes `f64` prices to integer tick keys
//! - [`BookUpdate`]: A `(side, price, size)` delta
//! - [`LadderError`]: Rejections from construction and updates
//!
//! ## Tick Keys
//!
//! Prices are stored as reported `f64` values, but indexed and compared
//! as `i64` tick counts. Example: with a tick of 0.01, 101.23 has key 10123.

mod error;
mod side;
mod update;
pub mod price;

// Re-export all types at module level
pub use error::{LadderError, PriceRejection};
pub use side::Side;
pub use update::BookUpdate;
pub use price::TickSize;
