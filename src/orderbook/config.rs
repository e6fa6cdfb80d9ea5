//! Construction-time configuration for ladders and books.
//!
//! ## Modes
//!
//! - **Dense**: a node exists for every tick in `[min_price, max_price]` for
//!   the ladder's lifetime. Updates outside the range are rejected.
//! - **Sparse**: nodes are created on the first update to a price. With a
//!   `level_cap`, the worst node is evicted once the cap is exceeded.
//!
//! ## Example
//!
//! ```
//! use price_ladder::{BookConfig, LadderMode};
//!
//! let config = BookConfig::bounded(10, 0.5);
//! assert_eq!(config.mode, LadderMode::Sparse { level_cap: Some(10) });
//! assert_eq!(config.level_cap(), Some(10));
//! ```

/// Upper bound on the number of ticks a dense ladder will pre-allocate
///
/// Each node costs roughly 100 bytes once the slab slot and index entry are
/// counted, so a full-range dense book holds about 200 MB across both sides.
pub const MAX_DENSE_LEVELS: usize = 1_000_000;

/// How a ladder creates and retains price level nodes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LadderMode {
    /// Pre-populated over a fixed price range, nodes never freed
    Dense {
        /// Lowest price in the range (inclusive)
        min_price: f64,
        /// Highest price in the range (inclusive)
        max_price: f64,
    },
    /// Populated on demand, optionally capped to `level_cap` nodes
    Sparse {
        /// Maximum retained nodes per side, `None` for unbounded
        level_cap: Option<usize>,
    },
}

impl Default for LadderMode {
    fn default() -> Self {
        LadderMode::Sparse { level_cap: None }
    }
}

/// Configuration shared by both sides of an [`crate::OrderBook`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BookConfig {
    /// Minimum price increment
    pub tick_size: f64,
    /// Node creation and retention policy
    pub mode: LadderMode,
}

impl BookConfig {
    /// Dense book pre-populated over `[min_price, max_price]`
    pub fn dense(tick_size: f64, min_price: f64, max_price: f64) -> Self {
        Self {
            tick_size,
            mode: LadderMode::Dense { min_price, max_price },
        }
    }

    /// Sparse book with no level cap
    pub fn sparse(tick_size: f64) -> Self {
        Self {
            tick_size,
            mode: LadderMode::Sparse { level_cap: None },
        }
    }

    /// Sparse book keeping at most `level_cap` levels per side
    pub fn bounded(level_cap: usize, tick_size: f64) -> Self {
        Self {
            tick_size,
            mode: LadderMode::Sparse { level_cap: Some(level_cap) },
        }
    }

    /// The level cap, if any
    pub fn level_cap(&self) -> Option<usize> {
        match self.mode {
            LadderMode::Sparse { level_cap } => level_cap,
            LadderMode::Dense { .. } => None,
        }
    }

    /// Returns `true` for dense mode
    pub fn is_dense(&self) -> bool {
        matches!(self.mode, LadderMode::Dense { .. })
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
