//! One side of the book: a sorted chain of price levels with an O(1) best.
//!
//! ## Architecture
//!
//! - **Slab**: arena owning every [`PriceLevel`] node, addressed by `usize` keys
//! - **HashMap**: tick key to slab key, for O(1) lookup by price
//! - **Chain**: nodes doubly linked in price order via `toward_best` /
//!   `away_from_best`, from `top` (most favorable) to `worst`
//! - **best**: the most favorable node with positive size
//!
//! Withdrawn levels (size zero) stay in the chain, so `top` and `best` are
//! not always the same node.
//!
//! ## Anchor-Walk Insertion
//!
//! New nodes are placed by walking the chain outward from `best` rather than
//! scanning from either end. Book updates cluster near the top of the book,
//! so the walk is usually a handful of steps.
//!
//! ```text
//! new price better than best:  walk toward_best  until a better node
//! otherwise:                   walk away_from_best until a worse node
//! ```
//!
//! ## Modes
//!
//! | Mode | Node creation | Node removal |
//! |------|---------------|--------------|
//! | Dense | every tick in range, at construction | never |
//! | Sparse | first update to a price | never |
//! | Bounded | first update to a price | a withdrawn node, else the worst node, when over the cap |
//!
//! ## Example
//!
//! ```
//! use price_ladder::{Ladder, Side};
//!
//! let mut bids = Ladder::sparse(Side::Bid, 1.0).unwrap();
//! bids.update(102.0, 5.0).unwrap();
//! bids.update(103.0, 3.0).unwrap();
//!
//! assert_eq!(bids.best_price(), Some(103.0));
//! assert_eq!(bids.snapshot(-1, false), vec![(103.0, 3.0), (102.0, 5.0)]);
//! ```

use std::collections::HashMap;

use slab::Slab;
use tracing::{debug, trace};

use crate::orderbook::{LadderMode, PriceLevel, MAX_DENSE_LEVELS};
use crate::types::{LadderError, PriceRejection, Side, TickSize};

/// Slab slots reserved up front for sparse ladders
const SPARSE_INITIAL_CAPACITY: usize = 256;

/// One side (bid or offer) of a price-level book.
#[derive(Debug, Clone)]
pub struct Ladder {
    /// Comparison polarity
    side: Side,

    /// Node creation and retention policy
    mode: LadderMode,

    tick_size: TickSize,

    /// Node storage
    /// Key: slab index, Value: PriceLevel
    levels: Slab<PriceLevel>,

    /// Tick key to slab key
    index: HashMap<i64, usize>,

    /// Most favorable level with positive size
    best: Option<usize>,

    /// Most favorable node in the chain, regardless of size
    top: Option<usize>,

    /// Least favorable node in the chain
    worst: Option<usize>,

    /// Retained nodes with zero size
    withdrawn: usize,

    /// Inclusive tick bounds (dense mode only)
    range: Option<(i64, i64)>,
}

impl Ladder {
    /// Create a ladder from a [`LadderMode`]
    ///
    /// # Errors
    ///
    /// - [`LadderError::InvalidTickSize`] for a bad tick size
    /// - [`LadderError::InvalidPrice`] if a dense bound is off-tick
    /// - [`LadderError::InvalidRange`] if `min_price > max_price` or the range
    ///   exceeds [`MAX_DENSE_LEVELS`] ticks
    /// - [`LadderError::InvalidCapacity`] for a level cap of zero
    pub fn with_mode(side: Side, tick_size: f64, mode: LadderMode) -> Result<Self, LadderError> {
        let tick_size = TickSize::new(tick_size)?;

        match mode {
            LadderMode::Dense { min_price, max_price } => {
                Self::build_dense(side, tick_size, min_price, max_price)
            }
            LadderMode::Sparse { level_cap: Some(0) } => Err(LadderError::InvalidCapacity),
            LadderMode::Sparse { level_cap } => {
                let capacity = level_cap
                    .map(|cap| cap.saturating_add(1))
                    .unwrap_or(SPARSE_INITIAL_CAPACITY)
                    .min(SPARSE_INITIAL_CAPACITY);
                Ok(Self::empty(side, tick_size, mode, capacity))
            }
        }
    }

    /// Dense ladder with a node at every tick in `[min_price, max_price]`
    pub fn dense(side: Side, tick_size: f64, min_price: f64, max_price: f64) -> Result<Self, LadderError> {
        Self::with_mode(side, tick_size, LadderMode::Dense { min_price, max_price })
    }

    /// Sparse ladder with no level cap
    pub fn sparse(side: Side, tick_size: f64) -> Result<Self, LadderError> {
        Self::with_mode(side, tick_size, LadderMode::Sparse { level_cap: None })
    }

    /// Sparse ladder retaining at most `level_cap` nodes
    ///
    /// Withdrawn levels give up their slot before any level with resting
    /// size does, so the ladder always holds the best `level_cap` levels
    /// that still carry size.
    pub fn bounded(side: Side, level_cap: usize, tick_size: f64) -> Result<Self, LadderError> {
        Self::with_mode(side, tick_size, LadderMode::Sparse { level_cap: Some(level_cap) })
    }

    fn empty(side: Side, tick_size: TickSize, mode: LadderMode, capacity: usize) -> Self {
        Self {
            side,
            mode,
            tick_size,
            levels: Slab::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            best: None,
            top: None,
            worst: None,
            withdrawn: 0,
            range: None,
        }
    }

    fn build_dense(
        side: Side,
        tick_size: TickSize,
        min_price: f64,
        max_price: f64,
    ) -> Result<Self, LadderError> {
        let invalid = LadderError::InvalidRange { min_price, max_price };
        // Also rejects NaN bounds
        if !(min_price <= max_price) {
            return Err(invalid);
        }

        let lo = tick_size.to_ticks(min_price)?;
        let hi = tick_size.to_ticks(max_price)?;
        let count = hi
            .checked_sub(lo)
            .and_then(|span| usize::try_from(span).ok())
            .and_then(|span| span.checked_add(1))
            .filter(|count| *count <= MAX_DENSE_LEVELS)
            .ok_or(invalid)?;

        let mode = LadderMode::Dense { min_price, max_price };
        let mut ladder = Self::empty(side, tick_size, mode, count);
        ladder.range = Some((lo, hi));

        // Chain runs most favorable first
        match side {
            Side::Bid => (lo..=hi).rev().for_each(|ticks| ladder.push_worst(ticks)),
            Side::Offer => (lo..=hi).for_each(|ticks| ladder.push_worst(ticks)),
        }

        debug!(side = %side, levels = count, min_price, max_price, "pre-allocated dense ladder");
        Ok(ladder)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Side (polarity) of this ladder
    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Mode this ladder was built with
    #[inline]
    pub fn mode(&self) -> LadderMode {
        self.mode
    }

    /// Tick size for this ladder
    #[inline]
    pub fn tick_size(&self) -> TickSize {
        self.tick_size
    }

    /// Level cap (bounded mode only)
    #[inline]
    pub fn level_cap(&self) -> Option<usize> {
        match self.mode {
            LadderMode::Sparse { level_cap } => level_cap,
            LadderMode::Dense { .. } => None,
        }
    }

    /// Number of nodes in the chain, including withdrawn levels
    #[inline]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Check if the chain has no nodes at all
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Check if any level has positive size
    #[inline]
    pub fn has_liquidity(&self) -> bool {
        self.best.is_some()
    }

    /// Number of levels with positive size
    pub fn active_levels(&self) -> usize {
        self.iter().filter(|level| level.is_active()).count()
    }

    // ========================================================================
    // Best / Level Queries
    // ========================================================================

    /// The best level (most favorable with positive size)
    #[inline]
    pub fn best_level(&self) -> Option<&PriceLevel> {
        self.best.map(|key| &self.levels[key])
    }

    /// Best price, or `None` if the side has no resting size
    #[inline]
    pub fn best_price(&self) -> Option<f64> {
        self.best_level().map(|level| level.price)
    }

    /// Size at the best price, or `None` if the side has no resting size
    #[inline]
    pub fn best_size(&self) -> Option<f64> {
        self.best_level().map(|level| level.size)
    }

    /// Least favorable node in the chain
    #[inline]
    pub fn worst_level(&self) -> Option<&PriceLevel> {
        self.worst.map(|key| &self.levels[key])
    }

    /// Look up the node at `price`
    ///
    /// # Errors
    ///
    /// [`LadderError::InvalidPrice`] if `price` cannot be quantized.
    pub fn level(&self, price: f64) -> Result<Option<&PriceLevel>, LadderError> {
        let ticks = self.tick_size.to_ticks(price)?;
        Ok(self.index.get(&ticks).map(|&key| &self.levels[key]))
    }

    /// Walk the whole chain from the most favorable node, withdrawn levels included
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            levels: &self.levels,
            cursor: self.top,
        }
    }

    /// Ordered `(price, size)` pairs, best first
    ///
    /// - `levels == -1` (or any negative) returns the full depth below best
    /// - `levels == n >= 0` returns at most `n + 1` entries
    /// - with `actionable_only`, zero-size levels are skipped and do not
    ///   count against the budget
    ///
    /// An empty side yields an empty snapshot.
    pub fn snapshot(&self, levels: i32, actionable_only: bool) -> Vec<(f64, f64)> {
        let limit = usize::try_from(levels)
            .map(|n| n.saturating_add(1))
            .unwrap_or(usize::MAX);

        let mut out = Vec::with_capacity(limit.min(self.levels.len()));
        let mut cursor = self.best;
        while let Some(key) = cursor {
            if out.len() >= limit {
                break;
            }
            let level = &self.levels[key];
            cursor = level.away_from_best;
            if actionable_only && !level.is_active() {
                continue;
            }
            out.push(level.quote());
        }
        out
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Set the resting size at `price`
    ///
    /// A size of zero withdraws the level; the node stays in the chain.
    ///
    /// # Errors
    ///
    /// - [`LadderError::InvalidSize`] for a negative or non-finite size
    /// - [`LadderError::InvalidPrice`] for an off-tick price, or one outside
    ///   the range of a dense ladder
    ///
    /// Validation happens before any mutation; a rejected update leaves the
    /// ladder unchanged.
    pub fn update(&mut self, price: f64, size: f64) -> Result<(), LadderError> {
        let result = self.try_update(price, size);
        if let Err(err) = &result {
            debug!(side = %self.side, price, size, error = %err, "rejected ladder update");
        }
        result
    }

    fn try_update(&mut self, price: f64, size: f64) -> Result<(), LadderError> {
        if !size.is_finite() || size < 0.0 {
            return Err(LadderError::InvalidSize { size });
        }
        // -0.0 is stored as 0.0
        let size = if size == 0.0 { 0.0 } else { size };

        let ticks = self.tick_size.to_ticks(price)?;
        if let Some((lo, hi)) = self.range {
            if ticks < lo || ticks > hi {
                return Err(LadderError::price(price, PriceRejection::OutOfRange));
            }
        }

        match self.index.get(&ticks).copied() {
            Some(key) => self.update_existing(key, size),
            None => self.insert_new(ticks, size),
        }
        Ok(())
    }

    /// Withdraw every level
    ///
    /// Dense ladders keep their nodes and zero them; sparse ladders free them.
    pub fn clear(&mut self) {
        match self.mode {
            LadderMode::Dense { .. } => {
                for (_, level) in self.levels.iter_mut() {
                    level.zero();
                }
                self.withdrawn = self.levels.len();
            }
            LadderMode::Sparse { .. } => {
                self.levels.clear();
                self.index.clear();
                self.top = None;
                self.worst = None;
                self.withdrawn = 0;
            }
        }
        self.best = None;
        debug!(side = %self.side, retained = self.levels.len(), "cleared ladder");
    }

    fn update_existing(&mut self, key: usize, size: f64) {
        let level = &mut self.levels[key];
        let was_active = level.is_active();
        level.set_size(size);
        let ticks = level.ticks;
        let away = level.away_from_best;

        match (was_active, size > 0.0) {
            (true, false) => self.withdrawn += 1,
            (false, true) => self.withdrawn -= 1,
            _ => {}
        }

        if size == 0.0 {
            if self.best == Some(key) {
                self.best = self.next_active(away);
                trace!(side = %self.side, best = ?self.best_price(), "repaired best after withdrawal");
            }
        } else if self.improves_on_best(ticks) {
            self.best = Some(key);
        }
    }

    fn insert_new(&mut self, ticks: i64, size: f64) {
        // Nothing to withdraw at a price we have never seen
        if size == 0.0 {
            trace!(side = %self.side, ticks, "ignored withdrawal at unindexed price");
            return;
        }

        // Full of live levels: only a better price gets in
        if let (Some(cap), Some(worst)) = (self.level_cap(), self.worst) {
            if self.withdrawn == 0
                && self.levels.len() >= cap
                && !self.side.is_better(ticks, self.levels[worst].ticks)
            {
                debug!(side = %self.side, ticks, size, "dropped level beyond worst of a full ladder");
                return;
            }
        }

        let level = PriceLevel::new(self.tick_size.to_price(ticks), ticks, size);
        let key = self.levels.insert(level);
        self.index.insert(ticks, key);
        self.splice(key, ticks);

        if self.improves_on_best(ticks) {
            self.best = Some(key);
        }

        if let Some(cap) = self.level_cap() {
            if self.levels.len() > cap {
                if self.withdrawn > 0 {
                    self.evict_withdrawn();
                } else {
                    self.evict_worst();
                }
            }
        }
    }

    #[inline]
    fn improves_on_best(&self, ticks: i64) -> bool {
        match self.best {
            Some(best) => self.side.is_better(ticks, self.levels[best].ticks),
            None => true,
        }
    }

    /// First node with positive size at or after `start`, walking away from best
    fn next_active(&self, start: Option<usize>) -> Option<usize> {
        let mut cursor = start;
        while let Some(key) = cursor {
            let level = &self.levels[key];
            if level.is_active() {
                return Some(key);
            }
            cursor = level.away_from_best;
        }
        None
    }

    // ========================================================================
    // Chain Maintenance
    // ========================================================================

    /// Link an unlinked node into the chain, anchored at `best` (or `top`)
    fn splice(&mut self, key: usize, ticks: i64) {
        let Some(anchor) = self.best.or(self.top) else {
            self.link(key, None, None);
            return;
        };

        let (toward, away) = if self.side.is_better(ticks, self.levels[anchor].ticks) {
            let mut away = anchor;
            let mut toward = self.levels[anchor].toward_best;
            while let Some(next) = toward {
                if self.side.is_better(self.levels[next].ticks, ticks) {
                    break;
                }
                away = next;
                toward = self.levels[next].toward_best;
            }
            (toward, Some(away))
        } else {
            let mut toward = anchor;
            let mut away = self.levels[anchor].away_from_best;
            while let Some(next) = away {
                if self.side.is_better(ticks, self.levels[next].ticks) {
                    break;
                }
                toward = next;
                away = self.levels[next].away_from_best;
            }
            (Some(toward), away)
        };

        self.link(key, toward, away);
    }

    /// Place `key` between `toward` (better) and `away` (worse)
    fn link(&mut self, key: usize, toward: Option<usize>, away: Option<usize>) {
        let node = &mut self.levels[key];
        node.toward_best = toward;
        node.away_from_best = away;

        match toward {
            Some(prev) => self.levels[prev].away_from_best = Some(key),
            None => self.top = Some(key),
        }
        match away {
            Some(next) => self.levels[next].toward_best = Some(key),
            None => self.worst = Some(key),
        }
    }

    /// Append an empty node at the worst end (dense construction)
    fn push_worst(&mut self, ticks: i64) {
        let level = PriceLevel::empty(self.tick_size.to_price(ticks), ticks);
        let key = self.levels.insert(level);
        self.index.insert(ticks, key);
        self.link(key, self.worst, None);
        self.withdrawn += 1;
    }

    /// Unlink a node, drop it from the index, and free its slot
    fn detach(&mut self, key: usize) -> PriceLevel {
        let level = self.levels.remove(key);

        match level.toward_best {
            Some(prev) => self.levels[prev].away_from_best = level.away_from_best,
            None => self.top = level.away_from_best,
        }
        match level.away_from_best {
            Some(next) => self.levels[next].toward_best = level.toward_best,
            None => self.worst = level.toward_best,
        }
        self.index.remove(&level.ticks);
        if !level.is_active() {
            self.withdrawn -= 1;
        }

        level
    }

    /// Free the least favorable withdrawn node
    fn evict_withdrawn(&mut self) {
        let mut cursor = self.worst;
        while let Some(key) = cursor {
            let level = &self.levels[key];
            if !level.is_active() {
                let evicted = self.detach(key);
                debug!(side = %self.side, price = evicted.price, "evicted withdrawn level");
                return;
            }
            cursor = level.toward_best;
        }
    }

    fn evict_worst(&mut self) {
        let Some(key) = self.worst else {
            return;
        };
        let evicted = self.detach(key);
        if self.best == Some(key) {
            // Nothing worse remains to take over
            self.best = None;
        }
        debug!(
            side = %self.side,
            price = evicted.price,
            size = evicted.size,
            "evicted worst level"
        );
    }
}

/// Best-first iterator over every node in a [`Ladder`]
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    levels: &'a Slab<PriceLevel>,
    cursor: Option<usize>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a PriceLevel;

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.cursor?;
        let level = &self.levels[key];
        self.cursor = level.away_from_best;
        Some(level)
    }
}

impl<'a> IntoIterator for &'a Ladder {
    type Item = &'a PriceLevel;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
