//! Tick quantization for prices.
//!
//! ## Overview
//!
//! Prices arrive as `f64`, but the ladder never hashes or compares raw
//! floats. Every price is quantized to an integer tick count at the
//! boundary, and that `i64` key is what the index and the chain use.
//!
//! ## Tolerance
//!
//! `price / tick_size` rarely lands exactly on an integer in binary floating
//! point (`101.23 / 0.01 == 10122.999999999998`). A price is accepted when it
//! is within [`TICK_TOLERANCE`] ticks of a whole tick; anything farther away
//! is off-tick.
//!
//! ## Reported Prices
//!
//! The tick size is also kept as a `Decimal`, so the price reported for a
//! tick key is the closest `f64` to the exact decimal `ticks * tick_size`.
//!
//! ## Examples
//!
//! ```
//! use price_ladder::TickSize;
//!
//! let tick = TickSize::parse("0.25").unwrap();
//! assert_eq!(tick.to_ticks(100.75).unwrap(), 403);
//! assert_eq!(tick.to_price(403), 100.75);
//! assert!(tick.to_ticks(100.10).is_err());
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use crate::types::{LadderError, PriceRejection};

/// Maximum distance from a whole tick (in ticks) still treated as on-tick
pub const TICK_TOLERANCE: f64 = 1e-6;

/// Largest tick key magnitude accepted
///
/// 2^53: every key up to here has an exact `f64` representation.
pub const MAX_TICKS: i64 = 1 << 53;

/// Minimum price increment for a ladder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSize {
    value: f64,
    decimal: Decimal,
}

impl TickSize {
    /// Create a tick size from an `f64`
    ///
    /// # Errors
    ///
    /// [`LadderError::InvalidTickSize`] if `value` is zero, negative,
    /// non-finite, or not representable as a decimal.
    pub fn new(value: f64) -> Result<Self, LadderError> {
        let invalid = LadderError::InvalidTickSize { tick_size: value };
        if !value.is_finite() || value <= 0.0 {
            return Err(invalid);
        }

        // Shortest round-trip repr first, so 0.01 becomes exactly 0.01
        let decimal = Decimal::from_str(&value.to_string())
            .ok()
            .or_else(|| Decimal::from_f64(value))
            .filter(|d| !d.is_zero())
            .ok_or(invalid)?;

        Ok(Self { value, decimal })
    }

    /// Create a tick size from a decimal string (e.g. `"0.01"`)
    ///
    /// ```
    /// use price_ladder::TickSize;
    ///
    /// assert_eq!(TickSize::parse("0.01").unwrap().value(), 0.01);
    /// assert!(TickSize::parse("0").is_err());
    /// assert!(TickSize::parse("abc").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, LadderError> {
        let decimal = Decimal::from_str(s.trim())
            .map_err(|_| LadderError::InvalidTickSize { tick_size: f64::NAN })?;
        let value = decimal.to_f64().unwrap_or(f64::NAN);
        if decimal.is_sign_negative() || decimal.is_zero() || !value.is_finite() {
            return Err(LadderError::InvalidTickSize { tick_size: value });
        }
        Ok(Self { value, decimal })
    }

    /// The tick size as an `f64`
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Quantize a price to its integer tick key
    ///
    /// # Errors
    ///
    /// [`LadderError::InvalidPrice`] if the price is non-finite, off-tick,
    /// or beyond [`MAX_TICKS`].
    pub fn to_ticks(&self, price: f64) -> Result<i64, LadderError> {
        if !price.is_finite() {
            return Err(LadderError::price(price, PriceRejection::NotFinite));
        }

        let ratio = price / self.value;
        let ticks = ratio.round();
        if ticks.abs() > MAX_TICKS as f64 {
            return Err(LadderError::price(price, PriceRejection::OutOfRange));
        }
        if (ratio - ticks).abs() > TICK_TOLERANCE {
            return Err(LadderError::price(price, PriceRejection::OffTick));
        }

        Ok(ticks as i64)
    }

    /// Price for a tick key
    ///
    /// Goes through the decimal string so the result is correctly rounded.
    pub fn to_price(&self, ticks: i64) -> f64 {
        Decimal::from(ticks)
            .checked_mul(self.decimal)
            .and_then(|d| d.normalize().to_string().parse::<f64>().ok())
            .unwrap_or(ticks as f64 * self.value)
    }

    /// Snap a price onto the tick grid, e.g. `101.230000000001` to `101.23`
    pub fn quantize(&self, price: f64) -> Result<f64, LadderError> {
        self.to_ticks(price).map(|ticks| self.to_price(ticks))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
