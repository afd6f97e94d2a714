//! # Unit Types
//!
//! Integer pixel offsets used for the split point and the viewport width.
//! Pointer coordinates stay `f64` (browsers report fractional client
//! coordinates); they are only rounded once a position is written.
//!
//! ## Example
//!
//! ```rust
//! use split_core::units::Pixels;
//!
//! let width = Pixels(1001);
//! assert_eq!(width.half(), Pixels(500));
//! assert_eq!(Pixels::from_f64_rounded(249.6), Pixels(250));
//! assert_eq!(Pixels(250).to_string(), "250px");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Offset in CSS pixels
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Pixels(pub i32);

impl Pixels {
    pub const ZERO: Pixels = Pixels(0);

    /// Round a fractional pixel value to the nearest integer pixel.
    ///
    /// Non-finite input collapses to zero; values beyond `i32` saturate.
    pub fn from_f64_rounded(value: f64) -> Self {
        if !value.is_finite() {
            return Pixels::ZERO;
        }
        Pixels(value.round() as i32)
    }

    /// Half of this length, rounded toward zero
    pub fn half(self) -> Self {
        Pixels(self.0 / 2)
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }
}

impl Add for Pixels {
    type Output = Pixels;
    fn add(self, rhs: Pixels) -> Pixels {
        Pixels(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Pixels {
    type Output = Pixels;
    fn sub(self, rhs: Pixels) -> Pixels {
        Pixels(self.0.saturating_sub(rhs.0))
    }
}

impl From<i32> for Pixels {
    fn from(value: i32) -> Self {
        Pixels(value)
    }
}

impl fmt::Display for Pixels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding() {
        assert_eq!(Pixels::from_f64_rounded(10.4), Pixels(10));
        assert_eq!(Pixels::from_f64_rounded(-3.6), Pixels(-4));
        assert_eq!(Pixels::from_f64_rounded(f64::NAN), Pixels::ZERO);
        assert_eq!(Pixels::from_f64_rounded(f64::INFINITY), Pixels::ZERO);
    }

    #[test]
    fn test_half_of_odd_width() {
        assert_eq!(Pixels(1001).half(), Pixels(500));
        assert_eq!(Pixels(0).half(), Pixels(0));
    }

    #[test]
    fn test_arithmetic_saturates() {
        assert_eq!(Pixels(i32::MAX) + Pixels(1), Pixels(i32::MAX));
        assert_eq!(Pixels(200) - Pixels(50), Pixels(150));
    }

    #[test]
    fn test_serialization_is_plain_number() {
        assert_eq!(serde_json::to_string(&Pixels(42)).unwrap(), "42");
    }
}
