//! Physical pixel values.
//!
//! [`Px`] is the unit the native widget measures and lays out in. Values are
//! signed so that intermediate arithmetic (padding sums, differences) can not
//! wrap silently; use the saturating helpers where overflow is possible.

use std::ops::{Add, Sub};

use crate::dp::{Dp, scale_factor};

/// A physical pixel value.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct Px(pub i32);

impl Px {
    /// A constant representing zero pixels.
    pub const ZERO: Self = Self(0);

    /// A constant representing the maximum possible pixel value.
    pub const MAX: Self = Self(i32::MAX);

    /// Creates a new `Px` instance from an i32 value.
    pub const fn new(value: i32) -> Self {
        Px(value)
    }

    /// Returns the raw i32 value.
    pub fn raw(self) -> i32 {
        self.0
    }

    /// Converts from density-independent pixels ([`Dp`]) to physical pixels.
    pub fn from_dp(dp: Dp) -> Self {
        Px(dp.to_pixels_f64() as i32)
    }

    /// Converts from physical pixels to density-independent pixels ([`Dp`]).
    pub fn to_dp(self) -> Dp {
        Dp((self.0 as f64) / scale_factor())
    }

    /// Saturating addition, clamped at the numeric bounds.
    pub fn saturating_add(self, rhs: Self) -> Self {
        Px(self.0.saturating_add(rhs.0))
    }

    /// Returns only the positive value, or zero if negative.
    pub fn positive(self) -> u32 {
        if self.0 < 0 { 0 } else { self.0 as u32 }
    }
}

impl Add for Px {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Px(self.0 + rhs.0)
    }
}

impl Sub for Px {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Px(self.0 - rhs.0)
    }
}

impl From<i32> for Px {
    fn from(value: i32) -> Self {
        Px(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_px_arithmetic() {
        let a = Px(10);
        let b = Px(5);
        assert_eq!(a + b, Px(15));
        assert_eq!(a - b, Px(5));
        assert_eq!(a.max(b), a);
    }

    #[test]
    fn test_px_saturating_add() {
        assert_eq!(Px::MAX.saturating_add(Px(1)), Px::MAX);
        assert_eq!(Px(-3).positive(), 0);
    }
}
