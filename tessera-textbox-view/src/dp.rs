//! # Density-Independent Pixels (Dp)
//!
//! Logical lengths used by the text box view, converted to the native
//! widget's physical pixels through a process-wide scale factor.
//!
//! ## Usage
//!
//! ```
//! use tessera_textbox_view::{Dp, Px};
//!
//! let min_content = Dp(10.0);
//! let physical: Px = min_content.to_px();
//! assert!(physical.raw() >= 0);
//! ```

use std::sync::OnceLock;

use parking_lot::RwLock;

use crate::Px;

/// Global scale factor for converting between density-independent pixels and
/// physical pixels.
///
/// The scale factor is the number of physical pixels per dp. It is usually the
/// display density reported by the host toolkit (for example `2.625` on a
/// 420dpi phone). When it has never been set, conversions use `1.0`.
pub static SCALE_FACTOR: OnceLock<RwLock<f64>> = OnceLock::new();

/// Updates the global scale factor.
///
/// The first call initializes the value, later calls overwrite it.
pub fn set_scale_factor(scale_factor: f64) {
    let lock = SCALE_FACTOR.get_or_init(|| RwLock::new(scale_factor));
    *lock.write() = scale_factor;
}

/// Returns the current global scale factor, `1.0` when unset.
pub fn scale_factor() -> f64 {
    SCALE_FACTOR.get().map(|lock| *lock.read()).unwrap_or(1.0)
}

/// Density-independent pixels (dp) for UI scaling.
///
/// `Dp(10.0)` is roughly the same physical size on every display; the
/// matching pixel count depends on [`SCALE_FACTOR`].
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Dp(pub f64);

impl Dp {
    /// A constant representing zero dp.
    pub const ZERO: Self = Self(0.0);

    /// Creates a new `Dp` instance with the specified value.
    pub const fn new(value: f64) -> Self {
        Dp(value)
    }

    /// Converts this dp value to physical pixels as an `f64`, using the global
    /// scale factor.
    pub fn to_pixels_f64(&self) -> f64 {
        self.to_pixels_with_scale(scale_factor())
    }

    /// Converts this dp value to physical pixels with an explicit scale factor.
    pub fn to_pixels_with_scale(&self, scale_factor: f64) -> f64 {
        self.0 * scale_factor
    }

    /// Creates a `Dp` value from physical pixels specified as an `f64`.
    pub fn from_pixels_f64(value: f64) -> Self {
        Dp(value / scale_factor())
    }

    /// Converts this `Dp` value to a [`Px`] value.
    ///
    /// The fractional part is truncated, matching how the native toolkit
    /// converts logical sizes to integer pixel offsets.
    pub fn to_px(&self) -> Px {
        Px::from_dp(*self)
    }
}

impl From<f64> for Dp {
    fn from(value: f64) -> Self {
        Dp::new(value)
    }
}

impl From<Px> for Dp {
    fn from(px: Px) -> Self {
        px.to_dp()
    }
}
