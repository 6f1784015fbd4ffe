//! Measurement constraints in the native toolkit's packed form.
//!
//! A measure spec packs a mode in the top two bits of an `i32` and a size in
//! the remaining thirty. The view never interprets the constraint itself, it
//! forwards it to the native measurement pass, but keeping it typed makes the
//! bridge and the tests readable.

use crate::Px;

const MODE_SHIFT: u32 = 30;
const MODE_MASK: i32 = 0x3 << MODE_SHIFT;

/// How the parent constrains a measured dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureMode {
    /// No constraint.
    Unspecified,
    /// The child must use exactly the given size.
    Exactly,
    /// The child can be as large as it wants up to the given size.
    AtMost,
}

impl MeasureMode {
    fn bits(self) -> i32 {
        match self {
            MeasureMode::Unspecified => 0,
            MeasureMode::Exactly => 1 << MODE_SHIFT,
            MeasureMode::AtMost => 2 << MODE_SHIFT,
        }
    }
}

/// A packed `(mode, size)` constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeasureSpec(pub i32);

impl MeasureSpec {
    /// Packs a mode and size.
    pub fn new(mode: MeasureMode, size: Px) -> Self {
        MeasureSpec((size.raw() & !MODE_MASK) | mode.bits())
    }

    /// A spec without constraint.
    pub fn unspecified() -> Self {
        Self::new(MeasureMode::Unspecified, Px::ZERO)
    }

    /// Returns the raw packed value.
    pub fn raw(self) -> i32 {
        self.0
    }

    /// Returns the constraint mode. The reserved fourth mode is read as
    /// [`MeasureMode::Unspecified`].
    pub fn mode(self) -> MeasureMode {
        match (self.0 & MODE_MASK) >> MODE_SHIFT & 0x3 {
            1 => MeasureMode::Exactly,
            2 => MeasureMode::AtMost,
            _ => MeasureMode::Unspecified,
        }
    }

    /// Returns the constraint size.
    pub fn size(self) -> Px {
        Px(self.0 & !MODE_MASK)
    }
}

/// Dimensions recorded by a measurement pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeasuredSize {
    /// Measured width.
    pub width: Px,
    /// Measured height.
    pub height: Px,
}

impl MeasuredSize {
    /// Creates a measured size.
    pub fn new(width: Px, height: Px) -> Self {
        Self { width, height }
    }
}
