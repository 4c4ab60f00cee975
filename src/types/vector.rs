//! 2D vector arithmetic.
//!
//! `glam::DVec2` already provides add, subtract, scale, dot and length. The
//! engine needs three operations with specific semantics on top of it:
//!
//! - [`Vector2Ext::normalize_guarded`]: never divides by zero. A zero vector
//!   stays zero instead of becoming NaN, so callers must treat near-zero
//!   vectors as a degenerate case themselves.
//! - [`Vector2Ext::rotated`]: rotation by an angle in radians.
//! - [`Vector2Ext::to_grid`]: flooring to the containing grid cell.

use glam::{DVec2, IVec2};

use crate::types::EPSILON;

/// Points and directions in continuous world coordinates.
pub type Vector2 = DVec2;

pub trait Vector2Ext {
    /// `self * (1 / (length + EPSILON))`.
    fn normalize_guarded(self) -> Self;

    /// Rotate by `radians` using the standard 2D rotation matrix.
    fn rotated(self, radians: f64) -> Self;

    /// The grid cell containing this point.
    fn to_grid(self) -> IVec2;
}

impl Vector2Ext for DVec2 {
    #[inline]
    fn normalize_guarded(self) -> Self {
        self * (1.0 / (self.length() + EPSILON))
    }

    #[inline]
    fn rotated(self, radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        DVec2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    #[inline]
    fn to_grid(self) -> IVec2 {
        self.floor().as_ivec2()
    }
}
