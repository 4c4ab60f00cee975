//! Geometric and player types shared by the raycaster, camera and controls.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::types::{EPSILON, Vector2Ext};

/// Segment in continuous world coordinates.
///
/// For raycasting, `end` only bounds how many grid crossings are searched; a
/// caller wanting a draw-distance cutoff builds `end` at that distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub start: DVec2,
    pub end: DVec2,
}

impl LineSegment {
    pub fn new(start: DVec2, end: DVec2) -> Self {
        Self { start, end }
    }

    /// Segment of length `distance` from `start` along `direction`.
    pub fn from_ray(start: DVec2, direction: DVec2, distance: f64) -> Self {
        Self {
            start,
            end: start + direction * distance,
        }
    }

    #[inline]
    pub fn delta(&self) -> DVec2 {
        self.end - self.start
    }

    /// Shorter than [`EPSILON`] along both axes.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        let delta = self.delta();
        delta.x.abs() < EPSILON && delta.y.abs() < EPSILON
    }
}

/// Player pose. `forward` is expected to be unit-length and is re-normalized
/// on every rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub position: DVec2,
    pub forward: DVec2,
}

impl Player {
    pub fn new(position: DVec2, forward: DVec2) -> Self {
        Self { position, forward }
    }

    /// Player facing along `direction`, normalized.
    pub fn facing(position: DVec2, direction: DVec2) -> Self {
        Self::new(position, direction.normalize_guarded())
    }

    /// Rotate the facing direction by `radians`, re-normalizing the result.
    pub fn rotated(self, radians: f64) -> Self {
        Self {
            forward: self.forward.rotated(radians).normalize_guarded(),
            ..self
        }
    }

    /// Camera-plane direction, perpendicular to `forward`.
    #[inline]
    pub fn right(&self) -> DVec2 {
        DVec2::new(-self.forward.y, self.forward.x)
    }
}

/// Held-key state sampled once per frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Input {
    pub forward: bool,
    pub backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
}

impl Input {
    /// +1 when only forward is held, -1 when only backward is held.
    #[inline]
    pub fn movement_sign(&self) -> f64 {
        f64::from(u8::from(self.forward)) - f64::from(u8::from(self.backward))
    }

    /// +1 when only turn-right is held, -1 when only turn-left is held.
    #[inline]
    pub fn rotation_sign(&self) -> f64 {
        f64::from(u8::from(self.turn_right)) - f64::from(u8::from(self.turn_left))
    }
}

/// Screen size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / (self.height as f64 + EPSILON)
    }
}
