use glam::{DVec2, IVec2};

use crate::grid::Occupancy;

pub mod dda;

pub use dda::{cast_ray, find_first_collision};

/// Family of grid lines a ray crossed to reach a cell.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Side {
    /// A line of constant x, reached by stepping along x.
    AxisX,
    /// A line of constant y, reached by stepping along y.
    AxisY,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Collision {
    /// Grid cell that contains the first hit. May lie outside the map when the
    /// ray reached the void around it.
    pub cell: IVec2,
    /// What was hit.
    pub occupancy: Occupancy,
    /// Distance along the ray from the segment start to the face that was hit.
    pub distance: f64,
    /// Position along the hit face in `[0, 1)`, for horizontal texture lookup.
    pub wall_fraction: f64,
    pub side: Side,
}

impl Collision {
    /// Extract hit distance, or return `default` if miss.
    pub fn distance_or(hit: Option<Self>, default: f64) -> f64 {
        hit.map(|h| h.distance).unwrap_or(default)
    }

    /// World point where a ray from `origin` along unit `direction` meets the face.
    pub fn point(&self, origin: DVec2, direction: DVec2) -> DVec2 {
        origin + direction * self.distance
    }
}
