use std::iter::FusedIterator;

use glam::{DVec2, IVec2};

use crate::raycast::Side;
use crate::types::{EPSILON, LineSegment, Vector2Ext};

/// Cell-by-cell walk along a segment (Amanatides & Woo).
///
/// Yields one [`Crossing`] per grid line crossed, starting with the first cell
/// after the start cell. The number of crossings is bounded by the Manhattan
/// cell distance between the segment's start and end cells, so the walk
/// always terminates, including for axis-aligned directions.
#[derive(Debug, Clone)]
pub struct GridTraversal {
    start: DVec2,
    direction: DVec2,
    /// Per-axis step: -1, 0 or +1. Zero when the direction is ~0 on that axis.
    step: IVec2,
    /// Ray distance at which the next x / y grid line is crossed.
    next_crossing: DVec2,
    /// Ray distance between consecutive x / y grid lines.
    crossing_distance: DVec2,
    cell: IVec2,
    remaining: u64,
}

/// One grid-line crossing.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Crossing {
    /// Cell entered by this crossing.
    pub cell: IVec2,
    /// Family of grid lines crossed.
    pub side: Side,
    /// Distance along the ray at which the crossing happened.
    pub t: f64,
}

impl GridTraversal {
    /// Returns `None` for a zero-length segment, or when the start cell has
    /// no `i32` index (see [`in_cell_range`]).
    pub fn new(segment: &LineSegment) -> Option<Self> {
        let start = segment.start;
        let delta = segment.delta();
        if segment.is_degenerate() || !in_cell_range(start) {
            return None;
        }

        let direction = delta.normalize_guarded();
        let grid_start = start.to_grid();
        let grid_end = segment.end.to_grid();

        let crossing_distance = DVec2::new(
            crossing_distance(direction.x, direction.y),
            crossing_distance(direction.y, direction.x),
        );
        let (step_x, next_x) = first_crossing(start.x, grid_start.x, direction.x, crossing_distance.x);
        let (step_y, next_y) = first_crossing(start.y, grid_start.y, direction.y, crossing_distance.y);

        let remaining = u64::from(grid_end.x.abs_diff(grid_start.x))
            + u64::from(grid_end.y.abs_diff(grid_start.y));

        Some(Self {
            start,
            direction,
            step: IVec2::new(step_x, step_y),
            next_crossing: DVec2::new(next_x, next_y),
            crossing_distance,
            cell: grid_start,
            remaining,
        })
    }

    #[inline]
    pub fn start(&self) -> DVec2 {
        self.start
    }

    /// Unit direction of the segment.
    #[inline]
    pub fn direction(&self) -> DVec2 {
        self.direction
    }

    #[inline]
    pub fn step(&self) -> IVec2 {
        self.step
    }

    /// Crossings left in the budget.
    #[inline]
    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl Iterator for GridTraversal {
    type Item = Crossing;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        // Strict comparison: a tie advances the y tracker.
        let (side, t, cell) = if self.next_crossing.x < self.next_crossing.y {
            let t = self.next_crossing.x;
            self.next_crossing.x += self.crossing_distance.x;
            let x = self.cell.x.checked_add(self.step.x);
            (Side::AxisX, t, x.map(|x| IVec2::new(x, self.cell.y)))
        } else {
            let t = self.next_crossing.y;
            self.next_crossing.y += self.crossing_distance.y;
            let y = self.cell.y.checked_add(self.step.y);
            (Side::AxisY, t, y.map(|y| IVec2::new(self.cell.x, y)))
        };

        // Stepping past the i32 cell range ends the walk.
        let Some(cell) = cell else {
            self.remaining = 0;
            return None;
        };
        self.cell = cell;
        Some(Crossing { cell, side, t })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GridTraversal {}

impl FusedIterator for GridTraversal {}

/// Whether the cell containing `point` has an `i32` index on both axes.
pub fn in_cell_range(point: DVec2) -> bool {
    let cell = point.floor();
    cell.is_finite()
        && cell.cmpge(DVec2::splat(f64::from(i32::MIN))).all()
        && cell.cmple(DVec2::splat(f64::from(i32::MAX))).all()
}

/// Ray distance between consecutive grid lines perpendicular to `along`.
fn crossing_distance(along: f64, across: f64) -> f64 {
    if along.abs() < EPSILON {
        return f64::INFINITY;
    }
    let slope = across / along;
    (1.0 + slope * slope).sqrt()
}

fn first_crossing(start: f64, cell: i32, dir: f64, crossing_distance: f64) -> (i32, f64) {
    if dir.abs() < EPSILON {
        (0, f64::INFINITY)
    } else if dir < 0.0 {
        (-1, crossing_distance * (start - cell as f64))
    } else {
        (1, crossing_distance * (cell as f64 + 1.0 - start))
    }
}
