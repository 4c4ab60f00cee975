//! Axis-separated sliding.
//!
//! A displacement is applied one axis at a time, x first. Each axis move is
//! kept only if the straight segment from the current position to the target
//! crosses no blocking cell. Moving diagonally into a wall therefore slides
//! along whichever axis is still open. The fixed x-then-y order makes the
//! result asymmetric between axes near corners.

use glam::DVec2;

use crate::grid::TileQuery;
use crate::raycast::find_first_collision;
use crate::types::LineSegment;

/// New position after moving `displacement` from `position` through `map`.
pub fn resolve_movement<M>(map: &M, position: DVec2, displacement: DVec2) -> DVec2
where
    M: TileQuery + ?Sized,
{
    let x_target = DVec2::new(position.x + displacement.x, position.y);
    let position = try_move(map, position, x_target);

    let y_target = DVec2::new(position.x, position.y + displacement.y);
    try_move(map, position, y_target)
}

fn try_move<M>(map: &M, from: DVec2, to: DVec2) -> DVec2
where
    M: TileQuery + ?Sized,
{
    match find_first_collision(map, &LineSegment::new(from, to)) {
        None => to,
        Some(hit) => {
            log::trace!(
                "movement blocked by cell ({}, {}) at {:.3}",
                hit.cell.x,
                hit.cell.y,
                hit.distance
            );
            from
        }
    }
}
