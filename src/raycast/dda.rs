use glam::DVec2;

use crate::grid::{Occupancy, TileQuery};
use crate::iterators::{Crossing, GridTraversal, in_cell_range};
use crate::raycast::{Collision, Side};
use crate::types::{LineSegment, Vector2Ext};

/// Grid traversal (Amanatides & Woo) that returns the first blocking cell
/// crossed by `segment`.
///
/// The start cell itself is never tested. `segment.end` only bounds the number
/// of cells searched to the Manhattan distance between the start and end cells.
/// Zero-length segments and segments whose cells are all empty report `None`.
pub fn find_first_collision<M>(map: &M, segment: &LineSegment) -> Option<Collision>
where
    M: TileQuery + ?Sized,
{
    if !in_cell_range(segment.start) {
        return start_in_void(segment);
    }
    let mut traversal = GridTraversal::new(segment)?;
    let start = traversal.start();
    let direction = traversal.direction();
    let step = traversal.step();

    for crossing in traversal.by_ref() {
        let occupancy = map.occupancy(crossing.cell);
        if !occupancy.is_blocking() {
            continue;
        }

        let (distance, wall) = face_hit(start, direction, step.as_dvec2(), &crossing);
        return Some(Collision {
            cell: crossing.cell,
            occupancy,
            distance,
            wall_fraction: wall - wall.floor(),
            side: crossing.side,
        });
    }

    log::trace!(
        "no collision from ({:.3}, {:.3}) to ({:.3}, {:.3})",
        segment.start.x,
        segment.start.y,
        segment.end.x,
        segment.end.y
    );
    None
}

/// Cast from `origin` along `direction` for at most `max_distance` world units.
pub fn cast_ray<M>(map: &M, origin: DVec2, direction: DVec2, max_distance: f64) -> Option<Collision>
where
    M: TileQuery + ?Sized,
{
    find_first_collision(map, &LineSegment::from_ray(origin, direction, max_distance))
}

/// A start too far out to have a cell index is already in the void: any
/// non-degenerate segment from it hits at distance zero.
fn start_in_void(segment: &LineSegment) -> Option<Collision> {
    if segment.is_degenerate() {
        return None;
    }
    let delta = segment.delta();
    let side = if delta.x.abs() >= delta.y.abs() {
        Side::AxisX
    } else {
        Side::AxisY
    };
    log::trace!("segment starts outside the cell range at {}", segment.start);
    Some(Collision {
        cell: segment.start.to_grid(),
        occupancy: Occupancy::Void,
        distance: 0.0,
        wall_fraction: 0.0,
        side,
    })
}

/// Exact distance to the crossed face, and the world coordinate along that face.
///
/// For a negative step the face is on the far edge of the entered cell, hence
/// the `(1 - step) / 2` term.
fn face_hit(start: DVec2, direction: DVec2, step: DVec2, crossing: &Crossing) -> (f64, f64) {
    let cell = crossing.cell.as_dvec2();
    match crossing.side {
        Side::AxisX => {
            let distance = ((cell.x - start.x + (1.0 - step.x) * 0.5) / direction.x).abs();
            (distance, start.y + distance * direction.y)
        }
        Side::AxisY => {
            let distance = ((cell.y - start.y + (1.0 - step.y) * 0.5) / direction.y).abs();
            (distance, start.x + distance * direction.x)
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::IVec2;

    use super::*;
    use crate::grid::{MaterialId, Occupancy, TileMap};
    use crate::types::MapInfo;

    const WALL: MaterialId = MaterialId(1);

    fn test_map(width: u32, height: u32, occupied: &[(i32, i32)]) -> TileMap {
        let mut map = TileMap::empty(MapInfo::new(width, height));
        for &(x, y) in occupied {
            map.replace_occupancy(IVec2::new(x, y), Some(WALL))
                .expect("cell in map");
        }
        map
    }

    fn segment(start: (f64, f64), end: (f64, f64)) -> LineSegment {
        LineSegment::new(DVec2::new(start.0, start.1), DVec2::new(end.0, end.1))
    }

    #[test]
    fn hit_positive_x() {
        let map = test_map(3, 3, &[(2, 1)]);
        let hit = find_first_collision(&map, &segment((0.5, 1.5), (10.0, 1.5))).expect("hit expected");
        assert_eq!(hit.cell, IVec2::new(2, 1));
        assert_eq!(hit.occupancy, Occupancy::Solid(WALL));
        assert_eq!(hit.side, Side::AxisX);
        assert_relative_eq!(hit.distance, 1.5, epsilon = 1e-12);
        assert_relative_eq!(hit.wall_fraction, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn hit_negative_x_uses_far_edge() {
        let map = test_map(5, 3, &[(0, 1)]);
        let hit = find_first_collision(&map, &segment((3.25, 1.5), (-8.0, 1.5))).expect("hit expected");
        assert_eq!(hit.cell, IVec2::new(0, 1));
        assert_eq!(hit.side, Side::AxisX);
        // Face at x = 1.
        assert_relative_eq!(hit.distance, 2.25, epsilon = 1e-12);
    }

    #[test]
    fn hit_negative_y() {
        let map = test_map(3, 5, &[(1, 0)]);
        let hit = find_first_collision(&map, &segment((1.75, 3.5), (1.75, -6.0))).expect("hit expected");
        assert_eq!(hit.cell, IVec2::new(1, 0));
        assert_eq!(hit.side, Side::AxisY);
        assert_relative_eq!(hit.distance, 2.5, epsilon = 1e-12);
        assert_relative_eq!(hit.wall_fraction, 0.75, epsilon = 1e-12);
    }

    #[test]
    fn diagonal_hit_distance_and_fraction() {
        let map = test_map(6, 6, &[(4, 1)]);
        let dir = DVec2::new(4.0, 1.0).normalize();
        let start = DVec2::new(0.5, 0.5);
        let hit = cast_ray(&map, start, dir, 30.0).expect("hit expected");
        assert_eq!(hit.cell, IVec2::new(4, 1));
        assert_eq!(hit.side, Side::AxisX);
        // Face at x = 4 is 3.5 units away in x.
        let expected = 3.5 / dir.x;
        assert_relative_eq!(hit.distance, expected, epsilon = 1e-9);
        let face = hit.point(start, dir);
        assert_relative_eq!(face.x, 4.0, epsilon = 1e-9);
        assert_relative_eq!(hit.wall_fraction, face.y.fract(), epsilon = 1e-9);
    }

    #[test]
    fn zero_length_segment_misses() {
        let map = test_map(3, 3, &[(0, 0), (1, 0), (2, 0)]);
        let p = DVec2::new(1.5, 1.5);
        assert!(find_first_collision(&map, &LineSegment::new(p, p)).is_none());
    }

    #[test]
    fn empty_map_inside_bounds_misses() {
        let map = test_map(3, 3, &[]);
        assert!(find_first_collision(&map, &segment((0.2, 0.3), (2.7, 2.9))).is_none());
        assert!(find_first_collision(&map, &segment((2.9, 2.1), (0.1, 0.6))).is_none());
    }

    #[test]
    fn start_cell_is_not_tested() {
        let map = test_map(3, 3, &[(1, 1)]);
        assert!(find_first_collision(&map, &segment((1.2, 1.5), (1.8, 1.5))).is_none());
    }

    #[test]
    fn end_bounds_the_search() {
        let map = test_map(8, 1, &[(6, 0)]);
        assert!(find_first_collision(&map, &segment((0.5, 0.5), (5.9, 0.5))).is_none());
        assert!(find_first_collision(&map, &segment((0.5, 0.5), (6.1, 0.5))).is_some());
    }

    #[test]
    fn map_edge_is_void() {
        let map = test_map(3, 3, &[]);
        let hit = find_first_collision(&map, &segment((1.5, 1.5), (1.5, 40.0))).expect("void hit");
        assert_eq!(hit.cell, IVec2::new(1, 3));
        assert_eq!(hit.occupancy, Occupancy::Void);
        assert_relative_eq!(hit.distance, 1.5, epsilon = 1e-12);
    }

    #[test]
    fn start_far_outside_the_map_is_an_immediate_void_hit() {
        let map = test_map(3, 3, &[]);
        let hit = find_first_collision(&map, &segment((3e9, 0.5), (3e9 + 5.0, 10.5)))
            .expect("void hit");
        assert_eq!(hit.occupancy, Occupancy::Void);
        assert_eq!(hit.cell, IVec2::new(i32::MAX, 0));
        assert_eq!(hit.side, Side::AxisY);
        assert_eq!(hit.distance, 0.0);

        let hit = find_first_collision(&map, &segment((f64::NAN, 0.5), (1.5, 0.5)));
        assert_eq!(hit.map(|h| h.occupancy), Some(Occupancy::Void));
        assert!(find_first_collision(&map, &segment((3e9, 0.5), (3e9, 0.5))).is_none());
    }

    #[test]
    fn miss_reports_default_distance() {
        let map = test_map(3, 3, &[]);
        let hit = find_first_collision(&map, &segment((0.5, 0.5), (1.5, 0.5)));
        assert_eq!(Collision::distance_or(hit, 100.0), 100.0);
    }
}
