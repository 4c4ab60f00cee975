//! Per-column wall casting.
//!
//! Each screen column is an independent ray: a pure function of the map, the
//! camera and the column index. The pass produces a [`ColumnSlice`] per column
//! describing what to paint, and fills a [`DepthBuffer`] with the distance
//! used for perspective so billboards can be occluded by walls.

use glam::{DVec2, IVec2};
use image::Rgb;

use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::grid::{Occupancy, TileQuery};
use crate::raycast::{Side, find_first_collision};
use crate::render::DepthBuffer;
use crate::types::{EPSILON, LineSegment, Viewport};

/// Inclusive row range `[top, bottom]` of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSpan {
    pub top: u32,
    pub bottom: u32,
}

impl RowSpan {
    pub fn rows(&self) -> u32 {
        self.bottom - self.top + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallHit {
    pub cell: IVec2,
    /// Material of the wall; `Void` when the ray left the map.
    pub occupancy: Occupancy,
    pub side: Side,
    /// Horizontal texture coordinate in `[0, 1)`.
    pub texture_u: f64,
    /// AXIS_Y face, darkened by [`RenderConfig::shade_scale`].
    pub shaded: bool,
    /// Mirror the texture so it reads the same from every side.
    pub flipped: bool,
    /// Raw distance along the ray.
    pub ray_distance: f64,
}

impl WallHit {
    /// Texel column for a texture `texture_width` pixels wide.
    pub fn texture_column(&self, texture_width: u32) -> u32 {
        let last = texture_width.saturating_sub(1);
        let x = ((self.texture_u * texture_width as f64) as i64).clamp(0, i64::from(last)) as u32;
        if self.flipped { last - x } else { x }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnContent {
    Wall(WallHit),
    /// Nothing within the draw distance.
    Far,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSlice {
    pub column: u32,
    pub direction: DVec2,
    pub rows: RowSpan,
    /// Distance used for perspective scaling and stored in the depth buffer.
    /// Fish-eye corrected for walls, the draw distance for misses.
    pub depth: f64,
    pub content: ColumnContent,
}

impl ColumnSlice {
    /// Brightness multiplier for the wall in this column.
    pub fn brightness(&self, render: &RenderConfig) -> f32 {
        match self.content {
            ColumnContent::Wall(hit) if hit.shaded => render.shade_scale,
            _ => 1.0,
        }
    }

    /// Untextured colour of the column: `wall` scaled by
    /// [`ColumnSlice::brightness`], or the far colour when nothing was hit.
    pub fn flat_color(&self, wall: Rgb<u8>, render: &RenderConfig) -> Rgb<u8> {
        if matches!(self.content, ColumnContent::Far) {
            return Rgb(render.far_color);
        }
        let brightness = self.brightness(render);
        Rgb(wall.0.map(|c| (f32::from(c) * brightness).round() as u8))
    }
}

/// Rows covered by a wall at `distance` on a `height`-pixel screen.
pub fn vertical_span(height: u32, distance: f64) -> RowSpan {
    let center_y = height as f64 * 0.5;
    let half_line_height = height as f64 / (distance + EPSILON) * 0.5;

    let top = ((center_y - half_line_height) as i64).max(0);
    let bottom = ((center_y + half_line_height) as i64)
        .min(i64::from(height) - 1)
        .max(top);
    RowSpan {
        top: top as u32,
        bottom: bottom as u32,
    }
}

/// Cast the ray for one screen column.
pub fn cast_column<M>(map: &M, camera: &Camera, viewport: Viewport, column: u32) -> ColumnSlice
where
    M: TileQuery + ?Sized,
{
    let direction = camera.direction_for_column(column as f64);
    let segment = LineSegment::from_ray(camera.position, direction, camera.draw_distance());

    let Some(hit) = find_first_collision(map, &segment) else {
        return ColumnSlice {
            column,
            direction,
            rows: vertical_span(viewport.height, camera.draw_distance()),
            depth: camera.draw_distance(),
            content: ColumnContent::Far,
        };
    };

    // Perpendicular distance to the camera plane, so flat walls stay flat.
    let depth = hit.distance * direction.dot(camera.forward);
    let flipped = match hit.side {
        Side::AxisX => direction.x < 0.0,
        Side::AxisY => direction.y > 0.0,
    };

    ColumnSlice {
        column,
        direction,
        rows: vertical_span(viewport.height, depth),
        depth,
        content: ColumnContent::Wall(WallHit {
            cell: hit.cell,
            occupancy: hit.occupancy,
            side: hit.side,
            texture_u: hit.wall_fraction,
            shaded: hit.side == Side::AxisY,
            flipped,
            ray_distance: hit.distance,
        }),
    }
}

/// Cast every column of `viewport` into `out`, replacing its contents, and
/// reset `depth` to the resulting per-column depths.
pub fn cast_columns<M>(
    map: &M,
    camera: &Camera,
    viewport: Viewport,
    depth: &mut DepthBuffer,
    out: &mut Vec<ColumnSlice>,
) where
    M: TileQuery + ?Sized,
{
    out.clear();
    out.extend((0..viewport.width).map(|column| cast_column(map, camera, viewport, column)));
    fill_depth(depth, out);
}

pub(crate) fn fill_depth(depth: &mut DepthBuffer, columns: &[ColumnSlice]) {
    depth.reset(columns.len());
    for slice in columns {
        depth.record(slice.column as usize, slice.depth);
    }
}

#[cfg(feature = "rayon")]
pub mod parallel {
    use rayon::prelude::*;

    use super::*;

    /// Parallel [`cast_columns`]. The map is shared read-only by all workers.
    pub fn cast_columns_par<M>(
        map: &M,
        camera: &Camera,
        viewport: Viewport,
        depth: &mut DepthBuffer,
        out: &mut Vec<ColumnSlice>,
    ) where
        M: TileQuery + Sync + ?Sized,
    {
        (0..viewport.width)
            .into_par_iter()
            .map(|column| cast_column(map, camera, viewport, column))
            .collect_into_vec(out);
        fill_depth(depth, out);
    }
}
