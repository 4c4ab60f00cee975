//! Billboard (sprite) placement.
//!
//! Billboards are projected with [`Camera::project`], scaled by their depth and
//! clipped per column against the wall depth buffer. Placement stops at the
//! list of visible columns; sampling the sprite texture is the renderer's job.

use std::cmp::Ordering;

use glam::DVec2;

use crate::camera::Camera;
use crate::grid::{Decoration, ObjectId};
use crate::render::DepthBuffer;
use crate::types::{EPSILON, Viewport};

/// Something drawn as a camera-facing sprite: a decoration, another player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Billboard<K> {
    pub kind: K,
    pub position: DVec2,
}

impl From<&Decoration> for Billboard<ObjectId> {
    fn from(decoration: &Decoration) -> Self {
        Self {
            kind: decoration.object,
            position: decoration.position,
        }
    }
}

/// One visible column of a placed billboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BillboardColumn {
    pub column: u32,
    /// Horizontal texture coordinate in `[0, 1)`.
    pub texture_u: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedBillboard<K> {
    pub kind: K,
    pub depth: f64,
    /// Square on-screen size in pixels.
    pub size: f64,
    /// Rows, inclusive. The sprite stands on the floor line of its depth.
    pub top: u32,
    pub bottom: u32,
    /// Columns not hidden by a nearer wall, left to right.
    pub columns: Vec<BillboardColumn>,
}

/// Project `billboards` and return the visible ones, farthest first so they
/// can be painted in order.
pub fn place_billboards<K, I>(
    billboards: I,
    camera: &Camera,
    viewport: Viewport,
    depth: &DepthBuffer,
    object_scale: f64,
) -> Vec<PlacedBillboard<K>>
where
    K: Copy,
    I: IntoIterator<Item = Billboard<K>>,
{
    let mut placed: Vec<_> = billboards
        .into_iter()
        .filter_map(|billboard| place_one(billboard, camera, viewport, depth, object_scale))
        .collect();
    placed.sort_by(|a, b| b.depth.partial_cmp(&a.depth).unwrap_or(Ordering::Equal));
    placed
}

fn place_one<K: Copy>(
    billboard: Billboard<K>,
    camera: &Camera,
    viewport: Viewport,
    depth: &DepthBuffer,
    object_scale: f64,
) -> Option<PlacedBillboard<K>> {
    let view = camera.project(billboard.position)?;

    let height = viewport.height as f64;
    let wall_height = height / (view.depth + EPSILON);
    let size = wall_height * object_scale;
    if size <= 0.0 {
        return None;
    }

    let left = view.column - size * 0.5;
    let first = left.floor().max(0.0) as u32;
    let end = (left + size).ceil().min(viewport.width as f64).max(0.0) as u32;

    let columns: Vec<_> = (first..end)
        .filter(|&column| depth.is_nearer(column as usize, view.depth))
        .map(|column| BillboardColumn {
            column,
            texture_u: ((column as f64 + 0.5 - left) / size).clamp(0.0, 1.0 - f64::EPSILON),
        })
        .collect();
    if columns.is_empty() {
        return None;
    }

    let floor_line = height * 0.5 + wall_height * 0.5;
    let max_row = i64::from(viewport.height.saturating_sub(1));
    let bottom = (floor_line as i64).clamp(0, max_row);
    let top = ((floor_line - size) as i64).clamp(0, bottom);

    Some(PlacedBillboard {
        kind: billboard.kind,
        depth: view.depth,
        size,
        top: top as u32,
        bottom: bottom as u32,
        columns,
    })
}
