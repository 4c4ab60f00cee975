//! Frame planning: what each screen column shows.
//!
//! The pass stops short of pixels. It reports wall spans with texture
//! coordinates and shading flags, a per-column depth buffer, and visible
//! billboard columns. A renderer turns these into pixels.

pub mod billboards;
pub mod columns;
pub mod depth;

pub use billboards::{Billboard, BillboardColumn, PlacedBillboard, place_billboards};
pub use columns::{
    ColumnContent, ColumnSlice, RowSpan, WallHit, cast_column, cast_columns, vertical_span,
};
pub use depth::DepthBuffer;

use crate::camera::Camera;
use crate::grid::TileQuery;
use crate::types::Viewport;

/// Reusable per-frame buffers.
#[derive(Debug, Default, Clone)]
pub struct Frame {
    pub columns: Vec<ColumnSlice>,
    pub depth: DepthBuffer,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cast all columns, reusing the buffers from the previous frame.
    pub fn cast<M>(&mut self, map: &M, camera: &Camera, viewport: Viewport)
    where
        M: TileQuery + ?Sized,
    {
        cast_columns(map, camera, viewport, &mut self.depth, &mut self.columns);
    }

    /// Parallel [`Frame::cast`].
    #[cfg(feature = "rayon")]
    pub fn cast_par<M>(&mut self, map: &M, camera: &Camera, viewport: Viewport)
    where
        M: TileQuery + Sync + ?Sized,
    {
        columns::parallel::cast_columns_par(
            map,
            camera,
            viewport,
            &mut self.depth,
            &mut self.columns,
        );
    }

    /// Place billboards against this frame's depth buffer.
    pub fn place<K, I>(
        &self,
        billboards: I,
        camera: &Camera,
        viewport: Viewport,
        object_scale: f64,
    ) -> Vec<PlacedBillboard<K>>
    where
        K: Copy,
        I: IntoIterator<Item = Billboard<K>>,
    {
        place_billboards(billboards, camera, viewport, &self.depth, object_scale)
    }
}
