use glam::{DVec2, IVec2};

use crate::grid::Occupancy;
use crate::types::{MapInfo, Vector2Ext};

/// Per-cell occupancy queries used by ray traversal and movement.
pub trait TileQuery {
    fn info(&self) -> &MapInfo;

    /// Occupancy of `cell`. Cells outside the map must report [`Occupancy::Void`].
    fn occupancy(&self, cell: IVec2) -> Occupancy;

    /// Occupancy of the cell containing a world position.
    fn occupancy_at(&self, position: DVec2) -> Occupancy {
        self.occupancy(position.to_grid())
    }

    #[inline]
    fn is_blocking(&self, cell: IVec2) -> bool {
        self.occupancy(cell).is_blocking()
    }
}
