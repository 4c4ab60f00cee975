//! Map metadata.

use glam::{DVec2, IVec2};

/// Dimensions of a tile map. Cells are unit squares with cell `(0, 0)` spanning
/// `[0, 1) x [0, 1)` in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapInfo {
    pub width: u32,
    pub height: u32,
}

impl MapInfo {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn square(width: u32) -> Self {
        Self::new(width, width)
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Whether `cell` lies inside `[0, width) x [0, height)`.
    #[inline]
    pub fn contains(&self, cell: IVec2) -> bool {
        // equivalent to (x >= 0 && x < width) for signed x
        (cell.x as u32) < self.width && (cell.y as u32) < self.height
    }

    /// Flat row-major index of `cell`, or `None` when it is outside the map.
    #[inline]
    pub fn index(&self, cell: IVec2) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        Some((cell.y as usize) * (self.width as usize) + (cell.x as usize))
    }

    /// Cell coordinate of a flat index. The index must be below `cell_count()`.
    #[inline]
    pub fn cell_of(&self, index: usize) -> IVec2 {
        let width = self.width as usize;
        IVec2::new((index % width) as i32, (index / width) as i32)
    }

    /// World position of the centre of `cell`.
    #[inline]
    pub fn cell_center(cell: IVec2) -> DVec2 {
        cell.as_dvec2() + DVec2::splat(0.5)
    }

    /// Centre of the map in world coordinates.
    #[inline]
    pub fn world_center(&self) -> DVec2 {
        DVec2::new(self.width as f64 * 0.5, self.height as f64 * 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_is_row_major() {
        let info = MapInfo::new(4, 3);
        assert_eq!(info.index(IVec2::new(0, 0)), Some(0));
        assert_eq!(info.index(IVec2::new(3, 0)), Some(3));
        assert_eq!(info.index(IVec2::new(1, 2)), Some(9));
        assert_eq!(info.cell_of(9), IVec2::new(1, 2));
    }

    #[test]
    fn out_of_range_cells_have_no_index() {
        let info = MapInfo::square(3);
        assert_eq!(info.index(IVec2::new(-1, 0)), None);
        assert_eq!(info.index(IVec2::new(3, 0)), None);
        assert_eq!(info.index(IVec2::new(0, 3)), None);
        // A wrapped x must not alias the next row.
        assert_eq!(info.index(IVec2::new(4, 1)), None);
    }
}
