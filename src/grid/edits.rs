//! Staged occupancy edits.
//!
//! Game logic (door toggles) may decide on map changes while a frame of
//! raycasts still borrows the map. Edits are queued and applied together once
//! the batch has finished, so every ray in a batch sees the same map.

use glam::IVec2;

use crate::grid::{MaterialId, TileMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileEdit {
    pub cell: IVec2,
    pub material: Option<MaterialId>,
}

/// Outcome of [`EditQueue::apply`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EditReport {
    pub applied: usize,
    /// Cells outside the map; these edits were dropped.
    pub rejected: Vec<IVec2>,
}

#[derive(Debug, Default, Clone)]
pub struct EditQueue {
    pending: Vec<TileEdit>,
}

impl EditQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cell: IVec2, material: Option<MaterialId>) {
        self.pending.push(TileEdit { cell, material });
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Apply all pending edits in submission order and clear the queue.
    /// A rejected edit does not stop the ones after it.
    pub fn apply(&mut self, map: &mut TileMap) -> EditReport {
        let mut report = EditReport::default();
        for edit in self.pending.drain(..) {
            match map.replace_occupancy(edit.cell, edit.material) {
                Ok(_) => report.applied += 1,
                Err(err) => {
                    log::warn!("dropping map edit: {err}");
                    report.rejected.push(edit.cell);
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Occupancy, TileQuery};
    use crate::types::MapInfo;

    #[test]
    fn edits_apply_in_order() {
        let mut map = TileMap::empty(MapInfo::square(3));
        let mut queue = EditQueue::new();
        let door = IVec2::new(1, 1);
        queue.push(door, Some(MaterialId(2)));
        queue.push(door, None);
        queue.push(door, Some(MaterialId(3)));
        assert_eq!(queue.len(), 3);

        let report = queue.apply(&mut map);
        assert_eq!(report.applied, 3);
        assert!(report.rejected.is_empty());
        assert!(queue.is_empty());
        assert_eq!(map.occupancy(door), Occupancy::Solid(MaterialId(3)));
    }

    #[test]
    fn out_of_range_edits_are_reported_not_fatal() {
        let mut map = TileMap::empty(MapInfo::square(2));
        let mut queue = EditQueue::new();
        queue.push(IVec2::new(5, 5), Some(MaterialId(1)));
        queue.push(IVec2::new(0, 1), Some(MaterialId(1)));

        let report = queue.apply(&mut map);
        assert_eq!(report.applied, 1);
        assert_eq!(report.rejected, vec![IVec2::new(5, 5)]);
        assert!(map.is_blocking(IVec2::new(0, 1)));
    }
}
