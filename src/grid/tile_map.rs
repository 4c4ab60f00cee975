//! Tile map: a solid-material layer plus an optional decoration layer.
//!
//! Lookups outside the map never fail. For occupancy they report
//! [`Occupancy::Void`], which blocks rays and movement exactly like a wall, so
//! traversal always stops at the map edge. For decorations they report `None`.

use glam::{DVec2, IVec2};
use serde::{Deserialize, Serialize};

use crate::grid::{Grid2d, TileQuery};
use crate::types::{MapInfo, TilecastError, Vector2Ext};

/// Wall material tag assigned by map data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialId(pub u16);

/// Decoration (pickup, prop) tag assigned by map data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u16);

/// Result of an occupancy lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupancy {
    Empty,
    Solid(MaterialId),
    /// Outside the map.
    Void,
}

impl Occupancy {
    #[inline]
    pub fn is_blocking(&self) -> bool {
        !matches!(self, Self::Empty)
    }

    /// Material of a solid cell. Void and empty cells have none.
    #[inline]
    pub fn material(&self) -> Option<MaterialId> {
        match self {
            Self::Solid(material) => Some(*material),
            Self::Empty | Self::Void => None,
        }
    }
}

/// A decoration placed in the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decoration {
    pub object: ObjectId,
    pub position: DVec2,
}

impl Decoration {
    /// Decoration centred in `cell`.
    pub fn at_cell(object: ObjectId, cell: IVec2) -> Self {
        Self {
            object,
            position: MapInfo::cell_center(cell),
        }
    }
}

impl TileQuery for Grid2d<Option<MaterialId>> {
    fn info(&self) -> &MapInfo {
        Grid2d::info(self)
    }

    #[inline]
    fn occupancy(&self, cell: IVec2) -> Occupancy {
        match self.get(cell) {
            Some(Some(material)) => Occupancy::Solid(*material),
            Some(None) => Occupancy::Empty,
            None => Occupancy::Void,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TileMap {
    materials: Grid2d<Option<MaterialId>>,
    decorations: Grid2d<Option<Decoration>>,
}

impl TileMap {
    /// Build a map from row-major layers.
    ///
    /// `materials.len()` must be a non-zero multiple of `width`. `decorations`
    /// is either empty (no decorations) or exactly as long as `materials`.
    pub fn new(
        materials: Vec<Option<MaterialId>>,
        decorations: Vec<Option<Decoration>>,
        width: u32,
    ) -> Result<Self, TilecastError> {
        let materials = Grid2d::from_rows(materials, width)?;
        let info = *materials.info();

        let decorations = if decorations.is_empty() {
            Grid2d::filled(info, None)
        } else {
            Grid2d::new(info, decorations).map_err(|_| {
                TilecastError::InvalidMap(format!(
                    "decoration layer does not match material layer {}x{}",
                    info.width, info.height
                ))
            })?
        };

        Ok(Self {
            materials,
            decorations,
        })
    }

    /// Map with every cell empty.
    pub fn empty(info: MapInfo) -> Self {
        Self {
            materials: Grid2d::filled(info, None),
            decorations: Grid2d::filled(info, None),
        }
    }

    pub fn width(&self) -> u32 {
        self.materials.width()
    }

    pub fn height(&self) -> u32 {
        self.materials.height()
    }

    pub fn materials(&self) -> &Grid2d<Option<MaterialId>> {
        &self.materials
    }

    /// Decoration in the cell containing `position`, if any.
    pub fn decoration_at(&self, position: DVec2) -> Option<&Decoration> {
        self.decorations.get(position.to_grid()).and_then(Option::as_ref)
    }

    /// All decorations in row-major cell order.
    pub fn decorations(&self) -> impl Iterator<Item = &Decoration> + '_ {
        self.decorations.data().iter().flatten()
    }

    /// Replace the occupancy of one cell (e.g. opening or closing a door),
    /// returning the previous value.
    ///
    /// Requires exclusive access, so it cannot overlap a batch of raycasts
    /// borrowing the map. Use [`EditQueue`](crate::grid::EditQueue) to stage
    /// edits produced while a batch is running.
    pub fn replace_occupancy(
        &mut self,
        cell: IVec2,
        material: Option<MaterialId>,
    ) -> Result<Option<MaterialId>, TilecastError> {
        let previous = self.materials.set(cell, material)?;
        log::debug!(
            "cell ({}, {}) occupancy {:?} -> {:?}",
            cell.x,
            cell.y,
            previous,
            material
        );
        Ok(previous)
    }
}

impl TileQuery for TileMap {
    fn info(&self) -> &MapInfo {
        self.materials.info()
    }

    #[inline]
    fn occupancy(&self, cell: IVec2) -> Occupancy {
        self.materials.occupancy(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WALL: Option<MaterialId> = Some(MaterialId(1));

    fn three_by_three() -> TileMap {
        #[rustfmt::skip]
        let materials = vec![
            WALL, WALL, WALL,
            None, None, WALL,
            WALL, None, WALL,
        ];
        let mut decorations = vec![None; 9];
        decorations[4] = Some(Decoration::at_cell(ObjectId(0), IVec2::new(1, 1)));
        TileMap::new(materials, decorations, 3).unwrap()
    }

    #[test]
    fn occupancy_floors_world_positions() {
        let map = three_by_three();
        assert_eq!(map.occupancy_at(DVec2::new(0.5, 0.5)), Occupancy::Solid(MaterialId(1)));
        assert_eq!(map.occupancy_at(DVec2::new(1.99, 1.01)), Occupancy::Empty);
        assert_eq!(map.occupancy_at(DVec2::new(2.0, 1.0)), Occupancy::Solid(MaterialId(1)));
    }

    #[test]
    fn out_of_range_is_void_and_blocking() {
        let map = three_by_three();
        for p in [
            DVec2::new(-0.1, 1.5),
            DVec2::new(3.0, 1.5),
            DVec2::new(1.5, -2.0),
            DVec2::new(1.5, 3.2),
        ] {
            let occupancy = map.occupancy_at(p);
            assert_eq!(occupancy, Occupancy::Void);
            assert!(occupancy.is_blocking());
            assert_eq!(occupancy.material(), None);
        }
    }

    #[test]
    fn decorations_are_looked_up_by_cell() {
        let map = three_by_three();
        let decoration = map.decoration_at(DVec2::new(1.2, 1.9)).unwrap();
        assert_eq!(decoration.object, ObjectId(0));
        assert_eq!(decoration.position, DVec2::new(1.5, 1.5));
        assert!(map.decoration_at(DVec2::new(0.5, 0.5)).is_none());
        assert!(map.decoration_at(DVec2::new(-4.0, 1.5)).is_none());
        assert_eq!(map.decorations().count(), 1);
    }

    #[test]
    fn empty_decoration_layer_is_allowed() {
        let map = TileMap::new(vec![None; 6], vec![], 3).unwrap();
        assert_eq!(map.height(), 2);
        assert_eq!(map.decorations().count(), 0);
    }

    #[test]
    fn mismatched_layers_are_rejected() {
        assert!(matches!(
            TileMap::new(vec![None; 7], vec![], 3),
            Err(TilecastError::InvalidMap(_))
        ));
        assert!(matches!(
            TileMap::new(vec![None; 6], vec![None; 3], 3),
            Err(TilecastError::InvalidMap(_))
        ));
    }

    #[test]
    fn replace_occupancy_toggles_a_door() {
        let mut map = three_by_three();
        let door = IVec2::new(1, 2);
        assert_eq!(map.replace_occupancy(door, Some(MaterialId(7))).unwrap(), None);
        assert_eq!(map.occupancy(door), Occupancy::Solid(MaterialId(7)));
        assert_eq!(map.replace_occupancy(door, None).unwrap(), Some(MaterialId(7)));
        assert_eq!(map.occupancy(door), Occupancy::Empty);
        assert!(map.replace_occupancy(IVec2::new(3, 0), None).is_err());
    }
}
