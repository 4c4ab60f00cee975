use glam::IVec2;

use crate::types::{MapInfo, TilecastError};

/// Row-major grid of cells addressed by integer coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid2d<T> {
    info: MapInfo,
    data: Vec<T>,
}

impl<T> Grid2d<T> {
    pub fn new(info: MapInfo, data: Vec<T>) -> Result<Self, TilecastError> {
        let expected_len = info.cell_count();
        if data.len() != expected_len {
            return Err(TilecastError::InvalidMap(format!(
                "data length {} does not match map size {}x{}",
                data.len(),
                info.width,
                info.height
            )));
        }

        Ok(Self { info, data })
    }

    /// Build a grid from a flat row-major sequence, deriving the height from
    /// `data.len() / width`.
    pub fn from_rows(data: Vec<T>, width: u32) -> Result<Self, TilecastError> {
        if width == 0 || data.is_empty() {
            return Err(TilecastError::InvalidMap(format!(
                "map must have at least one cell (width {}, {} cells)",
                width,
                data.len()
            )));
        }
        if data.len() % width as usize != 0 {
            return Err(TilecastError::InvalidMap(format!(
                "data length {} is not a multiple of width {}",
                data.len(),
                width
            )));
        }

        let height = (data.len() / width as usize) as u32;
        Self::new(MapInfo::new(width, height), data)
    }

    pub fn filled(info: MapInfo, value: T) -> Self
    where
        T: Clone,
    {
        let data = vec![value; info.cell_count()];
        Self { info, data }
    }

    pub fn info(&self) -> &MapInfo {
        &self.info
    }

    pub fn width(&self) -> u32 {
        self.info.width
    }

    pub fn height(&self) -> u32 {
        self.info.height
    }

    pub fn get(&self, cell: IVec2) -> Option<&T> {
        self.info.index(cell).map(|idx| &self.data[idx])
    }

    /// Replace the value at `cell`, returning the previous one.
    pub fn set(&mut self, cell: IVec2, value: T) -> Result<T, TilecastError> {
        let Some(idx) = self.info.index(cell) else {
            return Err(TilecastError::OutOfBounds(format!(
                "cell ({}, {}) out of bounds for map {}x{}",
                cell.x, cell.y, self.info.width, self.info.height
            )));
        };
        Ok(std::mem::replace(&mut self.data[idx], value))
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Iterate `(cell, value)` pairs in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (IVec2, &T)> + '_ {
        self.data
            .iter()
            .enumerate()
            .map(|(idx, value)| (self.info.cell_of(idx), value))
    }
}
