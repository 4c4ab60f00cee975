pub mod edits;
pub mod grid2d;
pub mod tile_map;
pub mod traits;

pub use edits::{EditQueue, EditReport, TileEdit};
pub use grid2d::Grid2d;
pub use tile_map::{Decoration, MaterialId, ObjectId, Occupancy, TileMap};
pub use traits::TileQuery;
