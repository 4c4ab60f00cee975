pub mod constants;
pub mod error;
pub mod geometry;
pub mod info;
pub mod vector;

pub use constants::*;
pub use error::TilecastError;
pub use geometry::{Input, LineSegment, Player, Viewport};
pub use info::MapInfo;
pub use vector::{Vector2, Vector2Ext};
