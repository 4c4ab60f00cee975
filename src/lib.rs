//! Tile-grid raycasting: DDA wall casting, camera projection, billboard
//! placement and sliding movement over a 2D occupancy map.

pub mod camera;
pub mod config;
pub mod grid;
pub mod iterators;
pub mod loaders;
pub mod movement;
pub mod raycast;
pub mod render;
pub mod types;
pub mod visualization;

pub use camera::{Camera, ViewPoint};
pub use config::EngineConfig;
pub use grid::{EditQueue, MaterialId, ObjectId, Occupancy, TileMap, TileQuery};
pub use loaders::{LoadedMap, load_map};
pub use movement::{resolve_movement, step_player};
pub use raycast::{Collision, Side, cast_ray, find_first_collision};
pub use render::Frame;
pub use types::{Input, LineSegment, MapInfo, Player, TilecastError, Vector2, Viewport};
