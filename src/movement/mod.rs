//! Player motion through a tile map.

pub mod controls;
pub mod resolver;

pub use controls::{clamp_frame_time, move_player, rotate_player, step_player};
pub use resolver::resolve_movement;
