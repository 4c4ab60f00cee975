//! Input-driven rotation and motion.

use crate::config::MovementConfig;
use crate::grid::TileQuery;
use crate::movement::resolve_movement;
use crate::types::{Input, Player};

/// Clamp a measured frame time (seconds) to the configured maximum.
#[inline]
pub fn clamp_frame_time(elapsed: f64, config: &MovementConfig) -> f64 {
    elapsed.clamp(0.0, config.max_frame_time())
}

/// Turn by `rotation_speed * frame_time` radians, positive for turn-right.
pub fn rotate_player(player: Player, input: &Input, frame_time: f64, rotation_speed: f64) -> Player {
    let sign = input.rotation_sign();
    if sign == 0.0 {
        return player;
    }
    player.rotated(sign * rotation_speed * frame_time)
}

/// Move along `forward` (or backwards), sliding along walls.
pub fn move_player<M>(
    player: Player,
    map: &M,
    input: &Input,
    frame_time: f64,
    movement_speed: f64,
) -> Player
where
    M: TileQuery + ?Sized,
{
    let sign = input.movement_sign();
    if sign == 0.0 {
        return player;
    }

    let displacement = player.forward * (sign * movement_speed * frame_time);
    Player {
        position: resolve_movement(map, player.position, displacement),
        ..player
    }
}

/// One frame of player control: clamp the frame time, rotate, then move.
pub fn step_player<M>(
    player: Player,
    map: &M,
    input: &Input,
    elapsed: f64,
    config: &MovementConfig,
) -> Player
where
    M: TileQuery + ?Sized,
{
    let frame_time = clamp_frame_time(elapsed, config);
    let player = rotate_player(player, input, frame_time, config.rotation_speed);
    move_player(player, map, input, frame_time, config.movement_speed)
}

#[cfg(test)]
mod tests {
    use glam::DVec2;

    use super::*;
    use crate::grid::TileMap;
    use crate::types::MapInfo;

    fn player() -> Player {
        Player::new(DVec2::new(1.5, 1.5), DVec2::new(0.0, -1.0))
    }

    #[test]
    fn move_forward() {
        let map = TileMap::empty(MapInfo::square(3));
        let input = Input {
            forward: true,
            ..Default::default()
        };
        let moved = step_player(player(), &map, &input, 0.070, &MovementConfig::default());
        assert_eq!(moved.position.x, 1.5);
        assert!(moved.position.y < 1.5);
        assert_eq!(moved.forward, DVec2::new(0.0, -1.0));
    }

    #[test]
    fn turn_right() {
        let map = TileMap::empty(MapInfo::square(3));
        let input = Input {
            turn_right: true,
            ..Default::default()
        };
        let turned = step_player(player(), &map, &input, 0.070, &MovementConfig::default());
        assert_eq!(turned.position, DVec2::new(1.5, 1.5));
        assert!(turned.forward.x > 0.0);
        assert!(turned.forward.y > -1.0);
    }

    #[test]
    fn long_frames_are_clamped() {
        let config = MovementConfig::default();
        assert_eq!(clamp_frame_time(2.0, &config), 0.05);
        assert_eq!(clamp_frame_time(0.016, &config), 0.016);

        let map = TileMap::empty(MapInfo::square(40));
        let start = Player::new(DVec2::new(20.5, 20.5), DVec2::X);
        let input = Input {
            forward: true,
            ..Default::default()
        };
        let moved = step_player(start, &map, &input, 10.0, &config);
        let travelled = moved.position.x - start.position.x;
        assert!((travelled - config.movement_speed * 0.05).abs() < 1e-12);
    }

    #[test]
    fn backward_against_wall_does_not_move() {
        let map = TileMap::empty(MapInfo::square(3));
        let start = Player::new(DVec2::new(0.1, 0.5), DVec2::X);
        let input = Input {
            backward: true,
            ..Default::default()
        };
        let moved = move_player(start, &map, &input, 0.05, 5.0);
        assert_eq!(moved.position, start.position);
    }
}
