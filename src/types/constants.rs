/// Floor added to every denominator that may reach zero (vector length,
/// viewport height, projection scale). Keeps degenerate inputs finite.
pub const EPSILON: f64 = f64::EPSILON;

/// Pixel value assigned to empty cells in minimap previews.
pub const EMPTY_GRAY: u8 = 235;
/// Pixel value assigned to solid cells when no palette entry is known.
pub const SOLID_GRAY: u8 = 40;

pub const DEFAULT_FIELD_OF_VIEW_DEG: f64 = 66.0;
pub const DEFAULT_DRAW_DISTANCE: f64 = 100.0;
pub const DEFAULT_ROTATION_SPEED: f64 = 3.0;
pub const DEFAULT_MOVEMENT_SPEED: f64 = 5.0;
pub const DEFAULT_MAX_FRAME_TIME_MS: u32 = 50;
pub const DEFAULT_SHADE_SCALE: f32 = 0.85;
pub const DEFAULT_OBJECT_SCALE: f64 = 0.75;
