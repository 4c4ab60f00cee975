//! Engine configuration.
//!
//! Every field has a default matching the reference client (66° field of view,
//! 640x480 viewport, 100-cell draw distance), so a config file only needs to
//! list what it overrides:
//!
//! ```yaml
//! camera:
//!   field_of_view_deg: 75
//! movement:
//!   movement_speed: 4.0
//! ```

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{
    DEFAULT_DRAW_DISTANCE, DEFAULT_FIELD_OF_VIEW_DEG, DEFAULT_MAX_FRAME_TIME_MS,
    DEFAULT_MOVEMENT_SPEED, DEFAULT_OBJECT_SCALE, DEFAULT_ROTATION_SPEED, DEFAULT_SHADE_SCALE,
    TilecastError, Viewport,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub camera: CameraConfig,
    pub viewport: Viewport,
    pub movement: MovementConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    #[serde(deserialize_with = "deserialize_field_of_view")]
    pub field_of_view_deg: f64,
    /// Rays stop after this many world units.
    #[serde(deserialize_with = "deserialize_positive")]
    pub draw_distance: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            field_of_view_deg: DEFAULT_FIELD_OF_VIEW_DEG,
            draw_distance: DEFAULT_DRAW_DISTANCE,
        }
    }
}

impl CameraConfig {
    #[inline]
    pub fn field_of_view(&self) -> f64 {
        self.field_of_view_deg.to_radians()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MovementConfig {
    /// Radians per second.
    #[serde(deserialize_with = "deserialize_positive")]
    pub rotation_speed: f64,
    /// World units per second.
    #[serde(deserialize_with = "deserialize_positive")]
    pub movement_speed: f64,
    /// Longest frame time fed to the controls. Long stalls are clamped so a
    /// single frame cannot move the player across several cells.
    pub max_frame_time_ms: u32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            rotation_speed: DEFAULT_ROTATION_SPEED,
            movement_speed: DEFAULT_MOVEMENT_SPEED,
            max_frame_time_ms: DEFAULT_MAX_FRAME_TIME_MS,
        }
    }
}

impl MovementConfig {
    /// `max_frame_time_ms` in seconds.
    #[inline]
    pub fn max_frame_time(&self) -> f64 {
        f64::from(self.max_frame_time_ms) / 1000.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Brightness multiplier for walls hit on an AXIS_Y face.
    #[serde(deserialize_with = "deserialize_unit_interval")]
    pub shade_scale: f32,
    /// Billboard size relative to a full wall.
    #[serde(deserialize_with = "deserialize_positive")]
    pub object_scale: f64,
    /// Colour painted in columns whose ray hit nothing.
    pub far_color: [u8; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            shade_scale: DEFAULT_SHADE_SCALE,
            object_scale: DEFAULT_OBJECT_SCALE,
            far_color: [0, 0, 0],
        }
    }
}

impl EngineConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, TilecastError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TilecastError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&yaml)?;
        log::debug!("loaded engine config from {}", path.display());
        Ok(config)
    }

    /// Checks that span several fields, or that field-level deserializers
    /// cannot express.
    pub fn validate(&self) -> Result<(), TilecastError> {
        if self.viewport.width == 0 {
            return Err(TilecastError::InvalidConfig(
                "viewport width must be at least one column".to_string(),
            ));
        }
        if self.movement.max_frame_time_ms == 0 {
            return Err(TilecastError::InvalidConfig(
                "max_frame_time_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn deserialize_field_of_view<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value > 0.0 && value < 180.0 {
        Ok(value)
    } else {
        Err(serde::de::Error::custom(
            "field_of_view_deg must be in the range (0, 180)",
        ))
    }
}

fn deserialize_positive<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(serde::de::Error::custom("value must be positive and finite"))
    }
}

fn deserialize_unit_interval<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f32::deserialize(deserializer)?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(serde::de::Error::custom(
            "shade_scale must be in the range [0.0, 1.0]",
        ))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = EngineConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.viewport, Viewport::new(640, 480));
        assert_relative_eq!(config.movement.max_frame_time(), 0.05);
    }

    #[test]
    fn partial_overrides_keep_other_defaults() {
        let yaml = "camera:\n  field_of_view_deg: 90\nviewport:\n  width: 320\n  height: 200\n";
        let config = EngineConfig::from_yaml_str(yaml).unwrap();
        assert_relative_eq!(config.camera.field_of_view(), std::f64::consts::FRAC_PI_2);
        assert_eq!(config.camera.draw_distance, DEFAULT_DRAW_DISTANCE);
        assert_eq!(config.viewport, Viewport::new(320, 200));
        assert_eq!(config.movement, MovementConfig::default());
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        for yaml in [
            "camera:\n  field_of_view_deg: 180\n",
            "camera:\n  draw_distance: 0\n",
            "movement:\n  movement_speed: -1\n",
            "render:\n  shade_scale: 1.5\n",
            "unknown_section: 1\n",
        ] {
            assert!(
                matches!(EngineConfig::from_yaml_str(yaml), Err(TilecastError::Yaml(_))),
                "{yaml}"
            );
        }
    }

    #[test]
    fn cross_field_checks_use_invalid_config() {
        let result = EngineConfig::from_yaml_str("viewport:\n  width: 0\n  height: 10\n");
        assert!(matches!(result, Err(TilecastError::InvalidConfig(_))));
    }
}
