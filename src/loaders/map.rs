//! Map loading from a YAML manifest and PNG layers.
//!
//! ```yaml
//! materials: materials.png   # one pixel per cell, required
//! objects: objects.png       # same size, optional
//! ceiling: [64, 64, 64]
//! floor: [112, 112, 112]
//! spawn:
//!   position: [1.5, 1.5]
//!   forward: [0.0, -1.0]
//! palette:
//!   materials:
//!     - { color: [128, 128, 128], id: 1 }
//!   objects:
//!     - { color: [255, 255, 0], id: 0 }
//! ```
//!
//! Pixel `(x, y)` becomes cell `(x, y)`; image rows are not flipped. Fully
//! transparent pixels and colours missing from the palette are empty cells.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use glam::{DVec2, IVec2};
use image::{Rgb, RgbaImage};
use serde::Deserialize;

use crate::grid::{Decoration, MaterialId, ObjectId, TileMap, TileQuery};
use crate::types::{Player, TilecastError};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MapManifest {
    materials: String,
    #[serde(default)]
    objects: Option<String>,
    #[serde(default = "default_ceiling")]
    ceiling: [u8; 3],
    #[serde(default = "default_floor")]
    floor: [u8; 3],
    spawn: SpawnManifest,
    #[serde(default)]
    palette: PaletteManifest,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SpawnManifest {
    position: [f64; 2],
    #[serde(default = "default_forward")]
    forward: [f64; 2],
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PaletteManifest {
    #[serde(default)]
    materials: Vec<PaletteEntry<MaterialId>>,
    #[serde(default)]
    objects: Vec<PaletteEntry<ObjectId>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PaletteEntry<T> {
    color: [u8; 3],
    id: T,
}

fn default_ceiling() -> [u8; 3] {
    [64, 64, 64]
}

fn default_floor() -> [u8; 3] {
    [112, 112, 112]
}

fn default_forward() -> [f64; 2] {
    [1.0, 0.0]
}

/// Ceiling and floor fill colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    pub ceiling: Rgb<u8>,
    pub floor: Rgb<u8>,
}

#[derive(Debug, Clone)]
pub struct LoadedMap {
    pub map: TileMap,
    pub colors: ColorScheme,
    pub spawn: Player,
}

pub fn load_map(yaml_path: impl AsRef<Path>) -> Result<LoadedMap, TilecastError> {
    let yaml_path = yaml_path.as_ref();
    let yaml_str = std::fs::read_to_string(yaml_path)?;
    let manifest: MapManifest = serde_yaml::from_str(&yaml_str)?;

    let material_palette = build_palette(&manifest.palette.materials, "material")?;
    let object_palette = build_palette(&manifest.palette.objects, "object")?;

    let materials_image = image::open(resolve_image_path(yaml_path, &manifest.materials))?.to_rgba8();
    let width = materials_image.width();
    let materials = read_layer(&materials_image, &material_palette, "materials");

    let decorations = match &manifest.objects {
        Some(objects) => {
            let objects_image = image::open(resolve_image_path(yaml_path, objects))?.to_rgba8();
            if objects_image.dimensions() != materials_image.dimensions() {
                return Err(TilecastError::InvalidMap(format!(
                    "objects layer is {}x{} but materials layer is {}x{}",
                    objects_image.width(),
                    objects_image.height(),
                    materials_image.width(),
                    materials_image.height()
                )));
            }
            read_layer(&objects_image, &object_palette, "objects")
                .into_iter()
                .enumerate()
                .map(|(idx, object)| {
                    let cell = IVec2::new((idx as u32 % width) as i32, (idx as u32 / width) as i32);
                    object.map(|object| Decoration::at_cell(object, cell))
                })
                .collect()
        }
        None => Vec::new(),
    };

    let map = TileMap::new(materials, decorations, width)?;

    let spawn = Player::facing(
        DVec2::from_array(manifest.spawn.position),
        DVec2::from_array(manifest.spawn.forward),
    );
    if map.occupancy_at(spawn.position).is_blocking() {
        return Err(TilecastError::InvalidMap(format!(
            "spawn ({}, {}) is not in an empty cell",
            spawn.position.x, spawn.position.y
        )));
    }

    log::debug!(
        "loaded {} ({}x{}, {} decorations)",
        yaml_path.display(),
        map.width(),
        map.height(),
        map.decorations().count()
    );

    Ok(LoadedMap {
        map,
        colors: ColorScheme {
            ceiling: Rgb(manifest.ceiling),
            floor: Rgb(manifest.floor),
        },
        spawn,
    })
}

fn build_palette<T: Copy>(
    entries: &[PaletteEntry<T>],
    what: &str,
) -> Result<HashMap<[u8; 3], T>, TilecastError> {
    let mut palette = HashMap::with_capacity(entries.len());
    for entry in entries {
        if palette.insert(entry.color, entry.id).is_some() {
            return Err(TilecastError::InvalidMap(format!(
                "{what} palette lists colour {:?} twice",
                entry.color
            )));
        }
    }
    Ok(palette)
}

fn read_layer<T: Copy>(image: &RgbaImage, palette: &HashMap<[u8; 3], T>, layer: &str) -> Vec<Option<T>> {
    let mut unmapped = 0usize;
    let cells = image
        .pixels()
        .map(|pixel| {
            let [r, g, b, a] = pixel.0;
            if a == 0 {
                return None;
            }
            let value = palette.get(&[r, g, b]).copied();
            if value.is_none() {
                unmapped += 1;
            }
            value
        })
        .collect();

    if unmapped > 0 {
        log::warn!("{layer} layer: {unmapped} opaque pixels have no palette entry, treated as empty");
    }
    cells
}

fn resolve_image_path(yaml_path: &Path, image_ref: &str) -> PathBuf {
    let image_path = PathBuf::from(image_ref);
    if image_path.is_absolute() {
        return image_path;
    }

    match yaml_path.parent() {
        Some(parent) => parent.join(image_path),
        None => image_path,
    }
}
