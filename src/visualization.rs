use image::{Rgb, RgbImage};

use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::grid::{MaterialId, TileMap};
use crate::render::{ColumnContent, ColumnSlice};
use crate::types::{EMPTY_GRAY, SOLID_GRAY};

const DECORATION_COLOR: Rgb<u8> = Rgb([230, 190, 20]);
const VOID_RAY_COLOR: Rgb<u8> = Rgb([120, 40, 160]);
const PLAYER_COLOR: Rgb<u8> = Rgb([30, 120, 230]);

/// Top-down preview of a tile map, `scale` pixels per cell.
///
/// - **Empty** cells are near-white.
/// - **Solid** cells are dark, with a per-material tint so neighbouring
///   materials can be told apart.
/// - **Decorations** are a dot in the middle of their cell.
///
/// Image row 0 is map row 0, matching the loader's convention.
pub fn tile_map_to_image(map: &TileMap, scale: u32) -> RgbImage {
    let scale = scale.max(1);
    let mut img = RgbImage::new(map.width() * scale, map.height() * scale);

    for (cell, material) in map.materials().iter_cells() {
        let color = match material {
            Some(material) => material_color(*material),
            None => Rgb([EMPTY_GRAY; 3]),
        };
        let (x0, y0) = (cell.x as u32 * scale, cell.y as u32 * scale);
        for y in y0..y0 + scale {
            for x in x0..x0 + scale {
                img.put_pixel(x, y, color);
            }
        }
    }

    for decoration in map.decorations() {
        let p = decoration.position * scale as f64;
        put_pixel_checked(&mut img, p.x, p.y, DECORATION_COLOR);
    }

    img
}

/// Draw each `stride`-th column's ray from the camera to where it stopped,
/// coloured like the wall it hit (shaded per `render`), or with the far colour.
pub fn draw_rays(
    img: &mut RgbImage,
    camera: &Camera,
    columns: &[ColumnSlice],
    render: &RenderConfig,
    scale: u32,
    stride: usize,
) {
    let scale = scale.max(1) as f64;
    for slice in columns.iter().step_by(stride.max(1)) {
        let (length, color) = match slice.content {
            ColumnContent::Wall(hit) => match hit.occupancy.material() {
                Some(material) => (hit.ray_distance, slice.flat_color(material_color(material), render)),
                None => (hit.ray_distance, VOID_RAY_COLOR),
            },
            ColumnContent::Far => (camera.draw_distance(), Rgb(render.far_color)),
        };

        let samples = (length * scale).ceil().max(1.0) as usize;
        for i in 0..=samples {
            let p = (camera.position + slice.direction * (length * i as f64 / samples as f64)) * scale;
            put_pixel_checked(img, p.x, p.y, color);
        }
    }

    let p = camera.position * scale;
    put_pixel_checked(img, p.x, p.y, PLAYER_COLOR);
}

fn material_color(material: MaterialId) -> Rgb<u8> {
    let tint = (u32::from(material.0) * 37 % 96) as u8;
    Rgb([SOLID_GRAY + tint, SOLID_GRAY + tint / 2, SOLID_GRAY])
}

fn put_pixel_checked(img: &mut RgbImage, x: f64, y: f64, color: Rgb<u8>) {
    if x < 0.0 || y < 0.0 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    if x < img.width() && y < img.height() {
        img.put_pixel(x, y, color);
    }
}
