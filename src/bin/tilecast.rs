use std::error::Error;

use log::info;

use tilecast::render::{Billboard, ColumnContent};
use tilecast::visualization::{draw_rays, tile_map_to_image};
use tilecast::{Camera, EngineConfig, Frame, Input, ObjectId, load_map, step_player};

const MINIMAP_SCALE: u32 = 8;
const RAY_STRIDE: usize = 8;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = std::env::args();
    let _binary = args.next();
    let Some(yaml_path) = args.next() else {
        eprintln!("usage: tilecast <map.yaml> [out.png] [config.yaml] [forward-steps]");
        return Ok(());
    };
    let out_path = args.next().unwrap_or_else(|| "tilecast.png".to_string());
    let config = match args.next() {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let steps: u32 = match args.next() {
        Some(steps) => steps.parse()?,
        None => 0,
    };

    let loaded = load_map(&yaml_path)?;
    let map = loaded.map;

    // Walk forward at the capped frame time to exercise collision sliding.
    let walk = Input {
        forward: true,
        ..Input::default()
    };
    let mut player = loaded.spawn;
    for _ in 0..steps {
        player = step_player(player, &map, &walk, f64::INFINITY, &config.movement);
    }

    let camera = Camera::new(
        &player,
        config.viewport,
        config.camera.field_of_view(),
        config.camera.draw_distance,
    );
    let mut frame = Frame::new();
    frame.cast(&map, &camera, config.viewport);

    let walls = frame
        .columns
        .iter()
        .filter(|slice| matches!(slice.content, ColumnContent::Wall(_)))
        .count();
    let billboards = frame.place(
        map.decorations().map(Billboard::<ObjectId>::from),
        &camera,
        config.viewport,
        config.render.object_scale,
    );
    info!(
        "player at ({:.2}, {:.2}): {walls}/{} columns hit a wall, {} billboards visible",
        player.position.x,
        player.position.y,
        frame.columns.len(),
        billboards.len()
    );

    let mut img = tile_map_to_image(&map, MINIMAP_SCALE);
    draw_rays(
        &mut img,
        &camera,
        &frame.columns,
        &config.render,
        MINIMAP_SCALE,
        RAY_STRIDE,
    );
    img.save(&out_path)?;
    info!("wrote {out_path}");

    Ok(())
}
