use criterion::{Criterion, black_box, criterion_group, criterion_main};
use glam::DVec2;

use tilecast::{MaterialId, TileMap, cast_ray};

const WALL: MaterialId = MaterialId(1);

fn bench_raycast(c: &mut Criterion) {
    let pillars = build_pillar_map(256, 256);
    let empty = build_map(256, 256, |_, _| false);
    let early_hit = build_map(256, 256, |x, _| x == 1);
    let late_hit = build_map(256, 256, |x, _| x == 254);
    let rays = build_rays();
    let rays_positive_x = build_rays_positive_x();

    for (name, map, rays) in [
        ("raycast_dda_hits", &pillars, &rays),
        ("raycast_dda_miss", &empty, &rays),
        ("raycast_dda_hits_early", &early_hit, &rays_positive_x),
        ("raycast_dda_hits_late", &late_hit, &rays_positive_x),
    ] {
        c.bench_function(name, |b| {
            b.iter(|| {
                let mut hits = 0usize;
                for (origin, dir, max_distance) in rays {
                    if cast_ray(map, *origin, *dir, *max_distance).is_some() {
                        hits += 1;
                    }
                }
                black_box(hits);
            });
        });
    }
}

fn build_map(width: u32, height: u32, solid: impl Fn(u32, u32) -> bool) -> TileMap {
    let materials = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .map(|(x, y)| solid(x, y).then_some(WALL))
        .collect();
    TileMap::new(materials, Vec::new(), width).expect("map should build")
}

fn build_pillar_map(width: u32, height: u32) -> TileMap {
    build_map(width, height, |x, y| x % 16 == 0 && y % 16 == 0)
}

fn build_rays() -> Vec<(DVec2, DVec2, f64)> {
    let mut rays = Vec::new();
    for i in 0..64 {
        let origin = DVec2::new(2.5, 2.5 + i as f64 * 0.4);
        let dir = DVec2::new(1.0, (i as f64 * 0.01) - 0.3).normalize();
        rays.push((origin, dir, 200.0));
    }
    rays.push((DVec2::new(40.0, 40.0), DVec2::new(-1.0, 0.2).normalize(), 150.0));
    rays.push((DVec2::new(120.0, 10.0), DVec2::new(0.2, 1.0).normalize(), 150.0));
    rays
}

fn build_rays_positive_x() -> Vec<(DVec2, DVec2, f64)> {
    (0..64)
        .map(|i| {
            let origin = DVec2::new(0.1, 0.1 + i as f64 * 0.5);
            (origin, DVec2::new(1.0, 0.02).normalize(), 300.0)
        })
        .collect()
}

criterion_group!(benches, bench_raycast);
criterion_main!(benches);
