use criterion::{Criterion, criterion_group, criterion_main};
use glam::DVec3;
use image::{GrayImage, Luma};

use wpgm_editor::visualization::encode_png;
use wpgm_editor::{GrayMap, MapInfo, RenderStyle, Waypoint, render_waypoints};

fn warehouse_map() -> GrayMap {
    let info = MapInfo {
        width: 2000,
        height: 1500,
        resolution: 0.05,
        origin: DVec3::new(-50.0, -37.5, 0.0),
    };
    let image = GrayImage::from_fn(info.width, info.height, |x, y| {
        if x % 100 < 3 || y % 100 < 3 {
            Luma([0])
        } else {
            Luma([254])
        }
    });
    GrayMap::new(info, image).expect("map should build")
}

fn spiral(n: usize) -> Vec<Waypoint> {
    (0..n)
        .map(|i| {
            let t = i as f64 * 0.01;
            let r = 1.0 + t;
            Waypoint::new(r * t.cos(), r * t.sin(), t, 1.0 / r)
        })
        .collect()
}

fn bench_render(c: &mut Criterion) {
    let map = warehouse_map();
    let waypoints = spiral(5_000);
    let style = RenderStyle::default();

    c.bench_function("render_waypoints_2000x1500", |b| {
        b.iter(|| render_waypoints(&map, &waypoints, &style));
    });

    let rendered = render_waypoints(&map, &waypoints, &style);
    c.bench_function("encode_png_2000x1500", |b| {
        b.iter(|| encode_png(&rendered).expect("png should encode"));
    });
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
