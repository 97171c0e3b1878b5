use std::fs;

use approx::assert_relative_eq;
use glam::DVec2;
use wpgm_editor::loaders::waypoints::load_waypoints_lenient;
use wpgm_editor::{EditorError, RenderStyle, load_map, load_map_files, load_waypoints, render_waypoints};

fn pgm(width: u32, height: u32, pixels: &[u8]) -> Vec<u8> {
    let mut bytes = format!("P5\n{width} {height}\n255\n").into_bytes();
    bytes.extend_from_slice(pixels);
    bytes
}

#[test]
fn loads_map_through_yaml_image_key() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("simple.pgm"), pgm(2, 2, &[0, 254, 205, 254])).unwrap();
    fs::write(
        dir.path().join("simple.yaml"),
        "image: simple.pgm\nresolution: 0.5\norigin: [-1.0, -1.0, 0.0]\nnegate: 0\n",
    )
    .unwrap();

    let map = load_map(dir.path().join("simple.yaml")).expect("map should load");

    assert_eq!(map.width(), 2);
    assert_eq!(map.height(), 2);
    assert_relative_eq!(map.info().resolution, 0.5);
    assert_eq!(map.image().get_pixel(0, 0).0[0], 0);
    assert_eq!(map.image().get_pixel(0, 1).0[0], 205);

    // Lower-left corner of the image sits at the origin.
    let corner = map.info().world_to_image(DVec2::new(-1.0, -1.0));
    assert_relative_eq!(corner.x, 0.0);
    assert_relative_eq!(corner.y, 2.0);
}

#[test]
fn explicit_image_path_wins_over_yaml_key() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("upload.pgm");
    let yaml = dir.path().join("upload.yaml");
    fs::write(&image, pgm(3, 1, &[1, 2, 3])).unwrap();
    fs::write(&yaml, "image: somewhere_else.pgm\nresolution: 0.1\n").unwrap();

    let map = load_map_files(&image, &yaml).unwrap();
    assert_eq!((map.width(), map.height()), (3, 1));
    assert_eq!(map.info().origin.to_array(), [0.0, 0.0, 0.0]);
}

#[test]
fn missing_image_key_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let yaml = dir.path().join("no_image.yaml");
    fs::write(&yaml, "resolution: 0.1\n").unwrap();

    assert!(matches!(load_map(&yaml), Err(EditorError::InvalidMetadata(_))));
}

#[test]
fn renders_loaded_waypoints_at_map_size() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("map.pgm");
    let yaml = dir.path().join("map.yaml");
    let csv = dir.path().join("route.csv");
    fs::write(&image, pgm(10, 10, &[254; 100])).unwrap();
    fs::write(&yaml, "resolution: 1.0\norigin: [0.0, 0.0, 0.0]\n").unwrap();
    fs::write(
        &csv,
        "time,x,y,theta,curvature\n0,1.0,1.0,0,0\n1,8.0,1.0,0,0\n2,8.0,8.0,1.57,0.1\n",
    )
    .unwrap();

    let map = load_map_files(&image, &yaml).unwrap();
    let waypoints = load_waypoints(&csv).unwrap();
    assert_eq!(waypoints.len(), 3);
    assert_eq!(load_waypoints_lenient(&csv), waypoints);

    let style = RenderStyle::default();
    let rendered = render_waypoints(&map, &waypoints, &style);
    assert_eq!(rendered.dimensions(), (10, 10));
    // Start (1, 1) is on image row 9, end (8, 8) on image row 2.
    assert_eq!(rendered.get_pixel(1, 9).0, style.start_color);
    assert_eq!(rendered.get_pixel(8, 2).0, style.end_color);
    // Far corner untouched.
    assert_eq!(rendered.get_pixel(0, 0).0, [254, 254, 254, 255]);
}
