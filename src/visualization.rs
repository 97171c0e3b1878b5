use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use glam::DVec2;
use image::{ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};
use serde::Deserialize;

use crate::grid::GrayMap;
use crate::types::{EditorError, Waypoint};

/// Colors and marker sizes for the waypoint overlay.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    pub path_color: [u8; 4],
    pub start_color: [u8; 4],
    pub end_color: [u8; 4],
    /// Radius of the dot drawn on every waypoint, in pixels. Zero disables it.
    pub marker_radius: i32,
    /// Radius of the start and end markers, in pixels.
    pub endpoint_radius: i32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            path_color: [0, 0, 255, 255],
            start_color: [0, 128, 0, 255],
            end_color: [255, 0, 0, 255],
            marker_radius: 1,
            endpoint_radius: 2,
        }
    }
}

/// Draw the waypoint path on top of the map.
///
/// The output has the map's dimensions and orientation. Waypoints are placed
/// with [`MapInfo::world_to_image`](crate::MapInfo::world_to_image), so the
/// world origin lands on the bottom-left corner. Geometry that falls off the
/// image is clipped.
pub fn render_waypoints(map: &GrayMap, waypoints: &[Waypoint], style: &RenderStyle) -> RgbaImage {
    let gray = map.image();
    let mut canvas = RgbaImage::from_fn(gray.width(), gray.height(), |x, y| {
        let v = gray.get_pixel(x, y).0[0];
        Rgba([v, v, v, 255])
    });

    let info = map.info();
    let points: Vec<Option<DVec2>> = waypoints
        .iter()
        .map(|wp| wp.is_finite().then(|| info.world_to_image(wp.position())))
        .collect();

    let bounds = (
        DVec2::splat(-1.0),
        DVec2::new(canvas.width() as f64 + 1.0, canvas.height() as f64 + 1.0),
    );
    let path_color = Rgba(style.path_color);
    for pair in points.windows(2) {
        if let [Some(a), Some(b)] = pair {
            if let Some((a, b)) = clip_segment(*a, *b, bounds) {
                draw_line_segment_mut(&mut canvas, to_canvas(a), to_canvas(b), path_color);
            }
        }
    }

    if style.marker_radius > 0 {
        for p in points.iter().flatten() {
            draw_marker(&mut canvas, *p, style.marker_radius, path_color);
        }
    }

    if let Some(Some(start)) = points.first() {
        draw_marker(&mut canvas, *start, style.endpoint_radius, Rgba(style.start_color));
    }
    if let Some(Some(end)) = points.last() {
        draw_marker(&mut canvas, *end, style.endpoint_radius, Rgba(style.end_color));
    }

    canvas
}

fn to_canvas(px: DVec2) -> (f32, f32) {
    (px.x as f32, px.y as f32)
}

/// Liang-Barsky clip of the segment `a`-`b` against an axis-aligned box.
fn clip_segment(a: DVec2, b: DVec2, (min, max): (DVec2, DVec2)) -> Option<(DVec2, DVec2)> {
    let d = b - a;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    for (p, q) in [
        (-d.x, a.x - min.x),
        (d.x, max.x - a.x),
        (-d.y, a.y - min.y),
        (d.y, max.y - a.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
        if t0 > t1 {
            return None;
        }
    }

    Some((a + d * t0, a + d * t1))
}

fn draw_marker(canvas: &mut RgbaImage, center: DVec2, radius: i32, color: Rgba<u8>) {
    // Far off-image points would overflow the integer center.
    let limit = canvas.width().max(canvas.height()) as f64 + radius as f64 + 1.0;
    if center.x.abs() > limit || center.y.abs() > limit {
        return;
    }
    let center = (center.x.floor() as i32, center.y.floor() as i32);
    draw_filled_circle_mut(canvas, center, radius, color);
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, EditorError> {
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}

pub fn encode_png_base64(image: &RgbaImage) -> Result<String, EditorError> {
    Ok(STANDARD.encode(encode_png(image)?))
}
