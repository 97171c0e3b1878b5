use std::path::{Path, PathBuf};

use glam::DVec3;
use image::{DynamicImage, GrayImage};
use serde::Deserialize;
use tracing::debug;

use crate::grid::GrayMap;
use crate::types::{DEFAULT_ORIGIN, DEFAULT_RESOLUTION, EditorError, MapInfo};

/// Subset of a ROS map YAML file that placement depends on.
///
/// Thresholds, `negate` and `mode` are accepted but not interpreted: the map
/// is displayed as stored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MapMetadata {
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "default_resolution")]
    pub resolution: f64,
    #[serde(default = "default_origin", deserialize_with = "deserialize_origin")]
    pub origin: [f64; 3],
}

impl MapMetadata {
    pub fn map_info(&self, width: u32, height: u32) -> MapInfo {
        MapInfo {
            width,
            height,
            resolution: self.resolution,
            origin: DVec3::from_array(self.origin),
        }
    }
}

fn default_resolution() -> f64 {
    DEFAULT_RESOLUTION
}

fn default_origin() -> [f64; 3] {
    DEFAULT_ORIGIN
}

/// Accepts `[x, y]` or `[x, y, yaw]`.
fn deserialize_origin<'de, D>(deserializer: D) -> Result<[f64; 3], D::Error>
where
    D: serde::Deserializer<'de>,
{
    let values = Vec::<f64>::deserialize(deserializer)?;
    match values.as_slice() {
        [x, y] => Ok([*x, *y, 0.0]),
        [x, y, yaw] => Ok([*x, *y, *yaw]),
        _ => Err(serde::de::Error::custom(
            "origin must have two or three elements",
        )),
    }
}

pub fn parse_map_metadata(yaml: &str) -> Result<MapMetadata, EditorError> {
    let metadata: MapMetadata = serde_yaml::from_str(yaml)?;

    if !metadata.resolution.is_finite() || metadata.resolution <= 0.0 {
        return Err(EditorError::InvalidMetadata(format!(
            "resolution must be positive, got {}",
            metadata.resolution
        )));
    }
    if metadata.origin.iter().any(|v| !v.is_finite()) {
        return Err(EditorError::InvalidMetadata(
            "origin must be finite".to_string(),
        ));
    }

    Ok(metadata)
}

/// Decode an image (PGM or any other supported format) as 8-bit grayscale.
pub fn decode_map_image(bytes: &[u8]) -> Result<GrayImage, EditorError> {
    let image = image::load_from_memory(bytes)?;
    Ok(into_gray(image))
}

fn into_gray(image: DynamicImage) -> GrayImage {
    match image {
        DynamicImage::ImageLuma8(gray) => gray,
        other => other.to_luma8(),
    }
}

pub fn load_map_from_bytes(image_bytes: &[u8], yaml: &str) -> Result<GrayMap, EditorError> {
    let metadata = parse_map_metadata(yaml)?;
    let image = decode_map_image(image_bytes)?;
    let info = metadata.map_info(image.width(), image.height());
    debug!(
        width = info.width,
        height = info.height,
        resolution = info.resolution,
        "decoded map image"
    );
    GrayMap::new(info, image)
}

/// Load a map from an explicit image file and metadata file. The metadata's
/// `image` key is ignored.
pub fn load_map_files(
    image_path: impl AsRef<Path>,
    yaml_path: impl AsRef<Path>,
) -> Result<GrayMap, EditorError> {
    let yaml_str = read_metadata_file(yaml_path.as_ref())?;
    let image_bytes = std::fs::read(image_path)?;
    load_map_from_bytes(&image_bytes, &yaml_str)
}

/// Load a map from its YAML file, resolving the `image` key relative to it.
pub fn load_map(yaml_path: impl AsRef<Path>) -> Result<GrayMap, EditorError> {
    let yaml_path = yaml_path.as_ref();
    let yaml_str = read_metadata_file(yaml_path)?;
    let metadata = parse_map_metadata(&yaml_str)?;

    let image_ref = metadata.image.as_deref().ok_or_else(|| {
        EditorError::InvalidMetadata(format!("{} has no image key", yaml_path.display()))
    })?;
    let image_path = resolve_image_path(yaml_path, image_ref);
    let image = into_gray(image::open(&image_path)?);
    let info = metadata.map_info(image.width(), image.height());

    GrayMap::new(info, image)
}

/// Metadata that is not UTF-8 is malformed input, not an I/O failure.
fn read_metadata_file(yaml_path: &Path) -> Result<String, EditorError> {
    let bytes = std::fs::read(yaml_path)?;
    String::from_utf8(bytes)
        .map_err(|e| EditorError::InvalidMetadata(format!("map metadata is not valid UTF-8: {e}")))
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
