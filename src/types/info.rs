//! Map metadata and the world/pixel transforms built on it.

use glam::{DVec2, DVec3};
use serde::Serialize;

use crate::types::{DEFAULT_ORIGIN, DEFAULT_RESOLUTION};

#[derive(Debug, Clone, PartialEq)]
pub struct MapInfo {
    pub width: u32,
    pub height: u32,
    /// Meters per pixel.
    pub resolution: f64,
    /// World pose (x, y, yaw) of the image's lower-left corner.
    pub origin: DVec3,
}

impl Default for MapInfo {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            resolution: DEFAULT_RESOLUTION,
            origin: DVec3::from_array(DEFAULT_ORIGIN),
        }
    }
}

impl MapInfo {
    /// Width of the map in world units (meters).
    #[inline]
    pub fn world_width(&self) -> f64 {
        self.width as f64 * self.resolution
    }

    /// Height of the map in world units (meters).
    #[inline]
    pub fn world_height(&self) -> f64 {
        self.height as f64 * self.resolution
    }

    /// World point to continuous map coordinates, y up with (0, 0) at the
    /// lower-left corner of the image. No bounds checking.
    #[inline]
    pub fn world_to_map(&self, world: DVec2) -> DVec2 {
        (world - self.origin.truncate()) / self.resolution
    }

    #[inline]
    pub fn map_to_world(&self, map: DVec2) -> DVec2 {
        map * self.resolution + self.origin.truncate()
    }

    /// World point to image coordinates, y down with (0, 0) at the top-left.
    #[inline]
    pub fn world_to_image(&self, world: DVec2) -> DVec2 {
        let map = self.world_to_map(world);
        DVec2::new(map.x, self.height as f64 - map.y)
    }

    #[inline]
    pub fn image_to_world(&self, image: DVec2) -> DVec2 {
        self.map_to_world(DVec2::new(image.x, self.height as f64 - image.y))
    }

    /// Returns true if the world point lands on the image.
    pub fn contains_world(&self, world: DVec2) -> bool {
        let map = self.world_to_map(world);
        map.x >= 0.0 && map.y >= 0.0 && map.x < self.width as f64 && map.y < self.height as f64
    }

    /// Metadata handed to the browser editor.
    pub fn client_metadata(&self) -> ClientMetadata {
        ClientMetadata {
            resolution: self.resolution,
            origin: self.origin.to_array(),
            width: self.width,
            height: self.height,
        }
    }
}

/// JSON shape consumed by the editor script.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientMetadata {
    pub resolution: f64,
    pub origin: [f64; 3],
    pub width: u32,
    pub height: u32,
}
