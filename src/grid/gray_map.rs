use image::GrayImage;

use crate::types::{EditorError, MapInfo};

/// Grayscale occupancy-grid image together with its placement in the world.
///
/// Pixels are kept in the order the image file stores them: row 0 is the top
/// of the image, which is the highest y in world coordinates.
#[derive(Debug, Clone)]
pub struct GrayMap {
    info: MapInfo,
    image: GrayImage,
}

impl GrayMap {
    pub fn new(info: MapInfo, image: GrayImage) -> Result<Self, EditorError> {
        if image.width() != info.width || image.height() != info.height {
            return Err(EditorError::InvalidMetadata(format!(
                "image size {}x{} does not match map size {}x{}",
                image.width(),
                image.height(),
                info.width,
                info.height
            )));
        }

        Ok(Self { info, image })
    }

    pub fn info(&self) -> &MapInfo {
        &self.info
    }

    pub fn image(&self) -> &GrayImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.info.width
    }

    pub fn height(&self) -> u32 {
        self.info.height
    }
}
