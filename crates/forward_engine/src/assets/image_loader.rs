//! Image loading utilities for texture data
//!
//! Images are decoded with the `image` crate, converted to RGBA8 and flipped
//! so the first row in memory is the bottom row, which is what the texture
//! coordinate convention of the renderer expects.

use std::path::Path;

use crate::assets::AssetError;
use crate::render::api::{Extent2d, GraphicsDevice};
use crate::render::resources::Texture2D;
use crate::render::RenderResult;

/// Loaded image data ready for GPU upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Raw RGBA pixel data, bottom row first
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageData {
    /// Load an image from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path_ref = path.as_ref();
        if !path_ref.exists() {
            return Err(AssetError::NotFound(path_ref.display().to_string()));
        }

        log::debug!("Loading image from: {:?}", path_ref);

        let bytes = std::fs::read(path_ref)?;
        let img = image::load_from_memory(&bytes)
            .map_err(|e| AssetError::LoadFailed(format!("Failed to load image {}: {e}", path_ref.display())))?;
        let image = Self::from_dynamic(&img);

        log::info!("Loaded image {}x{} from {:?}", image.width, image.height, path_ref);
        Ok(image)
    }

    /// Load image from memory (useful for embedded resources)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| AssetError::LoadFailed(format!("Failed to load image from bytes: {e}")))?;
        let image = Self::from_dynamic(&img);

        log::debug!("Loaded image {}x{} from memory", image.width, image.height);
        Ok(image)
    }

    fn from_dynamic(img: &image::DynamicImage) -> Self {
        let rgba_img = img.flipv().to_rgba8();
        let (width, height) = rgba_img.dimensions();
        Self {
            data: rgba_img.into_raw(),
            width,
            height,
        }
    }

    /// Create a solid color image (useful for testing and defaults)
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixel_count = width as usize * height as usize;
        Self {
            data: color.repeat(pixel_count),
            width,
            height,
        }
    }

    /// Image size in pixels
    pub const fn extent(&self) -> Extent2d {
        Extent2d::new(self.width, self.height)
    }

    /// Upload as an RGBA8 texture
    pub fn upload(&self, device: &mut dyn GraphicsDevice, mipmaps: bool) -> RenderResult<Texture2D> {
        Texture2D::from_rgba8(device, self.extent(), &self.data, mipmaps)
    }
}

/// Decode an image file and upload it as a texture
pub fn load_texture(device: &mut dyn GraphicsDevice, path: impl AsRef<Path>, mipmaps: bool) -> RenderResult<Texture2D> {
    let image = ImageData::from_file(path)?;
    image.upload(device, mipmaps)
}
