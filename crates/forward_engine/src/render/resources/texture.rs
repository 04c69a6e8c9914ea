//! Textures and samplers

use crate::render::api::{
    Extent2d, GraphicsDevice, SamplerDescriptor, SamplerHandle, TextureDescriptor, TextureFormat, TextureHandle,
};
use crate::render::{RenderError, RenderResult};

/// A 2D texture living on a graphics device
#[derive(Debug, PartialEq, Eq)]
pub struct Texture2D {
    handle: TextureHandle,
    descriptor: TextureDescriptor,
}

impl Texture2D {
    /// Allocate uninitialised storage, e.g. for a render target
    pub fn empty(device: &mut dyn GraphicsDevice, format: TextureFormat, size: Extent2d) -> RenderResult<Self> {
        let descriptor = TextureDescriptor {
            format,
            size,
            mipmaps: false,
        };
        let handle = device.create_texture(&descriptor, None)?;
        Ok(Self { handle, descriptor })
    }

    /// Upload tightly packed RGBA8 pixels, bottom row first
    pub fn from_rgba8(device: &mut dyn GraphicsDevice, size: Extent2d, pixels: &[u8], mipmaps: bool) -> RenderResult<Self> {
        let expected = size.width as usize * size.height as usize * TextureFormat::Rgba8.bytes_per_pixel();
        if pixels.len() != expected {
            return Err(RenderError::ResourceCreationFailed(format!(
                "expected {expected} bytes for a {}x{} RGBA8 texture, got {}",
                size.width,
                size.height,
                pixels.len()
            )));
        }
        let descriptor = TextureDescriptor {
            format: TextureFormat::Rgba8,
            size,
            mipmaps,
        };
        let handle = device.create_texture(&descriptor, Some(pixels))?;
        Ok(Self { handle, descriptor })
    }

    /// Device handle
    pub const fn handle(&self) -> TextureHandle {
        self.handle
    }

    /// Format, size and mip setting
    pub const fn descriptor(&self) -> &TextureDescriptor {
        &self.descriptor
    }

    /// Release the device texture
    pub fn destroy(self, device: &mut dyn GraphicsDevice) {
        device.delete_texture(self.handle);
    }
}

/// A sampler object living on a graphics device
#[derive(Debug, PartialEq, Eq)]
pub struct Sampler {
    handle: SamplerHandle,
    descriptor: SamplerDescriptor,
}

impl Sampler {
    /// Create a sampler
    pub fn new(device: &mut dyn GraphicsDevice, descriptor: SamplerDescriptor) -> RenderResult<Self> {
        let handle = device.create_sampler(&descriptor)?;
        Ok(Self { handle, descriptor })
    }

    /// Device handle
    pub const fn handle(&self) -> SamplerHandle {
        self.handle
    }

    /// Filtering and wrapping parameters
    pub const fn descriptor(&self) -> &SamplerDescriptor {
        &self.descriptor
    }

    /// Release the device sampler
    pub fn destroy(self, device: &mut dyn GraphicsDevice) {
        device.delete_sampler(self.handle);
    }
}
