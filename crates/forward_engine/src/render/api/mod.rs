//! Graphics device API
//!
//! The seam between the renderer and whatever executes GPU work.

mod device;
mod types;

pub use device::GraphicsDevice;
pub use types::{
    ClearFlags, Extent2d, FilterMode, FramebufferAttachment, FramebufferHandle, MeshHandle, PrimitiveTopology,
    ProgramHandle, SamplerDescriptor, SamplerHandle, ShaderSource, ShaderStage, TextureDescriptor, TextureFormat,
    TextureHandle, UniformValue, VertexArrayHandle, WrapMode,
};
