//! Graphics device abstraction
//!
//! [`GraphicsDevice`] is the immediate-mode GPU contract the forward renderer
//! drives. It mirrors a classic bind-then-draw API: state setters, resource
//! factories returning opaque handles, binds, and draws. Creation can fail;
//! binds, state changes and draws cannot, matching how the renderer treats
//! the driver as infallible once resources exist.
//!
//! Implementations own the GPU objects behind the handles. A handle passed to
//! a `delete_*` call is dead afterwards.

use super::types::{
    ClearFlags, Extent2d, FramebufferAttachment, FramebufferHandle, MeshHandle, PrimitiveTopology, ProgramHandle,
    SamplerDescriptor, SamplerHandle, ShaderSource, TextureDescriptor, TextureHandle, UniformValue, VertexArrayHandle,
};
use crate::foundation::math::Vec4;
use crate::render::pipeline::PipelineState;
use crate::render::RenderResult;

/// Immediate-mode graphics device
pub trait GraphicsDevice {
    // === State ===

    /// Set the viewport rectangle
    fn set_viewport(&mut self, x: i32, y: i32, size: Extent2d);

    /// Set the colour used by [`clear`](Self::clear)
    fn set_clear_color(&mut self, color: Vec4);

    /// Set the depth used by [`clear`](Self::clear)
    fn set_clear_depth(&mut self, depth: f32);

    /// Enable or disable writes per colour channel
    fn set_color_mask(&mut self, mask: [bool; 4]);

    /// Enable or disable depth writes
    fn set_depth_mask(&mut self, enabled: bool);

    /// Clear buffers of the bound framebuffer
    fn clear(&mut self, flags: ClearFlags);

    /// Apply culling, depth, blending and mask state in one go
    fn apply_pipeline_state(&mut self, state: &PipelineState);

    // === Textures and samplers ===

    /// Create a 2D texture, optionally uploading tightly packed pixels
    fn create_texture(&mut self, descriptor: &TextureDescriptor, pixels: Option<&[u8]>) -> RenderResult<TextureHandle>;

    /// Bind a texture to a texture unit
    fn bind_texture(&mut self, unit: u32, texture: TextureHandle);

    /// Delete a texture
    fn delete_texture(&mut self, texture: TextureHandle);

    /// Create a sampler object
    fn create_sampler(&mut self, descriptor: &SamplerDescriptor) -> RenderResult<SamplerHandle>;

    /// Bind a sampler object to a texture unit
    fn bind_sampler(&mut self, unit: u32, sampler: SamplerHandle);

    /// Delete a sampler object
    fn delete_sampler(&mut self, sampler: SamplerHandle);

    // === Framebuffers ===

    /// Create an empty framebuffer
    fn create_framebuffer(&mut self) -> RenderResult<FramebufferHandle>;

    /// Attach a texture to the currently bound framebuffer
    fn attach_texture(&mut self, attachment: FramebufferAttachment, texture: TextureHandle);

    /// Bind a framebuffer as the draw target; [`FramebufferHandle::DEFAULT`]
    /// selects the window
    fn bind_framebuffer(&mut self, framebuffer: FramebufferHandle);

    /// Delete a framebuffer
    fn delete_framebuffer(&mut self, framebuffer: FramebufferHandle);

    // === Geometry ===

    /// Create a vertex array with no attributes
    fn create_vertex_array(&mut self) -> RenderResult<VertexArrayHandle>;

    /// Bind a vertex array
    fn bind_vertex_array(&mut self, vertex_array: VertexArrayHandle);

    /// Delete a vertex array
    fn delete_vertex_array(&mut self, vertex_array: VertexArrayHandle);

    /// Draw `count` vertices from the bound vertex array without indices
    fn draw_arrays(&mut self, topology: PrimitiveTopology, first: u32, count: u32);

    /// Upload interleaved vertex bytes and a triangle index list
    fn create_mesh(&mut self, vertices: &[u8], stride: u32, indices: &[u32]) -> RenderResult<MeshHandle>;

    /// Draw an uploaded mesh with the current program
    fn draw_mesh(&mut self, mesh: MeshHandle);

    /// Delete uploaded mesh geometry
    fn delete_mesh(&mut self, mesh: MeshHandle);

    // === Programs ===

    /// Compile and link a program from per-stage sources
    fn create_program(&mut self, sources: &[ShaderSource]) -> RenderResult<ProgramHandle>;

    /// Make a program current
    fn use_program(&mut self, program: ProgramHandle);

    /// Assign a uniform of `program` by name
    ///
    /// Names follow GLSL paths, including struct fields and array indices
    /// such as `spotLights[2].decay`. Unknown names are ignored.
    fn set_uniform(&mut self, program: ProgramHandle, name: &str, value: UniformValue);

    /// Delete a program
    fn delete_program(&mut self, program: ProgramHandle);
}
