//! Recording graphics device
//!
//! A headless [`GraphicsDevice`] that performs no GPU work. It issues
//! handles from a counter, tracks which resources are alive and which
//! framebuffer is bound, and records every call as a [`GpuCall`] so tests and
//! tools can inspect exactly what a frame did.

use std::collections::HashSet;

use crate::foundation::math::Vec4;
use crate::render::api::{
    ClearFlags, Extent2d, FramebufferAttachment, FramebufferHandle, GraphicsDevice, MeshHandle, PrimitiveTopology,
    ProgramHandle, SamplerDescriptor, SamplerHandle, ShaderSource, TextureDescriptor, TextureHandle, UniformValue,
    VertexArrayHandle,
};
use crate::render::pipeline::PipelineState;
use crate::render::{RenderError, RenderResult};

/// One recorded device call
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum GpuCall {
    SetViewport { x: i32, y: i32, size: Extent2d },
    SetClearColor(Vec4),
    SetClearDepth(f32),
    SetColorMask([bool; 4]),
    SetDepthMask(bool),
    Clear(ClearFlags),
    ApplyPipelineState(PipelineState),
    CreateTexture { handle: TextureHandle, descriptor: TextureDescriptor, uploaded_bytes: usize },
    BindTexture { unit: u32, texture: TextureHandle },
    DeleteTexture(TextureHandle),
    CreateSampler { handle: SamplerHandle, descriptor: SamplerDescriptor },
    BindSampler { unit: u32, sampler: SamplerHandle },
    DeleteSampler(SamplerHandle),
    CreateFramebuffer(FramebufferHandle),
    AttachTexture { framebuffer: FramebufferHandle, attachment: FramebufferAttachment, texture: TextureHandle },
    BindFramebuffer(FramebufferHandle),
    DeleteFramebuffer(FramebufferHandle),
    CreateVertexArray(VertexArrayHandle),
    BindVertexArray(VertexArrayHandle),
    DeleteVertexArray(VertexArrayHandle),
    DrawArrays { topology: PrimitiveTopology, first: u32, count: u32 },
    CreateMesh { handle: MeshHandle, vertex_bytes: usize, stride: u32, index_count: usize },
    DrawMesh(MeshHandle),
    DeleteMesh(MeshHandle),
    CreateProgram { handle: ProgramHandle, sources: Vec<ShaderSource> },
    UseProgram(ProgramHandle),
    SetUniform { program: ProgramHandle, name: String, value: UniformValue },
    DeleteProgram(ProgramHandle),
}

impl GpuCall {
    /// Whether this call rasterises anything
    pub const fn is_draw(&self) -> bool {
        matches!(self, Self::DrawMesh(_) | Self::DrawArrays { .. })
    }
}

/// Headless device that records calls
#[derive(Debug)]
pub struct RecordingDevice {
    calls: Vec<GpuCall>,
    next_handle: u64,
    live: HashSet<u64>,
    bound_framebuffer: FramebufferHandle,
    current_program: Option<ProgramHandle>,
    fail_creation: bool,
}

impl RecordingDevice {
    /// Create a device with the default framebuffer bound
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            next_handle: 1,
            live: HashSet::new(),
            bound_framebuffer: FramebufferHandle::DEFAULT,
            current_program: None,
            fail_creation: false,
        }
    }

    /// Get the backend name
    pub const fn name(&self) -> &'static str {
        "Recording Device"
    }

    /// Make every subsequent `create_*` call fail
    pub fn set_fail_creation(&mut self, fail: bool) {
        self.fail_creation = fail;
    }

    /// Calls recorded so far
    pub fn calls(&self) -> &[GpuCall] {
        &self.calls
    }

    /// Forget recorded calls; resource and binding state is kept
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Framebuffer currently bound as the draw target
    pub const fn bound_framebuffer(&self) -> FramebufferHandle {
        self.bound_framebuffer
    }

    /// Program made current last
    pub const fn current_program(&self) -> Option<ProgramHandle> {
        self.current_program
    }

    /// Number of resources created and not yet deleted
    pub fn live_resource_count(&self) -> usize {
        self.live.len()
    }

    /// Number of recorded draw calls
    pub fn draw_count(&self) -> usize {
        self.calls.iter().filter(|call| call.is_draw()).count()
    }

    /// Every value written to uniform `name`, in call order
    pub fn uniform_writes(&self, name: &str) -> Vec<&UniformValue> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                GpuCall::SetUniform { name: written, value, .. } if written == name => Some(value),
                _ => None,
            })
            .collect()
    }

    /// Last value written to uniform `name`
    pub fn last_uniform(&self, name: &str) -> Option<&UniformValue> {
        self.calls.iter().rev().find_map(|call| match call {
            GpuCall::SetUniform { name: written, value, .. } if written == name => Some(value),
            _ => None,
        })
    }

    fn record(&mut self, call: GpuCall) {
        log::trace!("RecordingDevice: {call:?}");
        self.calls.push(call);
    }

    fn allocate(&mut self, kind: &str) -> RenderResult<u64> {
        if self.fail_creation {
            return Err(RenderError::ResourceCreationFailed(format!("{kind} creation disabled on recording device")));
        }
        let handle = self.next_handle;
        self.next_handle += 1;
        self.live.insert(handle);
        Ok(handle)
    }

    fn release(&mut self, kind: &str, handle: u64) {
        if !self.live.remove(&handle) {
            log::warn!("RecordingDevice: deleting unknown {kind} {handle}");
        }
    }
}

impl Default for RecordingDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphicsDevice for RecordingDevice {
    fn set_viewport(&mut self, x: i32, y: i32, size: Extent2d) {
        self.record(GpuCall::SetViewport { x, y, size });
    }

    fn set_clear_color(&mut self, color: Vec4) {
        self.record(GpuCall::SetClearColor(color));
    }

    fn set_clear_depth(&mut self, depth: f32) {
        self.record(GpuCall::SetClearDepth(depth));
    }

    fn set_color_mask(&mut self, mask: [bool; 4]) {
        self.record(GpuCall::SetColorMask(mask));
    }

    fn set_depth_mask(&mut self, enabled: bool) {
        self.record(GpuCall::SetDepthMask(enabled));
    }

    fn clear(&mut self, flags: ClearFlags) {
        self.record(GpuCall::Clear(flags));
    }

    fn apply_pipeline_state(&mut self, state: &PipelineState) {
        self.record(GpuCall::ApplyPipelineState(state.clone()));
    }

    fn create_texture(&mut self, descriptor: &TextureDescriptor, pixels: Option<&[u8]>) -> RenderResult<TextureHandle> {
        let handle = TextureHandle(self.allocate("texture")?);
        self.record(GpuCall::CreateTexture {
            handle,
            descriptor: *descriptor,
            uploaded_bytes: pixels.map_or(0, <[u8]>::len),
        });
        Ok(handle)
    }

    fn bind_texture(&mut self, unit: u32, texture: TextureHandle) {
        self.record(GpuCall::BindTexture { unit, texture });
    }

    fn delete_texture(&mut self, texture: TextureHandle) {
        self.release("texture", texture.0);
        self.record(GpuCall::DeleteTexture(texture));
    }

    fn create_sampler(&mut self, descriptor: &SamplerDescriptor) -> RenderResult<SamplerHandle> {
        let handle = SamplerHandle(self.allocate("sampler")?);
        self.record(GpuCall::CreateSampler {
            handle,
            descriptor: *descriptor,
        });
        Ok(handle)
    }

    fn bind_sampler(&mut self, unit: u32, sampler: SamplerHandle) {
        self.record(GpuCall::BindSampler { unit, sampler });
    }

    fn delete_sampler(&mut self, sampler: SamplerHandle) {
        self.release("sampler", sampler.0);
        self.record(GpuCall::DeleteSampler(sampler));
    }

    fn create_framebuffer(&mut self) -> RenderResult<FramebufferHandle> {
        let handle = FramebufferHandle(self.allocate("framebuffer")?);
        self.record(GpuCall::CreateFramebuffer(handle));
        Ok(handle)
    }

    fn attach_texture(&mut self, attachment: FramebufferAttachment, texture: TextureHandle) {
        if self.bound_framebuffer.is_default() {
            log::warn!("RecordingDevice: attaching {texture:?} to the default framebuffer");
        }
        let framebuffer = self.bound_framebuffer;
        self.record(GpuCall::AttachTexture {
            framebuffer,
            attachment,
            texture,
        });
    }

    fn bind_framebuffer(&mut self, framebuffer: FramebufferHandle) {
        self.bound_framebuffer = framebuffer;
        self.record(GpuCall::BindFramebuffer(framebuffer));
    }

    fn delete_framebuffer(&mut self, framebuffer: FramebufferHandle) {
        self.release("framebuffer", framebuffer.0);
        if self.bound_framebuffer == framebuffer {
            self.bound_framebuffer = FramebufferHandle::DEFAULT;
        }
        self.record(GpuCall::DeleteFramebuffer(framebuffer));
    }

    fn create_vertex_array(&mut self) -> RenderResult<VertexArrayHandle> {
        let handle = VertexArrayHandle(self.allocate("vertex array")?);
        self.record(GpuCall::CreateVertexArray(handle));
        Ok(handle)
    }

    fn bind_vertex_array(&mut self, vertex_array: VertexArrayHandle) {
        self.record(GpuCall::BindVertexArray(vertex_array));
    }

    fn delete_vertex_array(&mut self, vertex_array: VertexArrayHandle) {
        self.release("vertex array", vertex_array.0);
        self.record(GpuCall::DeleteVertexArray(vertex_array));
    }

    fn draw_arrays(&mut self, topology: PrimitiveTopology, first: u32, count: u32) {
        self.record(GpuCall::DrawArrays { topology, first, count });
    }

    fn create_mesh(&mut self, vertices: &[u8], stride: u32, indices: &[u32]) -> RenderResult<MeshHandle> {
        let handle = MeshHandle(self.allocate("mesh")?);
        self.record(GpuCall::CreateMesh {
            handle,
            vertex_bytes: vertices.len(),
            stride,
            index_count: indices.len(),
        });
        Ok(handle)
    }

    fn draw_mesh(&mut self, mesh: MeshHandle) {
        self.record(GpuCall::DrawMesh(mesh));
    }

    fn delete_mesh(&mut self, mesh: MeshHandle) {
        self.release("mesh", mesh.0);
        self.record(GpuCall::DeleteMesh(mesh));
    }

    fn create_program(&mut self, sources: &[ShaderSource]) -> RenderResult<ProgramHandle> {
        if sources.is_empty() {
            return Err(RenderError::ShaderCompilationFailed("program has no shader stages".to_string()));
        }
        let handle = ProgramHandle(self.allocate("program")?);
        self.record(GpuCall::CreateProgram {
            handle,
            sources: sources.to_vec(),
        });
        Ok(handle)
    }

    fn use_program(&mut self, program: ProgramHandle) {
        self.current_program = Some(program);
        self.record(GpuCall::UseProgram(program));
    }

    fn set_uniform(&mut self, program: ProgramHandle, name: &str, value: UniformValue) {
        self.record(GpuCall::SetUniform {
            program,
            name: name.to_owned(),
            value,
        });
    }

    fn delete_program(&mut self, program: ProgramHandle) {
        self.release("program", program.0);
        if self.current_program == Some(program) {
            self.current_program = None;
        }
        self.record(GpuCall::DeleteProgram(program));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::api::TextureFormat;

    #[test]
    fn test_handles_are_unique_and_nonzero() {
        let mut device = RecordingDevice::new();
        let a = device.create_framebuffer().unwrap();
        let b = device.create_vertex_array().unwrap();
        assert!(!a.is_default());
        assert_ne!(a.0, b.0);
        assert_eq!(device.live_resource_count(), 2);
    }

    #[test]
    fn test_tracks_bound_framebuffer() {
        let mut device = RecordingDevice::new();
        let fb = device.create_framebuffer().unwrap();
        device.bind_framebuffer(fb);
        assert_eq!(device.bound_framebuffer(), fb);
        device.delete_framebuffer(fb);
        assert_eq!(device.bound_framebuffer(), FramebufferHandle::DEFAULT);
        assert_eq!(device.live_resource_count(), 0);
    }

    #[test]
    fn test_attachment_targets_bound_framebuffer() {
        let mut device = RecordingDevice::new();
        let fb = device.create_framebuffer().unwrap();
        let texture = device
            .create_texture(
                &TextureDescriptor {
                    format: TextureFormat::Rgba8,
                    size: Extent2d::new(4, 4),
                    mipmaps: false,
                },
                None,
            )
            .unwrap();
        device.bind_framebuffer(fb);
        device.attach_texture(FramebufferAttachment::Color(0), texture);

        assert_eq!(
            device.calls().last(),
            Some(&GpuCall::AttachTexture {
                framebuffer: fb,
                attachment: FramebufferAttachment::Color(0),
                texture,
            })
        );
    }

    #[test]
    fn test_failing_creation() {
        let mut device = RecordingDevice::new();
        device.set_fail_creation(true);
        assert!(matches!(device.create_framebuffer(), Err(RenderError::ResourceCreationFailed(_))));
        assert!(device.calls().is_empty());
        assert_eq!(device.live_resource_count(), 0);
    }

    #[test]
    fn test_uniform_queries() {
        let mut device = RecordingDevice::new();
        let program = device.create_program(&[ShaderSource::vertex("a.vert")]).unwrap();
        device.set_uniform(program, "tint", UniformValue::Float(1.0));
        device.set_uniform(program, "tint", UniformValue::Float(2.0));
        device.set_uniform(program, "other", UniformValue::Int(0));

        assert_eq!(device.uniform_writes("tint").len(), 2);
        assert_eq!(device.last_uniform("tint"), Some(&UniformValue::Float(2.0)));
        assert_eq!(device.last_uniform("missing"), None);
    }

    #[test]
    fn test_program_without_stages_fails_to_link() {
        let mut device = RecordingDevice::new();
        assert!(matches!(device.create_program(&[]), Err(RenderError::ShaderCompilationFailed(_))));
        assert!(device.calls().is_empty());
        assert_eq!(device.live_resource_count(), 0);
    }
}
