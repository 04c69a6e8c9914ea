//! Post-process stage
//!
//! When enabled, the frame renders into an offscreen framebuffer with a
//! window-sized RGBA8 colour target and DEPTH24 depth target. Afterwards the
//! default framebuffer is rebound and a single full-screen triangle runs the
//! configured fragment shader over the colour target. The triangle's
//! vertices are generated in the vertex shader, so the draw uses an empty
//! vertex array.

use std::path::Path;

use crate::config::RendererConfig;
use crate::render::api::{
    Extent2d, FramebufferAttachment, FramebufferHandle, GraphicsDevice, PrimitiveTopology, SamplerDescriptor,
    ShaderSource, TextureFormat, VertexArrayHandle,
};
use crate::render::pipeline::PipelineState;
use crate::render::resources::{Material, Sampler, ShaderProgram, Texture2D, TextureBinding};
use crate::render::RenderResult;

/// Offscreen targets and the full-screen pass that resolves them
#[derive(Debug)]
pub struct PostProcessStage {
    framebuffer: FramebufferHandle,
    vertex_array: VertexArrayHandle,
    color_target: Texture2D,
    depth_target: Texture2D,
    sampler: Sampler,
    shader: ShaderProgram,
    material: Material,
}

impl PostProcessStage {
    /// Create the offscreen targets and the full-screen program
    ///
    /// The default framebuffer is bound on return.
    pub fn create(
        device: &mut dyn GraphicsDevice,
        size: Extent2d,
        config: &RendererConfig,
        fragment_shader: &Path,
    ) -> RenderResult<Self> {
        let framebuffer = device.create_framebuffer()?;
        device.bind_framebuffer(framebuffer);

        let color_target = Texture2D::empty(device, TextureFormat::Rgba8, size)?;
        let depth_target = Texture2D::empty(device, TextureFormat::Depth24, size)?;
        device.attach_texture(FramebufferAttachment::Color(0), color_target.handle());
        device.attach_texture(FramebufferAttachment::Depth, depth_target.handle());

        device.bind_framebuffer(FramebufferHandle::DEFAULT);

        let vertex_array = device.create_vertex_array()?;
        let sampler = Sampler::new(device, SamplerDescriptor::linear_clamped())?;
        let shader = ShaderProgram::link(
            device,
            "postprocess",
            &[
                ShaderSource::vertex(&config.fullscreen_vertex_shader),
                ShaderSource::fragment(fragment_shader),
            ],
        )?;
        let material = Material::textured(shader.clone(), TextureBinding::new(&color_target, &sampler))
            .with_pipeline_state(PipelineState::new().with_depth_mask(false));

        log::debug!(
            "Created post-process targets {}x{} for {:?}",
            size.width,
            size.height,
            fragment_shader
        );

        Ok(Self {
            framebuffer,
            vertex_array,
            color_target,
            depth_target,
            sampler,
            shader,
            material,
        })
    }

    /// Offscreen framebuffer
    pub const fn framebuffer(&self) -> FramebufferHandle {
        self.framebuffer
    }

    /// Colour target sampled by the full-screen pass
    pub const fn color_target(&self) -> &Texture2D {
        &self.color_target
    }

    /// Material of the full-screen pass
    pub const fn material(&self) -> &Material {
        &self.material
    }

    /// Redirect subsequent draws into the offscreen targets
    pub fn bind_as_target(&self, device: &mut dyn GraphicsDevice) {
        device.bind_framebuffer(self.framebuffer);
    }

    /// Resolve the offscreen colour target into the default framebuffer
    pub fn apply(&self, device: &mut dyn GraphicsDevice) {
        device.bind_framebuffer(FramebufferHandle::DEFAULT);
        self.material.setup(device);
        device.bind_vertex_array(self.vertex_array);
        device.draw_arrays(PrimitiveTopology::Triangles, 0, 3);
    }

    /// Release the targets, vertex array, sampler and program
    pub fn destroy(self, device: &mut dyn GraphicsDevice) {
        device.delete_framebuffer(self.framebuffer);
        device.delete_vertex_array(self.vertex_array);
        self.color_target.destroy(device);
        self.depth_target.destroy(device);
        self.sampler.destroy(device);
        self.shader.destroy(device);
        log::debug!("Destroyed post-process stage");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::backends::{GpuCall, RecordingDevice};

    fn create(device: &mut RecordingDevice) -> PostProcessStage {
        let config = RendererConfig::new().with_postprocess("grey.frag");
        PostProcessStage::create(device, Extent2d::new(320, 240), &config, Path::new("grey.frag")).unwrap()
    }

    #[test]
    fn test_targets_are_window_sized_and_attached() {
        let mut device = RecordingDevice::new();
        let stage = create(&mut device);

        let textures: Vec<_> = device
            .calls()
            .iter()
            .filter_map(|call| match call {
                GpuCall::CreateTexture { descriptor, .. } => Some(*descriptor),
                _ => None,
            })
            .collect();
        assert_eq!(textures.len(), 2);
        assert_eq!(textures[0].format, TextureFormat::Rgba8);
        assert_eq!(textures[1].format, TextureFormat::Depth24);
        assert!(textures.iter().all(|t| t.size == Extent2d::new(320, 240)));

        let attachments = device
            .calls()
            .iter()
            .filter(|call| matches!(call, GpuCall::AttachTexture { framebuffer, .. } if *framebuffer == stage.framebuffer()))
            .count();
        assert_eq!(attachments, 2);
        assert_eq!(device.bound_framebuffer(), FramebufferHandle::DEFAULT);
    }

    #[test]
    fn test_apply_draws_fullscreen_triangle_into_default_framebuffer() {
        let mut device = RecordingDevice::new();
        let stage = create(&mut device);
        stage.bind_as_target(&mut device);
        device.clear_calls();

        stage.apply(&mut device);

        assert_eq!(device.bound_framebuffer(), FramebufferHandle::DEFAULT);
        assert_eq!(device.calls().first(), Some(&GpuCall::BindFramebuffer(FramebufferHandle::DEFAULT)));
        assert_eq!(
            device.calls().last(),
            Some(&GpuCall::DrawArrays {
                topology: PrimitiveTopology::Triangles,
                first: 0,
                count: 3
            })
        );
        assert!(device.calls().contains(&GpuCall::BindTexture {
            unit: 0,
            texture: stage.color_target().handle()
        }));
    }

    #[test]
    fn test_destroy_releases_everything() {
        let mut device = RecordingDevice::new();
        let stage = create(&mut device);
        assert_eq!(device.live_resource_count(), 6);
        stage.destroy(&mut device);
        assert_eq!(device.live_resource_count(), 0);
    }
}
