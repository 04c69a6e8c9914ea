//! Sky compositor
//!
//! The sky is a textured sphere seen from inside. Each frame it is centred on
//! the camera, scaled by twice the camera's ortho height, and pushed onto the
//! far plane so it only shows where no opaque geometry has written depth.
//!
//! # Far-plane projection
//!
//! [`always_behind_transform`] replaces clip-space `z` with `w`. After the
//! perspective divide every sky fragment lands at NDC depth 1.0, the far
//! value of the OpenGL convention used by the camera projections. Combined
//! with a `LessEqual` depth test and a depth clear of 1.0, the sky passes
//! exactly where the clear value survives.

use std::path::Path;

use crate::assets::load_texture;
use crate::config::RendererConfig;
use crate::foundation::math::{Mat4, Vec3};
use crate::render::api::{GraphicsDevice, SamplerDescriptor, ShaderSource, WrapMode};
use crate::render::pipeline::{CompareFunction, CullFace, FrontFace, PipelineState};
use crate::render::resources::{Material, Mesh, Sampler, ShaderProgram, Texture2D, TextureBinding};
use crate::render::RenderResult;

/// Matrix that maps clip-space depth onto the far plane (`z' = w`)
pub fn always_behind_transform() -> Mat4 {
    Mat4::new(
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 0.0, 1.0, //
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Model matrix of the sky sphere for a camera at `camera_position`
pub fn sky_model_matrix(camera_position: &Vec3, ortho_height: f32) -> Mat4 {
    Mat4::new_translation(camera_position) * Mat4::new_scaling(ortho_height * 2.0)
}

/// Pipeline state of the sky: culled as seen from inside, depth tested and
/// written
pub fn sky_pipeline_state() -> PipelineState {
    PipelineState::new()
        .with_culling(CullFace::Back, FrontFace::Clockwise)
        .with_depth_test(CompareFunction::LessEqual)
        .with_depth_mask(true)
}

/// Sampler of the sky texture: wraps around the horizon, clamps at the poles
pub const fn sky_sampler_descriptor() -> SamplerDescriptor {
    SamplerDescriptor::linear_clamped().with_wrap(WrapMode::Repeat, WrapMode::ClampToEdge)
}

/// Sphere, program, texture, sampler and material of the sky
///
/// Created together and destroyed together.
#[derive(Debug)]
pub struct SkyResources {
    sphere: Mesh,
    shader: ShaderProgram,
    texture: Texture2D,
    sampler: Sampler,
    material: Material,
}

impl SkyResources {
    /// Load the sky texture and create the remaining resources
    pub fn create(device: &mut dyn GraphicsDevice, config: &RendererConfig, texture_path: &Path) -> RenderResult<Self> {
        let sphere = Mesh::sphere(device, config.sky_sphere_segments)?;
        let shader = ShaderProgram::link(
            device,
            "sky",
            &[
                ShaderSource::vertex(&config.sky_vertex_shader),
                ShaderSource::fragment(&config.sky_fragment_shader),
            ],
        )?;
        let texture = load_texture(device, texture_path, false)?;
        let sampler = Sampler::new(device, sky_sampler_descriptor())?;
        let material = Material::skybox(shader.clone(), TextureBinding::new(&texture, &sampler))
            .with_pipeline_state(sky_pipeline_state())
            .with_transparent(false);

        log::debug!(
            "Created sky resources from {:?} ({}x{} sphere)",
            texture_path,
            config.sky_sphere_segments[0],
            config.sky_sphere_segments[1]
        );

        Ok(Self {
            sphere,
            shader,
            texture,
            sampler,
            material,
        })
    }

    /// Material the sky is drawn with
    pub const fn material(&self) -> &Material {
        &self.material
    }

    /// Sphere mesh
    pub const fn sphere(&self) -> &Mesh {
        &self.sphere
    }

    /// Draw the sky around a camera
    pub fn draw(
        &self,
        device: &mut dyn GraphicsDevice,
        camera_position: &Vec3,
        ortho_height: f32,
        view_projection: &Mat4,
        area_light: Vec3,
    ) {
        self.material.setup(device);
        self.material.set(device, "areaLight", area_light);
        self.material.set(device, "transform", sky_model_matrix(camera_position, ortho_height));
        self.material.set(device, "Camera", always_behind_transform() * view_projection);
        self.sphere.draw(device);
    }

    /// Release every sky resource
    pub fn destroy(self, device: &mut dyn GraphicsDevice) {
        self.sphere.destroy(device);
        self.shader.destroy(device);
        self.texture.destroy(device);
        self.sampler.destroy(device);
        log::debug!("Destroyed sky resources");
    }
}
