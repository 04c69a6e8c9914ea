//! Materials
//!
//! A [`Material`] bundles a shader program, fixed-function state, a tint and
//! the texture bindings of its variant. The variant set is closed:
//!
//! - [`MaterialVariant::Lit`]: the forward-lit shader. It reads world-space
//!   positions and the light arrays, so the renderer binds the model and
//!   view-projection matrices separately along with the lighting uniforms.
//! - [`MaterialVariant::Textured`]: unlit texture lookup with alpha cutout.
//! - [`MaterialVariant::Skybox`]: the sky sphere's texture lookup.
//!
//! Unlit variants take a single pre-multiplied `transform`. The variant
//! reports which convention it follows through [`Material::uniform_contract`].
//!
//! # Setup contract
//!
//! [`Material::setup`] applies the pipeline state, makes the program current
//! and sets `tint`. Textured variants also bind their texture and sampler to
//! unit 0 and set `tex` to 0; `Textured` additionally sets `alphaThreshold`.

use crate::foundation::math::Vec4;
use crate::render::api::{GraphicsDevice, SamplerHandle, TextureHandle, UniformValue};
use crate::render::pipeline::PipelineState;

use super::shader::ShaderProgram;
use super::texture::{Sampler, Texture2D};

/// Texture unit used by every material texture
pub const MATERIAL_TEXTURE_UNIT: u32 = 0;

/// A texture and the sampler it is read with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureBinding {
    /// Texture to sample
    pub texture: TextureHandle,
    /// Sampler to sample it with
    pub sampler: SamplerHandle,
}

impl TextureBinding {
    /// Pair a texture with a sampler
    pub const fn new(texture: &Texture2D, sampler: &Sampler) -> Self {
        Self {
            texture: texture.handle(),
            sampler: sampler.handle(),
        }
    }

    fn bind(self, device: &mut dyn GraphicsDevice, shader: &ShaderProgram) {
        device.bind_texture(MATERIAL_TEXTURE_UNIT, self.texture);
        device.bind_sampler(MATERIAL_TEXTURE_UNIT, self.sampler);
        #[allow(clippy::cast_possible_wrap)]
        shader.set(device, "tex", MATERIAL_TEXTURE_UNIT as i32);
    }
}

/// Variant-specific material data
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialVariant {
    /// Forward-lit surface with an optional albedo texture
    Lit {
        /// Albedo texture, if any
        albedo: Option<TextureBinding>,
    },
    /// Unlit textured surface
    Textured {
        /// Colour texture
        binding: TextureBinding,
        /// Fragments with alpha below this are discarded
        alpha_threshold: f32,
    },
    /// Sky sphere
    ///
    /// Reports [`UniformContract::TransformOnly`] like any unlit variant when
    /// drawn from a command list. The sky compositor does not go through that
    /// path: it binds `transform` (model) and `Camera` (far-plane
    /// view-projection) itself; see
    /// [`SkyResources::draw`](crate::render::forward::sky::SkyResources::draw).
    Skybox {
        /// Sky texture
        binding: TextureBinding,
    },
}

/// Uniform interface a material's shader declares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniformContract {
    /// `transform` (model), `Camera` (view-projection), `cameraPosition`,
    /// `areaLight` and the light arrays
    Lit,
    /// A single pre-multiplied `transform`
    TransformOnly,
}

/// Shading configuration of a drawable
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Program the material draws with
    pub shader: ShaderProgram,
    /// Fixed-function state applied on setup
    pub pipeline_state: PipelineState,
    /// Whether draws go through the sorted transparent phase
    pub transparent: bool,
    /// Colour multiplier
    pub tint: Vec4,
    /// Variant data
    pub variant: MaterialVariant,
}

impl Material {
    fn with_variant(shader: ShaderProgram, variant: MaterialVariant) -> Self {
        Self {
            shader,
            pipeline_state: PipelineState::default(),
            transparent: false,
            tint: Vec4::new(1.0, 1.0, 1.0, 1.0),
            variant,
        }
    }

    /// Forward-lit material without an albedo texture
    pub fn lit(shader: ShaderProgram) -> Self {
        Self::with_variant(shader, MaterialVariant::Lit { albedo: None })
    }

    /// Unlit textured material with no alpha cutout
    pub fn textured(shader: ShaderProgram, binding: TextureBinding) -> Self {
        Self::with_variant(
            shader,
            MaterialVariant::Textured {
                binding,
                alpha_threshold: 0.0,
            },
        )
    }

    /// Sky material
    pub fn skybox(shader: ShaderProgram, binding: TextureBinding) -> Self {
        Self::with_variant(shader, MaterialVariant::Skybox { binding })
    }

    /// Replace the pipeline state
    pub fn with_pipeline_state(mut self, pipeline_state: PipelineState) -> Self {
        self.pipeline_state = pipeline_state;
        self
    }

    /// Mark as transparent (drawn sorted, after the sky)
    pub fn with_transparent(mut self, transparent: bool) -> Self {
        self.transparent = transparent;
        self
    }

    /// Set the tint
    pub fn with_tint(mut self, tint: Vec4) -> Self {
        self.tint = tint;
        self
    }

    /// Set the albedo texture of a lit material; ignored for other variants
    pub fn with_albedo(mut self, albedo: TextureBinding) -> Self {
        if let MaterialVariant::Lit { albedo: slot } = &mut self.variant {
            *slot = Some(albedo);
        }
        self
    }

    /// Set the alpha cutout of a textured material; ignored for other variants
    pub fn with_alpha_threshold(mut self, threshold: f32) -> Self {
        if let MaterialVariant::Textured { alpha_threshold, .. } = &mut self.variant {
            *alpha_threshold = threshold;
        }
        self
    }

    /// Whether draws go through the sorted transparent phase
    pub const fn is_transparent(&self) -> bool {
        self.transparent
    }

    /// Uniform interface the command draw path binds for this material
    pub const fn uniform_contract(&self) -> UniformContract {
        match self.variant {
            MaterialVariant::Lit { .. } => UniformContract::Lit,
            MaterialVariant::Textured { .. } | MaterialVariant::Skybox { .. } => UniformContract::TransformOnly,
        }
    }

    /// Activate pipeline state, program and variant bindings
    pub fn setup(&self, device: &mut dyn GraphicsDevice) {
        device.apply_pipeline_state(&self.pipeline_state);
        self.shader.use_program(device);
        self.shader.set(device, "tint", self.tint);

        match &self.variant {
            MaterialVariant::Lit { albedo } => {
                if let Some(binding) = albedo {
                    binding.bind(device, &self.shader);
                }
            }
            MaterialVariant::Textured {
                binding,
                alpha_threshold,
            } => {
                binding.bind(device, &self.shader);
                self.shader.set(device, "alphaThreshold", *alpha_threshold);
            }
            MaterialVariant::Skybox { binding } => binding.bind(device, &self.shader),
        }
    }

    /// Assign a uniform on this material's program
    pub fn set(&self, device: &mut dyn GraphicsDevice, name: &str, value: impl Into<UniformValue>) {
        self.shader.set(device, name, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::api::{Extent2d, SamplerDescriptor, ShaderSource};
    use crate::render::backends::{GpuCall, RecordingDevice};
    use crate::render::pipeline::CompareFunction;

    fn program(device: &mut RecordingDevice) -> ShaderProgram {
        ShaderProgram::link(
            device,
            "material",
            &[ShaderSource::vertex("m.vert"), ShaderSource::fragment("m.frag")],
        )
        .unwrap()
    }

    fn binding(device: &mut RecordingDevice) -> TextureBinding {
        let texture = Texture2D::from_rgba8(device, Extent2d::new(1, 1), &[255; 4], false).unwrap();
        let sampler = Sampler::new(device, SamplerDescriptor::default()).unwrap();
        TextureBinding::new(&texture, &sampler)
    }

    fn setup_calls(device: &mut RecordingDevice, material: &Material) -> Vec<GpuCall> {
        device.clear_calls();
        material.setup(device);
        device.calls().to_vec()
    }

    fn uniform(program: &ShaderProgram, name: &str, value: impl Into<UniformValue>) -> GpuCall {
        GpuCall::SetUniform {
            program: program.handle(),
            name: name.to_string(),
            value: value.into(),
        }
    }

    #[test]
    fn test_lit_setup_without_albedo() {
        let mut device = RecordingDevice::new();
        let shader = program(&mut device);
        let material = Material::lit(shader.clone())
            .with_pipeline_state(PipelineState::opaque())
            .with_tint(Vec4::new(0.5, 0.25, 1.0, 1.0));

        assert_eq!(
            setup_calls(&mut device, &material),
            vec![
                GpuCall::ApplyPipelineState(PipelineState::opaque()),
                GpuCall::UseProgram(shader.handle()),
                uniform(&shader, "tint", Vec4::new(0.5, 0.25, 1.0, 1.0)),
            ]
        );
    }

    #[test]
    fn test_lit_setup_binds_albedo() {
        let mut device = RecordingDevice::new();
        let shader = program(&mut device);
        let albedo = binding(&mut device);
        let material = Material::lit(shader.clone()).with_albedo(albedo);

        assert_eq!(material.variant, MaterialVariant::Lit { albedo: Some(albedo) });
        assert_eq!(
            setup_calls(&mut device, &material),
            vec![
                GpuCall::ApplyPipelineState(PipelineState::default()),
                GpuCall::UseProgram(shader.handle()),
                uniform(&shader, "tint", Vec4::new(1.0, 1.0, 1.0, 1.0)),
                GpuCall::BindTexture { unit: MATERIAL_TEXTURE_UNIT, texture: albedo.texture },
                GpuCall::BindSampler { unit: MATERIAL_TEXTURE_UNIT, sampler: albedo.sampler },
                uniform(&shader, "tex", 0_i32),
            ]
        );
    }

    #[test]
    fn test_textured_setup_sets_alpha_threshold() {
        let mut device = RecordingDevice::new();
        let shader = program(&mut device);
        let texture = binding(&mut device);
        let material = Material::textured(shader.clone(), texture).with_alpha_threshold(0.3);

        assert_eq!(
            setup_calls(&mut device, &material),
            vec![
                GpuCall::ApplyPipelineState(PipelineState::default()),
                GpuCall::UseProgram(shader.handle()),
                uniform(&shader, "tint", Vec4::new(1.0, 1.0, 1.0, 1.0)),
                GpuCall::BindTexture { unit: MATERIAL_TEXTURE_UNIT, texture: texture.texture },
                GpuCall::BindSampler { unit: MATERIAL_TEXTURE_UNIT, sampler: texture.sampler },
                uniform(&shader, "tex", 0_i32),
                uniform(&shader, "alphaThreshold", 0.3_f32),
            ]
        );
    }

    #[test]
    fn test_skybox_setup_binds_texture_without_cutout() {
        let mut device = RecordingDevice::new();
        let shader = program(&mut device);
        let sky = binding(&mut device);
        let state = PipelineState::new().with_depth_test(CompareFunction::LessEqual);
        let material = Material::skybox(shader.clone(), sky).with_pipeline_state(state.clone());

        assert_eq!(
            setup_calls(&mut device, &material),
            vec![
                GpuCall::ApplyPipelineState(state),
                GpuCall::UseProgram(shader.handle()),
                uniform(&shader, "tint", Vec4::new(1.0, 1.0, 1.0, 1.0)),
                GpuCall::BindTexture { unit: MATERIAL_TEXTURE_UNIT, texture: sky.texture },
                GpuCall::BindSampler { unit: MATERIAL_TEXTURE_UNIT, sampler: sky.sampler },
                uniform(&shader, "tex", 0_i32),
            ]
        );
    }

    #[test]
    fn test_variant_builders_ignore_other_variants() {
        let mut device = RecordingDevice::new();
        let shader = program(&mut device);
        let texture = binding(&mut device);

        let lit = Material::lit(shader.clone()).with_alpha_threshold(0.9);
        assert_eq!(lit.variant, MaterialVariant::Lit { albedo: None });

        let textured = Material::textured(shader, texture).with_albedo(texture);
        assert_eq!(
            textured.variant,
            MaterialVariant::Textured {
                binding: texture,
                alpha_threshold: 0.0,
            }
        );
    }

    #[test]
    fn test_uniform_contract_per_variant() {
        let mut device = RecordingDevice::new();
        let shader = program(&mut device);
        let texture = binding(&mut device);

        assert_eq!(Material::lit(shader.clone()).uniform_contract(), UniformContract::Lit);
        assert_eq!(
            Material::textured(shader.clone(), texture).uniform_contract(),
            UniformContract::TransformOnly
        );
        assert_eq!(Material::skybox(shader, texture).uniform_contract(), UniformContract::TransformOnly);
    }

    #[test]
    fn test_transparency_flag() {
        let mut device = RecordingDevice::new();
        let shader = program(&mut device);
        assert!(!Material::lit(shader.clone()).is_transparent());
        assert!(Material::lit(shader).with_transparent(true).is_transparent());
    }
}
