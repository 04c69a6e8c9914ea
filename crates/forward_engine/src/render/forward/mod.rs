//! Forward renderer
//!
//! Draws a [`World`] through a [`GraphicsDevice`] with a fixed forward-shading
//! pipeline.
//!
//! # Frame sequence
//!
//! 1. Clear the frame lists and walk the world once, collecting the first
//!    camera, the draw commands and the lights ([`commands`]).
//! 2. Without a camera, return without touching the device.
//! 3. Sort transparent commands back to front ([`sorting`]).
//! 4. Set the viewport, clear colour (transparent black) and clear depth
//!    (1.0), re-enable colour and depth writes, bind the offscreen target if
//!    post-processing is enabled, and clear.
//! 5. Draw opaque commands, then the sky ([`sky`]), then transparent
//!    commands ([`uniforms`]). Opaque depth must be in place before the sky,
//!    and transparent draws blend over both.
//! 6. Resolve the offscreen target through the full-screen pass
//!    ([`postprocess`]), leaving the default framebuffer bound.
//!
//! # Resource lifecycle
//!
//! Sky and post-process resources are created by
//! [`ForwardRenderer::initialize`] when their configuration key is present
//! and released together by [`ForwardRenderer::destroy`].

pub mod commands;
pub mod postprocess;
pub mod sky;
pub mod sorting;
pub mod uniforms;

use crate::config::RendererConfig;
use crate::ecs::components::{ConeLight, DirectionalLight, SpotLight};
use crate::ecs::World;
use crate::foundation::math::{Vec3, Vec4};
use crate::render::api::{ClearFlags, Extent2d, GraphicsDevice};
use crate::render::{RenderError, RenderResult};

pub use commands::{ActiveCamera, FrameCollections, RenderCommand};
pub use postprocess::PostProcessStage;
pub use sky::SkyResources;
pub use uniforms::FrameUniforms;

/// Counts describing one rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Whether a camera was found; all other fields are zero when it was not
    pub camera_found: bool,
    /// Opaque commands drawn
    pub opaque_draws: usize,
    /// Transparent commands drawn
    pub transparent_draws: usize,
    /// Directional lights bound
    pub directional_lights: usize,
    /// Spot lights bound
    pub spot_lights: usize,
    /// Cone lights bound
    pub cone_lights: usize,
    /// Whether the sky was drawn
    pub sky_drawn: bool,
    /// Whether the post-process pass ran
    pub post_processed: bool,
}

/// Forward renderer with optional sky and post-process stages
#[derive(Debug)]
pub struct ForwardRenderer {
    window_size: Extent2d,
    area_light: Vec3,
    sky: Option<SkyResources>,
    postprocess: Option<PostProcessStage>,
    frame: FrameCollections,
}

impl ForwardRenderer {
    /// Create the renderer and the stages `config` enables
    ///
    /// `window_size` is kept for the viewport, the projection and the
    /// offscreen targets until the renderer is re-initialised.
    pub fn initialize(
        device: &mut dyn GraphicsDevice,
        window_size: Extent2d,
        config: &RendererConfig,
    ) -> RenderResult<Self> {
        if window_size.is_empty() {
            return Err(RenderError::InvalidWindowSize {
                width: window_size.width,
                height: window_size.height,
            });
        }

        let sky = match &config.sky {
            Some(texture_path) => Some(SkyResources::create(device, config, texture_path)?),
            None => None,
        };
        let postprocess = match &config.postprocess {
            Some(fragment_shader) => Some(PostProcessStage::create(device, window_size, config, fragment_shader)?),
            None => None,
        };

        log::info!(
            "Forward renderer initialized at {}x{} (sky: {}, post-process: {})",
            window_size.width,
            window_size.height,
            sky.is_some(),
            postprocess.is_some()
        );

        Ok(Self {
            window_size,
            area_light: Vec3::from(config.area_light),
            sky,
            postprocess,
            frame: FrameCollections::default(),
        })
    }

    /// Render one frame of `world`
    ///
    /// Spot and cone light components in `world` get their world-space
    /// fields refreshed as a side effect.
    pub fn render(&mut self, device: &mut dyn GraphicsDevice, world: &mut World) -> FrameStats {
        self.frame.clear();
        let Some(camera) = commands::collect_frame(world, &mut self.frame) else {
            log::trace!("No camera in world, skipping frame");
            return FrameStats::default();
        };

        let camera_position = camera.position();
        let camera_forward = camera.forward();
        sorting::sort_back_to_front(&mut self.frame.transparent, &camera_position, &camera_forward);

        let frame_uniforms = FrameUniforms {
            view_projection: camera.view_projection(self.window_size),
            camera_position,
            area_light: self.area_light,
        };

        device.set_viewport(0, 0, self.window_size);
        device.set_clear_color(Vec4::zeros());
        device.set_clear_depth(1.0);
        device.set_color_mask([true; 4]);
        device.set_depth_mask(true);

        if let Some(postprocess) = &self.postprocess {
            postprocess.bind_as_target(device);
        }
        device.clear(ClearFlags::COLOR | ClearFlags::DEPTH);

        uniforms::draw_commands(device, &self.frame.opaque, &frame_uniforms, &self.frame);

        if let Some(sky) = &self.sky {
            sky.draw(
                device,
                &camera_position,
                camera.camera.ortho_height,
                &frame_uniforms.view_projection,
                self.area_light,
            );
        }

        uniforms::draw_commands(device, &self.frame.transparent, &frame_uniforms, &self.frame);

        if let Some(postprocess) = &self.postprocess {
            postprocess.apply(device);
        }

        let stats = FrameStats {
            camera_found: true,
            opaque_draws: self.frame.opaque.len(),
            transparent_draws: self.frame.transparent.len(),
            directional_lights: self.frame.directional_lights.len(),
            spot_lights: self.frame.spot_lights.len(),
            cone_lights: self.frame.cone_lights.len(),
            sky_drawn: self.sky.is_some(),
            post_processed: self.postprocess.is_some(),
        };
        log::trace!("Rendered frame: {stats:?}");
        stats
    }

    /// Release sky and post-process resources
    ///
    /// Calling it again does nothing.
    pub fn destroy(&mut self, device: &mut dyn GraphicsDevice) {
        let had_resources = self.sky.is_some() || self.postprocess.is_some();
        if let Some(sky) = self.sky.take() {
            sky.destroy(device);
        }
        if let Some(postprocess) = self.postprocess.take() {
            postprocess.destroy(device);
        }
        if had_resources {
            log::info!("Forward renderer destroyed");
        }
    }

    /// Window size the renderer was initialised with
    pub const fn window_size(&self) -> Extent2d {
        self.window_size
    }

    /// Ambient light colour
    pub const fn area_light(&self) -> Vec3 {
        self.area_light
    }

    /// Sky resources, if the sky is enabled
    pub const fn sky(&self) -> Option<&SkyResources> {
        self.sky.as_ref()
    }

    /// Post-process stage, if enabled
    pub const fn postprocess(&self) -> Option<&PostProcessStage> {
        self.postprocess.as_ref()
    }

    /// Opaque commands of the last frame, in traversal order
    pub fn opaque_commands(&self) -> &[RenderCommand] {
        &self.frame.opaque
    }

    /// Transparent commands of the last frame, back to front
    pub fn transparent_commands(&self) -> &[RenderCommand] {
        &self.frame.transparent
    }

    /// Directional lights of the last frame
    pub fn directional_lights(&self) -> &[DirectionalLight] {
        &self.frame.directional_lights
    }

    /// Spot lights of the last frame
    pub fn spot_lights(&self) -> &[SpotLight] {
        &self.frame.spot_lights
    }

    /// Cone lights of the last frame
    pub fn cone_lights(&self) -> &[ConeLight] {
        &self.frame.cone_lights
    }
}

impl Drop for ForwardRenderer {
    fn drop(&mut self) {
        if self.sky.is_some() || self.postprocess.is_some() {
            log::warn!("ForwardRenderer dropped without destroy(); GPU resources leaked");
        }
    }
}
