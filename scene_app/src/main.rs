//! Headless scene demo
//!
//! Builds a small scene (a camera, a row of lit spheres, a translucent
//! sphere and one light of each kind), renders a few frames through the
//! recording device while orbiting the spot light, and logs what each frame
//! did.
//!
//! ```text
//! scene_demo [renderer.toml|renderer.ron] [frames]
//! ```

use std::sync::Arc;

use forward_engine::prelude::*;
use forward_engine::config::ConfigError;
use forward_engine::render::api::ShaderSource;
use forward_engine::render::pipeline::PipelineState;

const DEFAULT_FRAMES: u32 = 3;
const WINDOW_SIZE: Extent2d = Extent2d::new(800, 600);

#[derive(thiserror::Error, Debug)]
enum AppError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("renderer: {0}")]
    Render(#[from] RenderError),

    #[error("invalid frame count '{0}'")]
    FrameCount(String),
}

struct SceneApp {
    device: RecordingDevice,
    renderer: ForwardRenderer,
    world: World,
    lamp: Entity,
    meshes: Vec<Arc<Mesh>>,
    shader: ShaderProgram,
}

impl SceneApp {
    fn new(config: &RendererConfig) -> Result<Self, AppError> {
        let mut device = RecordingDevice::new();
        let renderer = ForwardRenderer::initialize(&mut device, WINDOW_SIZE, config)?;
        log::info!("Using {}", device.name());

        let shader = ShaderProgram::link(
            &mut device,
            "lit",
            &[
                ShaderSource::vertex("assets/shaders/light.vert"),
                ShaderSource::fragment("assets/shaders/light.frag"),
            ],
        )?;
        let sphere = Arc::new(Mesh::sphere(&mut device, [32, 16])?);

        let mut world = World::new();

        let camera = world.create_entity();
        world.set_local_transform(camera, TransformComponent::from_position(Vec3::new(0.0, 1.0, 8.0)));
        world.add_component(camera, CameraComponent::default().with_ortho_height(10.0));

        let solid = Arc::new(Material::lit(shader.clone()).with_pipeline_state(PipelineState::opaque()));
        for i in 0..4 {
            let ball = world.create_entity();
            world.set_local_transform(
                ball,
                TransformComponent::from_position(Vec3::new(i as f32 * 2.5 - 3.75, 0.0, -(i as f32) * 2.0)),
            );
            world.add_component(ball, MeshRendererComponent::new(Arc::clone(&sphere), Arc::clone(&solid)));
        }

        let glass = Arc::new(
            Material::lit(shader.clone())
                .with_pipeline_state(PipelineState::transparent())
                .with_transparent(true)
                .with_tint(Vec4::new(0.6, 0.8, 1.0, 0.4)),
        );
        let bubble = world.create_entity();
        world.set_local_transform(
            bubble,
            TransformComponent::from_position(Vec3::new(0.0, 0.5, 2.0)).with_uniform_scale(1.5),
        );
        world.add_component(bubble, MeshRendererComponent::new(Arc::clone(&sphere), glass));

        let sun = world.create_entity();
        world.add_component(sun, LightFactory::directional(Vec3::new(-0.3, -1.0, -0.2), Vec3::new(1.0, 0.95, 0.9), 0.8));

        let pivot = world.create_entity();
        let lamp = world.create_child(pivot);
        world.set_local_transform(lamp, TransformComponent::from_position(Vec3::new(4.0, 2.0, 0.0)));
        world.add_component(lamp, LightFactory::spot(Vec3::new(1.0, 0.6, 0.2), 2.0, 2.0));
        world.add_component(
            lamp,
            LightFactory::cone(Vec3::new(0.0, -1.0, 0.0), Vec3::new(0.2, 0.4, 1.0), 3.0, 0.6, 0.1, 1.5),
        );

        Ok(Self {
            device,
            renderer,
            world,
            lamp,
            meshes: vec![sphere],
            shader,
        })
    }

    fn run(&mut self, frames: u32) {
        for frame in 0..frames {
            let pivot = self.world.parent(self.lamp);
            if let Some(transform) = pivot.and_then(|pivot| self.world.local_transform_mut(pivot)) {
                let angle = frame as f32 * std::f32::consts::FRAC_PI_4;
                transform.rotation = Quat::from_axis_angle(&Vec3::y_axis(), angle);
            }

            self.device.clear_calls();
            let stats = self.renderer.render(&mut self.device, &mut self.world);
            log::info!(
                "Frame {frame}: {} device calls, {} draws, {stats:?}",
                self.device.calls().len(),
                self.device.draw_count()
            );
            if let Some(spot) = self.renderer.spot_lights().first() {
                log::info!("Frame {frame}: spot light at {:?}", spot.world_position);
            }
        }
    }

    fn shutdown(mut self) {
        self.renderer.destroy(&mut self.device);

        // Entities hold the remaining mesh references
        drop(std::mem::take(&mut self.world));
        for mesh in self.meshes.drain(..) {
            if let Ok(mesh) = Arc::try_unwrap(mesh) {
                mesh.destroy(&mut self.device);
            }
        }
        self.shader.destroy(&mut self.device);

        log::info!("Shut down with {} live device resources", self.device.live_resource_count());
    }
}

fn parse_args() -> Result<(RendererConfig, u32), AppError> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            log::info!("Loading renderer configuration from {path}");
            RendererConfig::load_from_file(path)?
        }
        None => RendererConfig::default(),
    };
    let frames = match args.next() {
        Some(text) => text.parse().map_err(|_| AppError::FrameCount(text))?,
        None => DEFAULT_FRAMES,
    };
    Ok((config, frames))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let result = parse_args().and_then(|(config, frames)| {
        let mut app = SceneApp::new(&config)?;
        app.run(frames);
        app.shutdown();
        Ok(())
    });

    if let Err(e) = result {
        log::error!("Scene demo failed: {e}");
        std::process::exit(1);
    }
}
