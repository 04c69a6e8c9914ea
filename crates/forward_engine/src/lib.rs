//! # Forward Engine
//!
//! A forward scene renderer for a small real-time 3D engine.
//!
//! ## Features
//!
//! - **Forward shading**: opaque draws in traversal order, transparent draws
//!   sorted back to front, with directional, spot and cone lights
//! - **Sky**: an inside-out textured sphere pinned to the far plane
//! - **Post-processing**: one offscreen pass resolved by a full-screen
//!   triangle
//! - **Device abstraction**: everything goes through
//!   [`GraphicsDevice`](render::api::GraphicsDevice); a recording device is
//!   included for headless runs and tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use forward_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     forward_engine::foundation::logging::init();
//!
//!     let mut device = RecordingDevice::new();
//!     let config = RendererConfig::load_from_file("renderer.toml")?;
//!     let mut renderer = ForwardRenderer::initialize(&mut device, Extent2d::new(1280, 720), &config)?;
//!
//!     let mut world = World::new();
//!     let camera = world.create_entity();
//!     world.add_component(camera, CameraComponent::default());
//!
//!     let stats = renderer.render(&mut device, &mut world);
//!     log::info!("{stats:?}");
//!
//!     renderer.destroy(&mut device);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod assets;
pub mod config;
pub mod ecs;
pub mod foundation;
pub mod render;

/// Common imports for renderer users
pub mod prelude {
    pub use crate::{
        config::{Config, RendererConfig},
        ecs::{
            components::{
                CameraComponent, ConeLight, DirectionalLight, LightFactory, MeshRendererComponent, SpotLight,
                TransformComponent,
            },
            Component, Entity, World,
        },
        foundation::math::{Mat4, Quat, Vec3, Vec4},
        render::{
            api::{Extent2d, GraphicsDevice},
            backends::RecordingDevice,
            forward::{ForwardRenderer, FrameStats},
            resources::{Material, Mesh, ShaderProgram},
            RenderError, RenderResult,
        },
    };
}
