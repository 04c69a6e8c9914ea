//! ECS Components module
//!
//! Components consumed by the forward renderer.

pub mod camera;
pub mod lighting;
pub mod mesh_renderer;
pub mod transform;

pub use camera::{CameraComponent, ProjectionKind};
pub use lighting::{ConeLight, DirectionalLight, LightFactory, SpotLight};
pub use mesh_renderer::MeshRendererComponent;
pub use transform::TransformComponent;
