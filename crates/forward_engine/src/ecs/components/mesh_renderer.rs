//! Mesh renderer component
//!
//! Pairs a mesh with the material it is drawn with. Meshes and materials are
//! shared assets, so the component holds them by `Arc`.

use std::sync::Arc;

use crate::ecs::Component;
use crate::render::resources::{Material, Mesh};

/// Drawable geometry attached to an entity
#[derive(Debug, Clone)]
pub struct MeshRendererComponent {
    /// Geometry to draw
    pub mesh: Arc<Mesh>,
    /// Shading configuration; its transparency flag picks the draw phase
    pub material: Arc<Material>,
}

impl Component for MeshRendererComponent {}

impl MeshRendererComponent {
    /// Create a mesh renderer
    pub const fn new(mesh: Arc<Mesh>, material: Arc<Material>) -> Self {
        Self { mesh, material }
    }
}
