//! Command building and light collection
//!
//! One walk over the world per frame produces the active camera, the opaque
//! and transparent draw lists, and the three light lists. The walk follows
//! world traversal order, so the first camera found wins and opaque commands
//! keep that order.
//!
//! Spot and cone light components are written back during the walk: their
//! world-space fields are recomputed from the owning entity's transform
//! before being copied into the frame lists.

use std::sync::Arc;

use crate::ecs::components::{CameraComponent, ConeLight, DirectionalLight, MeshRendererComponent, SpotLight};
use crate::ecs::{Entity, World};
use crate::foundation::math::{translation_of, Mat4, Vec3};
use crate::render::api::Extent2d;
use crate::render::resources::{Material, Mesh};

/// A single draw for the current frame
#[derive(Debug, Clone)]
pub struct RenderCommand {
    /// Model matrix of the owning entity
    pub local_to_world: Mat4,
    /// World-space origin of the owning entity, used for sorting
    pub center: Vec3,
    /// Geometry
    pub mesh: Arc<Mesh>,
    /// Shading configuration
    pub material: Arc<Material>,
}

impl PartialEq for RenderCommand {
    fn eq(&self, other: &Self) -> bool {
        self.local_to_world == other.local_to_world
            && self.center == other.center
            && Arc::ptr_eq(&self.mesh, &other.mesh)
            && Arc::ptr_eq(&self.material, &other.material)
    }
}

/// Per-frame scratch lists
///
/// Owned by the renderer and cleared at the start of every frame, so the
/// allocations are reused while the contents never outlive a frame.
#[derive(Debug, Default)]
pub struct FrameCollections {
    /// Opaque draws, in traversal order
    pub opaque: Vec<RenderCommand>,
    /// Transparent draws, back to front once sorted
    pub transparent: Vec<RenderCommand>,
    /// Directional lights
    pub directional_lights: Vec<DirectionalLight>,
    /// Spot lights with world positions filled in
    pub spot_lights: Vec<SpotLight>,
    /// Cone lights with world positions and directions filled in
    pub cone_lights: Vec<ConeLight>,
}

impl FrameCollections {
    /// Empty every list, keeping capacity
    pub fn clear(&mut self) {
        self.opaque.clear();
        self.transparent.clear();
        self.directional_lights.clear();
        self.spot_lights.clear();
        self.cone_lights.clear();
    }
}

/// The camera selected for a frame, with its owner's placement
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveCamera {
    /// Entity carrying the camera
    pub entity: Entity,
    /// Camera parameters
    pub camera: CameraComponent,
    /// Local-to-world matrix of the owning entity
    pub local_to_world: Mat4,
}

impl ActiveCamera {
    /// World-space eye position
    pub fn position(&self) -> Vec3 {
        CameraComponent::world_position(&self.local_to_world)
    }

    /// World-space forward axis
    pub fn forward(&self) -> Vec3 {
        CameraComponent::world_forward(&self.local_to_world)
    }

    /// Projection for `viewport` composed with the view matrix
    pub fn view_projection(&self, viewport: Extent2d) -> Mat4 {
        self.camera.projection_matrix(viewport) * self.camera.view_matrix(&self.local_to_world)
    }
}

/// Walk `world` once, filling `frame` and returning the first camera found
///
/// `frame` is appended to; callers clear it first. Returns `None` when the
/// world holds no camera, in which case the lists are still filled.
pub fn collect_frame(world: &mut World, frame: &mut FrameCollections) -> Option<ActiveCamera> {
    let mut active_camera = None;

    for index in 0..world.entity_count() {
        let Some(entity) = world.entity_at(index) else {
            break;
        };
        let Some(local_to_world) = world.local_to_world(entity) else {
            continue;
        };

        if active_camera.is_none() {
            if let Some(camera) = world.get_component::<CameraComponent>(entity) {
                active_camera = Some(ActiveCamera {
                    entity,
                    camera: camera.clone(),
                    local_to_world,
                });
            }
        }

        if let Some(renderer) = world.get_component::<MeshRendererComponent>(entity) {
            let command = RenderCommand {
                local_to_world,
                center: translation_of(&local_to_world),
                mesh: Arc::clone(&renderer.mesh),
                material: Arc::clone(&renderer.material),
            };
            if command.material.is_transparent() {
                frame.transparent.push(command);
            } else {
                frame.opaque.push(command);
            }
        }

        if let Some(light) = world.get_component::<DirectionalLight>(entity) {
            frame.directional_lights.push(light.clone());
        }

        if let Some(light) = world.get_component_mut::<SpotLight>(entity) {
            light.update_world(&local_to_world);
            frame.spot_lights.push(light.clone());
        }

        for light in world.get_components_mut::<ConeLight>(entity) {
            light.update_world(&local_to_world);
            frame.cone_lights.push(light.clone());
        }
    }

    log::trace!(
        "Collected {} opaque, {} transparent, {}/{}/{} directional/spot/cone lights",
        frame.opaque.len(),
        frame.transparent.len(),
        frame.directional_lights.len(),
        frame.spot_lights.len(),
        frame.cone_lights.len()
    );

    active_camera
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{LightFactory, TransformComponent};
    use crate::render::forward::test_support::Fixture;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    fn spawn_drawable(world: &mut World, fixture: &Fixture, position: Vec3, transparent: bool) -> Entity {
        let entity = world.create_entity();
        world.set_local_transform(entity, TransformComponent::from_position(position));
        world.add_component(
            entity,
            MeshRendererComponent::new(Arc::clone(&fixture.mesh), fixture.material(transparent)),
        );
        entity
    }

    #[test]
    fn test_no_camera_still_collects() {
        let fixture = Fixture::new();
        let mut world = World::new();
        spawn_drawable(&mut world, &fixture, Vec3::zeros(), false);

        let mut frame = FrameCollections::default();
        assert!(collect_frame(&mut world, &mut frame).is_none());
        assert_eq!(frame.opaque.len(), 1);
    }

    #[test]
    fn test_first_camera_wins() {
        let mut world = World::new();
        let first = world.create_entity();
        world.add_component(first, CameraComponent::perspective(1.0));
        let second = world.create_entity();
        world.add_component(second, CameraComponent::orthographic(3.0));

        let mut frame = FrameCollections::default();
        let camera = collect_frame(&mut world, &mut frame).unwrap();
        assert_eq!(camera.entity, first);
        assert_relative_eq!(camera.camera.fov_y, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_classifies_by_transparency() {
        let fixture = Fixture::new();
        let mut world = World::new();
        spawn_drawable(&mut world, &fixture, Vec3::new(0.0, 0.0, -1.0), true);
        spawn_drawable(&mut world, &fixture, Vec3::new(0.0, 0.0, -2.0), false);
        spawn_drawable(&mut world, &fixture, Vec3::new(0.0, 0.0, -3.0), true);

        let mut frame = FrameCollections::default();
        collect_frame(&mut world, &mut frame);
        assert_eq!(frame.opaque.len(), 1);
        assert_eq!(frame.transparent.len(), 2);
        assert_relative_eq!(frame.opaque[0].center, Vec3::new(0.0, 0.0, -2.0), epsilon = EPSILON);
    }

    #[test]
    fn test_center_uses_world_transform() {
        let fixture = Fixture::new();
        let mut world = World::new();
        let parent = world.create_entity();
        world.set_local_transform(parent, TransformComponent::from_position(Vec3::new(1.0, 2.0, 3.0)));
        let child = spawn_drawable(&mut world, &fixture, Vec3::new(0.0, 0.0, -1.0), false);
        world.set_parent(child, Some(parent));

        let mut frame = FrameCollections::default();
        collect_frame(&mut world, &mut frame);
        assert_relative_eq!(frame.opaque[0].center, Vec3::new(1.0, 2.0, 2.0), epsilon = EPSILON);
    }

    #[test]
    fn test_lights_are_collected_and_cached() {
        let mut world = World::new();
        let lamp = world.create_entity();
        world.set_local_transform(lamp, TransformComponent::from_position(Vec3::new(0.0, 5.0, 0.0)));
        world.add_component(lamp, LightFactory::directional(Vec3::new(0.0, -1.0, 0.0), Vec3::new(1.0, 1.0, 1.0), 0.5));
        world.add_component(lamp, LightFactory::spot(Vec3::new(1.0, 0.0, 0.0), 1.0, 2.0));
        world.add_component(lamp, LightFactory::cone(Vec3::new(0.0, 0.0, -1.0), Vec3::new(1.0, 1.0, 1.0), 1.0, 0.5, 0.1, 1.0));
        world.add_component(lamp, LightFactory::cone(Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0), 1.0, 0.5, 0.1, 1.0));

        let mut frame = FrameCollections::default();
        collect_frame(&mut world, &mut frame);

        assert_eq!(frame.directional_lights.len(), 1);
        assert_relative_eq!(frame.directional_lights[0].direction, Vec3::new(0.0, -1.0, 0.0), epsilon = EPSILON);
        assert_eq!(frame.spot_lights.len(), 1);
        assert_eq!(frame.cone_lights.len(), 2);
        assert_relative_eq!(frame.cone_lights[1].world_direction, Vec3::new(1.0, 0.0, 0.0), epsilon = EPSILON);

        let cached = world.get_component::<SpotLight>(lamp).unwrap();
        assert_relative_eq!(cached.world_position, Vec3::new(0.0, 5.0, 0.0), epsilon = EPSILON);
        for cone in world.get_components::<ConeLight>(lamp) {
            assert_relative_eq!(cone.world_position, Vec3::new(0.0, 5.0, 0.0), epsilon = EPSILON);
        }
    }

    #[test]
    fn test_render_command_equality_is_by_identity() {
        let fixture = Fixture::new();
        let material = fixture.material(false);
        let a = fixture.command(Vec3::zeros(), &material);
        let b = fixture.command(Vec3::zeros(), &material);
        let c = fixture.command(Vec3::zeros(), &fixture.material(false));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
