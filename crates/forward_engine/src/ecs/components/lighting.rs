//! Lighting components for ECS
//!
//! Three light kinds are supported: directional, spot (omnidirectional point
//! with decay) and cone. The authored fields are plain data. Spot and cone
//! lights additionally carry world-space fields that the renderer rewrites
//! from the owning entity's transform on every frame; they are a per-frame
//! cache and are only meaningful right after a `render` call.

use crate::ecs::Component;
use crate::foundation::math::{transform_direction, transform_point, Mat4, Vec3};

/// Light with parallel rays, such as sunlight
///
/// The direction is used as authored and is not affected by the owning
/// entity's transform.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalLight {
    /// Direction the light travels in
    pub direction: Vec3,
    /// Intensity multiplier
    pub intensity: f32,
    /// RGB colour
    pub color: Vec3,
}

/// Point light radiating from the owning entity's origin
#[derive(Debug, Clone, PartialEq)]
pub struct SpotLight {
    /// Intensity multiplier
    pub intensity: f32,
    /// RGB colour
    pub color: Vec3,
    /// Distance attenuation exponent
    pub decay: f32,
    /// World-space position, derived per frame
    pub world_position: Vec3,
}

/// Cone-shaped light emitted from the owning entity's origin
#[derive(Debug, Clone, PartialEq)]
pub struct ConeLight {
    /// Emission direction in the owning entity's local space
    pub direction: Vec3,
    /// Intensity multiplier
    pub intensity: f32,
    /// RGB colour
    pub color: Vec3,
    /// Cone half-angle in radians
    pub range: f32,
    /// Width of the soft edge of the cone, in radians
    pub smoothing: f32,
    /// Distance attenuation exponent
    pub decay: f32,
    /// World-space position, derived per frame
    pub world_position: Vec3,
    /// World-space direction, derived per frame (not normalised)
    pub world_direction: Vec3,
}

impl Component for DirectionalLight {}
impl Component for SpotLight {}
impl Component for ConeLight {}

impl SpotLight {
    /// Recompute the world-space cache from the owner's transform
    pub fn update_world(&mut self, local_to_world: &Mat4) {
        self.world_position = transform_point(local_to_world, &Vec3::zeros());
    }
}

impl ConeLight {
    /// Recompute the world-space cache from the owner's transform
    ///
    /// The direction is transformed as a direction (w = 0), so translation
    /// does not affect it.
    pub fn update_world(&mut self, local_to_world: &Mat4) {
        self.world_position = transform_point(local_to_world, &Vec3::zeros());
        self.world_direction = transform_direction(local_to_world, &self.direction);
    }
}

/// Factory functions for creating light components
pub struct LightFactory;

impl LightFactory {
    /// Create a directional light
    pub fn directional(direction: Vec3, color: Vec3, intensity: f32) -> DirectionalLight {
        DirectionalLight {
            direction,
            intensity,
            color,
        }
    }

    /// Create a spot light; its position comes from the owning entity
    pub fn spot(color: Vec3, intensity: f32, decay: f32) -> SpotLight {
        SpotLight {
            intensity,
            color,
            decay,
            world_position: Vec3::zeros(),
        }
    }

    /// Create a cone light pointing along `direction` in the owner's local
    /// space
    pub fn cone(direction: Vec3, color: Vec3, intensity: f32, range: f32, smoothing: f32, decay: f32) -> ConeLight {
        ConeLight {
            direction,
            intensity,
            color,
            range,
            smoothing,
            decay,
            world_position: Vec3::zeros(),
            world_direction: direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Quat;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_spot_light_takes_owner_translation() {
        let mut light = LightFactory::spot(Vec3::new(1.0, 1.0, 1.0), 2.0, 1.0);
        light.update_world(&Mat4::new_translation(&Vec3::new(3.0, -1.0, 2.0)));
        assert_relative_eq!(light.world_position, Vec3::new(3.0, -1.0, 2.0), epsilon = EPSILON);
    }

    #[test]
    fn test_cone_light_direction_ignores_translation() {
        let mut light = LightFactory::cone(Vec3::new(0.0, 0.0, -1.0), Vec3::new(1.0, 1.0, 1.0), 1.0, 0.5, 0.1, 2.0);
        let owner = Mat4::new_translation(&Vec3::new(0.0, 4.0, 0.0))
            * Quat::from_axis_angle(&Vec3::x_axis(), std::f32::consts::FRAC_PI_2).to_homogeneous();
        light.update_world(&owner);

        assert_relative_eq!(light.world_position, Vec3::new(0.0, 4.0, 0.0), epsilon = EPSILON);
        // -Z rotated a quarter turn about +X points up +Y
        assert_relative_eq!(light.world_direction, Vec3::new(0.0, 1.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_update_overwrites_previous_cache() {
        let mut light = LightFactory::spot(Vec3::new(1.0, 1.0, 1.0), 1.0, 1.0);
        light.update_world(&Mat4::new_translation(&Vec3::new(9.0, 9.0, 9.0)));
        light.update_world(&Mat4::identity());
        assert_relative_eq!(light.world_position, Vec3::zeros(), epsilon = EPSILON);
    }
}
