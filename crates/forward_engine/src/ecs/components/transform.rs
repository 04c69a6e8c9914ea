//! Transform component for the ECS system
//!
//! Holds an entity's transform relative to its parent. The world composes
//! these along the hierarchy; see [`World::local_to_world`](crate::ecs::World::local_to_world).

use crate::ecs::Component;
use crate::foundation::math::{Mat4, Quat, Vec3};

/// ECS Transform component
///
/// Translation, rotation and scale relative to the parent entity, applied in
/// scale, rotate, translate order.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformComponent {
    /// Position relative to the parent
    pub position: Vec3,

    /// Rotation relative to the parent
    pub rotation: Quat,

    /// Per-axis scale factors
    pub scale: Vec3,
}

impl Component for TransformComponent {}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl TransformComponent {
    /// Create identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create from position only
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create from position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Replace the rotation
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Replace the scale with a uniform factor
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::new(scale, scale, scale);
        self
    }

    /// Convert to a 4x4 matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::transform_point;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_identity_matrix() {
        assert_relative_eq!(TransformComponent::identity().to_matrix(), Mat4::identity(), epsilon = EPSILON);
    }

    #[test]
    fn test_scale_then_rotate_then_translate() {
        let transform = TransformComponent::from_position(Vec3::new(0.0, 1.0, 0.0))
            .with_rotation(Quat::from_axis_angle(&Vec3::z_axis(), std::f32::consts::FRAC_PI_2))
            .with_uniform_scale(2.0);

        // (1,0,0) -> scaled (2,0,0) -> rotated (0,2,0) -> translated (0,3,0)
        let p = transform_point(&transform.to_matrix(), &Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Vec3::new(0.0, 3.0, 0.0), epsilon = EPSILON);
    }
}
