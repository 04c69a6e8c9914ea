//! Math utilities and types
//!
//! Provides the nalgebra aliases used throughout the renderer, plus the
//! homogeneous-coordinate helpers the frame compositor relies on.
//!
//! # Conventions
//!
//! Matrices are column-major and act on column vectors (`M * v`). Points are
//! lifted with `w = 1`, directions with `w = 0`, so a direction is affected by
//! rotation and scale but never by translation.

pub use nalgebra::{Matrix4, Quaternion, Unit, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Apply `matrix` to `point` with a homogeneous coordinate of one.
///
/// No perspective divide is performed; the result is the `xyz` part of
/// `matrix * (x, y, z, 1)`. This is what "the position of an entity" means
/// for an affine local-to-world matrix.
pub fn transform_point(matrix: &Mat4, point: &Vec3) -> Vec3 {
    (matrix * point.push(1.0)).xyz()
}

/// Apply `matrix` to `direction` with a homogeneous coordinate of zero.
///
/// Translation is ignored; rotation and scale apply. The result is not
/// normalised.
pub fn transform_direction(matrix: &Mat4, direction: &Vec3) -> Vec3 {
    (matrix * direction.push(0.0)).xyz()
}

/// Translation column of an affine matrix
pub fn translation_of(matrix: &Mat4) -> Vec3 {
    Vec3::new(matrix.m14, matrix.m24, matrix.m34)
}

/// Common math utilities
pub mod utils {
    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * std::f32::consts::PI / 180.0
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_point_picks_up_translation() {
        let m = Mat4::new_translation(&Vec3::new(1.0, 2.0, 3.0));
        let p = transform_point(&m, &Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Vec3::new(2.0, 2.0, 3.0), epsilon = EPSILON);
    }

    #[test]
    fn test_direction_ignores_translation() {
        let rotation = Quat::from_axis_angle(&Vec3::y_axis(), std::f32::consts::FRAC_PI_2);
        let m = Mat4::new_translation(&Vec3::new(10.0, 0.0, 0.0)) * rotation.to_homogeneous();
        let d = transform_direction(&m, &Vec3::new(0.0, 0.0, -1.0));
        assert_relative_eq!(d, Vec3::new(-1.0, 0.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_direction_keeps_scale() {
        let m = Mat4::new_nonuniform_scaling(&Vec3::new(2.0, 3.0, 4.0));
        let d = transform_direction(&m, &Vec3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(d, Vec3::new(2.0, 3.0, 4.0), epsilon = EPSILON);
    }

    #[test]
    fn test_translation_of_matches_point_at_origin() {
        let m = Mat4::new_translation(&Vec3::new(-4.0, 5.5, 0.25))
            * Mat4::new_nonuniform_scaling(&Vec3::new(3.0, 3.0, 3.0));
        assert_relative_eq!(translation_of(&m), transform_point(&m, &Vec3::zeros()), epsilon = EPSILON);
    }

    #[test]
    fn test_utils() {
        assert_relative_eq!(utils::deg_to_rad(180.0), std::f32::consts::PI, epsilon = EPSILON);
        assert_relative_eq!(utils::lerp(2.0, 4.0, 0.25), 2.5, epsilon = EPSILON);
    }
}
