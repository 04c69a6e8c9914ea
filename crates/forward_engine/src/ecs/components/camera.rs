//! Camera component
//!
//! A camera is attached to an entity and takes its placement from that
//! entity's world transform: it sits at the entity's origin, looks down the
//! entity's local -Z axis, and uses local +Y as up. Projections follow the
//! OpenGL clip-space convention (depth in [-1, 1]).

use crate::ecs::Component;
use crate::foundation::math::{transform_direction, transform_point, Mat4, Point3, Vec3};
use crate::render::api::Extent2d;

/// Projection model of a camera
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionKind {
    /// Perspective projection driven by [`CameraComponent::fov_y`]
    Perspective,
    /// Orthographic projection driven by [`CameraComponent::ortho_height`]
    Orthographic,
}

/// Camera component
#[derive(Debug, Clone, PartialEq)]
pub struct CameraComponent {
    /// Projection model
    pub projection: ProjectionKind,
    /// Vertical field of view in radians (perspective only)
    pub fov_y: f32,
    /// Height of the view volume in world units (orthographic), also used to
    /// size the sky sphere
    pub ortho_height: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
}

impl Component for CameraComponent {}

impl Default for CameraComponent {
    fn default() -> Self {
        Self {
            projection: ProjectionKind::Perspective,
            fov_y: std::f32::consts::FRAC_PI_2,
            ortho_height: 1.0,
            near: 0.01,
            far: 100.0,
        }
    }
}

impl CameraComponent {
    /// Create a perspective camera with the given vertical field of view
    pub fn perspective(fov_y: f32) -> Self {
        Self {
            fov_y,
            ..Self::default()
        }
    }

    /// Create an orthographic camera with the given view height
    pub fn orthographic(ortho_height: f32) -> Self {
        Self {
            projection: ProjectionKind::Orthographic,
            ortho_height,
            ..Self::default()
        }
    }

    /// Set the clip planes
    pub const fn with_clip_planes(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// Set the ortho height
    pub const fn with_ortho_height(mut self, ortho_height: f32) -> Self {
        self.ortho_height = ortho_height;
        self
    }

    /// World-space position of a camera owned by an entity with the given
    /// local-to-world matrix
    pub fn world_position(owner_to_world: &Mat4) -> Vec3 {
        transform_point(owner_to_world, &Vec3::zeros())
    }

    /// World-space forward axis (local -Z) of a camera owned by an entity with
    /// the given local-to-world matrix
    pub fn world_forward(owner_to_world: &Mat4) -> Vec3 {
        transform_direction(owner_to_world, &Vec3::new(0.0, 0.0, -1.0))
    }

    /// View matrix for a camera owned by an entity with the given
    /// local-to-world matrix
    pub fn view_matrix(&self, owner_to_world: &Mat4) -> Mat4 {
        let eye = transform_point(owner_to_world, &Vec3::zeros());
        let center = transform_point(owner_to_world, &Vec3::new(0.0, 0.0, -1.0));
        let up = transform_direction(owner_to_world, &Vec3::new(0.0, 1.0, 0.0));
        Mat4::look_at_rh(&Point3::from(eye), &Point3::from(center), &up)
    }

    /// Projection matrix for a viewport of the given size
    pub fn projection_matrix(&self, viewport: Extent2d) -> Mat4 {
        let aspect = viewport.aspect_ratio();
        match self.projection {
            ProjectionKind::Perspective => Mat4::new_perspective(aspect, self.fov_y, self.near, self.far),
            ProjectionKind::Orthographic => {
                let half_height = self.ortho_height * 0.5;
                let half_width = half_height * aspect;
                Mat4::new_orthographic(-half_width, half_width, -half_height, half_height, self.near, self.far)
            }
        }
    }
}
