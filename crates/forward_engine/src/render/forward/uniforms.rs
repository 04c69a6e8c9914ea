//! Per-command uniform binding
//!
//! Lit materials receive the model matrix and the view-projection matrix as
//! separate uniforms, since their shader needs world-space positions. They
//! also receive the camera position, the ambient light and the light arrays.
//! Every other material receives one pre-multiplied `transform`.
//!
//! # Light arrays
//!
//! Each list is written as a count followed by one indexed struct per light:
//!
//! ```text
//! directionalLightCount          directionalLights[i].{direction,intensity,color}
//! spotLightsCount                spotLights[i].{position,intensity,color,decay}
//! coneLightsCount                coneLights[i].{position,intensity,color,direction,range,smoothing,decay}
//! ```

use crate::foundation::math::{Mat4, Vec3};
use crate::render::api::GraphicsDevice;
use crate::render::resources::{Material, UniformContract};

use super::commands::{FrameCollections, RenderCommand};

/// Frame-constant values shared by every draw
#[derive(Debug, Clone, PartialEq)]
pub struct FrameUniforms {
    /// Projection composed with view
    pub view_projection: Mat4,
    /// World-space eye position
    pub camera_position: Vec3,
    /// Ambient light colour
    pub area_light: Vec3,
}

/// Draw `commands` in order
pub fn draw_commands(
    device: &mut dyn GraphicsDevice,
    commands: &[RenderCommand],
    frame: &FrameUniforms,
    lights: &FrameCollections,
) {
    for command in commands {
        draw_command(device, command, frame, lights);
    }
}

/// Set up the command's material, bind its uniforms and draw its mesh
pub fn draw_command(device: &mut dyn GraphicsDevice, command: &RenderCommand, frame: &FrameUniforms, lights: &FrameCollections) {
    let material = &command.material;
    material.setup(device);

    match material.uniform_contract() {
        UniformContract::Lit => {
            material.set(device, "transform", command.local_to_world);
            material.set(device, "Camera", frame.view_projection);
            material.set(device, "cameraPosition", frame.camera_position);
            material.set(device, "areaLight", frame.area_light);
            bind_light_arrays(device, material, lights);
        }
        UniformContract::TransformOnly => {
            material.set(device, "transform", frame.view_projection * command.local_to_world);
        }
    }

    command.mesh.draw(device);
}

/// Write the count and per-light fields of every light list
pub fn bind_light_arrays(device: &mut dyn GraphicsDevice, material: &Material, lights: &FrameCollections) {
    material.set(device, "directionalLightCount", count(lights.directional_lights.len()));
    for (i, light) in lights.directional_lights.iter().enumerate() {
        material.set(device, &field("directionalLights", i, "direction"), light.direction);
        material.set(device, &field("directionalLights", i, "intensity"), light.intensity);
        material.set(device, &field("directionalLights", i, "color"), light.color);
    }

    material.set(device, "spotLightsCount", count(lights.spot_lights.len()));
    for (i, light) in lights.spot_lights.iter().enumerate() {
        material.set(device, &field("spotLights", i, "position"), light.world_position);
        material.set(device, &field("spotLights", i, "intensity"), light.intensity);
        material.set(device, &field("spotLights", i, "color"), light.color);
        material.set(device, &field("spotLights", i, "decay"), light.decay);
    }

    material.set(device, "coneLightsCount", count(lights.cone_lights.len()));
    for (i, light) in lights.cone_lights.iter().enumerate() {
        material.set(device, &field("coneLights", i, "position"), light.world_position);
        material.set(device, &field("coneLights", i, "intensity"), light.intensity);
        material.set(device, &field("coneLights", i, "color"), light.color);
        material.set(device, &field("coneLights", i, "direction"), light.world_direction);
        material.set(device, &field("coneLights", i, "range"), light.range);
        material.set(device, &field("coneLights", i, "smoothing"), light.smoothing);
        material.set(device, &field("coneLights", i, "decay"), light.decay);
    }
}

fn field(array: &str, index: usize, name: &str) -> String {
    format!("{array}[{index}].{name}")
}

fn count(len: usize) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX)
}
