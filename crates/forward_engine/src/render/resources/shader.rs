//! Shader programs

use crate::render::api::{GraphicsDevice, ProgramHandle, ShaderSource, UniformValue};
use crate::render::RenderResult;

/// A linked shader program
///
/// This is a thin wrapper over a device handle. Cloning it shares the same
/// device program; [`destroy`](Self::destroy) invalidates every clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderProgram {
    handle: ProgramHandle,
    label: String,
}

impl ShaderProgram {
    /// Compile and link a program from per-stage source files
    pub fn link(device: &mut dyn GraphicsDevice, label: impl Into<String>, sources: &[ShaderSource]) -> RenderResult<Self> {
        let label = label.into();
        let handle = device.create_program(sources)?;
        log::debug!("Linked shader program '{}' as {:?} from {} stage(s)", label, handle, sources.len());
        Ok(Self { handle, label })
    }

    /// Device handle
    pub const fn handle(&self) -> ProgramHandle {
        self.handle
    }

    /// Make this program current
    pub fn use_program(&self, device: &mut dyn GraphicsDevice) {
        device.use_program(self.handle);
    }

    /// Assign a uniform by GLSL path
    pub fn set(&self, device: &mut dyn GraphicsDevice, name: &str, value: impl Into<UniformValue>) {
        device.set_uniform(self.handle, name, value.into());
    }

    /// Release the device program
    pub fn destroy(self, device: &mut dyn GraphicsDevice) {
        log::debug!("Deleting shader program '{}'", self.label);
        device.delete_program(self.handle);
    }
}
