//! Rendering
//!
//! # Layout
//!
//! - [`api`]: the [`GraphicsDevice`](api::GraphicsDevice) contract and its
//!   value types
//! - [`backends`]: device implementations shipped with the crate
//! - [`pipeline`]: fixed-function pipeline state
//! - [`resources`]: meshes, shader programs, textures, samplers, materials
//! - [`forward`]: the forward renderer that drives a device from a
//!   [`World`](crate::ecs::World)

pub mod api;
pub mod backends;
pub mod forward;
pub mod pipeline;
pub mod resources;

pub use forward::{ForwardRenderer, FrameStats};

use crate::assets::AssetError;

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors raised while creating renderer resources
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    /// The window size passed to the renderer has a zero dimension
    #[error("Invalid window size {width}x{height}")]
    InvalidWindowSize {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },

    /// A device refused to create a buffer, texture, sampler, framebuffer or
    /// vertex array, or was handed invalid data
    #[error("Resource creation failed: {0}")]
    ResourceCreationFailed(String),

    /// A device failed to compile or link a program, e.g. one with no stages
    #[error("Shader program failed to build: {0}")]
    ShaderCompilationFailed(String),

    /// Loading an asset from disk failed
    #[error(transparent)]
    Asset(#[from] AssetError),
}
