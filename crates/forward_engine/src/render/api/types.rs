//! Value types shared by the renderer and graphics devices
//!
//! Handles are opaque numbers issued by a [`GraphicsDevice`](super::GraphicsDevice).
//! Zero is never issued for a created resource; [`FramebufferHandle::DEFAULT`]
//! uses it to name the window's own framebuffer.

use std::path::PathBuf;

use bitflags::bitflags;

use crate::foundation::math::{Mat4, Vec2, Vec3, Vec4};

/// Handle to a texture stored in the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Handle to a sampler object stored in the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SamplerHandle(pub u64);

/// Handle to a framebuffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FramebufferHandle(pub u64);

impl FramebufferHandle {
    /// The window's framebuffer
    pub const DEFAULT: Self = Self(0);

    /// Whether this is the window's framebuffer
    pub const fn is_default(self) -> bool {
        self.0 == 0
    }
}

/// Handle to a vertex array object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexArrayHandle(pub u64);

/// Handle to uploaded mesh geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u64);

/// Handle to a linked shader program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub u64);

bitflags! {
    /// Buffers affected by a clear
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClearFlags: u32 {
        /// Colour attachments
        const COLOR = 1 << 0;
        /// Depth attachment
        const DEPTH = 1 << 1;
    }
}

/// Size of a window or render target in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Extent2d {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Extent2d {
    /// Create an extent
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether either dimension is zero
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width divided by height; 1.0 for an empty extent
    pub fn aspect_ratio(self) -> f32 {
        if self.is_empty() {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// Pixel format of a texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    /// 8-bit RGBA, normalised
    Rgba8,
    /// 24-bit depth
    Depth24,
}

impl TextureFormat {
    /// Bytes per pixel of tightly packed upload data
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgba8 => 4,
            Self::Depth24 => 3,
        }
    }
}

/// Parameters of a 2D texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureDescriptor {
    /// Pixel format
    pub format: TextureFormat,
    /// Size in pixels
    pub size: Extent2d,
    /// Whether to generate a mip chain after upload
    pub mipmaps: bool,
}

/// Texture filtering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterMode {
    /// Nearest texel
    Nearest,
    /// Bilinear
    Linear,
}

/// Texture coordinate wrapping mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WrapMode {
    /// Tile the texture
    Repeat,
    /// Clamp to the edge texels
    ClampToEdge,
}

/// Parameters of a sampler object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerDescriptor {
    /// Minification filter
    pub min_filter: FilterMode,
    /// Magnification filter
    pub mag_filter: FilterMode,
    /// Wrapping along S (u)
    pub wrap_s: WrapMode,
    /// Wrapping along T (v)
    pub wrap_t: WrapMode,
}

impl SamplerDescriptor {
    /// Linear filtering, clamped on both axes
    pub const fn linear_clamped() -> Self {
        Self {
            min_filter: FilterMode::Linear,
            mag_filter: FilterMode::Linear,
            wrap_s: WrapMode::ClampToEdge,
            wrap_t: WrapMode::ClampToEdge,
        }
    }

    /// Set the wrap modes
    pub const fn with_wrap(mut self, wrap_s: WrapMode, wrap_t: WrapMode) -> Self {
        self.wrap_s = wrap_s;
        self.wrap_t = wrap_t;
        self
    }
}

impl Default for SamplerDescriptor {
    fn default() -> Self {
        Self::linear_clamped()
    }
}

/// Framebuffer attachment point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FramebufferAttachment {
    /// Colour attachment by index
    Color(u32),
    /// Depth attachment
    Depth,
}

/// Primitive assembly for array draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveTopology {
    /// Independent triangles
    Triangles,
}

/// Programmable pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex stage
    Vertex,
    /// Fragment stage
    Fragment,
}

/// Shader source file for one stage of a program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    /// Stage the source is compiled for
    pub stage: ShaderStage,
    /// Path of the source file
    pub path: PathBuf,
}

impl ShaderSource {
    /// Vertex stage source
    pub fn vertex(path: impl Into<PathBuf>) -> Self {
        Self {
            stage: ShaderStage::Vertex,
            path: path.into(),
        }
    }

    /// Fragment stage source
    pub fn fragment(path: impl Into<PathBuf>) -> Self {
        Self {
            stage: ShaderStage::Fragment,
            path: path.into(),
        }
    }
}

/// Value assignable to a shader uniform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    /// `float`
    Float(f32),
    /// `int`, also used for sampler units and array counts
    Int(i32),
    /// `vec2`
    Vec2(Vec2),
    /// `vec3`
    Vec3(Vec3),
    /// `vec4`
    Vec4(Vec4),
    /// `mat4`
    Mat4(Mat4),
}

impl From<f32> for UniformValue {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<i32> for UniformValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<Vec2> for UniformValue {
    fn from(value: Vec2) -> Self {
        Self::Vec2(value)
    }
}

impl From<Vec3> for UniformValue {
    fn from(value: Vec3) -> Self {
        Self::Vec3(value)
    }
}

impl From<[f32; 3]> for UniformValue {
    fn from(value: [f32; 3]) -> Self {
        Self::Vec3(Vec3::from(value))
    }
}

impl From<Vec4> for UniformValue {
    fn from(value: Vec4) -> Self {
        Self::Vec4(value)
    }
}

impl From<Mat4> for UniformValue {
    fn from(value: Mat4) -> Self {
        Self::Mat4(value)
    }
}
