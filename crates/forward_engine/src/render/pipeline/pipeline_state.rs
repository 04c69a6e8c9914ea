//! Fixed-function pipeline state
//!
//! Everything a material toggles outside its shader: face culling, depth
//! testing, blending and write masks. Devices apply a whole
//! [`PipelineState`] at once through
//! [`GraphicsDevice::apply_pipeline_state`](crate::render::api::GraphicsDevice::apply_pipeline_state).

use crate::foundation::math::Vec4;

/// Which faces get culled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CullFace {
    /// Cull front faces
    Front,
    /// Cull back faces
    Back,
}

/// Winding order of front faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrontFace {
    /// Counter-clockwise triangles face the viewer
    CounterClockwise,
    /// Clockwise triangles face the viewer
    Clockwise,
}

/// Depth comparison function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareFunction {
    /// Never passes
    Never,
    /// Passes if the incoming depth is less than the stored depth
    Less,
    /// Passes if equal
    Equal,
    /// Passes if less or equal
    LessEqual,
    /// Passes if greater
    Greater,
    /// Passes if greater or equal
    GreaterEqual,
    /// Always passes
    Always,
}

/// Blend equation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendEquation {
    /// `src * sf + dst * df`
    Add,
    /// `src * sf - dst * df`
    Subtract,
    /// `dst * df - src * sf`
    ReverseSubtract,
}

/// Blend factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendFactor {
    /// 0
    Zero,
    /// 1
    One,
    /// Source alpha
    SrcAlpha,
    /// 1 - source alpha
    OneMinusSrcAlpha,
    /// Destination alpha
    DstAlpha,
    /// 1 - destination alpha
    OneMinusDstAlpha,
    /// Constant colour
    ConstantColor,
}

/// Face culling settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceCulling {
    /// Whether culling is enabled
    pub enabled: bool,
    /// Faces to discard
    pub culled_face: CullFace,
    /// Winding that counts as front facing
    pub front_face: FrontFace,
}

/// Depth test settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthTesting {
    /// Whether the depth test is enabled
    pub enabled: bool,
    /// Comparison used by the test
    pub function: CompareFunction,
}

/// Colour blending settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blending {
    /// Whether blending is enabled
    pub enabled: bool,
    /// Blend equation
    pub equation: BlendEquation,
    /// Source factor
    pub source_factor: BlendFactor,
    /// Destination factor
    pub destination_factor: BlendFactor,
    /// Constant colour for [`BlendFactor::ConstantColor`]
    pub constant_color: Vec4,
}

/// Complete fixed-function state of a material
///
/// The default has culling, depth testing and blending switched off, with
/// every write mask enabled.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineState {
    /// Culling
    pub face_culling: FaceCulling,
    /// Depth test
    pub depth_testing: DepthTesting,
    /// Blending
    pub blending: Blending,
    /// Per-channel colour writes
    pub color_mask: [bool; 4],
    /// Depth writes
    pub depth_mask: bool,
}

impl Default for PipelineState {
    fn default() -> Self {
        Self {
            face_culling: FaceCulling {
                enabled: false,
                culled_face: CullFace::Back,
                front_face: FrontFace::CounterClockwise,
            },
            depth_testing: DepthTesting {
                enabled: false,
                function: CompareFunction::LessEqual,
            },
            blending: Blending {
                enabled: false,
                equation: BlendEquation::Add,
                source_factor: BlendFactor::SrcAlpha,
                destination_factor: BlendFactor::OneMinusSrcAlpha,
                constant_color: Vec4::zeros(),
            },
            color_mask: [true; 4],
            depth_mask: true,
        }
    }
}

impl PipelineState {
    /// Create the default state
    pub fn new() -> Self {
        Self::default()
    }

    /// Opaque geometry: back-face culling and depth test with writes
    pub fn opaque() -> Self {
        Self::new().with_culling(CullFace::Back, FrontFace::CounterClockwise).with_depth_test(CompareFunction::LessEqual)
    }

    /// Alpha-blended geometry: depth test without writes, standard alpha
    /// blending
    pub fn transparent() -> Self {
        Self::opaque()
            .with_blending(BlendFactor::SrcAlpha, BlendFactor::OneMinusSrcAlpha)
            .with_depth_mask(false)
    }

    /// Enable face culling
    pub const fn with_culling(mut self, culled_face: CullFace, front_face: FrontFace) -> Self {
        self.face_culling = FaceCulling {
            enabled: true,
            culled_face,
            front_face,
        };
        self
    }

    /// Enable the depth test
    pub const fn with_depth_test(mut self, function: CompareFunction) -> Self {
        self.depth_testing = DepthTesting { enabled: true, function };
        self
    }

    /// Enable additive-equation blending with the given factors
    pub fn with_blending(mut self, source_factor: BlendFactor, destination_factor: BlendFactor) -> Self {
        self.blending.enabled = true;
        self.blending.equation = BlendEquation::Add;
        self.blending.source_factor = source_factor;
        self.blending.destination_factor = destination_factor;
        self
    }

    /// Enable or disable depth writes
    pub fn with_depth_mask(mut self, depth_mask: bool) -> Self {
        self.depth_mask = depth_mask;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = PipelineState::default();
        assert!(!state.face_culling.enabled);
        assert!(!state.depth_testing.enabled);
        assert!(!state.blending.enabled);
        assert!(state.depth_mask);
        assert_eq!(state.color_mask, [true; 4]);
    }

    #[test]
    fn test_transparent_preset() {
        let state = PipelineState::transparent();
        assert!(state.blending.enabled);
        assert!(state.depth_testing.enabled);
        assert!(!state.depth_mask);
        assert_eq!(state.blending.destination_factor, BlendFactor::OneMinusSrcAlpha);
    }
}
