//! Pipeline state management

mod pipeline_state;

pub use pipeline_state::{
    BlendEquation, BlendFactor, Blending, CompareFunction, CullFace, DepthTesting, FaceCulling, FrontFace, PipelineState,
};
