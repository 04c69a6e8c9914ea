//! GPU resources: meshes, programs, textures, samplers and materials

mod material;
mod mesh;
mod shader;
mod texture;

pub use material::{Material, MaterialVariant, TextureBinding, UniformContract, MATERIAL_TEXTURE_UNIT};
pub use mesh::{sphere_geometry, Mesh, Vertex, MAX_SPHERE_SEGMENTS};
pub use shader::ShaderProgram;
pub use texture::{Sampler, Texture2D};
