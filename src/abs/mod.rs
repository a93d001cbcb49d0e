//! Thin wrappers over the OpenGL objects used by the sandbox: the window and
//! context, shader programs, textures and meshes.

pub mod app;
pub mod mesh;
pub mod shader;
pub mod texture;

pub use app::*;
pub use mesh::*;
pub use shader::*;
pub use texture::*;
