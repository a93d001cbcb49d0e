//! The GL-free core of glsandbox. This crate contains everything that can be
//! expressed as plain data or math: vertex records and attribute layouts,
//! draw-call planning, the free-look camera, sprite sheets and animations,
//! frame timing, mouse input, materials and lights, and configuration.
//!
//! The OpenGL side lives in the `glsandbox` binary and consumes these types.

pub mod animation;
pub mod camera;
pub mod config;
pub mod input;
pub mod layout;
pub mod material;
pub mod plot;
pub mod shapes;
pub mod sprite;
pub mod timer;
pub mod uniform;
pub mod vertex;

pub use animation::Animation;
pub use camera::{Camera, CameraConfig};
pub use config::{ConfigError, SandboxConfig};
pub use input::MouseInput;
pub use layout::{AttributeBinding, DrawCall, Primitive, VertexLayout};
pub use material::{Light, Material};
pub use sprite::SpriteSheet;
pub use timer::FrameTimer;
pub use uniform::UniformValue;
pub use vertex::{Attribute, AttributeMask, Vertex};
