//! Rendering
//!
//! `scene` describes a frame in canvas pixels; `shapes` turns it into
//! triangles and `pipeline` draws them with wgpu.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{DrawCmd, Scene, build_scene};
