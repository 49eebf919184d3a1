//! WebGPU rendering module
//!
//! The scene is a flat list of colored triangles: two bars per pipe and a
//! fan for the bird. Geometry is rebuilt from `GameState` every frame.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;
