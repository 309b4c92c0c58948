//! WebGPU rendering module
//!
//! Flat-coloured triangles only: the simulation hands over body transforms,
//! [`shapes`] turns them into vertices in field pixels and the pipeline maps
//! those to the canvas.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::scene_vertices;
pub use vertex::Vertex;
