//! WebGPU rendering module
//!
//! Flat-colored triangles: the table, its rails, the balls and the aim line.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::{rail_color, table_vertices};
pub use vertex::Vertex;
