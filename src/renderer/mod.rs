//! Rendering module
//!
//! The scene is built as a draw list in screen pixels, tessellated into
//! triangles and presented through a small WebGPU pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::DrawCommand;
pub use shapes::tessellate;
pub use vertex::Vertex;
