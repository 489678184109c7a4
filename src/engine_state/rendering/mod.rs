//! Rendering support for the voxel engine.
//!
//! This module contains everything the engine hands across the GPU boundary: chunk
//! meshes and their vertex format, the block texture atlas, and an in-memory backend
//! that stands in for a graphics API when running headless.

mod headless;
pub mod meshing;
pub mod texture;
mod vertex;

// Re-export commonly used types
pub use headless::HeadlessBackend;
pub use vertex::Vertex;
