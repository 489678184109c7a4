//! Mesh generation for voxel rendering.
//!
//! This module converts chunk voxel data into CPU-side vertex and index arrays. Every
//! exposed unit face becomes one quad; faces are not merged.
//!
//! # Architecture
//! - [`Mesh`]: The vertex and index arrays of one chunk
//! - [`Face`]: A single exposed block face and the quad it produces
//!
//! # Usage
//! ```no_run
//! use std::collections::HashMap;
//! use voxel_sandbox::engine_state::rendering::meshing::Mesh;
//! use voxel_sandbox::engine_state::voxels::chunk::Chunk;
//! use voxel_sandbox::engine_state::voxels::coordinates::ChunkCoord;
//!
//! let chunk = Chunk::empty(ChunkCoord::new(0, 0));
//! let mesh = Mesh::for_chunk(&chunk, &HashMap::new());
//! assert_eq!(mesh.quad_count(), 0);
//! ```
//!
//! # Performance Considerations
//! - Meshing scans the whole chunk: O(volume) with an O(1) test per face
//! - Arrays are rebuilt wholesale on every call

mod face;
mod mesh;

pub use face::Face;
pub use mesh::*;
