//! Mesh generation for voxel rendering.
//!
//! Chunks are meshed face by face: every visible side of every solid block becomes one
//! textured quad. There is no merging of coplanar faces, so a chunk's mesh grows with
//! its exposed surface.

mod mesh;

// Re-export the mesh module's public interface for external use
pub use mesh::*;
