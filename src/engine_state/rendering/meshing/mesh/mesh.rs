//! Mesh data structures and operations for voxel rendering.
//!
//! This module turns a chunk's voxel grid into GPU-friendly vertex and index arrays.

use crate::engine_state::voxels::{
    block::block_side::BlockSide,
    chunk::{Chunk, ChunkLookup},
};

use super::face::Face;
use crate::engine_state::rendering::Vertex;

/// Index pattern of one quad: two triangles sharing the 0-2 diagonal.
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// The CPU-side mesh of a chunk.
///
/// Positions are chunk-local; the chunk's model matrix places them in the world.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Four vertices per emitted face
    pub vertices: Vec<Vertex>,
    /// Six indices per emitted face
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Creates a new, empty mesh.
    pub fn new() -> Self {
        Mesh {
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Generates the mesh of a chunk.
    ///
    /// Every solid block is tested against its six axis neighbors. A face is emitted for
    /// each neighbor that is transparent, looking across chunk boundaries through the
    /// chunk's neighbor links.
    ///
    /// # Arguments
    /// * `chunk` - The chunk to mesh
    /// * `chunks` - Resolves the chunk's neighbor links
    pub fn for_chunk<L: ChunkLookup + ?Sized>(chunk: &Chunk, chunks: &L) -> Self {
        let mut mesh = Mesh::new();

        for (local, block) in chunk.solid_blocks() {
            for side in BlockSide::all() {
                if chunk.is_transparent(local + side.normal(), chunks) {
                    mesh.push_face(&Face::new(local, block, side));
                }
            }
        }

        mesh
    }

    /// Appends the quad of a face to the mesh.
    pub fn push_face(&mut self, face: &Face) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&face.vertices());
        self.indices
            .extend(QUAD_INDICES.iter().map(|index| base + index));
    }

    /// Number of quads in the mesh.
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    /// Number of indices to draw.
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Whether the mesh has no geometry.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The vertex array as raw bytes for the GPU boundary.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// The index array as raw bytes for the GPU boundary.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use cgmath::Point3;

    use super::*;
    use crate::engine_state::voxels::{block::block_type::BlockType, coordinates::ChunkCoord};

    #[test]
    fn lone_block_emits_six_quads() {
        let mut chunk = Chunk::empty(ChunkCoord::new(0, 0));
        chunk
            .set_block(Point3::new(5, 5, 5), BlockType::STONE.as_byte())
            .unwrap();

        let mesh = Mesh::for_chunk(&chunk, &HashMap::new());
        assert_eq!(mesh.quad_count(), 6);
        assert_eq!(mesh.indices.len(), 36);
        assert_eq!(&mesh.indices[6..12], &[4, 5, 6, 6, 7, 4]);
    }

    #[test]
    fn touching_blocks_hide_their_shared_faces() {
        let mut chunk = Chunk::empty(ChunkCoord::new(0, 0));
        chunk.set_block(Point3::new(5, 5, 5), 1).unwrap();
        chunk.set_block(Point3::new(6, 5, 5), 1).unwrap();

        let mesh = Mesh::for_chunk(&chunk, &HashMap::new());
        assert_eq!(mesh.quad_count(), 10);
    }

    #[test]
    fn byte_views_cover_the_whole_arrays() {
        let mut chunk = Chunk::empty(ChunkCoord::new(0, 0));
        chunk.set_block(Point3::new(0, 0, 0), 1).unwrap();

        let mesh = Mesh::for_chunk(&chunk, &HashMap::new());
        assert_eq!(mesh.vertex_bytes().len(), mesh.vertices.len() * Vertex::STRIDE);
        assert_eq!(mesh.index_bytes().len(), mesh.indices.len() * 4);
    }
}
