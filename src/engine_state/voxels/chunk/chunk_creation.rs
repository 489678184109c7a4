//! # Chunk Creation Module
//!
//! This module provides a builder that fills a chunk's flat block vector in storage order,
//! and the flat terrain rule used to generate the world.
//!
//! Blocks must be pushed in the same order [`Chunk::index`] lays them out: X outermost,
//! then Y, then Z innermost.

use crate::engine_state::{
    rendering::meshing::Mesh,
    voxels::{block::BlockTypeSize, coordinates::ChunkCoord},
};

use super::{Chunk, NeighborLinks, CHUNK_SIZE};

/// The flat-height world generation rule.
///
/// Every column of every chunk is the same: `fill_block` below `surface_height`,
/// `surface_block` at it, and air above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatTerrain {
    /// Local Y of the topmost solid layer. Negative values produce empty chunks.
    pub surface_height: i32,
    /// Block placed on the surface layer.
    pub surface_block: BlockTypeSize,
    /// Block placed below the surface layer.
    pub fill_block: BlockTypeSize,
}

impl FlatTerrain {
    /// Returns the block byte this rule places at a given height.
    pub fn block_at_height(&self, y: i32) -> BlockTypeSize {
        if y == self.surface_height {
            self.surface_block
        } else if y < self.surface_height {
            self.fill_block
        } else {
            0
        }
    }
}

/// A builder for creating and populating chunks.
///
/// Blocks are appended one at a time in storage order; the builder tracks how many have
/// been pushed and pads any remainder with air when the chunk is returned.
pub struct ChunkCreationIterator {
    /// The chunk coordinate of the chunk being created
    position: ChunkCoord,
    /// Block bytes pushed so far
    blocks: Vec<BlockTypeSize>,
}

impl ChunkCreationIterator {
    /// Creates a new `ChunkCreationIterator` for building a chunk at the given position.
    pub fn new(position: ChunkCoord) -> Self {
        ChunkCreationIterator {
            position,
            blocks: Vec::with_capacity(CHUNK_SIZE as usize),
        }
    }

    /// Finalizes the chunk creation and returns the constructed `Chunk`.
    ///
    /// Missing blocks are filled with air; extra blocks beyond the chunk volume are
    /// dropped. The chunk starts with no neighbor links and an empty mesh.
    pub fn return_chunk(mut self) -> Chunk {
        self.blocks.resize(CHUNK_SIZE as usize, 0);

        Chunk {
            position: self.position,
            blocks: self.blocks,
            neighbors: NeighborLinks::default(),
            mesh: Mesh::new(),
            mesh_dirty: false,
            gpu_mesh: None,
        }
    }

    /// Adds a block at the current position and advances to the next one.
    pub fn push_block_type(&mut self, block_type: BlockTypeSize) {
        if self.blocks.len() < CHUNK_SIZE as usize {
            self.blocks.push(block_type);
        }
    }

    /// Number of blocks pushed so far.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether no block has been pushed yet.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Point3;

    use super::*;

    #[test]
    fn short_input_is_padded_with_air() {
        let mut cci = ChunkCreationIterator::new(ChunkCoord::new(0, 0));
        cci.push_block_type(3);
        assert_eq!(cci.len(), 1);

        let chunk = cci.return_chunk();
        assert_eq!(chunk.get_block(Point3::new(0, 0, 0)), Some(3));
        assert_eq!(chunk.get_block(Point3::new(0, 0, 1)), Some(0));
        assert_eq!(chunk.solid_count(), 1);
    }

    #[test]
    fn terrain_rule_layers() {
        let terrain = FlatTerrain {
            surface_height: 15,
            surface_block: 1,
            fill_block: 2,
        };
        assert_eq!(terrain.block_at_height(15), 1);
        assert_eq!(terrain.block_at_height(0), 2);
        assert_eq!(terrain.block_at_height(16), 0);
    }
}
