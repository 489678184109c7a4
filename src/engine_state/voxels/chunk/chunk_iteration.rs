//! # Chunk Iteration Module
//!
//! This module provides an iterator over the solid blocks of a chunk in storage order.

use cgmath::Point3;

use crate::engine_state::voxels::block::Block;

use super::Chunk;

/// An iterator over all non-air blocks in a chunk.
///
/// Yields each solid block together with its local coordinate, skipping air. The order
/// follows the flat storage layout, so two chunks with the same contents are always
/// visited the same way.
pub struct ChunkBlockIterator<'a> {
    /// Reference to the chunk being iterated over
    chunk_ref: &'a Chunk,
    /// Next index into the flat block vector
    current_offset: usize,
}

impl<'a> ChunkBlockIterator<'a> {
    /// Creates a new `ChunkBlockIterator` for the given chunk.
    pub fn new(chunk_ref: &'a Chunk) -> Self {
        ChunkBlockIterator {
            chunk_ref,
            current_offset: 0,
        }
    }
}

impl Iterator for ChunkBlockIterator<'_> {
    type Item = (Point3<i32>, Block);

    fn next(&mut self) -> Option<Self::Item> {
        let blocks = &self.chunk_ref.blocks;

        while self.current_offset < blocks.len() {
            let index = self.current_offset;
            self.current_offset += 1;

            if blocks[index] != 0 {
                return Some((Chunk::local_from_index(index), Block::from(blocks[index])));
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::coordinates::ChunkCoord;

    #[test]
    fn visits_only_solid_blocks_in_storage_order() {
        let mut chunk = Chunk::empty(ChunkCoord::new(0, 0));
        chunk.set_block(Point3::new(2, 0, 0), 4).unwrap();
        chunk.set_block(Point3::new(0, 3, 1), 2).unwrap();

        let visited: Vec<_> = chunk.solid_blocks().collect();
        assert_eq!(
            visited,
            vec![
                (Point3::new(0, 3, 1), Block::from(2)),
                (Point3::new(2, 0, 0), Block::from(4)),
            ]
        );
    }
}
