use std::collections::HashMap;

use cgmath::Vector2;

use crate::engine_state::voxels::coordinates::{ChunkCoord, CARDINAL_OFFSETS};

/// The cardinal neighbors a chunk was linked to.
///
/// Maps a relative offset (`(±1, 0)` or `(0, ±1)`) to the coordinate of the chunk at that
/// offset. The links are coordinates, not references: the world owns every chunk and a
/// link only says where to look.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NeighborLinks {
    links: HashMap<Vector2<i32>, ChunkCoord>,
}

impl NeighborLinks {
    /// Registers a neighbor. Non-cardinal offsets (including self) are refused.
    pub fn insert(&mut self, offset: Vector2<i32>, neighbor: ChunkCoord) -> bool {
        if !CARDINAL_OFFSETS.contains(&offset) {
            return false;
        }

        self.links.insert(offset, neighbor);
        true
    }

    /// Removes the neighbor at `offset`.
    pub fn remove(&mut self, offset: Vector2<i32>) -> Option<ChunkCoord> {
        self.links.remove(&offset)
    }

    /// The neighbor registered at `offset`.
    pub fn get(&self, offset: Vector2<i32>) -> Option<ChunkCoord> {
        self.links.get(&offset).copied()
    }

    /// Number of registered neighbors.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether no neighbor is registered.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Iterates over `(offset, neighbor)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Vector2<i32>, ChunkCoord)> + '_ {
        self.links.iter().map(|(offset, neighbor)| (*offset, *neighbor))
    }
}
