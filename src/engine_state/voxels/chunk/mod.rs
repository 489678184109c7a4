//! # Chunk Module
//!
//! This module provides the `Chunk` struct: a dense 16x16x16 grid of block bytes together
//! with the mesh generated from it and the GPU buffers that mesh was uploaded to.
//!
//! ## Storage
//!
//! The grid is one flat `Vec<BlockTypeSize>` indexed by `(x * 16 + y) * 16 + z`. Scanning
//! the vector front to back walks Z fastest, which is the order meshing visits blocks in.
//!
//! ## Neighbors
//!
//! A chunk never owns or borrows its neighbors. It stores the chunk coordinates of the
//! neighbors it was linked to (see [`NeighborLinks`]) and resolves them through a
//! [`ChunkLookup`] supplied by whoever owns all chunks, normally the
//! [`World`](super::world::World).
//!
//! ## GPU Resources
//!
//! Once uploaded, a chunk owns a [`ChunkGpuMesh`]. The handles are released exactly once,
//! either when a newer mesh replaces them or by [`Chunk::release_gpu_mesh`] during
//! teardown. Dropping a chunk that still holds handles leaves them registered in the
//! [`BufferState`], where the leak check reports them.

use std::collections::HashMap;

use cgmath::{Matrix4, Point3, Vector2, Vector3};
use chunk_iteration::ChunkBlockIterator;

use crate::engine_state::{
    buffer_state::{BufferState, ChunkGpuMesh},
    rendering::meshing::Mesh,
};
use crate::error::VoxelError;

use super::{
    block::{block_type::BlockType, Block, BlockTypeSize},
    coordinates::{self, ChunkCoord},
};

pub mod chunk_creation;
pub mod chunk_iteration;
mod neighbors;

pub use chunk_creation::{ChunkCreationIterator, FlatTerrain};
pub use neighbors::NeighborLinks;

/// The dimension (width, height, depth) of a chunk in blocks.
pub const CHUNK_DIMENSION: i32 = 16;
/// The number of blocks in a single 2D plane of a chunk (CHUNK_DIMENSION²).
pub const CHUNK_PLANE_SIZE: i32 = CHUNK_DIMENSION * CHUNK_DIMENSION;
/// The total number of blocks in a chunk (CHUNK_DIMENSION³).
pub const CHUNK_SIZE: i32 = CHUNK_PLANE_SIZE * CHUNK_DIMENSION;

/// Resolves chunk coordinates to chunks.
///
/// Neighbor links are plain coordinates; meshing goes through this trait to reach the
/// chunk behind a link.
pub trait ChunkLookup {
    /// Returns the chunk stored at `coord`, if any.
    fn chunk_at(&self, coord: ChunkCoord) -> Option<&Chunk>;
}

impl ChunkLookup for HashMap<ChunkCoord, Chunk> {
    fn chunk_at(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.get(&coord)
    }
}

/// Represents a 16x16x16 collection of voxel blocks in the world.
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    pub position: ChunkCoord,

    /// Block bytes, indexed by [`Chunk::index`].
    pub(crate) blocks: Vec<BlockTypeSize>,

    neighbors: NeighborLinks,

    /// The most recently generated mesh.
    mesh: Mesh,

    /// Set whenever `mesh` changed since the last upload.
    mesh_dirty: bool,

    gpu_mesh: Option<ChunkGpuMesh>,
}

impl Chunk {
    /// Creates a new, completely empty chunk (all blocks are air).
    pub fn empty(position: ChunkCoord) -> Self {
        let mut cci = ChunkCreationIterator::new(position);

        for _ in 0..CHUNK_SIZE {
            cci.push_block_type(BlockType::AIR.as_byte());
        }

        cci.return_chunk()
    }

    /// Creates a chunk filled by the flat terrain rule.
    ///
    /// Every column is identical: fill blocks up to the surface, the surface block on the
    /// surface layer, and air above.
    pub fn flat(position: ChunkCoord, terrain: &FlatTerrain) -> Self {
        let mut cci = ChunkCreationIterator::new(position);

        for _x in 0..CHUNK_DIMENSION {
            for y in 0..CHUNK_DIMENSION {
                for _z in 0..CHUNK_DIMENSION {
                    cci.push_block_type(terrain.block_at_height(y));
                }
            }
        }

        cci.return_chunk()
    }

    /// Creates a new chunk filled with solid blocks of one type.
    pub fn solid(position: ChunkCoord, block_type: BlockType) -> Self {
        let mut cci = ChunkCreationIterator::new(position);

        for _ in 0..CHUNK_SIZE {
            cci.push_block_type(block_type.as_byte());
        }

        cci.return_chunk()
    }

    /// Index of a local coordinate in the flat block vector.
    ///
    /// # Returns
    /// `None` if the coordinate is outside `[0, 16)` on any axis.
    pub fn index(local: Point3<i32>) -> Option<usize> {
        if !coordinates::is_local_in_bounds(local) {
            return None;
        }

        Some(((local.x * CHUNK_DIMENSION + local.y) * CHUNK_DIMENSION + local.z) as usize)
    }

    /// Inverse of [`Chunk::index`].
    pub fn local_from_index(index: usize) -> Point3<i32> {
        let index = index as i32;
        Point3::new(
            index / CHUNK_PLANE_SIZE,
            (index / CHUNK_DIMENSION) % CHUNK_DIMENSION,
            index % CHUNK_DIMENSION,
        )
    }

    /// Gets the block byte at a local coordinate.
    ///
    /// # Returns
    /// `None` if the coordinate is outside the chunk. Out-of-range reads are never
    /// wrapped or clamped.
    pub fn get_block(&self, local: Point3<i32>) -> Option<BlockTypeSize> {
        Chunk::index(local).map(|index| self.blocks[index])
    }

    /// Sets the block byte at a local coordinate.
    ///
    /// Only the grid changes; the mesh is regenerated separately.
    ///
    /// # Errors
    /// [`VoxelError::LocalOutOfBounds`] if the coordinate is outside the chunk.
    pub fn set_block(&mut self, local: Point3<i32>, value: BlockTypeSize) -> Result<(), VoxelError> {
        let index = Chunk::index(local).ok_or(VoxelError::LocalOutOfBounds(local))?;
        self.blocks[index] = value;
        Ok(())
    }

    /// Replaces the block at a local coordinate with air.
    ///
    /// # Errors
    /// [`VoxelError::LocalOutOfBounds`] if the coordinate is outside the chunk.
    pub fn remove_block(&mut self, local: Point3<i32>) -> Result<(), VoxelError> {
        self.set_block(local, BlockType::AIR.as_byte())
    }

    /// Checks whether the cell at `coord` lets light (and the camera) through.
    ///
    /// `coord` is relative to this chunk and may lie one step outside it. Inside the chunk
    /// a cell is transparent iff it holds air. Outside, the overflow on X or Z selects the
    /// neighbor in that direction and the coordinate is wrapped into it. A missing
    /// neighbor, or an overflow above or below the chunk layer, counts as open air, so the
    /// outward faces at the edge of the world are still drawn.
    pub fn is_transparent<L: ChunkLookup + ?Sized>(&self, coord: Point3<i32>, chunks: &L) -> bool {
        if let Some(block) = self.get_block(coord) {
            return block == BlockType::AIR.as_byte();
        }

        let direction = Vector2::new(overflow(coord.x), overflow(coord.z));
        if direction == Vector2::new(0, 0) {
            return true;
        }

        let wrapped = Point3::new(
            coord.x.rem_euclid(CHUNK_DIMENSION),
            coord.y.rem_euclid(CHUNK_DIMENSION),
            coord.z.rem_euclid(CHUNK_DIMENSION),
        );

        self.neighbors
            .get(direction)
            .and_then(|neighbor| chunks.chunk_at(neighbor))
            .and_then(|neighbor| neighbor.get_block(wrapped))
            .map_or(true, |block| block == BlockType::AIR.as_byte())
    }

    /// Registers the chunk lying at `offset` from this one.
    ///
    /// # Returns
    /// `false` if `offset` is not one of the four cardinal directions.
    pub fn set_neighbor(&mut self, offset: Vector2<i32>, neighbor: ChunkCoord) -> bool {
        self.neighbors.insert(offset, neighbor)
    }

    /// Forgets the neighbor at `offset`.
    pub fn remove_neighbor(&mut self, offset: Vector2<i32>) -> Option<ChunkCoord> {
        self.neighbors.remove(offset)
    }

    /// The neighbor links of this chunk.
    pub fn neighbors(&self) -> &NeighborLinks {
        &self.neighbors
    }

    /// Builds the mesh of this chunk without storing it.
    pub fn build_mesh<L: ChunkLookup + ?Sized>(&self, chunks: &L) -> Mesh {
        Mesh::for_chunk(self, chunks)
    }

    /// Regenerates and stores the mesh of this chunk.
    ///
    /// `chunks` must not need to reach this chunk itself; when the chunk lives inside the
    /// lookup, use [`World::reload_chunk`](super::world::World::reload_chunk) instead.
    pub fn generate_mesh<L: ChunkLookup + ?Sized>(&mut self, chunks: &L) {
        let mesh = self.build_mesh(chunks);
        self.replace_mesh(mesh);
    }

    /// Stores a freshly generated mesh and marks it for upload.
    pub fn replace_mesh(&mut self, mesh: Mesh) {
        self.mesh = mesh;
        self.mesh_dirty = true;
    }

    /// The most recently generated mesh.
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Whether the stored mesh changed since it was last uploaded.
    pub fn is_mesh_dirty(&self) -> bool {
        self.mesh_dirty
    }

    /// Returns an iterator over all solid blocks and their local coordinates.
    pub fn solid_blocks(&self) -> ChunkBlockIterator<'_> {
        ChunkBlockIterator::new(self)
    }

    /// Number of solid blocks in the chunk.
    pub fn solid_count(&self) -> usize {
        self.blocks.iter().filter(|block| **block != 0).count()
    }

    /// Block coordinate of local `(0, 0, 0)`.
    pub fn origin(&self) -> Point3<i32> {
        coordinates::chunk_origin(self.position)
    }

    /// Model matrix placing the chunk-local mesh in the world.
    pub fn model_matrix(&self) -> Matrix4<f32> {
        let origin = self.origin();
        Matrix4::from_translation(Vector3::new(
            origin.x as f32,
            origin.y as f32,
            origin.z as f32,
        ))
    }

    /// Uploads the stored mesh if it changed, releasing the previous GPU buffers first.
    ///
    /// # Returns
    /// `true` if an upload happened.
    pub fn upload_mesh(&mut self, buffer_state: &mut BufferState) -> bool {
        if !self.mesh_dirty {
            return false;
        }

        self.release_gpu_mesh(buffer_state);
        self.gpu_mesh = Some(buffer_state.upload_mesh(self.position, &self.mesh));
        self.mesh_dirty = false;
        true
    }

    /// Releases this chunk's GPU buffers, if it holds any.
    pub fn release_gpu_mesh(&mut self, buffer_state: &mut BufferState) {
        if let Some(gpu_mesh) = self.gpu_mesh.take() {
            buffer_state.release_mesh(gpu_mesh);
            self.mesh_dirty = true;
        }
    }

    /// The GPU buffers currently holding this chunk's mesh.
    pub fn gpu_mesh(&self) -> Option<&ChunkGpuMesh> {
        self.gpu_mesh.as_ref()
    }

    /// Returns the block at a local coordinate as a [`Block`].
    pub fn block(&self, local: Point3<i32>) -> Option<Block> {
        self.get_block(local).map(Block::from)
    }
}

/// Direction of a single-axis overflow out of `[0, 16)`.
fn overflow(value: i32) -> i32 {
    if value >= CHUNK_DIMENSION {
        1
    } else if value < 0 {
        -1
    } else {
        0
    }
}
