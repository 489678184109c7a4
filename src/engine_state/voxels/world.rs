//! # World Module
//!
//! This module provides the `World` struct which owns every chunk of the voxel world and
//! is the only way the rest of the engine reads or edits blocks by world position.
//!
//! ## Architecture
//!
//! Chunks live in a hash map keyed by their 2D chunk coordinate. The world is a single
//! layer of chunks, so block Y is used directly as the local Y and anything outside
//! `0..16` is empty space.
//!
//! ## Chunk Generation
//!
//! [`World::generate_world`] runs in two phases. First every chunk of the requested
//! rectangle is created from the flat terrain rule. Then each chunk is linked to the
//! cardinal neighbors that exist and meshed. Linking only happens after all chunks exist,
//! so a chunk meshed in the second phase already sees every neighbor it will ever have.
//!
//! ## Edits
//!
//! An edit mutates one chunk's grid and remeshes that chunk in full. When the edited block
//! sits on the chunk's X or Z boundary, the chunk across that boundary is remeshed as well
//! so its culled faces follow the edit. That second remesh can be switched off.

use std::collections::HashMap;

use cgmath::{Point3, Vector2};

use crate::engine_state::buffer_state::BufferState;
use crate::error::VoxelError;

use super::{
    block::{block_type::BlockType, BlockTypeSize},
    chunk::{Chunk, ChunkLookup, FlatTerrain, CHUNK_DIMENSION},
    coordinates::{self, ChunkCoord, CARDINAL_OFFSETS},
};

/// Represents the voxel world: a fixed grid of chunks.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_sandbox::engine_state::voxels::{chunk::FlatTerrain, world::World};
///
/// let mut world = World::new(FlatTerrain {
///     surface_height: 8,
///     surface_block: 1,
///     fill_block: 2,
/// });
/// world.generate_world(1, 1);
///
/// assert!(world.block_at(Point3::new(0.5, 8.5, 0.5)));
/// assert!(!world.block_at(Point3::new(0.5, 9.5, 0.5)));
/// ```
pub struct World {
    /// A mapping from chunk coordinates to chunk data.
    chunks: HashMap<ChunkCoord, Chunk>,
    /// The rule new chunks are filled with.
    terrain: FlatTerrain,
    /// Whether boundary edits also remesh the chunk across the boundary.
    remesh_neighbors_on_edit: bool,
}

impl World {
    /// Creates a new, empty world that will generate chunks with `terrain`.
    pub fn new(terrain: FlatTerrain) -> Self {
        World {
            chunks: HashMap::new(),
            terrain,
            remesh_neighbors_on_edit: true,
        }
    }

    /// Sets whether boundary edits remesh the adjacent chunk.
    pub fn with_remesh_neighbors_on_edit(mut self, enabled: bool) -> Self {
        self.remesh_neighbors_on_edit = enabled;
        self
    }

    /// Generates every chunk with `-extent_x <= x <= extent_x` and
    /// `-extent_z <= z <= extent_z`, links neighbors and meshes them.
    ///
    /// Chunks that already exist are kept as they are but are relinked and remeshed.
    ///
    /// # Arguments
    /// * `extent_x` - Half-extent of the grid along X, in chunks
    /// * `extent_z` - Half-extent of the grid along Z, in chunks
    pub fn generate_world(&mut self, extent_x: i32, extent_z: i32) {
        let extent_x = extent_x.max(0);
        let extent_z = extent_z.max(0);

        for x in -extent_x..=extent_x {
            for z in -extent_z..=extent_z {
                let position = ChunkCoord::new(x, z);
                if !self.chunks.contains_key(&position) {
                    self.chunks.insert(position, Chunk::flat(position, &self.terrain));
                }
            }
        }

        let mut positions: Vec<ChunkCoord> = self.chunks.keys().copied().collect();
        positions.sort_by_key(|position| (position.x, position.y));

        for position in positions {
            self.link_neighbors(position);
            self.reload_chunk(position);
        }

        log::info!(
            "Generated world of {} chunks ({}x{})",
            self.chunks.len(),
            extent_x * 2 + 1,
            extent_z * 2 + 1
        );
    }

    /// Links a chunk to every cardinal neighbor that currently exists.
    ///
    /// # Returns
    /// The number of links registered.
    pub fn link_neighbors(&mut self, position: ChunkCoord) -> usize {
        let present: Vec<(Vector2<i32>, ChunkCoord)> = CARDINAL_OFFSETS
            .iter()
            .map(|offset| (*offset, position + *offset))
            .filter(|(_, neighbor)| self.chunks.contains_key(neighbor))
            .collect();

        let Some(chunk) = self.chunks.get_mut(&position) else {
            return 0;
        };

        present
            .into_iter()
            .filter(|(offset, neighbor)| chunk.set_neighbor(*offset, *neighbor))
            .count()
    }

    /// Removes the links between two adjacent chunks, in both directions.
    ///
    /// Meshes are not touched; call [`World::reload_chunk`] on both to see the effect.
    ///
    /// # Returns
    /// `true` if at least one link was removed.
    pub fn unlink_chunks(&mut self, a: ChunkCoord, b: ChunkCoord) -> bool {
        let offset = b - a;
        let mut removed = false;

        if let Some(chunk) = self.chunks.get_mut(&a) {
            removed |= chunk.remove_neighbor(offset).is_some();
        }
        if let Some(chunk) = self.chunks.get_mut(&b) {
            removed |= chunk.remove_neighbor(-offset).is_some();
        }

        removed
    }

    /// Checks whether the block containing a world position is solid.
    ///
    /// # Returns
    /// `false` if the owning chunk is not loaded or the position is outside the chunk
    /// layer.
    pub fn block_at(&self, position: Point3<f32>) -> bool {
        self.is_solid_block(coordinates::world_to_block(position))
    }

    /// Checks whether a block coordinate holds a solid block.
    pub fn is_solid_block(&self, block: Point3<i32>) -> bool {
        self.block_type_at(block)
            .map_or(false, |value| value != BlockType::AIR.as_byte())
    }

    /// Gets the block byte at a block coordinate.
    ///
    /// # Returns
    /// `None` if the owning chunk is not loaded or the block is outside the chunk layer.
    pub fn block_type_at(&self, block: Point3<i32>) -> Option<BlockTypeSize> {
        let local = coordinates::block_to_local(block)?;
        self.chunks
            .get(&coordinates::block_to_chunk(block))?
            .get_block(local)
    }

    /// Sets the block containing a world position and remeshes what the edit affects.
    ///
    /// # Returns
    /// The coordinate of the edited chunk.
    ///
    /// # Errors
    /// See [`World::set_block_at`].
    pub fn set_block(
        &mut self,
        position: Point3<f32>,
        value: BlockTypeSize,
    ) -> Result<ChunkCoord, VoxelError> {
        self.set_block_at(coordinates::world_to_block(position), value)
    }

    /// Replaces the block containing a world position with air.
    ///
    /// # Errors
    /// See [`World::set_block_at`].
    pub fn remove_block(&mut self, position: Point3<f32>) -> Result<ChunkCoord, VoxelError> {
        self.set_block(position, BlockType::AIR.as_byte())
    }

    /// Sets a block by block coordinate and remeshes what the edit affects.
    ///
    /// # Errors
    /// * [`VoxelError::OutsideVerticalRange`] if the block is above or below the chunk layer
    /// * [`VoxelError::MissingChunk`] if the owning chunk is not loaded
    pub fn set_block_at(
        &mut self,
        block: Point3<i32>,
        value: BlockTypeSize,
    ) -> Result<ChunkCoord, VoxelError> {
        let local =
            coordinates::block_to_local(block).ok_or(VoxelError::OutsideVerticalRange(block.y))?;
        let position = coordinates::block_to_chunk(block);

        let chunk = self
            .chunks
            .get_mut(&position)
            .ok_or(VoxelError::MissingChunk(position))?;
        chunk.set_block(local, value)?;

        log::debug!(
            "Set block ({}, {}, {}) to {} in chunk ({}, {})",
            block.x,
            block.y,
            block.z,
            value,
            position.x,
            position.y
        );

        self.reload_chunk(position);

        if self.remesh_neighbors_on_edit {
            for neighbor in self.neighbors_across_boundary(position, local) {
                self.reload_chunk(neighbor);
            }
        }

        Ok(position)
    }

    /// Removes a block by block coordinate.
    ///
    /// # Errors
    /// See [`World::set_block_at`].
    pub fn remove_block_at(&mut self, block: Point3<i32>) -> Result<ChunkCoord, VoxelError> {
        self.set_block_at(block, BlockType::AIR.as_byte())
    }

    /// Regenerates the mesh of a chunk.
    ///
    /// # Returns
    /// `false` if no chunk is loaded at `position`.
    pub fn reload_chunk(&mut self, position: ChunkCoord) -> bool {
        let Some(chunk) = self.chunks.get(&position) else {
            return false;
        };
        let mesh = chunk.build_mesh(&self.chunks);

        log::debug!(
            "Remeshed chunk ({}, {}): {} quads",
            position.x,
            position.y,
            mesh.quad_count()
        );

        match self.chunks.get_mut(&position) {
            Some(chunk) => {
                chunk.replace_mesh(mesh);
                true
            }
            None => false,
        }
    }

    /// The linked chunks sharing a face with a local cell on the chunk boundary.
    fn neighbors_across_boundary(&self, position: ChunkCoord, local: Point3<i32>) -> Vec<ChunkCoord> {
        let Some(chunk) = self.chunks.get(&position) else {
            return Vec::new();
        };

        let last = CHUNK_DIMENSION - 1;
        let mut offsets = Vec::new();
        if local.x == 0 {
            offsets.push(Vector2::new(-1, 0));
        }
        if local.x == last {
            offsets.push(Vector2::new(1, 0));
        }
        if local.z == 0 {
            offsets.push(Vector2::new(0, -1));
        }
        if local.z == last {
            offsets.push(Vector2::new(0, 1));
        }

        offsets
            .into_iter()
            .filter_map(|offset| chunk.neighbors().get(offset))
            .collect()
    }

    /// Returns the chunk at `position`, if loaded.
    pub fn chunk(&self, position: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&position)
    }

    /// Returns the chunk at `position` mutably, if loaded.
    ///
    /// Edits made through the chunk are not remeshed automatically.
    pub fn chunk_mut(&mut self, position: ChunkCoord) -> Option<&mut Chunk> {
        self.chunks.get_mut(&position)
    }

    /// Iterates over all loaded chunks.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// Number of loaded chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Uploads every mesh that changed since its last upload.
    ///
    /// # Returns
    /// The number of chunks uploaded.
    pub fn upload_dirty_meshes(&mut self, buffer_state: &mut BufferState) -> usize {
        self.chunks
            .values_mut()
            .map(|chunk| chunk.upload_mesh(buffer_state))
            .filter(|uploaded| *uploaded)
            .count()
    }

    /// Releases the GPU buffers of every chunk.
    pub fn teardown(&mut self, buffer_state: &mut BufferState) {
        for chunk in self.chunks.values_mut() {
            chunk.release_gpu_mesh(buffer_state);
        }

        log::info!("Released GPU meshes of {} chunks", self.chunks.len());
    }
}

impl ChunkLookup for World {
    fn chunk_at(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }
}
