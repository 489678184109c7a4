//! # Block Module
//!
//! This module provides the block-level vocabulary of the engine: the raw byte stored per
//! cell, the named block types, block faces, and the atlas tile lookup for a block.

use block_type::BlockType;

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block types in memory.
/// Zero is air; every other value selects an atlas tile.
pub type BlockTypeSize = u8;

/// Number of tiles along each edge of the texture atlas.
pub const ATLAS_TILES_PER_ROW: u32 = 16;

/// Edge length of one atlas tile in normalized texture coordinates.
pub const ATLAS_TILE_SIZE: f32 = 1.0 / ATLAS_TILES_PER_ROW as f32;

/// Represents a single voxel block in the world.
///
/// # Memory Layout
/// The `#[repr(C)]` attribute keeps the layout stable so block data can be handed to the
/// GPU boundary as bytes.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq, Eq)]
pub struct Block {
    /// The type of this block, encoded as a `BlockTypeSize` for compact storage.
    pub block_type: BlockTypeSize,
}

impl Block {
    /// Creates a new block of the specified type.
    pub fn new(block_type: BlockType) -> Self {
        Block {
            block_type: block_type as BlockTypeSize,
        }
    }

    /// Whether this block is air.
    pub fn is_air(&self) -> bool {
        self.block_type == 0
    }

    /// Returns the texture coordinates of the four corners of this block's atlas tile.
    ///
    /// The tile index is `block_type - 1`, laid out row-major over a 16x16 grid. The
    /// corners are returned in the same order as [`BlockSide::corners`](block_side::BlockSide::corners):
    /// origin, +u, +u+v, +v.
    ///
    /// # Returns
    /// `None` for air, which has no tile.
    pub fn atlas_tile_coords(&self) -> Option<[[f32; 2]; 4]> {
        let tile_index = u32::from(self.block_type).checked_sub(1)?;
        let u = (tile_index % ATLAS_TILES_PER_ROW) as f32 * ATLAS_TILE_SIZE;
        let v = (tile_index / ATLAS_TILES_PER_ROW) as f32 * ATLAS_TILE_SIZE;

        Some([
            [u, v],
            [u + ATLAS_TILE_SIZE, v],
            [u + ATLAS_TILE_SIZE, v + ATLAS_TILE_SIZE],
            [u, v + ATLAS_TILE_SIZE],
        ])
    }
}

impl From<BlockTypeSize> for Block {
    fn from(block_type: BlockTypeSize) -> Self {
        Block { block_type }
    }
}
