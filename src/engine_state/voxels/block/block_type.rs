//! # Block Type Module
//!
//! This module defines the named block types of the sandbox. The world itself stores raw
//! bytes; a `BlockType` is only a convenient, checked view of such a byte.

use num_derive::FromPrimitive;

use super::BlockTypeSize;

/// Enumerates the block types known to the sandbox.
///
/// The discriminant of each variant is the byte stored in the chunk grid. `AIR` is always
/// zero; every other value selects atlas tile `value - 1`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
#[repr(u8)]
pub enum BlockType {
    /// Empty space. Transparent and never meshed.
    AIR = 0,

    /// Grass, used as the top layer of the flat world.
    GRASS = 1,

    /// Dirt, used to fill the flat world below the surface.
    DIRT = 2,

    /// Stone.
    STONE = 3,

    /// Wooden planks.
    WOOD = 4,
}

impl BlockType {
    /// Converts a raw grid byte into a `BlockType`.
    ///
    /// # Returns
    /// `None` when the byte has no named block type. Such bytes are still valid grid values
    /// and render with their atlas tile.
    pub fn from_byte(btype: BlockTypeSize) -> Option<Self> {
        num::FromPrimitive::from_u8(btype)
    }

    /// Returns the raw byte stored in the chunk grid for this type.
    pub fn as_byte(self) -> BlockTypeSize {
        self as BlockTypeSize
    }

    /// Whether this block type occupies space.
    pub fn is_solid(self) -> bool {
        self != BlockType::AIR
    }
}

impl From<BlockType> for BlockTypeSize {
    fn from(block_type: BlockType) -> Self {
        block_type.as_byte()
    }
}
