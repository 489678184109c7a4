use cgmath::Point3;

use crate::engine_state::{
    rendering::Vertex,
    voxels::{
        block::{block_side::BlockSide, Block},
        coordinates,
    },
};

/// Represents a single exposed face of a block.
///
/// A face is identified by the chunk-local block it belongs to and the side it shows.
/// It expands into one quad of four vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Chunk-local coordinate of the block owning the face
    pub block_position: Point3<i32>,
    /// The block whose atlas tile textures the face
    pub block: Block,
    /// Which side of the block this face represents
    pub block_side: BlockSide,
}

impl Face {
    /// Creates a new face for the block at the given chunk-local coordinate.
    pub fn new(block_position: Point3<i32>, block: Block, block_side: BlockSide) -> Self {
        Face {
            block_position,
            block,
            block_side,
        }
    }

    /// Center of the owning block in chunk-local space.
    ///
    /// Block `i` covers `[i, i + 1)`, so its center is at `i + 0.5`.
    pub fn block_center(&self) -> Point3<f32> {
        coordinates::block_center(self.block_position)
    }

    /// Generates the four vertices of this face.
    ///
    /// Corner `i` of the side's corner table is paired with corner `i` of the block's
    /// atlas tile, so the tile is mapped once across the quad.
    pub fn vertices(&self) -> [Vertex; 4] {
        let center = self.block_center();
        let corners = self.block_side.corners();
        let tex_coords = self
            .block
            .atlas_tile_coords()
            .unwrap_or([[0.0, 0.0]; 4]);

        [
            Vertex::new(center + corners[0], tex_coords[0]),
            Vertex::new(center + corners[1], tex_coords[1]),
            Vertex::new(center + corners[2], tex_coords[2]),
            Vertex::new(center + corners[3], tex_coords[3]),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::{block_type::BlockType, ATLAS_TILE_SIZE};

    #[test]
    fn top_face_sits_on_the_upper_cell_boundary() {
        let face = Face::new(
            Point3::new(2, 3, 4),
            Block::new(BlockType::DIRT),
            BlockSide::TOP,
        );
        for vertex in face.vertices() {
            assert_eq!(vertex.position[1], 4.0);
            assert!((2.0..=3.0).contains(&vertex.position[0]));
            assert!((4.0..=5.0).contains(&vertex.position[2]));
        }
    }

    #[test]
    fn quad_spans_exactly_one_atlas_tile() {
        let face = Face::new(
            Point3::new(0, 0, 0),
            Block::new(BlockType::DIRT),
            BlockSide::FRONT,
        );
        let vertices = face.vertices();
        assert_eq!(vertices[0].tex_coords, [ATLAS_TILE_SIZE, 0.0]);
        assert_eq!(
            vertices[2].tex_coords,
            [2.0 * ATLAS_TILE_SIZE, ATLAS_TILE_SIZE]
        );
    }
}
