//! # Coordinate Spaces
//!
//! The engine works with four coordinate spaces:
//!
//! * **World** - continuous `Point3<f32>` positions (player, camera, ray origins)
//! * **Block** - integer `Point3<i32>` cells; block `i` covers `[i, i + 1)` on each axis
//! * **Chunk** - integer `Point2<i32>` keys `(x, z)`; the world has a single chunk layer
//! * **Local** - cell inside a chunk, `[0, 16)` on every axis
//!
//! X and Z decompose with euclidean division so negative blocks land in the right chunk
//! with a non-negative local coordinate. Y is never wrapped: the chunk layer spans blocks
//! `0..16` and anything outside it has no local coordinate.

use cgmath::{Point2, Point3, Vector2};

use super::chunk::CHUNK_DIMENSION;

/// Key of a chunk in the world map: `x` is the chunk X, `y` is the chunk Z.
pub type ChunkCoord = Point2<i32>;

/// The four cardinal offsets between horizontally adjacent chunks.
pub const CARDINAL_OFFSETS: [Vector2<i32>; 4] = [
    Vector2::new(1, 0),
    Vector2::new(-1, 0),
    Vector2::new(0, 1),
    Vector2::new(0, -1),
];

/// Returns the block containing a world position.
pub fn world_to_block(position: Point3<f32>) -> Point3<i32> {
    Point3::new(
        position.x.floor() as i32,
        position.y.floor() as i32,
        position.z.floor() as i32,
    )
}

/// Returns the world position of the center of a block.
pub fn block_center(block: Point3<i32>) -> Point3<f32> {
    Point3::new(
        block.x as f32 + 0.5,
        block.y as f32 + 0.5,
        block.z as f32 + 0.5,
    )
}

/// Returns the chunk that owns a block.
pub fn block_to_chunk(block: Point3<i32>) -> ChunkCoord {
    ChunkCoord::new(
        block.x.div_euclid(CHUNK_DIMENSION),
        block.z.div_euclid(CHUNK_DIMENSION),
    )
}

/// Returns the local coordinate of a block inside its owning chunk.
///
/// # Returns
/// `None` if the block is above or below the chunk layer.
pub fn block_to_local(block: Point3<i32>) -> Option<Point3<i32>> {
    if !(0..CHUNK_DIMENSION).contains(&block.y) {
        return None;
    }

    Some(Point3::new(
        block.x.rem_euclid(CHUNK_DIMENSION),
        block.y,
        block.z.rem_euclid(CHUNK_DIMENSION),
    ))
}

/// Recombines a chunk key and a local coordinate into a block coordinate.
pub fn local_to_block(chunk: ChunkCoord, local: Point3<i32>) -> Point3<i32> {
    let origin = chunk_origin(chunk);
    Point3::new(origin.x + local.x, local.y, origin.z + local.z)
}

/// Returns the block coordinate of a chunk's local `(0, 0, 0)` cell.
///
/// This is also the translation of the chunk's model matrix.
pub fn chunk_origin(chunk: ChunkCoord) -> Point3<i32> {
    Point3::new(chunk.x * CHUNK_DIMENSION, 0, chunk.y * CHUNK_DIMENSION)
}

/// Whether a local coordinate lies inside a chunk.
pub fn is_local_in_bounds(local: Point3<i32>) -> bool {
    let range = 0..CHUNK_DIMENSION;
    range.contains(&local.x) && range.contains(&local.y) && range.contains(&local.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_blocks_decompose_into_previous_chunk() {
        let block = Point3::new(-1, 3, -17);
        assert_eq!(block_to_chunk(block), ChunkCoord::new(-1, -2));
        assert_eq!(block_to_local(block), Some(Point3::new(15, 3, 15)));
    }

    #[test]
    fn decomposition_recombines_to_the_same_block() {
        for x in -40..40 {
            for z in [-33, -16, -1, 0, 15, 16, 31] {
                let block = Point3::new(x, 7, z);
                let local = block_to_local(block).unwrap();
                assert!(is_local_in_bounds(local));
                assert_eq!(local_to_block(block_to_chunk(block), local), block);
            }
        }
    }

    #[test]
    fn vertical_range_is_not_wrapped() {
        assert_eq!(block_to_local(Point3::new(0, 16, 0)), None);
        assert_eq!(block_to_local(Point3::new(0, -1, 0)), None);
    }

    #[test]
    fn world_positions_floor_into_blocks() {
        assert_eq!(
            world_to_block(Point3::new(-0.25, 8.0, 15.99)),
            Point3::new(-1, 8, 15)
        );
        assert_eq!(block_center(Point3::new(-1, 0, 2)), Point3::new(-0.5, 0.5, 2.5));
    }
}
