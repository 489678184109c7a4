//! # Error Types
//!
//! Every fallible operation in the engine reports its failure as a value. None of these
//! errors is fatal to the simulation: callers may log them and carry on with the next
//! frame.

use cgmath::Point3;
use thiserror::Error;

use crate::engine_state::voxels::coordinates::ChunkCoord;

/// Errors raised when addressing or mutating voxel data.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum VoxelError {
    /// A chunk-local coordinate fell outside `[0, 16)` on some axis.
    #[error("local coordinate ({}, {}, {}) is outside the chunk", .0.x, .0.y, .0.z)]
    LocalOutOfBounds(Point3<i32>),

    /// No chunk is loaded at the coordinate that owns the requested block.
    #[error("no chunk loaded at ({}, {})", .0.x, .0.y)]
    MissingChunk(ChunkCoord),

    /// The block lies above or below the single chunk layer.
    #[error("block y = {0} is outside the chunk layer")]
    OutsideVerticalRange(i32),
}

/// Errors raised while loading an [`EngineConfig`](crate::application_state::config::EngineConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid JSON for the config schema.
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while decoding the texture atlas.
#[derive(Debug, Error)]
pub enum AtlasError {
    /// The image decoder rejected the atlas bytes.
    #[error("failed to decode atlas: {0}")]
    Decode(#[from] image::ImageError),

    /// The atlas file could not be read.
    #[error("failed to read atlas: {0}")]
    Io(#[from] std::io::Error),

    /// The decoded atlas does not have the expected dimensions.
    #[error("atlas is {actual_width}x{actual_height}, expected {expected_width}x{expected_height}")]
    SizeMismatch {
        /// Width the config asks for.
        expected_width: u32,
        /// Height the config asks for.
        expected_height: u32,
        /// Width of the decoded image.
        actual_width: u32,
        /// Height of the decoded image.
        actual_height: u32,
    },
}

/// GPU resources that were still alive when a leak check ran.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("{buffers} buffer(s) and {textures} texture(s) were never released")]
pub struct ResourceLeak {
    /// Number of live buffers.
    pub buffers: usize,
    /// Number of live textures.
    pub textures: usize,
}
