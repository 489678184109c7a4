//! # Voxel Engine Core
//!
//! This module contains the voxel data model and the queries that run against it.
//!
//! ## Architecture
//!
//! The voxel system is organized into several key components:
//!
//! * **Block**: Block types, their faces and their atlas tiles
//! * **Chunk**: Fixed 16x16x16 grids of blocks, each meshing itself
//! * **Coordinates**: Conversions between world, block, chunk and local space
//! * **World**: Owns every chunk and addresses blocks by world position
//! * **Raycast**: Grid traversal for block selection
//!
//! ## Data Flow
//!
//! 1. World receives requests for block access or modification
//! 2. World delegates to the owning chunk
//! 3. Changes remesh the edited chunk, and its neighbor for boundary edits
//! 4. Changed meshes are uploaded by whoever owns the buffer state

pub mod block;
pub mod chunk;
pub mod coordinates;
pub mod raycast;
pub mod world;
