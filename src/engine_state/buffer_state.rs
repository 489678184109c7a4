//! # Buffer State Module
//!
//! This module is the engine's side of the GPU boundary. The actual graphics API lives
//! behind the [`GpuBackend`] trait; `BufferState` sits in front of it and keeps a registry
//! of every buffer and texture the engine created.
//!
//! ## Ownership
//!
//! Handles are neither `Clone` nor `Copy`. Releasing a resource consumes its handle, so a
//! resource cannot be released twice, and anything never released stays in the registry
//! where [`BufferState::leak_check`] finds it.
//!
//! ## Analytics
//!
//! Each live buffer carries the number of bytes uploaded to it, so memory use can be
//! reported the same way the renderer's debug keys used to.

use std::collections::HashMap;

use crate::engine_state::{rendering::meshing::Mesh, voxels::coordinates::ChunkCoord};
use crate::error::ResourceLeak;

/// What a GPU buffer is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferUsage {
    /// Vertex attribute data
    Vertex,
    /// Triangle indices
    Index,
}

/// Opaque identifier of a GPU buffer.
#[derive(Debug, PartialEq, Eq, Hash)]
#[must_use = "GPU buffers must be released through BufferState"]
pub struct BufferHandle(u64);

/// Opaque identifier of a GPU texture.
#[derive(Debug, PartialEq, Eq, Hash)]
#[must_use = "GPU textures must be released through BufferState"]
pub struct TextureHandle(u64);

impl BufferHandle {
    /// Wraps a backend-specific id.
    pub fn new(id: u64) -> Self {
        BufferHandle(id)
    }

    /// The backend-specific id.
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl TextureHandle {
    /// Wraps a backend-specific id.
    pub fn new(id: u64) -> Self {
        TextureHandle(id)
    }

    /// The backend-specific id.
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// The graphics API the engine uploads to.
///
/// Implementations create and destroy resources; they never see chunks or meshes, only
/// byte payloads.
pub trait GpuBackend {
    /// Creates a buffer initialized with `contents` and returns its id.
    fn create_buffer(&mut self, label: &str, usage: BufferUsage, contents: &[u8]) -> u64;

    /// Destroys a buffer previously returned by `create_buffer`.
    fn destroy_buffer(&mut self, id: u64);

    /// Creates an RGBA32F texture from normalized texel samples and returns its id.
    fn create_texture(&mut self, label: &str, width: u32, height: u32, texels: &[f32]) -> u64;

    /// Destroys a texture previously returned by `create_texture`.
    fn destroy_texture(&mut self, id: u64);
}

/// The GPU buffers holding one chunk's mesh.
#[derive(Debug)]
#[must_use = "chunk meshes must be released through BufferState"]
pub struct ChunkGpuMesh {
    /// Vertex buffer
    pub vertex_buffer: BufferHandle,
    /// Index buffer
    pub index_buffer: BufferHandle,
    /// Number of indices to draw
    pub index_count: u32,
}

/// Analytics data for a GPU buffer
#[derive(Debug, Clone)]
struct BufferAnalytics {
    /// Debug label given at creation
    label: String,
    /// Usage given at creation
    usage: BufferUsage,
    /// Bytes uploaded at creation
    allocated_memory: u64,
}

/// Central registry of GPU resources created by the engine.
pub struct BufferState {
    /// The graphics API behind the boundary
    backend: Box<dyn GpuBackend>,
    /// Live buffers and their analytics
    buffers: HashMap<u64, BufferAnalytics>,
    /// Live textures and their labels
    textures: HashMap<u64, String>,
}

impl BufferState {
    /// Creates a new buffer state in front of a backend.
    pub fn new(backend: Box<dyn GpuBackend>) -> Self {
        Self {
            backend,
            buffers: HashMap::new(),
            textures: HashMap::new(),
        }
    }

    /// Creates a buffer initialized with `contents`.
    pub fn create_buffer_init(
        &mut self,
        label: &str,
        usage: BufferUsage,
        contents: &[u8],
    ) -> BufferHandle {
        let id = self.backend.create_buffer(label, usage, contents);
        self.buffers.insert(
            id,
            BufferAnalytics {
                label: label.to_owned(),
                usage,
                allocated_memory: contents.len() as u64,
            },
        );
        BufferHandle(id)
    }

    /// Destroys a buffer.
    pub fn release_buffer(&mut self, handle: BufferHandle) {
        if self.buffers.remove(&handle.0).is_none() {
            log::error!("Released unknown buffer {}", handle.0);
            return;
        }
        self.backend.destroy_buffer(handle.0);
    }

    /// Creates a texture from normalized RGBA texels.
    pub fn create_texture(
        &mut self,
        label: &str,
        width: u32,
        height: u32,
        texels: &[f32],
    ) -> TextureHandle {
        let id = self.backend.create_texture(label, width, height, texels);
        self.textures.insert(id, label.to_owned());
        TextureHandle(id)
    }

    /// Destroys a texture.
    pub fn release_texture(&mut self, handle: TextureHandle) {
        if self.textures.remove(&handle.0).is_none() {
            log::error!("Released unknown texture {}", handle.0);
            return;
        }
        self.backend.destroy_texture(handle.0);
    }

    /// Uploads a chunk mesh into a fresh vertex/index buffer pair.
    pub fn upload_mesh(&mut self, position: ChunkCoord, mesh: &Mesh) -> ChunkGpuMesh {
        let vertex_label = format!("Chunk ({}, {}) vertices", position.x, position.y);
        let index_label = format!("Chunk ({}, {}) indices", position.x, position.y);

        ChunkGpuMesh {
            vertex_buffer: self.create_buffer_init(
                &vertex_label,
                BufferUsage::Vertex,
                mesh.vertex_bytes(),
            ),
            index_buffer: self.create_buffer_init(
                &index_label,
                BufferUsage::Index,
                mesh.index_bytes(),
            ),
            index_count: mesh.index_count(),
        }
    }

    /// Releases both buffers of a chunk mesh.
    pub fn release_mesh(&mut self, gpu_mesh: ChunkGpuMesh) {
        self.release_buffer(gpu_mesh.vertex_buffer);
        self.release_buffer(gpu_mesh.index_buffer);
    }

    /// Number of buffers still alive.
    pub fn live_buffer_count(&self) -> usize {
        self.buffers.len()
    }

    /// Number of textures still alive.
    pub fn live_texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Gets the total allocated memory across all live buffers, in bytes.
    pub fn get_total_allocated_memory(&self) -> u64 {
        self.buffers
            .values()
            .fold(0, |acc, analytics| acc + analytics.allocated_memory)
    }

    /// Gets the allocated memory of live buffers with a given usage, in bytes.
    pub fn get_allocated_memory_for(&self, usage: BufferUsage) -> u64 {
        self.buffers
            .values()
            .filter(|analytics| analytics.usage == usage)
            .map(|analytics| analytics.allocated_memory)
            .sum()
    }

    /// Verifies that every resource has been released.
    ///
    /// # Errors
    /// [`ResourceLeak`] with the number of buffers and textures still alive. Each leaked
    /// resource is also logged with its label.
    pub fn leak_check(&self) -> Result<(), ResourceLeak> {
        if self.buffers.is_empty() && self.textures.is_empty() {
            return Ok(());
        }

        for analytics in self.buffers.values() {
            log::error!("Leaked buffer '{}'", analytics.label);
        }
        for label in self.textures.values() {
            log::error!("Leaked texture '{}'", label);
        }

        Err(ResourceLeak {
            buffers: self.buffers.len(),
            textures: self.textures.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::rendering::HeadlessBackend;

    #[test]
    fn released_resources_pass_the_leak_check() {
        let mut buffer_state = BufferState::new(Box::new(HeadlessBackend::default()));
        let buffer = buffer_state.create_buffer_init("test", BufferUsage::Vertex, &[0; 64]);
        let texture = buffer_state.create_texture("atlas", 1, 1, &[0.0; 4]);
        assert_eq!(buffer_state.get_total_allocated_memory(), 64);

        buffer_state.release_buffer(buffer);
        buffer_state.release_texture(texture);
        assert_eq!(buffer_state.leak_check(), Ok(()));
    }

    #[test]
    fn forgotten_resources_are_reported() {
        let mut buffer_state = BufferState::new(Box::new(HeadlessBackend::default()));
        let _kept = buffer_state.create_buffer_init("kept", BufferUsage::Index, &[0; 12]);
        let _texture = buffer_state.create_texture("atlas", 1, 1, &[0.0; 4]);

        assert_eq!(
            buffer_state.leak_check(),
            Err(ResourceLeak {
                buffers: 1,
                textures: 1
            })
        );
        assert_eq!(buffer_state.get_allocated_memory_for(BufferUsage::Index), 12);
    }
}
