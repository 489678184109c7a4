//! A graphics backend that keeps resources in memory instead of on a GPU.
//!
//! Used by the headless binary and by tests. It behaves like a real backend as far as the
//! engine can tell: ids are unique, payloads are kept until destroyed, and destroying an
//! unknown id is reported.

use std::collections::HashMap;

use crate::engine_state::buffer_state::{BufferUsage, GpuBackend};

/// In-memory implementation of [`GpuBackend`].
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    next_id: u64,
    buffers: HashMap<u64, (BufferUsage, Vec<u8>)>,
    textures: HashMap<u64, (u32, u32)>,
}

impl HeadlessBackend {
    /// Number of buffers currently held.
    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    /// Number of textures currently held.
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Contents of a held buffer.
    pub fn buffer_contents(&self, id: u64) -> Option<&[u8]> {
        self.buffers.get(&id).map(|(_, contents)| contents.as_slice())
    }

    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl GpuBackend for HeadlessBackend {
    fn create_buffer(&mut self, label: &str, usage: BufferUsage, contents: &[u8]) -> u64 {
        let id = self.allocate_id();
        log::trace!("create {:?} buffer {} '{}' ({} bytes)", usage, id, label, contents.len());
        self.buffers.insert(id, (usage, contents.to_vec()));
        id
    }

    fn destroy_buffer(&mut self, id: u64) {
        if self.buffers.remove(&id).is_none() {
            log::error!("destroy of unknown buffer {}", id);
        }
    }

    fn create_texture(&mut self, label: &str, width: u32, height: u32, texels: &[f32]) -> u64 {
        let id = self.allocate_id();
        log::trace!("create texture {} '{}' ({}x{}, {} samples)", id, label, width, height, texels.len());
        self.textures.insert(id, (width, height));
        id
    }

    fn destroy_texture(&mut self, id: u64) {
        if self.textures.remove(&id).is_none() {
            log::error!("destroy of unknown texture {}", id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_destroy_frees_them() {
        let mut backend = HeadlessBackend::default();
        let a = backend.create_buffer("a", BufferUsage::Vertex, &[1, 2, 3]);
        let b = backend.create_buffer("b", BufferUsage::Index, &[]);
        assert_ne!(a, b);
        assert_eq!(backend.buffer_contents(a), Some(&[1u8, 2, 3][..]));

        backend.destroy_buffer(a);
        assert_eq!(backend.buffer_count(), 1);
    }
}
