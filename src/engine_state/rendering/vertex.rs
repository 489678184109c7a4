//! Vertex data structures for voxel rendering.
//!
//! This module defines the vertex format emitted by chunk meshing. The layout is plain
//! `f32` data so the vertex array can cross the GPU boundary as an opaque byte payload.

use cgmath::Point3;

/// A vertex in the voxel rendering pipeline.
///
/// # Memory Layout
/// - Position: 3x f32 (12 bytes), chunk-local model space
/// - Color: 3x f32 (12 bytes), multiplied with the texture sample
/// - Texture Coordinates: 2x f32 (8 bytes), normalized atlas coordinates
///
/// Total size: 32 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in chunk-local space
    pub position: [f32; 3],
    /// Vertex tint, white unless lighting is added later
    pub color: [f32; 3],
    /// UV texture coordinates into the block atlas
    pub tex_coords: [f32; 2],
}

/// Tint applied to every emitted vertex.
pub const DEFAULT_VERTEX_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

impl Vertex {
    /// Creates a new vertex with the default tint.
    pub fn new(position: Point3<f32>, tex_coords: [f32; 2]) -> Self {
        Vertex {
            position: position.into(),
            color: DEFAULT_VERTEX_COLOR,
            tex_coords,
        }
    }

    /// Number of `f32` components in one vertex, as seen by a vertex attribute layout.
    pub const COMPONENTS: usize = 8;

    /// Byte stride between consecutive vertices.
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_eight_packed_floats() {
        assert_eq!(Vertex::STRIDE, Vertex::COMPONENTS * std::mem::size_of::<f32>());

        let vertex = Vertex::new(Point3::new(1.0, 2.0, 3.0), [0.25, 0.5]);
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&vertex));
        assert_eq!(floats, &[1.0, 2.0, 3.0, 1.0, 1.0, 1.0, 0.25, 0.5]);
    }
}
