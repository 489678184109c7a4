//! Voxel raycasting.
//!
//! Walks a ray through the block grid one cell boundary at a time (grid DDA) and reports
//! the first solid block it meets, or the empty cell right in front of it. Block breaking
//! uses the former, block placement the latter.

use cgmath::{InnerSpace, Point3, Vector3};

use super::{
    coordinates::{self, ChunkCoord},
    world::World,
};

/// Default reach of block interaction, in blocks.
pub const DEFAULT_MAX_DISTANCE: f32 = 16.0;

/// Which cell a raycast reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaycastMode {
    /// The first solid cell along the ray.
    FirstSolid,
    /// The cell the ray visited right before the first solid cell.
    LastEmptyBeforeSolid,
}

/// Result of a successful raycast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    /// The reported block coordinate
    pub block: Point3<i32>,
    /// The chunk owning `block`
    pub chunk: ChunkCoord,
    /// Distance traveled when the solid cell was tested: the nearest next boundary
    /// crossing once the step into that cell has been taken
    pub distance: f32,
    /// Outward normal of the solid cell's face the ray went through
    pub normal: Vector3<i32>,
}

/// Casts a ray through the world.
///
/// The cell containing `origin` is never reported as a hit.
///
/// # Arguments
/// * `world` - The world to test blocks against
/// * `origin` - Ray origin in world space
/// * `direction` - Ray direction; need not be normalized, but distances are measured in
///   multiples of its length
/// * `max_distance` - The cast ends once the traveled distance exceeds this
/// * `mode` - Which cell to report
///
/// # Returns
/// `None` if no solid block was found within `max_distance`, or if the ray leaves the
/// range of block coordinates.
pub fn raycast(
    world: &World,
    origin: Point3<f32>,
    direction: Vector3<f32>,
    max_distance: f32,
    mode: RaycastMode,
) -> Option<RaycastHit> {
    let length_squared = direction.magnitude2();
    let origin_is_finite = origin.x.is_finite() && origin.y.is_finite() && origin.z.is_finite();
    if length_squared == 0.0
        || !length_squared.is_finite()
        || !origin_is_finite
        || !max_distance.is_finite()
    {
        return None;
    }

    let mut cell = coordinates::world_to_block(origin);
    // Out-of-range origins saturate to the integer limits.
    let representable = |value: i32| value > i32::MIN && value < i32::MAX;
    if !(representable(cell.x) && representable(cell.y) && representable(cell.z)) {
        return None;
    }

    let step = Vector3::new(
        step_for(direction.x),
        step_for(direction.y),
        step_for(direction.z),
    );
    let t_delta = Vector3::new(
        delta_for(direction.x),
        delta_for(direction.y),
        delta_for(direction.z),
    );
    let mut t_max = Vector3::new(
        boundary_for(origin.x, cell.x, direction.x),
        boundary_for(origin.y, cell.y, direction.y),
        boundary_for(origin.z, cell.z, direction.z),
    );

    loop {
        let previous = cell;

        let normal = if t_max.x < t_max.y && t_max.x < t_max.z {
            cell.x = cell.x.checked_add(step.x)?;
            t_max.x += t_delta.x;
            Vector3::new(-step.x, 0, 0)
        } else if t_max.y < t_max.z {
            cell.y = cell.y.checked_add(step.y)?;
            t_max.y += t_delta.y;
            Vector3::new(0, -step.y, 0)
        } else {
            cell.z = cell.z.checked_add(step.z)?;
            t_max.z += t_delta.z;
            Vector3::new(0, 0, -step.z)
        };
        let traveled = t_max.x.min(t_max.y).min(t_max.z);

        if traveled > max_distance {
            log::trace!("Raycast left reach after {} blocks", traveled);
            return None;
        }

        if world.is_solid_block(cell) {
            let block = match mode {
                RaycastMode::FirstSolid => cell,
                RaycastMode::LastEmptyBeforeSolid => previous,
            };
            log::trace!(
                "Raycast hit ({}, {}, {}) at {:.2}, reporting ({}, {}, {})",
                cell.x,
                cell.y,
                cell.z,
                traveled,
                block.x,
                block.y,
                block.z
            );

            return Some(RaycastHit {
                block,
                chunk: coordinates::block_to_chunk(block),
                distance: traveled,
                normal,
            });
        }
    }
}

fn step_for(direction: f32) -> i32 {
    if direction > 0.0 {
        1
    } else if direction < 0.0 {
        -1
    } else {
        0
    }
}

fn delta_for(direction: f32) -> f32 {
    if direction == 0.0 {
        f32::INFINITY
    } else {
        (1.0 / direction).abs()
    }
}

/// Ray distance to the first cell boundary crossed along one axis.
fn boundary_for(origin: f32, cell: i32, direction: f32) -> f32 {
    if direction > 0.0 {
        ((cell + 1) as f32 - origin) / direction
    } else if direction < 0.0 {
        (cell as f32 - origin) / direction
    } else {
        f32::INFINITY
    }
}
