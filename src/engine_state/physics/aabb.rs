use cgmath::{Point3, Vector3};

use crate::engine_state::voxels::world::World;

/// An axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Lowest corner
    pub min: Point3<f32>,
    /// Highest corner
    pub max: Point3<f32>,
}

impl Aabb {
    /// Creates a box of the given half-extents around `center`.
    pub fn from_center(center: Point3<f32>, half_extents: Vector3<f32>) -> Self {
        Aabb {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// The inclusive range of block cells the box covers.
    ///
    /// A face lying exactly on a cell boundary does not reach into the next cell.
    ///
    /// # Returns
    /// `(first, last)` cell on every axis. `last` is below `first` on an axis where the
    /// box has no extent and sits on a boundary.
    pub fn cell_range(&self) -> (Point3<i32>, Point3<i32>) {
        (
            Point3::new(
                self.min.x.floor() as i32,
                self.min.y.floor() as i32,
                self.min.z.floor() as i32,
            ),
            Point3::new(
                self.max.x.ceil() as i32 - 1,
                self.max.y.ceil() as i32 - 1,
                self.max.z.ceil() as i32 - 1,
            ),
        )
    }

    /// Checks whether any cell the box covers holds a solid block.
    pub fn overlaps_solid(&self, world: &World) -> bool {
        let (first, last) = self.cell_range();

        (first.x..=last.x).any(|x| {
            (first.y..=last.y)
                .any(|y| (first.z..=last.z).any(|z| world.is_solid_block(Point3::new(x, y, z))))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::chunk::FlatTerrain;

    #[test]
    fn boundaries_do_not_touch_the_next_cell() {
        let aabb = Aabb::from_center(Point3::new(1.0, 1.0, 1.0), Vector3::new(1.0, 1.0, 0.5));
        let (first, last) = aabb.cell_range();
        assert_eq!(first, Point3::new(0, 0, 0));
        assert_eq!(last, Point3::new(1, 1, 1));
    }

    #[test]
    fn overlap_only_counts_solid_cells() {
        let mut world = World::new(FlatTerrain {
            surface_height: 7,
            surface_block: 1,
            fill_block: 2,
        });
        world.generate_world(0, 0);

        let resting = Aabb::from_center(Point3::new(4.5, 9.0, 4.5), Vector3::new(0.3, 1.0, 0.3));
        assert!(!resting.overlaps_solid(&world));

        let sunk = Aabb::from_center(Point3::new(4.5, 8.75, 4.5), Vector3::new(0.3, 1.0, 0.3));
        assert!(sunk.overlaps_solid(&world));
    }
}
