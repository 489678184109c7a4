use std::time::Duration;

use cgmath::Point3;
use cgmath::Vector3;

use voxel_sandbox::engine_state::{
    physics::{self, MovementInput, PhysicsConfig, PlayerBody},
    voxels::{
        block::block_type::BlockType,
        chunk::{Chunk, FlatTerrain},
        coordinates::{self, ChunkCoord},
        raycast::{raycast, RaycastMode},
        world::World,
    },
};

fn flat_world(surface_height: i32) -> World {
    let mut world = World::new(FlatTerrain {
        surface_height,
        surface_block: BlockType::GRASS.as_byte(),
        fill_block: BlockType::DIRT.as_byte(),
    });
    world.generate_world(1, 1);
    world
}

#[test]
fn block_coordinates_decompose_and_recompose() {
    for &(x, z) in &[(0, 0), (15, 16), (-1, -16), (-17, 33), (31, -33)] {
        let block = Point3::new(x, 5, z);
        let chunk = coordinates::block_to_chunk(block);
        let local = coordinates::block_to_local(block).unwrap();

        assert!(coordinates::is_local_in_bounds(local));
        assert_eq!(coordinates::local_to_block(chunk, local), block);
    }
}

#[test]
fn negative_positions_belong_to_negative_chunks() {
    let block = coordinates::world_to_block(Point3::new(-0.25, 3.5, -16.5));
    assert_eq!(block, Point3::new(-1, 3, -17));
    assert_eq!(coordinates::block_to_chunk(block), ChunkCoord::new(-1, -2));
    assert_eq!(
        coordinates::block_to_local(block),
        Some(Point3::new(15, 3, 15))
    );
}

#[test]
fn remeshing_an_unchanged_chunk_gives_the_same_mesh() {
    let world = flat_world(8);
    let chunk = world.chunk(ChunkCoord::new(0, 0)).unwrap();

    let first = chunk.build_mesh(&world);
    let second = chunk.build_mesh(&world);
    assert_eq!(first, second);
    assert_eq!(&first, chunk.mesh());
}

#[test]
fn a_lone_chunk_draws_every_outer_face() {
    let chunk = Chunk::solid(ChunkCoord::new(0, 0), BlockType::STONE);
    let world = World::new(FlatTerrain {
        surface_height: -1,
        surface_block: 0,
        fill_block: 0,
    });
    assert_eq!(chunk.build_mesh(&world).quad_count(), 6 * 256);
}

#[test]
fn unlinking_exposes_the_shared_boundary() {
    let mut world = flat_world(0);
    let center = ChunkCoord::new(0, 0);
    let east = ChunkCoord::new(1, 0);
    let center_quads = world.chunk(center).unwrap().mesh().quad_count();
    let east_quads = world.chunk(east).unwrap().mesh().quad_count();

    assert!(world.unlink_chunks(center, east));
    world.reload_chunk(center);
    world.reload_chunk(east);

    assert_eq!(world.chunk(center).unwrap().mesh().quad_count(), center_quads + 16);
    assert_eq!(world.chunk(east).unwrap().mesh().quad_count(), east_quads + 16);
    assert!(!world.unlink_chunks(center, east));
}

#[test]
fn breaking_at_a_boundary_remeshes_the_neighbor() {
    let mut world = flat_world(8);
    let east = ChunkCoord::new(1, 0);
    let east_quads = world.chunk(east).unwrap().mesh().quad_count();

    assert_eq!(
        world.remove_block_at(Point3::new(15, 8, 3)),
        Ok(ChunkCoord::new(0, 0))
    );

    let east_chunk = world.chunk(east).unwrap();
    assert_eq!(east_chunk.mesh().quad_count(), east_quads + 1);
    assert!(east_chunk.is_mesh_dirty());
}

#[test]
fn looking_down_selects_the_surface_and_the_cell_above_it() {
    let world = flat_world(8);
    let origin = Point3::new(0.5, 20.5, 0.5);
    let down = Vector3::new(0.0, -1.0, 0.0);

    let hit = raycast(&world, origin, down, 16.0, RaycastMode::FirstSolid).unwrap();
    assert_eq!(hit.block, Point3::new(0, 8, 0));
    assert_eq!(hit.chunk, ChunkCoord::new(0, 0));

    let place = raycast(&world, origin, down, 16.0, RaycastMode::LastEmptyBeforeSolid).unwrap();
    assert_eq!(place.block, Point3::new(0, 9, 0));
}

#[test]
fn placement_cell_sits_on_the_hit_face() {
    let world = flat_world(8);
    let origin = Point3::new(0.3, 12.5, 0.5);
    let direction = Vector3::new(1.0, -1.0, 0.3);

    let hit = raycast(&world, origin, direction, 16.0, RaycastMode::FirstSolid).unwrap();
    let place =
        raycast(&world, origin, direction, 16.0, RaycastMode::LastEmptyBeforeSolid).unwrap();

    assert_eq!(hit.block.y, 8);
    assert_eq!(place.block, hit.block + hit.normal);
    assert!(!world.is_solid_block(place.block));
}

#[test]
fn player_walks_across_a_chunk_boundary_without_falling() {
    let world = flat_world(7);
    let config = PhysicsConfig::default();
    let start = Point3::new(14.5, 8.0 + config.half_height + 0.02, 3.5);
    let input = MovementInput {
        forward: true,
        yaw: 0.0,
        ..MovementInput::default()
    };

    let mut body = PlayerBody::new(start);
    for _ in 0..60 {
        body = physics::step(&world, &config, &body, &input, Duration::from_millis(16));
        assert!(body.grounded);
    }

    assert!(body.position.x > 16.5);
    assert_eq!(body.position.y, start.y);
    assert_eq!(body.position.z, start.z);
    assert_eq!(
        coordinates::block_to_chunk(coordinates::world_to_block(body.position)),
        ChunkCoord::new(1, 0)
    );
}
