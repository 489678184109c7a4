//! # Player Physics
//!
//! Discrete AABB-versus-voxel collision for the player.
//!
//! The player is a box of fixed half-extents centered at its position. Each step:
//!
//! 1. The cell just below the box decides whether the player is grounded.
//! 2. Gravity pulls an airborne player down; a grounded one stops falling and may jump.
//! 3. The horizontal input, rotated by the camera yaw, becomes the horizontal velocity.
//! 4. The displacement is applied one axis at a time (X, then Y, then Z). An axis whose
//!    displacement would make the box overlap a solid cell is discarded and its velocity
//!    zeroed, which lets the player slide along walls.
//! 5. A box still stuck in the terrain is nudged up, then down. If neither frees it, the
//!    step is undone.
//!
//! Movement is not swept: a displacement larger than a block can tunnel through thin
//! walls. Frame-sized steps at walking speeds stay well below that.

use std::time::Duration;

use cgmath::{InnerSpace, Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::engine_state::voxels::world::World;

mod aabb;

pub use aabb::Aabb;

/// Tunables of the player physics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration, blocks/s²
    pub gravity: f32,
    /// Upward velocity given by a jump, blocks/s
    pub jump_impulse: f32,
    /// Horizontal speed while walking, blocks/s
    pub walk_speed: f32,
    /// Horizontal speed while sprinting, blocks/s
    pub sprint_speed: f32,
    /// Maximum falling speed, blocks/s
    pub terminal_velocity: f32,
    /// Horizontal half-extent of the player box
    pub radius: f32,
    /// Vertical half-extent of the player box
    pub half_height: f32,
    /// Height of the eyes above the box center
    pub eye_height: f32,
    /// How far below the box the ground probe looks
    pub ground_epsilon: f32,
    /// Distance of a de-penetration nudge
    pub nudge_epsilon: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        PhysicsConfig {
            gravity: 20.0,
            jump_impulse: 8.0,
            walk_speed: 5.0,
            sprint_speed: 10.0,
            terminal_velocity: 50.0,
            radius: 0.3,
            half_height: 0.9,
            eye_height: 0.7,
            ground_epsilon: 0.05,
            nudge_epsilon: 0.01,
        }
    }
}

impl PhysicsConfig {
    /// Half-extents of the player box.
    pub fn half_extents(&self) -> Vector3<f32> {
        Vector3::new(self.radius, self.half_height, self.radius)
    }
}

/// Movement requested for one step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MovementInput {
    /// Move along the view direction
    pub forward: bool,
    /// Move against the view direction
    pub backward: bool,
    /// Strafe left
    pub left: bool,
    /// Strafe right
    pub right: bool,
    /// Jump if standing on ground
    pub jump: bool,
    /// Use the sprint speed instead of the walk speed
    pub sprint: bool,
    /// Camera yaw in degrees; yaw 0 faces +X, yaw -90 faces -Z
    pub yaw: f32,
}

/// The simulated state of the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerBody {
    /// Center of the player box
    pub position: Point3<f32>,
    /// Velocity, blocks/s
    pub velocity: Vector3<f32>,
    /// Whether the last step found ground under the player
    pub grounded: bool,
}

impl PlayerBody {
    /// A body at rest at `position`.
    pub fn new(position: Point3<f32>) -> Self {
        PlayerBody {
            position,
            velocity: Vector3::new(0.0, 0.0, 0.0),
            grounded: false,
        }
    }

    /// The world-space box of the body.
    pub fn aabb(&self, config: &PhysicsConfig) -> Aabb {
        Aabb::from_center(self.position, config.half_extents())
    }

    /// Where the camera sits.
    pub fn eye_position(&self, config: &PhysicsConfig) -> Point3<f32> {
        self.position + Vector3::new(0.0, config.eye_height, 0.0)
    }
}

/// Advances the player by one step.
///
/// # Arguments
/// * `world` - Terrain to collide against
/// * `config` - Physics tunables
/// * `body` - State at the start of the step
/// * `input` - Movement requested this step
/// * `dt` - Step length
///
/// # Returns
/// The state at the end of the step. `grounded` reports the ground probe taken at the
/// start of the step.
pub fn step(
    world: &World,
    config: &PhysicsConfig,
    body: &PlayerBody,
    input: &MovementInput,
    dt: Duration,
) -> PlayerBody {
    let dt = dt.as_secs_f32();
    let start = body.position;
    let mut velocity = body.velocity;

    let probe = Point3::new(
        start.x,
        start.y - config.half_height - config.ground_epsilon,
        start.z,
    );
    let grounded = world.block_at(probe);

    if grounded {
        velocity.y = 0.0;
        if input.jump {
            velocity.y = config.jump_impulse;
        }
    } else {
        velocity.y = (velocity.y - config.gravity * dt).max(-config.terminal_velocity);
    }

    let wish = wish_direction(input);
    let speed = if input.sprint {
        config.sprint_speed
    } else {
        config.walk_speed
    };
    velocity.x = wish.x * speed;
    velocity.z = wish.z * speed;

    let displacement = velocity * dt;
    let half_extents = config.half_extents();
    let collides = |position: Point3<f32>| {
        Aabb::from_center(position, half_extents).overlaps_solid(world)
    };

    let mut position = start;
    for axis in 0..3 {
        let mut candidate = position;
        candidate[axis] += displacement[axis];

        if collides(candidate) {
            velocity[axis] = 0.0;
        } else {
            position = candidate;
        }
    }

    if collides(position) {
        let up = position + Vector3::new(0.0, config.nudge_epsilon, 0.0);
        let down = position - Vector3::new(0.0, config.nudge_epsilon, 0.0);

        if !collides(up) {
            position = up;
            velocity.y = 0.0;
        } else if !collides(down) {
            position = down;
            velocity.y = 0.0;
        } else {
            log::debug!(
                "Player stuck at ({:.2}, {:.2}, {:.2}), reverting step",
                position.x,
                position.y,
                position.z
            );
            position = start;
        }
    }

    PlayerBody {
        position,
        velocity,
        grounded,
    }
}

/// Normalized horizontal direction requested by the input.
fn wish_direction(input: &MovementInput) -> Vector3<f32> {
    let yaw = input.yaw.to_radians();
    let forward = Vector3::new(yaw.cos(), 0.0, yaw.sin());
    let right = Vector3::new(-yaw.sin(), 0.0, yaw.cos());

    let mut wish = Vector3::new(0.0, 0.0, 0.0);
    if input.forward {
        wish += forward;
    }
    if input.backward {
        wish -= forward;
    }
    if input.right {
        wish += right;
    }
    if input.left {
        wish -= right;
    }

    if wish.magnitude2() > 0.0 {
        wish.normalize()
    } else {
        wish
    }
}
