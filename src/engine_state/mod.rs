//! # Engine State Module
//!
//! The core engine module that owns the simulated world and everything that acts on it.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container for the engine
//! * `buffer_state` - The GPU boundary and its resource registry
//! * `camera_state` - Camera orientation and projection
//! * `physics` - Player collision against the voxel grid
//! * `rendering` - Meshes, vertices, the texture atlas and the headless backend
//! * `voxels` - Blocks, chunks, the world and raycasting
//!
//! ## Frame Flow
//!
//! Each frame the processed input becomes a [`PlayerAction`]. Mouse movement turns the
//! camera, the movement keys drive one physics step, and the camera follows the player's
//! eyes. Break and place actions cast a ray from the eyes along the view direction and
//! edit the world, which remeshes the affected chunks. Finally every changed mesh is
//! uploaded through the buffer state.

use std::time::Duration;

use cgmath::Point3;

use buffer_state::{BufferState, GpuBackend};
use camera_state::CameraState;
use physics::{MovementInput, PlayerBody};
use rendering::texture::{AtlasTexture, TextureAtlas};
use voxels::{
    raycast::{raycast, RaycastMode},
    world::World,
};

use crate::{
    application_state::{
        config::EngineConfig,
        input_state::{InputAction, ProcessedInputState},
    },
    error::ResourceLeak,
};

pub mod buffer_state;
pub mod camera_state;
pub mod physics;
pub mod rendering;
pub mod voxels;

/// What a frame changed in the world.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameOutcome {
    /// Block removed by the break action
    pub broken: Option<Point3<i32>>,
    /// Block set by the place action
    pub placed: Option<Point3<i32>>,
    /// Number of chunk meshes uploaded
    pub uploaded_meshes: usize,
}

/// The main state container for the voxel engine
///
/// This struct owns all major subsystems and coordinates their interactions: input
/// translation, player physics, block editing and mesh upload.
pub struct EngineState {
    /// Camera state managing orientation and projection
    pub camera_state: CameraState,
    /// Current player actions derived from input
    pub player_actions: PlayerAction,
    /// Buffer state for managing GPU buffers
    pub buffer_state: BufferState,
    /// The voxel world containing all chunk data
    pub world: World,
    /// The simulated player
    pub player: PlayerBody,
    /// The uploaded atlas; `None` once torn down
    atlas_texture: Option<AtlasTexture>,
    /// Settings the engine was created with
    config: EngineConfig,
}

impl EngineState {
    /// Creates a new engine state with all subsystems initialized
    ///
    /// Generates the world, uploads every chunk mesh and the texture atlas, and places the
    /// player on the surface above the origin.
    ///
    /// # Arguments
    ///
    /// * `config` - Engine settings
    /// * `backend` - The graphics API meshes and the atlas are uploaded to
    pub fn new(config: EngineConfig, backend: Box<dyn GpuBackend>) -> Self {
        let mut buffer_state = BufferState::new(backend);

        let mut world = World::new(config.world.terrain())
            .with_remesh_neighbors_on_edit(config.world.remesh_neighbors_on_edit);
        world.generate_world(config.world.extent_x, config.world.extent_z);
        let uploaded = world.upload_dirty_meshes(&mut buffer_state);

        let atlas = TextureAtlas::load_or_fallback(
            &config.atlas.path,
            config.atlas.width,
            config.atlas.height,
        );
        let atlas_texture = atlas.upload(&mut buffer_state);

        let spawn = Point3::new(
            0.5,
            (config.world.surface_height + 1) as f32 + config.physics.half_height,
            0.5,
        );
        let player = PlayerBody::new(spawn);

        let camera_state = CameraState::new(
            config.camera,
            player.eye_position(&config.physics),
            config.viewport.width,
            config.viewport.height,
        );

        log::info!(
            "Engine initialized: {} chunk meshes uploaded, {} bytes of GPU memory",
            uploaded,
            buffer_state.get_total_allocated_memory()
        );

        Self {
            camera_state,
            player_actions: PlayerAction::default(),
            buffer_state,
            world,
            player,
            atlas_texture: Some(atlas_texture),
            config,
        }
    }

    /// Sets the input commands for the engine state.
    ///
    /// # Arguments
    /// * `input` - The processed input state to use for setting commands
    pub fn set_input_commands(&mut self, input: &ProcessedInputState) {
        self.player_actions = Self::translate_processed_input(input);
    }

    /// Runs one frame on the current player actions.
    ///
    /// # Arguments
    ///
    /// * `dt` - The time elapsed since the last frame
    pub fn process_input(&mut self, dt: Duration) -> FrameOutcome {
        let actions = self.player_actions;

        if let Some((delta_x, delta_y)) = actions.rotate_view {
            self.camera_state
                .intake_mouse_delta(delta_x as f32, delta_y as f32);
        }

        let movement = MovementInput {
            forward: actions.move_forward,
            backward: actions.move_backward,
            left: actions.move_left,
            right: actions.move_right,
            jump: actions.jump,
            sprint: actions.sprint,
            yaw: self.camera_state.yaw(),
        };
        self.player = physics::step(
            &self.world,
            &self.config.physics,
            &self.player,
            &movement,
            dt,
        );
        self.camera_state
            .update(self.player.eye_position(&self.config.physics));

        let mut outcome = FrameOutcome::default();
        if actions.break_block {
            outcome.broken = self.break_block();
        }
        if actions.place_block {
            outcome.placed = self.place_block();
        }

        outcome.uploaded_meshes = self.world.upload_dirty_meshes(&mut self.buffer_state);
        outcome
    }

    /// Removes the block the player looks at.
    ///
    /// # Returns
    /// The removed block, if one was within reach.
    pub fn break_block(&mut self) -> Option<Point3<i32>> {
        let hit = raycast(
            &self.world,
            self.player.eye_position(&self.config.physics),
            self.camera_state.forward(),
            self.config.interaction.reach,
            RaycastMode::FirstSolid,
        )?;

        match self.world.remove_block_at(hit.block) {
            Ok(_) => Some(hit.block),
            Err(error) => {
                log::warn!("Could not break block: {}", error);
                None
            }
        }
    }

    /// Places the configured block against the block the player looks at.
    ///
    /// Nothing is placed where it would overlap the player.
    ///
    /// # Returns
    /// The placed block, if one was placed.
    pub fn place_block(&mut self) -> Option<Point3<i32>> {
        let hit = raycast(
            &self.world,
            self.player.eye_position(&self.config.physics),
            self.camera_state.forward(),
            self.config.interaction.reach,
            RaycastMode::LastEmptyBeforeSolid,
        )?;

        let (first, last) = self.player.aabb(&self.config.physics).cell_range();
        let inside_player = (first.x..=last.x).contains(&hit.block.x)
            && (first.y..=last.y).contains(&hit.block.y)
            && (first.z..=last.z).contains(&hit.block.z);
        if inside_player {
            log::debug!("Refusing to place a block inside the player");
            return None;
        }

        match self
            .world
            .set_block_at(hit.block, self.config.interaction.placement_block)
        {
            Ok(_) => Some(hit.block),
            Err(error) => {
                log::warn!("Could not place block: {}", error);
                None
            }
        }
    }

    /// The settings the engine was created with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Releases every GPU resource and checks that none is left.
    ///
    /// # Errors
    /// [`ResourceLeak`] if any buffer or texture is still alive afterwards.
    pub fn teardown(&mut self) -> Result<(), ResourceLeak> {
        self.world.teardown(&mut self.buffer_state);
        if let Some(atlas_texture) = self.atlas_texture.take() {
            atlas_texture.release(&mut self.buffer_state);
        }

        self.buffer_state.leak_check()
    }

    /// Translates the processed input state into player actions.
    ///
    /// # Arguments
    /// * `input` - The processed input state to translate
    ///
    /// # Returns
    /// A PlayerAction struct with the appropriate actions set
    fn translate_processed_input(input: &ProcessedInputState) -> PlayerAction {
        PlayerAction {
            // Movement actions - active if pressed or held
            move_forward: input.is_active(InputAction::MoveForward),
            move_backward: input.is_active(InputAction::MoveBackward),
            move_left: input.is_active(InputAction::MoveLeft),
            move_right: input.is_active(InputAction::MoveRight),
            jump: input.is_active(InputAction::Jump),
            sprint: input.is_active(InputAction::Sprint),
            rotate_view: input.get_mouse_delta(),
            // Edits only trigger on press, not hold
            break_block: input.is_just_pressed(InputAction::BreakBlock),
            place_block: input.is_just_pressed(InputAction::PlaceBlock),
        }
    }
}

/// Represents player actions derived from input
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerAction {
    move_forward: bool,
    move_backward: bool,
    move_left: bool,
    move_right: bool,
    jump: bool,
    sprint: bool,

    /// View rotation, in pixels of mouse movement
    rotate_view: Option<(f64, f64)>,

    break_block: bool,
    place_block: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application_state::input_manager::InputManager;
    use crate::engine_state::rendering::HeadlessBackend;

    fn small_engine() -> EngineState {
        let mut config = EngineConfig::default();
        config.world.surface_height = 8;
        config.atlas.path = "missing/atlas.png".into();
        EngineState::new(config, Box::new(HeadlessBackend::default()))
    }

    fn press(action: InputAction) -> ProcessedInputState {
        let mut input = InputManager::new();
        input.set_action(action, true);
        input.get_and_reset_processed_input()
    }

    fn look_down(engine: &mut EngineState) {
        let mut input = InputManager::new();
        input.intake_mouse_motion((0.0, 10_000.0));
        engine.set_input_commands(&input.get_and_reset_processed_input());
        engine.process_input(Duration::from_millis(16));
    }

    #[test]
    fn player_spawns_standing_on_the_surface() {
        let mut engine = small_engine();
        let start = engine.player.position;
        for _ in 0..10 {
            engine.process_input(Duration::from_millis(16));
        }
        assert!(engine.player.grounded);
        assert!((engine.player.position.y - start.y).abs() <= 0.011);
    }

    #[test]
    fn breaking_removes_the_block_under_the_feet() {
        let mut engine = small_engine();
        look_down(&mut engine);

        engine.set_input_commands(&press(InputAction::BreakBlock));
        let outcome = engine.process_input(Duration::from_millis(16));
        assert_eq!(outcome.broken, Some(Point3::new(0, 8, 0)));
        // (0, 8, 0) sits on the -X and -Z boundaries of its chunk.
        assert_eq!(outcome.uploaded_meshes, 3);
        assert!(!engine.world.is_solid_block(Point3::new(0, 8, 0)));
    }

    #[test]
    fn placing_inside_the_player_is_refused() {
        let mut engine = small_engine();
        look_down(&mut engine);

        engine.set_input_commands(&press(InputAction::PlaceBlock));
        let outcome = engine.process_input(Duration::from_millis(16));
        assert_eq!(outcome.placed, None);
        assert!(!engine.world.is_solid_block(Point3::new(0, 9, 0)));
    }

    #[test]
    fn teardown_leaves_no_resources() {
        let mut engine = small_engine();
        assert!(engine.buffer_state.live_texture_count() == 1);
        assert_eq!(engine.teardown(), Ok(()));
        assert_eq!(engine.buffer_state.live_buffer_count(), 0);
    }
}
