//! # Application State Management
//!
//! This module handles the application's state management, including:
//! - Configuration loading
//! - Input handling
//! - Frame timing and the simulation lifecycle

pub mod config;
pub mod input_manager;
pub mod input_state;

use std::time::Duration;

use config::EngineConfig;
use input_manager::InputManager;
use input_state::ProcessedInputState;

use crate::{
    engine_state::{buffer_state::GpuBackend, EngineState, FrameOutcome},
    error::ResourceLeak,
};

/// Longest frame the simulation advances by at once. Longer stalls are clamped.
pub const MAX_FRAME_TIME: Duration = Duration::from_millis(100);

/// The running simulation.
///
/// This struct contains all the necessary components for a running sandbox: the engine
/// state, the input manager the host feeds, and the frame clock.
pub struct SimulationState {
    /// The core engine state and logic
    pub engine_state: EngineState,

    /// Manages input state and event processing
    pub input_manager: InputManager,

    /// Timestamp of the last frame for delta time calculations
    pub last_frame_time: web_time::Instant,
}

impl SimulationState {
    /// Creates the engine and starts the frame clock.
    ///
    /// # Arguments
    /// * `config` - Engine settings
    /// * `backend` - The graphics API the engine uploads to
    pub fn new(config: EngineConfig, backend: Box<dyn GpuBackend>) -> Self {
        Self {
            engine_state: EngineState::new(config, backend),
            input_manager: InputManager::new(),
            last_frame_time: web_time::Instant::now(),
        }
    }

    /// Runs one frame with an explicit time step and input snapshot.
    ///
    /// # Arguments
    /// * `dt` - The time elapsed since the last frame
    /// * `input` - The input for this frame
    pub fn step(&mut self, dt: Duration, input: &ProcessedInputState) -> FrameOutcome {
        self.engine_state.set_input_commands(input);
        self.engine_state.process_input(dt)
    }

    /// Runs one frame on the wall clock, consuming the input gathered since the last one.
    pub fn advance(&mut self) -> FrameOutcome {
        let now = web_time::Instant::now();
        let frame_dt = (now - self.last_frame_time).min(MAX_FRAME_TIME);
        self.last_frame_time = now;

        let processed_input = self.input_manager.get_and_reset_processed_input();
        self.step(frame_dt, &processed_input)
    }

    /// Input manager the host reports actions and mouse motion to.
    pub fn input_manager_mut(&mut self) -> &mut InputManager {
        &mut self.input_manager
    }

    /// Tears the engine down and reports any GPU resource that outlived it.
    ///
    /// # Errors
    /// [`ResourceLeak`] if a buffer or texture was still alive.
    pub fn shutdown(mut self) -> Result<(), ResourceLeak> {
        let result = self.engine_state.teardown();
        match &result {
            Ok(()) => log::info!("Simulation shut down cleanly"),
            Err(leak) => log::error!("Simulation shut down with {}", leak),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::rendering::HeadlessBackend;

    fn small_simulation() -> SimulationState {
        let mut config = EngineConfig::default();
        config.world.surface_height = 8;
        config.atlas.path = "missing/atlas.png".into();
        SimulationState::new(config, Box::new(HeadlessBackend::default()))
    }

    #[test]
    fn idle_frames_upload_nothing() {
        let mut simulation = small_simulation();
        let outcome = simulation.advance();
        assert_eq!(outcome.uploaded_meshes, 0);
        assert_eq!(outcome.broken, None);
        assert!(simulation.shutdown().is_ok());
    }

    #[test]
    fn reported_motion_turns_the_camera() {
        let mut simulation = small_simulation();
        let yaw = simulation.engine_state.camera_state.yaw();
        simulation.input_manager_mut().intake_mouse_motion((100.0, 0.0));
        simulation.advance();
        assert!((simulation.engine_state.camera_state.yaw() - (yaw + 10.0)).abs() < 1e-4);
    }
}
