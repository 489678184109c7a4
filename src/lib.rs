#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Sandbox
//!
//! The simulation core of a Minecraft-style voxel sandbox.
//!
//! The world is made of 16x16x16 chunks that mesh themselves with face culling, link to
//! their horizontal neighbors, and upload their meshes through an abstract GPU backend.
//! A DDA raycaster selects blocks to break and place, and the player collides with the
//! grid as an axis-aligned box.
//!
//! ## Key Modules
//!
//! * `application_state` - Configuration, input and the frame loop
//! * `engine_state` - The main engine components including voxels, physics and rendering
//! * `error` - Error types shared by every module
//!
//! ## Usage
//!
//! ```rust
//! use voxel_sandbox::{
//!     application_state::{config::EngineConfig, SimulationState},
//!     engine_state::rendering::HeadlessBackend,
//! };
//!
//! let simulation = SimulationState::new(
//!     EngineConfig::default(),
//!     Box::new(HeadlessBackend::default()),
//! );
//! assert!(simulation.shutdown().is_ok());
//! ```

use std::path::PathBuf;

use application_state::{config::EngineConfig, SimulationState};
use engine_state::rendering::HeadlessBackend;

use log::info;

pub mod application_state;
pub mod engine_state;
pub mod error;

pub use error::{AtlasError, ConfigError, ResourceLeak, VoxelError};

/// Config file read when no path is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Frames simulated by [`run`].
const HEADLESS_FRAMES: usize = 60;

/// Runs the sandbox headless for a short burst of frames and checks for leaks.
///
/// The first command line argument names the config file.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = EngineConfig::load_or_default(&config_path);

    let mut simulation = SimulationState::new(config, Box::new(HeadlessBackend::default()));
    for _ in 0..HEADLESS_FRAMES {
        simulation.advance();
    }

    let player = simulation.engine_state.player;
    info!(
        "Player at ({:.2}, {:.2}, {:.2}), grounded: {}",
        player.position.x, player.position.y, player.position.z, player.grounded
    );

    if simulation.shutdown().is_err() {
        std::process::exit(1);
    }
}
