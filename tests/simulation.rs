use std::io::Write;
use std::time::Duration;

use cgmath::Point3;

use voxel_sandbox::{
    application_state::{
        config::EngineConfig,
        input_manager::InputManager,
        input_state::{InputAction, ProcessedInputState},
        SimulationState,
    },
    engine_state::rendering::{texture::TextureAtlas, HeadlessBackend},
    ConfigError,
};

const FRAME: Duration = Duration::from_millis(16);

fn small_config() -> EngineConfig {
    let mut config = EngineConfig::default();
    config.world.surface_height = 8;
    config.atlas.path = "missing/atlas.png".into();
    config
}

fn frame_with(input: &mut InputManager) -> ProcessedInputState {
    input.get_and_reset_processed_input()
}

#[test]
fn break_and_place_then_shut_down_cleanly() {
    let mut simulation = SimulationState::new(small_config(), Box::new(HeadlessBackend::default()));
    let mut input = InputManager::new();

    input.intake_mouse_motion((0.0, 10_000.0));
    simulation.step(FRAME, &frame_with(&mut input));

    input.set_action(InputAction::BreakBlock, true);
    let outcome = simulation.step(FRAME, &frame_with(&mut input));
    assert_eq!(outcome.broken, Some(Point3::new(0, 8, 0)));

    // Held buttons do not repeat.
    let outcome = simulation.step(FRAME, &frame_with(&mut input));
    assert_eq!(outcome.broken, None);
    assert_eq!(outcome.uploaded_meshes, 0);

    let world = &simulation.engine_state.world;
    assert!(!world.is_solid_block(Point3::new(0, 8, 0)));
    assert!(world.is_solid_block(Point3::new(0, 7, 0)));

    assert_eq!(simulation.shutdown(), Ok(()));
}

#[test]
fn walking_forward_moves_along_the_view_direction() {
    let mut simulation = SimulationState::new(small_config(), Box::new(HeadlessBackend::default()));
    let mut input = InputManager::new();
    let start = simulation.engine_state.player.position;

    input.set_action(InputAction::MoveForward, true);
    for _ in 0..30 {
        simulation.step(FRAME, &frame_with(&mut input));
    }

    let end = simulation.engine_state.player.position;
    // The camera starts facing -Z.
    assert!(end.z < start.z - 1.0);
    assert!((end.x - start.x).abs() < 1e-3);
    assert!(simulation.engine_state.player.grounded);
}

#[test]
fn config_is_read_from_json() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "world": {{ "extent_x": 2, "surface_height": 4 }}, "camera": {{ "fov": 90.0 }} }}"#
    )
    .unwrap();

    let config = EngineConfig::load(file.path()).unwrap();
    assert_eq!(config.world.extent_x, 2);
    assert_eq!(config.world.extent_z, 1);
    assert_eq!(config.world.surface_height, 4);
    assert_eq!(config.camera.fov, 90.0);
    assert_eq!(config.physics, EngineConfig::default().physics);
}

#[test]
fn broken_config_is_an_error_and_falls_back_to_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{ \"world\": ").unwrap();

    assert!(matches!(
        EngineConfig::load(file.path()),
        Err(ConfigError::Json(_))
    ));
    assert_eq!(EngineConfig::load_or_default(file.path()), EngineConfig::default());

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.json");
    assert!(matches!(EngineConfig::load(&missing), Err(ConfigError::Io(_))));
}

#[test]
fn png_atlas_is_decoded_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("atlas.png");
    let pixels = image::RgbaImage::from_pixel(4, 2, image::Rgba([255, 0, 51, 255]));
    pixels.save(&path).unwrap();

    let atlas = TextureAtlas::load(&path, 4, 2).unwrap();
    assert!(!atlas.is_fallback);
    assert_eq!(atlas.texels.len(), 4 * 2 * 4);
    assert_eq!(atlas.texels[..4], [1.0f32, 0.0, 0.2, 1.0]);

    let fallback = TextureAtlas::load_or_fallback(&path, 8, 8);
    assert!(fallback.is_fallback);
}
