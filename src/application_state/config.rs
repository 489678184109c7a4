//! # Engine Configuration
//!
//! All tunables of the sandbox, loaded from a JSON file. Every section and field has a
//! default, so a config file only needs the values it changes and an empty object is a
//! valid config.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::engine_state::{
    camera_state::CameraConfig,
    physics::PhysicsConfig,
    rendering::texture::DEFAULT_ATLAS_DIMENSION,
    voxels::{
        block::{block_type::BlockType, BlockTypeSize},
        chunk::FlatTerrain,
        raycast::DEFAULT_MAX_DISTANCE,
    },
};
use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// World generation
    pub world: WorldConfig,
    /// Player movement and collision
    pub physics: PhysicsConfig,
    /// Camera projection and mouse look
    pub camera: CameraConfig,
    /// Block breaking and placing
    pub interaction: InteractionConfig,
    /// Texture atlas source
    pub atlas: AtlasConfig,
    /// Initial viewport size
    pub viewport: ViewportConfig,
}

impl EngineConfig {
    /// Reads a config file.
    ///
    /// # Errors
    /// [`ConfigError::Io`] if the file cannot be read, [`ConfigError::Json`] if it does
    /// not parse.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reads a config file, falling back to the defaults if that fails.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|error| {
            log::warn!(
                "Using default config, {} could not be loaded: {}",
                path.display(),
                error
            );
            Self::default()
        })
    }

    /// Serializes the config as pretty-printed JSON.
    ///
    /// # Errors
    /// [`ConfigError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// World generation settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Chunks generated on each side of the origin along X
    pub extent_x: i32,
    /// Chunks generated on each side of the origin along Z
    pub extent_z: i32,
    /// Local Y of the topmost solid layer
    pub surface_height: i32,
    /// Block on the surface layer
    pub surface_block: BlockTypeSize,
    /// Block below the surface layer
    pub fill_block: BlockTypeSize,
    /// Whether boundary edits also remesh the adjacent chunk
    pub remesh_neighbors_on_edit: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            extent_x: 1,
            extent_z: 1,
            surface_height: 15,
            surface_block: BlockType::GRASS.as_byte(),
            fill_block: BlockType::DIRT.as_byte(),
            remesh_neighbors_on_edit: true,
        }
    }
}

impl WorldConfig {
    /// The terrain rule these settings describe.
    pub fn terrain(&self) -> FlatTerrain {
        FlatTerrain {
            surface_height: self.surface_height,
            surface_block: self.surface_block,
            fill_block: self.fill_block,
        }
    }
}

/// Block breaking and placing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// How far the player reaches, in blocks
    pub reach: f32,
    /// Block placed by the place action
    pub placement_block: BlockTypeSize,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        InteractionConfig {
            reach: DEFAULT_MAX_DISTANCE,
            placement_block: BlockType::DIRT.as_byte(),
        }
    }
}

/// Where the texture atlas comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    /// Atlas file; `.png` files are decoded, anything else is read as raw RGBA
    pub path: PathBuf,
    /// Expected atlas width in pixels
    pub width: u32,
    /// Expected atlas height in pixels
    pub height: u32,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        AtlasConfig {
            path: PathBuf::from("res/textures/atlas.png"),
            width: DEFAULT_ATLAS_DIMENSION,
            height: DEFAULT_ATLAS_DIMENSION,
        }
    }
}

/// Initial viewport size, used for the projection's aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        ViewportConfig {
            width: 800,
            height: 600,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_the_default_config() {
        let config: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn partial_sections_keep_their_other_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "world": { "surface_height": 4 }, "physics": { "gravity": 9.5 } }"#)
                .unwrap();
        assert_eq!(config.world.surface_height, 4);
        assert_eq!(config.world.extent_x, 1);
        assert_eq!(config.physics.gravity, 9.5);
        assert_eq!(config.physics.jump_impulse, 8.0);
    }

    #[test]
    fn defaults_describe_the_flat_grass_world() {
        let terrain = WorldConfig::default().terrain();
        assert_eq!(terrain.block_at_height(15), BlockType::GRASS.as_byte());
        assert_eq!(terrain.block_at_height(3), BlockType::DIRT.as_byte());
        assert_eq!(terrain.block_at_height(16), BlockType::AIR.as_byte());
    }

    #[test]
    fn serialized_config_parses_back() {
        let config = EngineConfig::default();
        let json = config.to_json().unwrap();
        let parsed: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
