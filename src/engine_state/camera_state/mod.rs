//! # Camera State Management
//!
//! This module handles all camera-related functionality including:
//! - Camera position and orientation tracking
//! - View and projection matrix calculations
//! - Mouse-look input
//!
//! ## Core Components
//! - `Camera`: Represents the camera's position and orientation in 3D space
//! - `Projection`: Manages the camera's projection matrix
//! - `CameraUniform`: GPU representation of camera data for shaders

use cgmath::{Deg, Point3, Vector3};
use serde::{Deserialize, Serialize};

pub mod camera;

/// Camera tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view, degrees
    pub fov: f32,
    /// Near clipping plane distance
    pub near: f32,
    /// Far clipping plane distance
    pub far: f32,
    /// Degrees of rotation per pixel of mouse movement
    pub sensitivity: f32,
    /// Largest allowed absolute pitch, degrees
    pub pitch_limit: f32,
    /// Yaw the camera starts with, degrees
    pub initial_yaw: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        CameraConfig {
            fov: 120.0,
            near: 0.1,
            far: 100.0,
            sensitivity: 0.1,
            pitch_limit: 89.0,
            initial_yaw: -90.0,
        }
    }
}

/// Manages the camera, its projection and the uniform handed to the renderer.
pub struct CameraState {
    /// The current camera position and orientation
    pub camera: camera::Camera,
    /// The current projection
    pub projection: camera::Projection,
    /// Packed camera data, refreshed by [`CameraState::update`]
    pub camera_uniform: camera::CameraUniform,
    config: CameraConfig,
}

impl CameraState {
    /// Creates a new camera at `position` for a viewport of the given size.
    pub fn new(config: CameraConfig, position: Point3<f32>, width: u32, height: u32) -> Self {
        let camera = camera::Camera::new(position, Deg(config.initial_yaw), Deg(0.0));
        let projection =
            camera::Projection::new(width, height, Deg(config.fov), config.near, config.far);

        let mut camera_uniform = camera::CameraUniform::new();
        camera_uniform.update_view_proj_and_pos(&camera, &projection);

        CameraState {
            camera,
            projection,
            camera_uniform,
            config,
        }
    }

    /// Applies a frame's mouse movement, in pixels.
    pub fn intake_mouse_delta(&mut self, delta_x: f32, delta_y: f32) {
        self.camera.rotate(
            delta_x,
            delta_y,
            self.config.sensitivity,
            Deg(self.config.pitch_limit),
        );
    }

    /// Moves the camera and refreshes the uniform.
    pub fn update(&mut self, eye_position: Point3<f32>) {
        self.camera.position = eye_position;
        self.camera_uniform
            .update_view_proj_and_pos(&self.camera, &self.projection);
    }

    /// Updates the projection for a new viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.projection.resize(width, height);
        self.camera_uniform
            .update_view_proj_and_pos(&self.camera, &self.projection);
    }

    /// Direction the camera looks in.
    pub fn forward(&self) -> Vector3<f32> {
        self.camera.forward()
    }

    /// Current yaw in degrees.
    pub fn yaw(&self) -> f32 {
        self.camera.yaw.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_looking_down_negative_z() {
        let state = CameraState::new(CameraConfig::default(), Point3::new(0.0, 10.0, 0.0), 800, 600);
        let forward = state.forward();
        assert!(forward.x.abs() < 1e-6);
        assert!((forward.z + 1.0).abs() < 1e-6);
        assert_eq!(state.yaw(), -90.0);
    }

    #[test]
    fn update_follows_the_eye() {
        let mut state =
            CameraState::new(CameraConfig::default(), Point3::new(0.0, 10.0, 0.0), 800, 600);
        state.update(Point3::new(1.0, 2.0, 3.0));
        assert_eq!(state.camera.position, Point3::new(1.0, 2.0, 3.0));
        assert_ne!(state.camera_uniform, camera::CameraUniform::new());
    }
}
