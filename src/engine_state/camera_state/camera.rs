//! # Camera Implementation
//!
//! This module contains the core camera implementation including:
//! - Camera representation and mouse-look rotation
//! - Projection matrix handling
//! - GPU uniform packing
//!
//! ## Key Components
//! - `Camera`: The eye position and yaw/pitch orientation
//! - `Projection`: Perspective projection settings
//! - `CameraUniform`: Packed matrices for the uniform setter

use cgmath::*;

/// Represents a first-person camera in 3D space.
///
/// Yaw is measured in the XZ plane from +X towards +Z; a yaw of -90° looks down -Z.
/// Pitch is measured up from the horizon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// The camera's position in world space
    pub position: Point3<f32>,
    /// Horizontal rotation around the Y axis
    pub yaw: Deg<f32>,
    /// Vertical rotation around the camera's right axis
    pub pitch: Deg<f32>,
}

impl Camera {
    /// Creates a new camera with the specified position and orientation.
    ///
    /// # Arguments
    /// * `position` - Initial position of the camera in world space
    /// * `yaw` - Initial yaw, in anything convertible to degrees
    /// * `pitch` - Initial pitch, in anything convertible to degrees
    ///
    /// # Example
    /// ```rust
    /// use cgmath::{Deg, Point3};
    /// use voxel_sandbox::engine_state::camera_state::camera::Camera;
    ///
    /// let camera = Camera::new(Point3::new(0.0, 10.0, 0.0), Deg(-90.0), Deg(0.0));
    /// assert!((camera.forward().z + 1.0).abs() < 1e-6);
    /// ```
    pub fn new<V: Into<Point3<f32>>, Y: Into<Deg<f32>>, P: Into<Deg<f32>>>(
        position: V,
        yaw: Y,
        pitch: P,
    ) -> Self {
        Self {
            position: position.into(),
            yaw: yaw.into(),
            pitch: pitch.into(),
        }
    }

    /// Applies a mouse movement.
    ///
    /// Moving the mouse right turns right, moving it down looks down.
    ///
    /// # Arguments
    /// * `delta_x` - Horizontal mouse movement in pixels
    /// * `delta_y` - Vertical mouse movement in pixels
    /// * `sensitivity` - Degrees of rotation per pixel
    /// * `pitch_limit` - Largest allowed absolute pitch
    pub fn rotate(&mut self, delta_x: f32, delta_y: f32, sensitivity: f32, pitch_limit: Deg<f32>) {
        self.yaw += Deg(delta_x * sensitivity);
        self.pitch -= Deg(delta_y * sensitivity);

        if self.pitch > pitch_limit {
            self.pitch = pitch_limit;
        } else if self.pitch < -pitch_limit {
            self.pitch = -pitch_limit;
        }
    }

    /// Gets the camera's forward direction vector.
    ///
    /// # Returns
    /// A normalized vector pointing where the camera looks. Raycasts for block
    /// interaction are cast along it.
    pub fn forward(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = self.yaw.sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.sin_cos();
        Vector3::new(pitch_cos * yaw_cos, pitch_sin, pitch_cos * yaw_sin).normalize()
    }

    /// Calculates the right-handed view matrix for this camera.
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_to_rh(self.position, self.forward(), Vector3::unit_y())
    }
}

/// Represents a camera's projection matrix and related parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Aspect ratio (width / height)
    aspect: f32,
    /// Vertical field of view
    fovy: Rad<f32>,
    /// Near clipping plane distance
    znear: f32,
    /// Far clipping plane distance
    zfar: f32,
}

impl Projection {
    /// Creates a new projection with the given parameters.
    ///
    /// # Arguments
    /// * `width` - Viewport width in pixels
    /// * `height` - Viewport height in pixels
    /// * `fovy` - Vertical field of view (can be any type convertible to `Rad<f32>`)
    /// * `znear` - Near clipping plane distance
    /// * `zfar` - Far clipping plane distance
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: aspect_ratio(width, height),
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    /// Updates the projection's aspect ratio for viewport resizing.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = aspect_ratio(width, height);
    }

    /// Current aspect ratio.
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Calculates the perspective projection matrix.
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

/// A zero-sized viewport (minimized window) keeps the last usable ratio of 1.
fn aspect_ratio(width: u32, height: u32) -> f32 {
    if width == 0 || height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    }
}

/// GPU-friendly representation of camera data for shaders.
///
/// The matrices are column-major, as cgmath stores them.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    // We can't use cgmath with bytemuck directly so we'll have to convert the Matrix4 into a 4x4 f32 array
    view: [[f32; 4]; 4],
    projection: [[f32; 4]; 4],
    position: [f32; 4],
}

impl CameraUniform {
    /// Creates a new camera uniform with identity matrices and zero position.
    pub fn new() -> Self {
        Self {
            view: Matrix4::identity().into(),
            projection: Matrix4::identity().into(),
            position: [0.0, 0.0, 0.0, 0.0],
        }
    }

    /// Updates the matrices and position from the current camera state.
    pub fn update_view_proj_and_pos(&mut self, camera: &Camera, projection: &Projection) {
        self.view = camera.calc_matrix().into();
        self.projection = projection.calc_matrix().into();
        let pos3: [f32; 3] = camera.position.into();

        self.position = [pos3[0], pos3[1], pos3[2], 1.0];
    }

    /// The view matrix.
    pub fn view(&self) -> Matrix4<f32> {
        self.view.into()
    }

    /// The projection matrix.
    pub fn projection(&self) -> Matrix4<f32> {
        self.projection.into()
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_is_clamped() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(-90.0), Deg(0.0));
        camera.rotate(0.0, -10_000.0, 0.1, Deg(89.0));
        assert_eq!(camera.pitch, Deg(89.0));
        camera.rotate(0.0, 10_000.0, 0.1, Deg(89.0));
        assert_eq!(camera.pitch, Deg(-89.0));
    }

    #[test]
    fn mouse_right_turns_right() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(-90.0), Deg(0.0));
        camera.rotate(900.0, 0.0, 0.1, Deg(89.0));
        let forward = camera.forward();
        assert!((forward.x - 1.0).abs() < 1e-5);
        assert!(forward.z.abs() < 1e-5);
    }

    #[test]
    fn view_matrix_moves_the_eye_to_the_origin() {
        let camera = Camera::new(Point3::new(3.0, 4.0, 5.0), Deg(-90.0), Deg(0.0));
        let eye = camera.calc_matrix() * camera.position.to_homogeneous();
        assert!(eye.truncate().magnitude() < 1e-5);

        let ahead = camera.position + camera.forward() * 2.0;
        let ahead = camera.calc_matrix() * ahead.to_homogeneous();
        assert!((ahead.z + 2.0).abs() < 1e-5);
    }

    #[test]
    fn degenerate_viewports_keep_a_finite_aspect() {
        let mut projection = Projection::new(800, 600, Deg(120.0), 0.1, 100.0);
        projection.resize(0, 0);
        assert_eq!(projection.aspect(), 1.0);
    }
}
