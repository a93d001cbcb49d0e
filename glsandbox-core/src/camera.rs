//! A free-look camera driven by yaw and pitch.
//!
//! Orientation is fully determined by `(yaw, pitch)`. Every mutator that
//! touches either angle recomputes the forward, right and up vectors before
//! returning, so the basis is never stale.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Pitch is kept strictly inside +-90 degrees to avoid the singularity at the
/// poles.
pub const PITCH_LIMIT: f32 = 89.9;
/// Lowest field of view the camera accepts, in degrees.
pub const MIN_FOV: f32 = 1.0;
/// Highest field of view the camera accepts, in degrees.
pub const MAX_FOV: f32 = 120.0;

const MIN_Z_NEAR: f32 = 1e-4;

/// Initial state of a [`Camera`]. Angles are in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub world_up: Vec3,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    pub zoom_sensitivity: f32,
    pub fov: f32,
    pub min_fov: f32,
    pub max_fov: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 3.0),
            yaw: -90.0,
            pitch: 0.0,
            world_up: Vec3::Y,
            movement_speed: 2.5,
            mouse_sensitivity: 0.1,
            zoom_sensitivity: 1.0,
            fov: 45.0,
            min_fov: MIN_FOV,
            max_fov: MAX_FOV,
            z_near: 0.1,
            z_far: 100.0,
        }
    }
}

/// A free-look perspective camera.
#[derive(Clone, Debug)]
pub struct Camera {
    config: CameraConfig,

    position: Vec3,
    forward: Vec3,
    right: Vec3,
    up: Vec3,
    world_up: Vec3,

    yaw: f32,
    pitch: f32,
    movement_speed: f32,
    mouse_sensitivity: f32,
    zoom_sensitivity: f32,
    fov: f32,
    min_fov: f32,
    max_fov: f32,
    z_near: f32,
    z_far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

impl Camera {
    /// Creates a camera from the given configuration, clamping every value
    /// into its valid range.
    pub fn new(config: CameraConfig) -> Self {
        let world_up = match config.world_up.try_normalize() {
            Some(up) => up,
            None => {
                log::warn!(
                    "Camera world up {:?} cannot be normalized, using +Y",
                    config.world_up
                );
                Vec3::Y
            }
        };

        let mut camera = Self {
            config,
            position: config.position,
            forward: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
            world_up,
            yaw: config.yaw,
            pitch: config.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            movement_speed: config.movement_speed,
            mouse_sensitivity: config.mouse_sensitivity,
            zoom_sensitivity: config.zoom_sensitivity,
            fov: config.fov,
            min_fov: MIN_FOV,
            max_fov: MAX_FOV,
            z_near: MIN_Z_NEAR,
            z_far: 1.0,
        };
        camera.set_fov_limits(config.min_fov, config.max_fov);
        camera.set_z_near(config.z_near);
        camera.set_z_far(config.z_far);
        camera.update_vectors();
        camera
    }

    /// Recomputes the orthonormal basis from yaw and pitch.
    fn update_vectors(&mut self) {
        let (yaw_sin, yaw_cos) = self.yaw.to_radians().sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.to_radians().sin_cos();

        let forward = Vec3::new(yaw_cos * pitch_cos, pitch_sin, yaw_sin * pitch_cos).normalize();
        // Looking along the world up axis leaves the cross product degenerate; keep the
        // previous right vector, made perpendicular to the new forward, in that case.
        let right = forward
            .cross(self.world_up)
            .try_normalize()
            .or_else(|| (self.right - forward * forward.dot(self.right)).try_normalize())
            .unwrap_or_else(|| forward.any_orthonormal_vector());

        self.forward = forward;
        self.right = right;
        self.up = right.cross(forward).normalize();
    }

    /// Returns the view matrix looking from the camera position along its
    /// forward vector.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward, self.up)
    }

    /// Returns the perspective projection for the given aspect ratio.
    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        let aspect_ratio = if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
            aspect_ratio
        } else {
            log::debug!("Invalid aspect ratio {aspect_ratio}, using 1.0");
            1.0
        };
        Mat4::perspective_rh_gl(self.fov.to_radians(), aspect_ratio, self.z_near, self.z_far)
    }

    /// Moves the camera by `offset` scaled by the movement speed.
    pub fn move_by(&mut self, offset: Vec3) {
        self.position += self.movement_speed * offset;
    }

    /// Moves along the forward vector projected onto the horizontal plane, so
    /// looking up or down never changes altitude.
    pub fn move_forward(&mut self, distance: f32) {
        let horizontal = self.forward - self.world_up * self.forward.dot(self.world_up);
        self.position += distance * horizontal.normalize_or_zero();
    }

    pub fn move_right(&mut self, distance: f32) {
        self.position += distance * self.right;
    }

    pub fn move_up(&mut self, distance: f32) {
        self.position += distance * self.up;
    }

    /// Rotates the camera by mouse deltas scaled by the mouse sensitivity.
    ///
    /// Yaw is left unbounded; pitch is clamped to +-[`PITCH_LIMIT`].
    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw += yaw_delta * self.mouse_sensitivity;
        self.pitch = (self.pitch + pitch_delta * self.mouse_sensitivity)
            .clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
    }

    /// Narrows the field of view for positive deltas and widens it for negative
    /// ones.
    pub fn zoom(&mut self, delta: f32) {
        self.set_fov(self.fov - delta * self.zoom_sensitivity);
    }

    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov.clamp(self.min_fov, self.max_fov);
    }

    /// Sets the field of view limits. Reversed limits are swapped, both are
    /// kept inside [`MIN_FOV`, `MAX_FOV`] and the current field of view is
    /// clamped into the new range.
    pub fn set_fov_limits(&mut self, min_fov: f32, max_fov: f32) {
        let (min_fov, max_fov) = if min_fov > max_fov {
            (max_fov, min_fov)
        } else {
            (min_fov, max_fov)
        };

        self.min_fov = min_fov.clamp(MIN_FOV, MAX_FOV);
        self.max_fov = max_fov.clamp(MIN_FOV, MAX_FOV);
        self.fov = self.fov.clamp(self.min_fov, self.max_fov);
    }

    pub fn set_movement_speed(&mut self, movement_speed: f32) {
        self.movement_speed = movement_speed;
    }

    pub fn set_mouse_sensitivity(&mut self, mouse_sensitivity: f32) {
        self.mouse_sensitivity = mouse_sensitivity;
    }

    pub fn set_zoom_sensitivity(&mut self, zoom_sensitivity: f32) {
        self.zoom_sensitivity = zoom_sensitivity;
    }

    pub fn set_z_near(&mut self, z_near: f32) {
        self.z_near = z_near.max(MIN_Z_NEAR);
        if self.z_far <= self.z_near {
            self.z_far = self.z_near + MIN_Z_NEAR;
        }
    }

    pub fn set_z_far(&mut self, z_far: f32) {
        self.z_far = z_far.max(self.z_near + MIN_Z_NEAR);
    }

    /// Restores the state the camera was created with.
    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn movement_speed(&self) -> f32 {
        self.movement_speed
    }

    pub fn mouse_sensitivity(&self) -> f32 {
        self.mouse_sensitivity
    }

    pub fn zoom_sensitivity(&self) -> f32 {
        self.zoom_sensitivity
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn min_fov(&self) -> f32 {
        self.min_fov
    }

    pub fn max_fov(&self) -> f32 {
        self.max_fov
    }

    pub fn z_near(&self) -> f32 {
        self.z_near
    }

    pub fn z_far(&self) -> f32 {
        self.z_far
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn assert_orthonormal(camera: &Camera) {
        let (f, r, u) = (camera.forward(), camera.right(), camera.up());
        assert!(f.dot(r).abs() < EPSILON, "forward.right = {}", f.dot(r));
        assert!(f.dot(u).abs() < EPSILON, "forward.up = {}", f.dot(u));
        assert!(r.dot(u).abs() < EPSILON, "right.up = {}", r.dot(u));
        for v in [f, r, u] {
            assert!((v.length() - 1.0).abs() < EPSILON);
        }
    }

    #[test]
    fn default_camera_looks_down_negative_z() {
        let camera = Camera::default();
        assert!(camera.forward().abs_diff_eq(Vec3::NEG_Z, EPSILON));
        assert!(camera.right().abs_diff_eq(Vec3::X, EPSILON));
        assert!(camera.up().abs_diff_eq(Vec3::Y, EPSILON));
    }

    #[test]
    fn pitch_is_clamped_to_limits() {
        let mut camera = Camera::default();
        camera.set_mouse_sensitivity(1.0);

        camera.rotate(0.0, 500.0);
        assert_eq!(camera.pitch(), PITCH_LIMIT);

        camera.rotate(0.0, -1000.0);
        assert_eq!(camera.pitch(), -PITCH_LIMIT);
    }

    #[test]
    fn basis_stays_orthonormal_after_rotations() {
        let mut camera = Camera::default();
        let deltas = [
            (12.0, 3.0),
            (-400.0, 88.0),
            (3600.5, -170.0),
            (0.25, 0.75),
            (-91.0, 900.0),
        ];
        for (yaw, pitch) in deltas {
            camera.rotate(yaw, pitch);
            assert_orthonormal(&camera);
        }
    }

    #[test]
    fn yaw_is_not_wrapped() {
        let mut camera = Camera::default();
        camera.set_mouse_sensitivity(1.0);
        camera.rotate(720.0, 0.0);
        assert_eq!(camera.yaw(), 630.0);
    }

    #[test]
    fn reversed_fov_limits_are_swapped() {
        let mut camera = Camera::default();
        camera.set_fov(5.0);
        camera.set_fov_limits(100.0, 10.0);
        assert_eq!(camera.min_fov(), 10.0);
        assert_eq!(camera.max_fov(), 100.0);
        assert_eq!(camera.fov(), 10.0);
    }

    #[test]
    fn fov_limits_are_bounded() {
        let mut camera = Camera::default();
        camera.set_fov_limits(-20.0, 400.0);
        assert_eq!(camera.min_fov(), MIN_FOV);
        assert_eq!(camera.max_fov(), MAX_FOV);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut camera = Camera::default();
        camera.set_fov_limits(30.0, 60.0);
        camera.zoom(100.0);
        assert_eq!(camera.fov(), 30.0);
        camera.zoom(-100.0);
        assert_eq!(camera.fov(), 60.0);
        camera.set_zoom_sensitivity(2.0);
        camera.zoom(5.0);
        assert_eq!(camera.fov(), 50.0);
    }

    #[test]
    fn move_forward_keeps_altitude() {
        let mut camera = Camera::default();
        camera.set_mouse_sensitivity(1.0);
        camera.rotate(0.0, 60.0);
        let start = camera.position();
        camera.move_forward(2.0);
        let moved = camera.position() - start;
        assert!(moved.y.abs() < EPSILON);
        assert!((moved.length() - 2.0).abs() < EPSILON);
    }

    #[test]
    fn move_right_and_up_follow_basis() {
        let mut camera = Camera::default();
        let start = camera.position();
        camera.move_right(1.5);
        camera.move_up(0.5);
        let expected = start + camera.right() * 1.5 + camera.up() * 0.5;
        assert!(camera.position().abs_diff_eq(expected, EPSILON));
    }

    #[test]
    fn move_by_scales_with_speed() {
        let mut camera = Camera::default();
        camera.set_movement_speed(4.0);
        let start = camera.position();
        camera.move_by(Vec3::X);
        assert!(camera.position().abs_diff_eq(start + Vec3::new(4.0, 0.0, 0.0), EPSILON));
    }

    #[test]
    fn view_matrix_maps_eye_to_origin() {
        let camera = Camera::default();
        let eye = camera.view_matrix().transform_point3(camera.position());
        assert!(eye.abs_diff_eq(Vec3::ZERO, EPSILON));
        let ahead = camera
            .view_matrix()
            .transform_point3(camera.position() + camera.forward());
        assert!(ahead.abs_diff_eq(Vec3::NEG_Z, EPSILON));
    }

    #[test]
    fn projection_uses_degrees() {
        let camera = Camera::default();
        let projection = camera.projection_matrix(1.0);
        let expected = Mat4::perspective_rh_gl(45f32.to_radians(), 1.0, 0.1, 100.0);
        assert!(projection.abs_diff_eq(expected, EPSILON));
        assert!(!camera.projection_matrix(0.0).is_nan());
    }

    #[test]
    fn reset_restores_configuration() {
        let mut camera = Camera::default();
        camera.rotate(30.0, 20.0);
        camera.move_right(3.0);
        camera.zoom(10.0);
        camera.reset();
        assert_eq!(camera.position(), CameraConfig::default().position);
        assert_eq!(camera.yaw(), -90.0);
        assert_eq!(camera.fov(), 45.0);
    }

    #[test]
    fn constructor_clamps_configuration() {
        let camera = Camera::new(CameraConfig {
            pitch: 120.0,
            fov: 170.0,
            min_fov: 90.0,
            max_fov: 20.0,
            ..CameraConfig::default()
        });
        assert_eq!(camera.pitch(), PITCH_LIMIT);
        assert_eq!(camera.min_fov(), 20.0);
        assert_eq!(camera.max_fov(), 90.0);
        assert_eq!(camera.fov(), 90.0);
        assert_orthonormal(&camera);
    }

    #[test]
    fn looking_along_world_up_keeps_a_valid_basis() {
        let mut camera = Camera::new(CameraConfig {
            world_up: Vec3::X,
            yaw: 0.0,
            pitch: 0.0,
            ..CameraConfig::default()
        });
        assert!(camera.forward().abs_diff_eq(Vec3::X, EPSILON));
        assert_orthonormal(&camera);
        assert!(camera.view_matrix().is_finite());

        camera.rotate(10.0, 0.0);
        camera.rotate(-10.0, 0.0);
        assert_orthonormal(&camera);
    }
}
