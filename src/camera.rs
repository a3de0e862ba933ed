//! Camera that drifts slowly around the origin.

use glam::{Mat4, Vec3};

use crate::config::CameraConfig;

/// Perspective camera on a slow circular drift, always aimed at the origin.
///
/// The position is a pure function of wall-clock time:
/// `x = sin(t * rate) * radius`, `y = cos(t * rate) * radius`, `z = distance`.
#[derive(Debug, Clone)]
pub struct DriftCamera {
    config: CameraConfig,
    /// Width / height of the viewport.
    aspect: f32,
    position: Vec3,
}

impl DriftCamera {
    /// Create a camera for a viewport with the given aspect ratio, placed at
    /// its `t = 0` position.
    pub fn new(config: CameraConfig, aspect: f32) -> Self {
        let position = drift_position(&config, 0.0);
        Self {
            config,
            aspect,
            position,
        }
    }

    /// Move the camera to where it is `elapsed` seconds after start.
    pub fn update(&mut self, elapsed: f32) {
        self.position = drift_position(&self.config, elapsed);
    }

    /// Update aspect ratio on resize.
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Calculate the camera's world position.
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Calculate the view matrix for rendering.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, Vec3::ZERO, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.config.fov_degrees.to_radians(),
            self.aspect,
            self.config.near,
            self.config.far,
        )
    }
}

/// Camera position `elapsed` seconds after start.
pub fn drift_position(config: &CameraConfig, elapsed: f32) -> Vec3 {
    let angle = elapsed * config.drift_rate;
    Vec3::new(
        angle.sin() * config.drift_radius,
        angle.cos() * config.drift_radius,
        config.distance,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_position() {
        let camera = DriftCamera::new(CameraConfig::default(), 16.0 / 9.0);
        assert!((camera.position() - Vec3::new(0.0, 0.5, 3.0)).length() < 1e-6);
    }

    #[test]
    fn test_drift_stays_on_circle() {
        let config = CameraConfig::default();
        for step in 0..100 {
            let p = drift_position(&config, step as f32 * 3.7);
            assert!((p.truncate().length() - 0.5).abs() < 1e-5);
            assert_eq!(p.z, 3.0);
        }
    }

    #[test]
    fn test_origin_projects_to_screen_center() {
        let mut camera = DriftCamera::new(CameraConfig::default(), 1.5);
        camera.update(12.0);
        let clip = camera.projection_matrix() * camera.view_matrix() * glam::Vec4::W;
        assert!((clip.x / clip.w).abs() < 1e-5);
        assert!((clip.y / clip.w).abs() < 1e-5);
    }

    #[test]
    fn test_aspect_ratio_changes_projection() {
        let mut camera = DriftCamera::new(CameraConfig::default(), 1.0);
        let before = camera.projection_matrix();
        camera.set_aspect_ratio(2.0);
        assert_eq!(camera.aspect(), 2.0);
        assert_ne!(before, camera.projection_matrix());
    }
}
