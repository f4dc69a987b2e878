//! Auto-rotating orbit camera controller

use serde::{Deserialize, Serialize};

use crate::core::camera::Camera;
use crate::core::types::Vec3;

/// Camera placement and orbit limits.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Initial camera position (the orbit is derived from it).
    pub position: [f32; 3],
    /// Orbit pivot.
    pub target: [f32; 3],
    pub min_distance: f32,
    pub max_distance: f32,
    /// Polar angle limits in radians, measured from +Y.
    pub min_polar: f32,
    pub max_polar: f32,
    /// Auto-rotation speed; one unit is a full turn per minute.
    pub auto_rotate_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            position: [-18.0, -1.0, 55.0],
            target: [0.0, 5.0, 10.0],
            min_distance: 50.0,
            max_distance: 50.0,
            min_polar: 1.66,
            max_polar: 1.7,
            auto_rotate_speed: -0.06,
        }
    }
}

/// Orbit controller that slowly circles a pivot, with optional drag input.
pub struct OrbitCameraController {
    target: Vec3,
    distance: f32,
    /// Angle from +Y.
    polar: f32,
    /// Angle around +Y, measured from +Z towards +X.
    azimuth: f32,
    min_polar: f32,
    max_polar: f32,
    /// Radians per second.
    auto_rotate_rate: f32,
    pub auto_rotate: bool,
}

impl OrbitCameraController {
    /// Derive the orbit from the configured position and pivot.
    pub fn new(config: &CameraConfig) -> Self {
        let target = Vec3::from(config.target);
        let offset = Vec3::from(config.position) - target;
        let radius = offset.length().max(1e-4);
        let polar = (offset.y / radius).clamp(-1.0, 1.0).acos();
        let azimuth = offset.x.atan2(offset.z);

        let (min_polar, max_polar) = if config.min_polar <= config.max_polar {
            (config.min_polar, config.max_polar)
        } else {
            (config.max_polar, config.min_polar)
        };

        Self {
            target,
            distance: radius.clamp(config.min_distance, config.max_distance.max(config.min_distance)),
            polar: polar.clamp(min_polar, max_polar),
            azimuth,
            min_polar,
            max_polar,
            auto_rotate_rate: std::f32::consts::TAU / 60.0 * config.auto_rotate_speed,
            auto_rotate: true,
        }
    }

    /// Advance the auto-rotation and write position/orientation into `camera`.
    pub fn update(&mut self, camera: &mut Camera, dt: f32) {
        if self.auto_rotate {
            self.azimuth -= self.auto_rotate_rate * dt;
        }
        self.apply(camera);
    }

    /// Rotate by a pointer drag measured in pixels.
    pub fn drag(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        let scale = std::f32::consts::TAU / viewport_height;
        self.azimuth -= dx * scale;
        self.polar = (self.polar - dy * scale).clamp(self.min_polar, self.max_polar);
    }

    /// Current eye position on the orbit.
    pub fn eye(&self) -> Vec3 {
        let sin_polar = self.polar.sin();
        self.target
            + Vec3::new(
                sin_polar * self.azimuth.sin(),
                self.polar.cos(),
                sin_polar * self.azimuth.cos(),
            ) * self.distance
    }

    /// Orbit pivot
    pub fn target(&self) -> Vec3 {
        self.target
    }

    fn apply(&self, camera: &mut Camera) {
        camera.position = self.eye();
        camera.look_at(self.target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_clamped_to_config() {
        let controller = OrbitCameraController::new(&CameraConfig::default());
        let eye = controller.eye();
        assert!(((eye - controller.target()).length() - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_polar_within_limits() {
        let config = CameraConfig::default();
        let controller = OrbitCameraController::new(&config);
        let offset = controller.eye() - controller.target();
        let polar = (offset.y / offset.length()).acos();
        assert!(polar >= config.min_polar - 1e-4 && polar <= config.max_polar + 1e-4);
    }

    #[test]
    fn test_auto_rotate_moves_eye_and_keeps_distance() {
        let mut controller = OrbitCameraController::new(&CameraConfig::default());
        let mut camera = Camera::default();
        controller.update(&mut camera, 0.0);
        let before = camera.position;
        for _ in 0..100 {
            controller.update(&mut camera, 0.1);
        }
        assert!((camera.position - before).length() > 0.1);
        assert!(((camera.position - controller.target()).length() - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_drag_respects_polar_limits() {
        let config = CameraConfig::default();
        let mut controller = OrbitCameraController::new(&config);
        controller.drag(0.0, -10_000.0, 600.0);
        let offset = controller.eye() - controller.target();
        let polar = (offset.y / offset.length()).acos();
        assert!((polar - config.max_polar).abs() < 1e-4);
    }
}
