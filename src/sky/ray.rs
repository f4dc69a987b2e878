//! View-ray reconstruction for the fullscreen sky pass.

use glam::{Mat3, Vec2, Vec3};

/// Camera-space ray through `pixel` (top-left origin, physical pixels).
///
/// The image plane sits at the distance where `resolution.y` spans the
/// vertical field of view, so the ray set matches a perspective camera with
/// the same `fov_y`.
pub fn ray_direction(fov_y: f32, pixel: Vec2, resolution: Vec2) -> Vec3 {
    let xy = Vec2::new(pixel.x - resolution.x * 0.5, resolution.y * 0.5 - pixel.y);
    let z = 0.5 * resolution.y / (fov_y * 0.5).tan();
    Vec3::new(xy.x, xy.y, -z).normalize()
}

/// Camera-to-world rotation for an eye looking at `target`.
///
/// Columns are right, up and backward. A view straight along `up` falls back
/// to +X as the right axis instead of producing NaN.
pub fn look_at_basis(eye: Vec3, target: Vec3, up: Vec3) -> Mat3 {
    let z = (target - eye).normalize_or(-Vec3::Z);
    let x = z.cross(up).normalize_or(Vec3::X);
    let y = x.cross(z);
    Mat3::from_cols(x, y, -z)
}
