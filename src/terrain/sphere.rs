//! Curvature helpers shared by the ground mesh and the grass roots.

use glam::Vec3;

/// Below this `|sin(theta)|` a point is treated as sitting on the pole.
const POLE_EPSILON: f32 = 1e-4;

/// Height of `v` (read through its X and Z) on a sphere of `radius`.
///
/// The point is converted to spherical angles from its Z and X components and
/// projected back onto the sphere. On the pole the azimuth is undefined, so
/// the input Y is returned unchanged; inputs outside the sphere are clamped
/// into the `acos` domain rather than producing NaN.
pub fn place_on_sphere(v: Vec3, radius: f32) -> f32 {
    let theta = (v.z / radius).clamp(-1.0, 1.0).acos();
    let sin_theta = theta.sin();
    if sin_theta.abs() < POLE_EPSILON {
        return v.y;
    }
    let phi = (v.x / (radius * sin_theta)).clamp(-1.0, 1.0).acos();
    radius * sin_theta * phi.sin()
}

/// Vertical offset that bends a flat patch onto the sphere: zero at the
/// origin, negative towards the rim.
#[inline]
pub fn curvature_drop(x: f32, z: f32, radius: f32) -> f32 {
    place_on_sphere(Vec3::new(x, 0.0, z), radius).max(0.0) - radius
}

/// Floored modulo (`x - y * floor(x / y)`), the shader-side `mod`.
#[inline]
pub fn floored_mod(x: f32, y: f32) -> f32 {
    x - y * (x / y).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    const R: f32 = 240.0;

    #[test]
    fn test_origin_sits_on_top() {
        assert!((place_on_sphere(Vec3::ZERO, R) - R).abs() < 1e-3);
        assert!(curvature_drop(0.0, 0.0, R).abs() < 1e-3);
    }

    #[test]
    fn test_matches_sphere_equation() {
        for &(x, z) in &[(10.0, 0.0), (0.0, -30.0), (25.0, 40.0), (-50.0, 50.0)] {
            let y = place_on_sphere(Vec3::new(x, 0.0, z), R);
            let expected = (R * R - x * x - z * z).sqrt();
            assert!((y - expected).abs() < 1e-2, "({}, {}) -> {} vs {}", x, z, y, expected);
        }
    }

    #[test]
    fn test_drop_grows_towards_rim() {
        let near = curvature_drop(5.0, 5.0, R);
        let far = curvature_drop(50.0, 50.0, R);
        assert!(near <= 0.0 && far < near);
    }

    #[test]
    fn test_pole_returns_input_height() {
        let v = Vec3::new(3.0, 7.5, R);
        assert_eq!(place_on_sphere(v, R), 7.5);
        let v = Vec3::new(0.0, -2.0, -R);
        assert_eq!(place_on_sphere(v, R), -2.0);
    }

    #[test]
    fn test_outside_sphere_is_finite() {
        let y = place_on_sphere(Vec3::new(1000.0, 0.0, 10.0), R);
        assert!(y.is_finite());
        let y = place_on_sphere(Vec3::new(10.0, 0.0, 5000.0), R);
        assert!(y.is_finite());
    }

    #[test]
    fn test_floored_mod() {
        assert!((floored_mod(5.5, 2.0) - 1.5).abs() < 1e-6);
        assert!((floored_mod(-0.5, 2.0) - 1.5).abs() < 1e-6);
        assert_eq!(floored_mod(0.0, 1.5625), 0.0);
    }
}
