//! Blade sway, mirroring the grass vertex stage.

use std::f32::consts::TAU;

use glam::{Quat, Vec2, Vec3};

use super::config::WindConfig;
use super::instances::GrassInstance;

#[inline]
fn fract(x: f32) -> f32 {
    x - x.floor()
}

/// Per-blade sway speed multiplier, centred on 1.0.
pub fn speed_variation(index: f32, jitter: f32) -> f32 {
    1.0 - 0.5 * jitter + jitter * fract(index * 127.1)
}

/// Half of the sway angle for a blade rooted at `offset` at `time`.
///
/// Two travelling waves across the patch, one per horizontal axis. The
/// result is always in `[-(primary + secondary), 0]`, so blades only lean
/// one way and never swing through the vertical.
pub fn sway_half_angle(wind: &WindConfig, offset: Vec2, width: f32, index: f32, time: f32) -> f32 {
    let patch = (Vec2::splat(0.5) + offset / width) * TAU;
    let phase = index * TAU * wind.phase_scale;
    let t = time * wind.speed * speed_variation(index, wind.speed_jitter);
    -(0.5 + 0.5 * (patch.x + t + phase).sin()) * wind.primary_amplitude
        - (0.5 + 0.5 * (patch.y + t + phase * 0.7).cos()) * wind.secondary_amplitude
}

/// Tilt about the horizontal `(1, 0, -1)` axis.
pub fn sway_rotation(half_angle: f32) -> Quat {
    let (s, c) = half_angle.sin_cos();
    Quat::from_xyzw(s, 0.0, -s, c).normalize()
}

/// Yaw rotation stored on the instance.
pub fn root_rotation(instance: &GrassInstance) -> Quat {
    let [s, c] = instance.half_root_angle;
    Quat::from_xyzw(0.0, s, 0.0, c)
}

/// World position of template vertex `local` for `instance` rooted at `root`.
pub fn blade_vertex(wind: &WindConfig, instance: &GrassInstance, local: Vec3, root: Vec3, width: f32, time: f32) -> Vec3 {
    let scaled = Vec3::new(local.x, local.y * instance.scale, local.z);
    let yawed = root_rotation(instance) * scaled;
    let offset = Vec2::new(instance.offset[0], instance.offset[2]);
    let half = sway_half_angle(wind, offset, width, instance.index, time);
    sway_rotation(half) * yawed + root
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance(index: f32) -> GrassInstance {
        GrassInstance {
            offset: [3.0, 0.0, -7.0],
            scale: 2.5,
            half_root_angle: [0.0, 1.0],
            index,
            _pad: 0.0,
        }
    }

    #[test]
    fn test_speed_variation_band() {
        for i in 0..1000 {
            let v = speed_variation(i as f32 / 1000.0, 0.1);
            assert!(v >= 0.95 && v < 1.05);
        }
    }

    #[test]
    fn test_half_angle_bounded() {
        let wind = WindConfig::default();
        for i in 0..500 {
            let t = i as f32 * 0.37;
            let a = sway_half_angle(&wind, Vec2::new(t.sin() * 40.0, t.cos() * 40.0), 100.0, i as f32 / 500.0, t);
            assert!(a <= 0.0 && a >= -0.15 - 1e-6);
        }
    }

    #[test]
    fn test_sway_moves_with_time() {
        let wind = WindConfig::default();
        let a = sway_half_angle(&wind, Vec2::ZERO, 100.0, 0.3, 0.0);
        let b = sway_half_angle(&wind, Vec2::ZERO, 100.0, 0.3, 0.5);
        assert!((a - b).abs() > 1e-4);
    }

    #[test]
    fn test_root_vertex_stays_on_root() {
        let wind = WindConfig::default();
        let root = Vec3::new(3.0, -1.2, -7.0);
        let p = blade_vertex(&wind, &instance(0.4), Vec3::ZERO, root, 100.0, 12.0);
        assert!((p - root).length() < 1e-6);
    }

    #[test]
    fn test_tip_scaled_and_stays_upright() {
        let wind = WindConfig::default();
        let p = blade_vertex(&wind, &instance(0.4), Vec3::new(0.0, 0.5, 0.0), Vec3::ZERO, 100.0, 3.0);
        // Sway stays well under half a radian.
        assert!(p.y > 1.25 * 0.5f32.cos() && p.y <= 1.25 + 1e-5);
        assert!((p.length() - 1.25).abs() < 1e-4);
    }

    #[test]
    fn test_rotations_are_unit() {
        assert!((sway_rotation(-0.12).length() - 1.0).abs() < 1e-6);
        let inst = instance(0.0);
        assert!((root_rotation(&inst).length() - 1.0).abs() < 1e-6);
    }
}
