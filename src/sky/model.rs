//! CPU mirror of the sky fragment stage (sky.wgsl).
//!
//! Used by tests and benchmarks; keep the two in step.

use glam::{Vec2, Vec3};

use super::params::SkyUniform;

/// `(seed, height)` of the two cloud bands; the second is drawn at half strength.
pub const CLOUD_LAYERS: [(f32, f32); 2] = [(0.0, 0.25), (42.0, 0.4)];

/// Smallest `|ray.y|` the fog integral divides by.
pub const FOG_MIN_RAY_Y: f32 = 1e-4;

/// Shader-style fractional part (`x - floor(x)`), also for negative inputs.
#[inline]
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[inline]
fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Zenith-to-horizon gradient: the horizon is darker.
pub fn sky_gradient(sky: Vec3, ray: Vec3) -> Vec3 {
    (sky * 0.35).lerp(sky, (1.0 - ray.y).powi(4))
}

/// Star field brightness along `ray`.
pub fn stars(u: &SkyUniform, ray: Vec3) -> f32 {
    if u.star_intensity < u.star_min_intensity || ray.y < 0.1 {
        return 0.0;
    }
    let p = ray * u.star_scale;
    let id = p.floor();
    let fp = p - id - Vec3::splat(0.5);

    let h = fract(id.dot(Vec3::new(127.1, 311.7, 74.7)).sin() * 43758.5453);
    let size = h * 0.5 + 0.5;
    let present = if h >= u.star_threshold { 1.0 } else { 0.0 };
    let star = present * (1.0 - smoothstep(0.0, 0.2 * size, fp.length()));
    star * u.star_intensity * smoothstep(0.1, 0.3, ray.y)
}

/// Pseudo-random value in `[0, 1)` per lattice point.
#[inline]
pub fn hash(p: Vec2, seed: f32) -> f32 {
    fract((p + Vec2::splat(seed * 13.5)).dot(Vec2::new(127.1, 311.7)).sin() * 43758.5453123)
}

/// Smooth value noise.
pub fn value_noise(p: Vec2, seed: f32) -> f32 {
    let i = p.floor();
    let f = p - i;
    let f = f * f * (Vec2::splat(3.0) - 2.0 * f);
    let a = hash(i, seed);
    let b = hash(i + Vec2::new(1.0, 0.0), seed);
    let c = hash(i + Vec2::new(0.0, 1.0), seed);
    let d = hash(i + Vec2::new(1.0, 1.0), seed);
    mix(mix(a, b, f.x), mix(c, d, f.x), f.y)
}

/// Four-octave fractional Brownian motion, range `[0, 0.9375)`.
pub fn fbm(p: Vec2, seed: f32) -> f32 {
    let mut sum = 0.0;
    let mut amp = 0.5;
    let mut freq = 1.0;
    for octave in 0..4 {
        sum += value_noise(p * freq, seed + octave as f32 * 7.3) * amp;
        amp *= 0.5;
        freq *= 2.0;
    }
    sum
}

/// Two-scale cloud noise advected by `time`.
pub fn cloud_noise(p: Vec2, time: f32, cloud_speed: f32, seed: f32) -> f32 {
    let offset = Vec2::new(time * cloud_speed + seed, seed * 23.7);
    fbm(p * 1.2 + offset, seed) + fbm(p * 2.5 + offset * 1.2, seed + 100.0) * 0.35
}

/// Density of one cloud band, projected onto a plane above the viewer.
pub fn cloud_layer(ray: Vec3, time: f32, cloud_speed: f32, seed: f32, height: f32) -> f32 {
    if ray.y < 0.15 {
        return 0.0;
    }
    let height_factor = smoothstep(0.15, height, ray.y) * (1.0 - smoothstep(height, 0.6, ray.y));
    let pos = Vec2::new(ray.x, ray.z) / ray.y * (height * 4.0);
    let density = smoothstep(0.6, 0.9, cloud_noise(pos, time, cloud_speed, seed));
    density * height_factor
}

/// Combined density of both bands, capped at 1.
pub fn cloud_density(ray: Vec3, time: f32, cloud_speed: f32) -> f32 {
    let (s0, h0) = CLOUD_LAYERS[0];
    let (s1, h1) = CLOUD_LAYERS[1];
    let total = cloud_layer(ray, time, cloud_speed, s0, h0)
        + cloud_layer(ray, time, cloud_speed, s1, h1) * 0.5;
    total.min(1.0)
}

/// Inverse-power falloff around the sun.
#[inline]
pub fn glow(dist: f32, radius: f32, sharpness: f32) -> f32 {
    (radius / dist.max(1e-6)).powf(sharpness)
}

/// Height/distance fog blended towards a sun-tinted colour.
pub fn apply_fog(u: &SkyUniform, rgb: Vec3, ray: Vec3, sun: Vec3) -> Vec3 {
    let mut ray_y = ray.y;
    if ray_y.abs() < FOG_MIN_RAY_Y {
        ray_y = FOG_MIN_RAY_Y;
    }
    let k = u.fog_fade;
    let amount = (-u.fog_origin_height * k).exp() * (1.0 - (-u.fog_distance * ray_y * k).exp())
        / (ray_y * k);
    let sun_amount = Vec3::new(ray.x, ray_y, ray.z).dot(sun).max(0.0);
    let fog_color = Vec3::from(u.fog_color_a).lerp(Vec3::from(u.fog_color_b), sun_amount.powi(16));
    rgb.lerp(fog_color, amount.clamp(0.0, 1.0))
}

/// Narkowicz ACES filmic curve, clamped to `[0, 1]`.
pub fn aces(x: Vec3) -> Vec3 {
    let (a, b, c, d, e) = (2.51, 0.03, 2.43, 0.59, 0.14);
    ((x * (a * x + b)) / (x * (c * x + d) + e)).clamp(Vec3::ZERO, Vec3::ONE)
}

/// Display gamma.
#[inline]
pub fn encode_gamma(x: Vec3) -> Vec3 {
    x.powf(0.4545)
}

/// Final display colour for a world-space view ray.
pub fn shade(u: &SkyUniform, ray: Vec3) -> Vec3 {
    let mut col = sky_gradient(Vec3::from(u.sky_colour), ray);
    col += Vec3::splat(stars(u, ray));

    let sun = Vec3::from(u.sun_direction).normalize_or(Vec3::Y);
    let mu = sun.dot(ray);

    let density = cloud_density(ray, u.time, u.cloud_speed);
    let cloud_color = Vec3::from(u.cloud_shadow).lerp(Vec3::from(u.cloud_base), 0.4 + mu.max(0.0) * 0.6);
    let edge_fade = smoothstep(0.0, 0.3, ray.y);
    col = col.lerp(cloud_color, density * u.cloud_opacity * edge_fade);

    col += Vec3::from(u.sun_glow) * glow(1.0 - mu, u.glow_radius, u.glow_sharpness);
    col += apply_fog(u, col, ray, sun);
    encode_gamma(aces(col))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atmosphere::{AtmosphereParams, AtmosphereSnapshot};
    use crate::core::camera::Camera;
    use crate::sky::{SkyConfig, SkyDome};

    fn uniform(params: AtmosphereParams, night: f32) -> SkyUniform {
        let dome = SkyDome::new(SkyConfig::default(), 800, 600);
        let snapshot = AtmosphereSnapshot::settled(params, night);
        dome.uniform(&snapshot, &Camera::default(), 10.0)
    }

    #[test]
    fn test_gradient_darker_at_horizon() {
        let sky = Vec3::new(0.012, 0.12, 0.54);
        let zenith = sky_gradient(sky, Vec3::Y);
        let horizon = sky_gradient(sky, Vec3::X);
        assert!((zenith - sky * 0.35).length() < 1e-6);
        assert!((horizon - sky).length() < 1e-6);
    }

    #[test]
    fn test_horizontal_fog_is_finite() {
        let u = uniform(AtmosphereParams::day(), 0.0);
        let sun = Vec3::from(u.sun_direction).normalize();
        for &y in &[0.0f32, 1e-7, -1e-7, 1e-5, -1e-5] {
            let ray = Vec3::new(1.0, y, 0.0).normalize();
            let fogged = apply_fog(&u, Vec3::splat(0.2), ray, sun);
            assert!(fogged.is_finite(), "NaN fog at y = {}", y);
            assert!(shade(&u, ray).is_finite());
        }
    }

    #[test]
    fn test_fog_thicker_towards_horizon() {
        let u = uniform(AtmosphereParams::day(), 0.0);
        let sun = Vec3::new(0.0, -1.0, 0.0);
        let black = Vec3::ZERO;
        let up = apply_fog(&u, black, Vec3::Y, sun).length();
        let low = apply_fog(&u, black, Vec3::new(0.0, 0.05, 1.0).normalize(), sun).length();
        assert!(low > up);
    }

    #[test]
    fn test_no_stars_by_day() {
        let u = uniform(AtmosphereParams::day(), 0.0);
        for i in 0..500 {
            let a = i as f32 * 0.37;
            let ray = Vec3::new(a.cos() * 0.5, 0.8, a.sin() * 0.5).normalize();
            assert_eq!(stars(&u, ray), 0.0);
        }
    }

    #[test]
    fn test_stars_are_sparse_at_night() {
        let u = uniform(AtmosphereParams::night(), 1.0);
        let mut lit = 0;
        let total = 4000;
        for i in 0..total {
            let a = i as f32 * 0.013;
            let b = 0.3 + (i % 97) as f32 * 0.006;
            let ray = Vec3::new(a.cos() * (1.0 - b), b, a.sin() * (1.0 - b)).normalize();
            let s = stars(&u, ray);
            assert!((0.0..=1.0).contains(&s));
            if s > 0.0 {
                lit += 1;
            }
        }
        assert!(lit < total / 10, "{} of {} rays hit stars", lit, total);
    }

    #[test]
    fn test_no_stars_below_horizon_band() {
        let u = uniform(AtmosphereParams::night(), 1.0);
        let ray = Vec3::new(1.0, 0.05, 0.0).normalize();
        assert_eq!(stars(&u, ray), 0.0);
    }

    #[test]
    fn test_clouds_absent_near_horizon() {
        for t in [0.0, 5.0, 100.0] {
            assert_eq!(cloud_density(Vec3::new(1.0, 0.1, 0.0).normalize(), t, 0.12), 0.0);
            assert_eq!(cloud_density(-Vec3::Y, t, 0.12), 0.0);
        }
    }

    #[test]
    fn test_cloud_density_bounded_and_moves() {
        let mut changed = false;
        for i in 0..200 {
            let a = i as f32 * 0.31;
            let ray = Vec3::new(a.cos() * 0.8, 0.3, a.sin() * 0.8).normalize();
            let d0 = cloud_density(ray, 0.0, 0.12);
            let d1 = cloud_density(ray, 40.0, 0.12);
            assert!((0.0..=1.0).contains(&d0));
            changed |= (d0 - d1).abs() > 1e-3;
        }
        assert!(changed);
    }

    #[test]
    fn test_fbm_range() {
        for i in 0..500 {
            let p = Vec2::new(i as f32 * 0.731 - 100.0, i as f32 * 1.37);
            let v = fbm(p, 3.0);
            assert!((0.0..0.9375).contains(&v));
        }
    }

    #[test]
    fn test_glow_peaks_at_sun() {
        assert!(glow(0.0, 5e-5, 0.9).is_finite());
        assert!(glow(0.0, 5e-5, 0.9) > glow(0.5, 5e-5, 0.9));
    }

    #[test]
    fn test_aces_bounds() {
        assert_eq!(aces(Vec3::ZERO), Vec3::ZERO);
        let bright = aces(Vec3::splat(100.0));
        assert!(bright.max_element() <= 1.0 && bright.min_element() > 0.95);
    }

    #[test]
    fn test_shade_output_range() {
        for (params, night) in [(AtmosphereParams::day(), 0.0), (AtmosphereParams::night(), 1.0)] {
            let u = uniform(params, night);
            for i in 0..100 {
                let a = i as f32 * 0.7;
                let ray = Vec3::new(a.cos(), (i as f32 / 50.0) - 1.0, a.sin()).normalize();
                let c = shade(&u, ray);
                assert!(c.is_finite());
                assert!(c.min_element() >= 0.0 && c.max_element() <= 1.0);
            }
        }
    }

    #[test]
    fn test_night_sky_darker_than_day() {
        let day = uniform(AtmosphereParams::day(), 0.0);
        let night = uniform(AtmosphereParams::night(), 1.0);
        let ray = Vec3::new(0.3, 0.6, -0.7).normalize();
        assert!(shade(&night, ray).length() < shade(&day, ray).length());
    }
}
