//! GPU-ready grass uniform (96 bytes, 16-byte aligned).

use bytemuck::{Pod, Zeroable};

use super::config::GrassConfig;
use crate::atmosphere::AtmosphereSnapshot;

/// Blade animation and shading. Must match `GrassUniform` in grass.wgsl.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct GrassUniform {
    pub time: f32,
    pub blade_height: f32,
    pub ambient_strength: f32,
    pub diffuse_strength: f32,
    // -- 16 bytes --
    pub specular_strength: f32,
    pub translucency_strength: f32,
    pub shininess: f32,
    pub grass_brightness: f32,
    // -- 16 bytes --
    pub sun_direction: [f32; 3],
    pub alpha_cutoff: f32,
    // -- 16 bytes --
    pub light_colour: [f32; 3],
    pub wind_speed: f32,
    // -- 16 bytes --
    pub specular_colour: [f32; 3],
    pub wind_primary: f32,
    // -- 16 bytes --
    pub wind_secondary: f32,
    pub wind_phase_scale: f32,
    pub wind_speed_jitter: f32,
    pub _pad: f32,
    // -- 16 bytes --
    // Total: 96 bytes
}

impl GrassUniform {
    pub fn new(config: &GrassConfig, snapshot: &AtmosphereSnapshot, time: f32) -> Self {
        let light = &config.lighting;
        let wind = &config.wind;
        Self {
            time,
            blade_height: config.blade_height,
            ambient_strength: light.ambient,
            diffuse_strength: light.diffuse,
            specular_strength: light.specular,
            translucency_strength: light.translucency,
            shininess: light.shininess,
            grass_brightness: snapshot.params.grass_brightness,
            sun_direction: snapshot.sun_direction.normalize_or(glam::Vec3::Y).to_array(),
            alpha_cutoff: config.alpha_cutoff,
            light_colour: light.light_colour,
            wind_speed: wind.speed,
            specular_colour: light.specular_colour,
            wind_primary: wind.primary_amplitude,
            wind_secondary: wind.secondary_amplitude,
            wind_phase_scale: wind.phase_scale,
            wind_speed_jitter: wind.speed_jitter,
            _pad: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atmosphere::AtmosphereParams;

    #[test]
    fn test_grass_uniform_size() {
        assert_eq!(std::mem::size_of::<GrassUniform>(), 96);
        assert_eq!(std::mem::size_of::<GrassUniform>() % 16, 0);
    }

    #[test]
    fn test_brightness_follows_snapshot() {
        let config = GrassConfig::default();
        let day = GrassUniform::new(&config, &AtmosphereSnapshot::settled(AtmosphereParams::day(), 0.0), 1.0);
        let night = GrassUniform::new(&config, &AtmosphereSnapshot::settled(AtmosphereParams::night(), 1.0), 1.0);
        assert_eq!(day.grass_brightness, AtmosphereParams::day().grass_brightness);
        assert_eq!(night.grass_brightness, AtmosphereParams::night().grass_brightness);
        let sun = glam::Vec3::from(night.sun_direction);
        assert!((sun.length() - 1.0).abs() < 1e-5);
    }
}
