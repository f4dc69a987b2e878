//! Grass field configuration.

use serde::{Deserialize, Serialize};

/// Blade shape, instance population and shading constants.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GrassConfig {
    /// Vertical segments per blade.
    pub joints: u32,
    pub blade_width: f32,
    pub blade_height: f32,
    /// Number of blade instances scattered over the patch.
    pub instances: u32,
    /// Seed for instance placement.
    pub seed: u64,
    /// Height multiplier range for the majority of blades.
    pub short_scale: [f32; 2],
    /// Height multiplier range for every `tall_every`-th blade.
    pub tall_scale: [f32; 2],
    pub tall_every: u32,
    /// Fragments whose alpha-map red channel falls below this are discarded.
    pub alpha_cutoff: f32,
    pub wind: WindConfig,
    pub lighting: GrassLighting,
}

impl Default for GrassConfig {
    fn default() -> Self {
        Self {
            joints: 4,
            blade_width: 0.067,
            blade_height: 0.5,
            instances: 100_000,
            seed: 7,
            short_scale: [2.0, 3.0],
            tall_scale: [2.0, 3.25],
            tall_every: 3,
            alpha_cutoff: 0.15,
            wind: WindConfig::default(),
            lighting: GrassLighting::default(),
        }
    }
}

/// Sway animation constants.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WindConfig {
    /// Angular speed of the sway waves.
    pub speed: f32,
    /// Half-angle amplitude of the primary (sine) wave.
    pub primary_amplitude: f32,
    /// Half-angle amplitude of the secondary (cosine) wave.
    pub secondary_amplitude: f32,
    /// Multiplier turning a blade's normalized index into a phase.
    pub phase_scale: f32,
    /// Width of the per-blade speed variation band around 1.0.
    pub speed_jitter: f32,
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            speed: 2.5,
            primary_amplitude: 0.1,
            secondary_amplitude: 0.05,
            phase_scale: 17.0,
            speed_jitter: 0.1,
        }
    }
}

/// Blade shading strengths.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GrassLighting {
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
    /// Strength of light passing through back-lit blades.
    pub translucency: f32,
    pub shininess: f32,
    pub light_colour: [f32; 3],
    pub specular_colour: [f32; 3],
}

impl Default for GrassLighting {
    fn default() -> Self {
        Self {
            ambient: 0.7,
            diffuse: 1.5,
            specular: 0.5,
            translucency: 1.5,
            shininess: 256.0,
            light_colour: [1.0, 1.0, 1.0],
            specular_colour: [1.0, 1.0, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = GrassConfig::default();
        assert_eq!(cfg.instances, 100_000);
        assert!(cfg.short_scale[0] <= cfg.short_scale[1]);
        assert!(cfg.tall_scale[1] > cfg.short_scale[1]);
        assert!(cfg.tall_every > 0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg: GrassConfig = serde_json::from_str(r#"{ "instances": 500, "wind": { "speed": 1.0 } }"#).unwrap();
        assert_eq!(cfg.instances, 500);
        assert_eq!(cfg.wind.speed, 1.0);
        assert_eq!(cfg.wind.primary_amplitude, 0.1);
        assert_eq!(cfg.joints, 4);
    }
}
