//! Sky shading coefficients.

use serde::{Deserialize, Serialize};

/// Named constants of the sky model. Colours and the sun come from the
/// atmosphere snapshot; these shape how they are combined.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyConfig {
    /// Cloud advection speed in noise units per second of cloud time.
    pub cloud_speed: f32,
    /// Maximum blend of cloud colour over the sky.
    pub cloud_opacity: f32,
    /// Exponential fog falloff rate.
    pub fog_fade: f32,
    /// Distance the fog integral runs along each ray.
    pub fog_distance: f32,
    /// Height of the virtual ray origin used by the fog integral.
    pub fog_origin_height: f32,
    /// Cell hash threshold above which a star is drawn (higher = fewer stars).
    pub star_threshold: f32,
    /// Star cells per unit of ray direction.
    pub star_scale: f32,
    /// Below this star intensity the star field is skipped entirely.
    pub star_min_intensity: f32,
    /// Angular radius of the sun glow.
    pub glow_radius: f32,
    /// Falloff exponent of the sun glow.
    pub glow_sharpness: f32,
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            cloud_speed: 0.12,
            cloud_opacity: 0.6,
            fog_fade: 0.008,
            fog_distance: 4000.0,
            fog_origin_height: 1000.0,
            star_threshold: 0.965,
            star_scale: 300.0,
            star_min_intensity: 0.01,
            glow_radius: 0.00005,
            glow_sharpness: 0.9,
        }
    }
}
