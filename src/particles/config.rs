//! Ambient particle configuration.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub count: u32,
    /// World-space quad size; multiplied by each particle's own size.
    pub size: f32,
    pub seed: u64,
    /// Spawn box, `[min, max)` per axis.
    pub spawn_min: [f32; 3],
    pub spawn_max: [f32; 3],
    /// Base velocity range, `[min, max)` per axis.
    pub velocity_min: [f32; 3],
    pub velocity_max: [f32; 3],
    /// Per-particle size range.
    pub size_range: [f32; 2],
    pub bounds: ParticleBounds,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 5000,
            size: 0.1,
            seed: 11,
            spawn_min: [-60.0, -3.0, -70.0],
            spawn_max: [60.0, 12.0, 70.0],
            velocity_min: [0.3, -0.1, -0.15],
            velocity_max: [0.8, 0.1, 0.25],
            size_range: [0.5, 0.65],
            bounds: ParticleBounds::default(),
        }
    }
}

/// Wrap box. Leaving through X or Z re-enters on the opposite face; leaving
/// through Y re-enters at a fixed height inside the box.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleBounds {
    pub half_x: f32,
    pub half_z: f32,
    pub floor: f32,
    pub ceiling: f32,
    /// Height given to particles that rise above `ceiling`.
    pub reenter_low: f32,
    /// Height given to particles that sink below `floor`.
    pub reenter_high: f32,
}

impl Default for ParticleBounds {
    fn default() -> Self {
        Self {
            half_x: 60.0,
            half_z: 80.0,
            floor: -3.0,
            ceiling: 20.0,
            reenter_low: -2.0,
            reenter_high: 16.0,
        }
    }
}
