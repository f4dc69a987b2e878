//! Per-blade instance attributes.

use std::f32::consts::{PI, TAU};

use bytemuck::{Pod, Zeroable};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::config::GrassConfig;

/// One blade instance. Locations 3..=6 of the grass pipeline.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct GrassInstance {
    /// Root position on the flat patch; Y is always zero.
    pub offset: [f32; 3],
    /// Height multiplier.
    pub scale: f32,
    /// `(sin, cos)` of half the yaw angle, i.e. the Y-axis quaternion.
    pub half_root_angle: [f32; 2],
    /// `i / instance_count`, drives tint selection and sway phase.
    pub index: f32,
    pub _pad: f32,
    // Total: 32 bytes
}

impl GrassInstance {
    /// Yaw in radians, in `(-PI, PI]`.
    pub fn yaw(&self) -> f32 {
        2.0 * self.half_root_angle[0].atan2(self.half_root_angle[1])
    }
}

/// Scatter `config.instances` blades uniformly over a `width x width` patch.
///
/// Deterministic for a given seed.
pub fn generate_instances(config: &GrassConfig, width: f32) -> Vec<GrassInstance> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let count = config.instances;
    let half = width * 0.5;
    let tall_every = config.tall_every.max(1);

    (0..count)
        .map(|i| {
            let x = rng.r#gen::<f32>() * width - half;
            let z = rng.r#gen::<f32>() * width - half;
            let angle = PI - rng.r#gen::<f32>() * TAU;
            let range = if i % tall_every == 0 { config.tall_scale } else { config.short_scale };
            let scale = range[0] + rng.r#gen::<f32>() * (range[1] - range[0]);
            GrassInstance {
                offset: [x, 0.0, z],
                scale,
                half_root_angle: [(angle * 0.5).sin(), (angle * 0.5).cos()],
                index: i as f32 / count as f32,
                _pad: 0.0,
            }
        })
        .collect()
}
