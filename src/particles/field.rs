//! Wind-blown particle arena.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::config::{ParticleBounds, ParticleConfig};
use super::params::ParticleInstance;

/// Flat arrays of particle state, indexed by particle id.
pub struct ParticleField {
    bounds: ParticleBounds,
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    sizes: Vec<f32>,
}

fn sample_box(rng: &mut ChaCha8Rng, min: [f32; 3], max: [f32; 3]) -> Vec3 {
    let min = Vec3::from(min);
    let max = Vec3::from(max);
    let t = Vec3::new(rng.r#gen(), rng.r#gen(), rng.r#gen());
    min + (max - min) * t
}

impl ParticleField {
    pub fn new(config: &ParticleConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let n = config.count as usize;
        let mut positions = Vec::with_capacity(n);
        let mut velocities = Vec::with_capacity(n);
        let mut sizes = Vec::with_capacity(n);
        let [lo, hi] = config.size_range;
        for _ in 0..n {
            positions.push(sample_box(&mut rng, config.spawn_min, config.spawn_max));
            velocities.push(sample_box(&mut rng, config.velocity_min, config.velocity_max));
            sizes.push(lo + rng.r#gen::<f32>() * (hi - lo));
        }
        Self {
            bounds: config.bounds.clone(),
            positions,
            velocities,
            sizes,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Drift every particle for `dt` seconds.
    ///
    /// `time` is the elapsed scene time driving the gusts; `speed` is the
    /// snapshot's particle speed including any transition boost.
    pub fn update(&mut self, dt: f32, time: f32, speed: f32) {
        let b = &self.bounds;
        for (i, (p, v)) in self.positions.iter_mut().zip(&self.velocities).enumerate() {
            let fi = i as f32;
            let gust = (1.67 + 0.3 * (time * 0.5 + fi * 0.1).sin()) * speed;
            p.x += v.x * dt * gust;
            p.y += v.y * dt * speed + (time * 2.0 + fi * 0.5).sin() * dt * 0.2;
            p.z += v.z * dt * speed;
            wrap(p, b);
        }
    }

    /// Instance data for upload.
    pub fn instances(&self) -> Vec<ParticleInstance> {
        self.positions
            .iter()
            .zip(&self.sizes)
            .map(|(p, &size)| ParticleInstance { position: p.to_array(), size })
            .collect()
    }
}

fn wrap(p: &mut Vec3, b: &ParticleBounds) {
    if p.x > b.half_x {
        p.x = -b.half_x;
    }
    if p.x < -b.half_x {
        p.x = b.half_x;
    }
    if p.y > b.ceiling {
        p.y = b.reenter_low;
    }
    if p.y < b.floor {
        p.y = b.reenter_high;
    }
    if p.z > b.half_z {
        p.z = -b.half_z;
    }
    if p.z < -b.half_z {
        p.z = b.half_z;
    }
}
