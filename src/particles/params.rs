//! GPU-ready particle data.

use bytemuck::{Pod, Zeroable};

use crate::atmosphere::AtmosphereSnapshot;

/// One particle quad. Locations 0..=1 of the particle pipeline.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 3],
    pub size: f32,
    // Total: 16 bytes
}

/// Must match `ParticleUniform` in particles.wgsl.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ParticleUniform {
    pub color: [f32; 3],
    pub opacity: f32,
    // -- 16 bytes --
    pub exposure: f32,
    pub size: f32,
    pub _pad: [f32; 2],
    // -- 16 bytes --
    // Total: 32 bytes
}

impl ParticleUniform {
    pub fn new(snapshot: &AtmosphereSnapshot, size: f32) -> Self {
        let p = &snapshot.params;
        Self {
            color: p.particle_color,
            opacity: p.particle_opacity,
            exposure: p.exposure,
            size,
            _pad: [0.0; 2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atmosphere::AtmosphereParams;

    #[test]
    fn test_sizes() {
        assert_eq!(std::mem::size_of::<ParticleInstance>(), 16);
        assert_eq!(std::mem::size_of::<ParticleUniform>(), 32);
    }

    #[test]
    fn test_night_particles_opaque() {
        let u = ParticleUniform::new(&AtmosphereSnapshot::settled(AtmosphereParams::night(), 1.0), 0.1);
        assert_eq!(u.opacity, AtmosphereParams::night().particle_opacity);
        assert_eq!(u.color, AtmosphereParams::night().particle_color);
    }
}
