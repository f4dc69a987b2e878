//! Ambient wind particles.
//!
//! A few thousand specks drift with the wind across the scene, drawn as
//! additive quads. Their colour, opacity and speed come from the atmosphere
//! snapshot, so a night transition sweeps them away and recolours them.

pub mod config;
pub mod field;
pub mod params;

pub use config::{ParticleBounds, ParticleConfig};
pub use field::ParticleField;
pub use params::{ParticleInstance, ParticleUniform};
