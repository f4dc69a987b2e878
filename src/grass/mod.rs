//! Instanced grass field.
//!
//! One template [`BladeMesh`] is drawn once per [`GrassInstance`]. Each
//! instance carries its own root offset, yaw, height scale and index; the
//! vertex stage seats the root on the ground, applies the yaw and scale and
//! sways the blade with time. [`placement`], [`wind`] and [`shading`] are the
//! CPU mirrors of those stages.

pub mod blade;
pub mod config;
pub mod instances;
pub mod params;
pub mod placement;
pub mod shading;
pub mod wind;

pub use blade::{BladeMesh, BladeVertex};
pub use config::{GrassConfig, GrassLighting, WindConfig};
pub use instances::{generate_instances, GrassInstance};
pub use params::GrassUniform;
pub use placement::RootPlacement;

use crate::atmosphere::AtmosphereSnapshot;
use crate::core::Result;

/// Blade template plus the scattered instances for one patch.
pub struct GrassField {
    config: GrassConfig,
    width: f32,
    blade: BladeMesh,
    instances: Vec<GrassInstance>,
}

impl GrassField {
    /// Build the blade and scatter instances over a `width x width` patch.
    pub fn new(config: GrassConfig, width: f32) -> Result<Self> {
        let blade = BladeMesh::from_config(&config)?;
        let instances = generate_instances(&config, width);
        log::info!(
            "Grass field: {} blades over {}x{} ({} joints)",
            instances.len(),
            width,
            width,
            config.joints
        );
        Ok(Self { config, width, blade, instances })
    }

    pub fn config(&self) -> &GrassConfig {
        &self.config
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn blade(&self) -> &BladeMesh {
        &self.blade
    }

    pub fn instances(&self) -> &[GrassInstance] {
        &self.instances
    }

    /// Per-frame uniform from the shared atmosphere snapshot.
    pub fn uniform(&self, snapshot: &AtmosphereSnapshot, time: f32) -> GrassUniform {
        GrassUniform::new(&self.config, snapshot, time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atmosphere::AtmosphereParams;

    #[test]
    fn test_field_builds() {
        let config = GrassConfig { instances: 1000, ..Default::default() };
        let field = GrassField::new(config, 100.0).unwrap();
        assert_eq!(field.instances().len(), 1000);
        assert_eq!(field.blade().vertices().len(), 10);
        assert_eq!(field.width(), 100.0);
    }

    #[test]
    fn test_uniform_carries_time() {
        let field = GrassField::new(GrassConfig { instances: 10, ..Default::default() }, 100.0).unwrap();
        let snap = AtmosphereSnapshot::settled(AtmosphereParams::day(), 0.0);
        let u = field.uniform(&snap, 4.5);
        assert_eq!(u.time, 4.5);
        assert_eq!(u.blade_height, 0.5);
    }

    #[test]
    fn test_bad_blade_is_an_error() {
        let config = GrassConfig { joints: 0, ..Default::default() };
        assert!(GrassField::new(config, 100.0).is_err());
    }
}
