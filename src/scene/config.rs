//! Scene configuration: every subsystem's settings in one JSON document.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::assets::AssetConfig;
use crate::atmosphere::AtmosphereConfig;
use crate::core::Result;
use crate::core::camera_controller::CameraConfig;
use crate::grass::GrassConfig;
use crate::particles::ParticleConfig;
use crate::sky::SkyConfig;
use crate::terrain::TerrainConfig;

/// Top-level configuration. Any section left out of the file keeps its
/// defaults.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub terrain: TerrainConfig,
    pub grass: GrassConfig,
    pub sky: SkyConfig,
    pub atmosphere: AtmosphereConfig,
    pub particles: ParticleConfig,
    pub camera: CameraConfig,
    pub assets: AssetConfig,
}

impl SceneConfig {
    /// Read a JSON scene file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        log::info!("Loaded scene config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Reseed every procedural source from one number.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.terrain.noise.seed = seed as u32;
        self.grass.seed = seed;
        self.particles.seed = seed.wrapping_add(1);
        self
    }
}
