//! Ground configuration.

use serde::{Deserialize, Serialize};

use super::noise::NoiseParams;

// ---------------------------------------------------------------------------
// TileOffset
// ---------------------------------------------------------------------------

/// Integer-ish offset of the visible patch in units of grid cells.
///
/// Shifting the offset scrolls the landscape under a fixed mesh. The ground
/// snaps its height lookup to whole cells so vertices never swim; grass uses
/// the raw offset and wraps blades around the patch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TileOffset {
    pub x: f32,
    pub z: f32,
}

impl TileOffset {
    pub const ORIGIN: Self = Self { x: 0.0, z: 0.0 };

    pub fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }
}

// ---------------------------------------------------------------------------
// TerrainConfig
// ---------------------------------------------------------------------------

/// Shape of the ground patch and its height lookup.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Side length of the square patch, shared with the grass field.
    pub width: f32,
    /// Grid cells per side.
    pub resolution: u32,
    /// Radius of the sphere the patch is bent onto.
    pub radius: f32,
    /// World units per noise-texture repeat.
    pub noise_scale: f32,
    /// Peak height offset; heights span `[-amplitude, amplitude]`.
    pub height_amplitude: f32,
    pub noise: NoiseParams,
    pub tile: TileOffset,
    pub lighting: GroundLighting,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            width: 100.0,
            resolution: 64,
            radius: 240.0,
            noise_scale: 800.0,
            height_amplitude: 8.0,
            noise: NoiseParams::default(),
            tile: TileOffset::ORIGIN,
            lighting: GroundLighting::default(),
        }
    }
}

impl TerrainConfig {
    /// Grid spacing.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.width / self.resolution.max(1) as f32
    }
}

// ---------------------------------------------------------------------------
// GroundLighting
// ---------------------------------------------------------------------------

/// Static parts of the light rig that shades the ground. Intensities are
/// animated by the atmosphere and arrive through the frame snapshot.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundLighting {
    /// Linear RGB albedo.
    pub ground_color: [f32; 3],
    pub shininess: f32,
    pub hemisphere_intensity: f32,
    pub hemisphere_sky: [f32; 3],
    pub hemisphere_ground: [f32; 3],
    /// Position the directional light shines from (towards the origin).
    pub directional_from: [f32; 3],
    pub point_light: PointLight,
    pub text_light: PointLight,
    pub rim_light: PointLight,
}

/// Position and reach of a point light.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PointLight {
    pub position: [f32; 3],
    pub range: f32,
}

impl Default for GroundLighting {
    fn default() -> Self {
        Self {
            ground_color: [0.01, 0.0508, 0.0015],
            shininess: 10.0,
            hemisphere_intensity: 0.4,
            hemisphere_sky: [1.0, 1.0, 1.0],
            hemisphere_ground: [0.058, 0.058, 0.058],
            directional_from: [5.0, 10.0, 7.0],
            point_light: PointLight { position: [0.0, 8.0, 10.0], range: 50.0 },
            text_light: PointLight { position: [0.0, 8.0, 15.0], range: 30.0 },
            rim_light: PointLight { position: [0.0, 5.0, 5.0], range: 30.0 },
        }
    }
}
