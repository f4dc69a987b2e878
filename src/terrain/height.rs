//! Height lookup shared by the ground mesh and the grass roots.

use std::sync::Arc;

use super::config::TerrainConfig;
use super::noise::NoiseField;

/// Scalar height function backed by a tileable noise texture.
///
/// `height(p) = amplitude * (2 * noise(p / scale) - 1)`. The terrain and grass
/// shaders evaluate the same expression against the same texture, so a blade
/// rooted at `(x, z)` sits exactly on the ground vertex there.
#[derive(Clone, Debug)]
pub struct HeightField {
    noise: Arc<NoiseField>,
    scale: f32,
    amplitude: f32,
}

impl HeightField {
    pub fn new(noise: Arc<NoiseField>, scale: f32, amplitude: f32) -> Self {
        Self { noise, scale, amplitude }
    }

    pub fn from_config(noise: Arc<NoiseField>, config: &TerrainConfig) -> Self {
        Self::new(noise, config.noise_scale, config.height_amplitude)
    }

    /// Height at world-space `(x, z)`.
    #[inline]
    pub fn height(&self, x: f32, z: f32) -> f32 {
        let n = self.noise.sample(x / self.scale, z / self.scale);
        self.amplitude * (2.0 * n - 1.0)
    }

    pub fn noise(&self) -> &Arc<NoiseField> {
        &self.noise
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::noise::NoiseParams;

    fn field() -> HeightField {
        let noise = NoiseField::generate(&NoiseParams { resolution: 64, ..Default::default() }).unwrap();
        HeightField::new(Arc::new(noise), 800.0, 8.0)
    }

    #[test]
    fn test_height_within_amplitude() {
        let h = field();
        for i in 0..200 {
            let x = (i as f32 * 37.1) % 400.0 - 200.0;
            let z = (i as f32 * 11.7) % 400.0 - 200.0;
            let y = h.height(x, z);
            assert!((-8.0..=8.0).contains(&y), "height {} out of range", y);
        }
    }

    #[test]
    fn test_height_tiles_with_scale() {
        let h = field();
        assert!((h.height(12.5, -40.0) - h.height(12.5 + 800.0, -40.0)).abs() < 1e-3);
        assert!((h.height(12.5, -40.0) - h.height(12.5, -40.0 - 1600.0)).abs() < 1e-3);
    }

    #[test]
    fn test_extremes_map_to_amplitude() {
        let noise = NoiseField::from_texels(1, vec![255]).unwrap();
        let h = HeightField::new(Arc::new(noise), 800.0, 8.0);
        assert!((h.height(3.0, 4.0) - 8.0).abs() < 1e-5);
        let noise = NoiseField::from_texels(1, vec![0]).unwrap();
        let h = HeightField::new(Arc::new(noise), 800.0, 8.0);
        assert!((h.height(3.0, 4.0) + 8.0).abs() < 1e-5);
    }
}
