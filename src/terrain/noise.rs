//! Tileable fBm noise texture shared by the terrain and grass height lookups.
//!
//! The field is generated once on the CPU by sampling 4D fractal Perlin noise
//! on a torus, so opposite edges line up exactly and the texture can be
//! sampled with repeat addressing. Texels are quantized to 8 bits, which is
//! also the format uploaded to the GPU, so the CPU [`NoiseField::sample`]
//! sees the same data the shaders do.

use noise::{Fbm, MultiFractal, NoiseFn, Perlin};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

/// Parameters for generating a [`NoiseField`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseParams {
    pub seed: u32,
    /// Texels per side (the texture is square).
    pub resolution: u32,
    /// Noise periods across one tile.
    pub frequency: f64,
    pub octaves: usize,
    pub persistence: f64,
    pub lacunarity: f64,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            seed: 1337,
            resolution: 256,
            frequency: 4.0,
            octaves: 6,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }
}

/// Square, tileable, single-channel noise texture with values in `[0, 1]`.
#[derive(Clone, Debug)]
pub struct NoiseField {
    resolution: u32,
    texels: Vec<u8>,
}

impl NoiseField {
    /// Generate a seamless fBm field.
    pub fn generate(params: &NoiseParams) -> Result<Self> {
        if params.resolution == 0 {
            return Err(Error::Config("noise resolution must be non-zero".into()));
        }
        let n = params.resolution as usize;
        let fbm = Fbm::<Perlin>::new(params.seed)
            .set_octaves(params.octaves.max(1))
            .set_persistence(params.persistence)
            .set_lacunarity(params.lacunarity);

        // Torus radius chosen so one trip around spans `frequency` noise periods.
        let radius = params.frequency / std::f64::consts::TAU;
        let mut raw = vec![0.0f64; n * n];
        raw.par_chunks_mut(n).enumerate().for_each(|(y, row)| {
            let b = y as f64 / n as f64 * std::f64::consts::TAU;
            let (sb, cb) = b.sin_cos();
            for (x, out) in row.iter_mut().enumerate() {
                let a = x as f64 / n as f64 * std::f64::consts::TAU;
                let (sa, ca) = a.sin_cos();
                *out = fbm.get([ca * radius, sa * radius, cb * radius, sb * radius]);
            }
        });

        let (min, max) = raw
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        let span = (max - min).max(1e-9);
        let texels = raw
            .iter()
            .map(|&v| (((v - min) / span) * 255.0).round().clamp(0.0, 255.0) as u8)
            .collect();

        log::debug!("Generated {}x{} noise field (seed {})", n, n, params.seed);
        Ok(Self { resolution: params.resolution, texels })
    }

    /// Wrap existing 8-bit texels (row-major, `resolution * resolution` long).
    pub fn from_texels(resolution: u32, texels: Vec<u8>) -> Result<Self> {
        if resolution == 0 || texels.len() != (resolution as usize).pow(2) {
            return Err(Error::Config(format!(
                "noise field of resolution {} needs {} texels, got {}",
                resolution,
                (resolution as usize).pow(2),
                texels.len()
            )));
        }
        Ok(Self { resolution, texels })
    }

    #[inline]
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Raw texels, ready for an `R8Unorm` upload.
    #[inline]
    pub fn texels(&self) -> &[u8] {
        &self.texels
    }

    /// Texel value at integer coordinates with repeat wrapping.
    #[inline]
    pub fn texel(&self, x: i64, y: i64) -> f32 {
        let n = self.resolution as i64;
        let xi = x.rem_euclid(n) as usize;
        let yi = y.rem_euclid(n) as usize;
        self.texels[yi * n as usize + xi] as f32 / 255.0
    }

    /// Bilinear sample at normalized coordinates with repeat wrapping.
    ///
    /// Matches GPU linear filtering: texel centres sit at `(i + 0.5) / n`.
    pub fn sample(&self, u: f32, v: f32) -> f32 {
        let n = self.resolution as f32;
        let x = u * n - 0.5;
        let y = v * n - 0.5;
        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;
        let (xi, yi) = (x0 as i64, y0 as i64);

        let a = self.texel(xi, yi);
        let b = self.texel(xi + 1, yi);
        let c = self.texel(xi, yi + 1);
        let d = self.texel(xi + 1, yi + 1);
        let top = a + (b - a) * fx;
        let bottom = c + (d - c) * fx;
        top + (bottom - top) * fy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> NoiseField {
        NoiseField::generate(&NoiseParams { resolution: 32, ..Default::default() }).unwrap()
    }

    #[test]
    fn test_generate_is_deterministic() {
        let a = small();
        let b = small();
        assert_eq!(a.texels(), b.texels());
    }

    #[test]
    fn test_seed_changes_field() {
        let a = small();
        let b = NoiseField::generate(&NoiseParams { resolution: 32, seed: 7, ..Default::default() }).unwrap();
        assert_ne!(a.texels(), b.texels());
    }

    #[test]
    fn test_values_cover_unit_range() {
        let field = small();
        assert_eq!(*field.texels().iter().min().unwrap(), 0);
        assert_eq!(*field.texels().iter().max().unwrap(), 255);
    }

    #[test]
    fn test_sample_repeats() {
        let field = small();
        for &(u, v) in &[(0.1, 0.2), (0.73, 0.01), (0.5, 0.99)] {
            let s = field.sample(u, v);
            assert!((s - field.sample(u + 1.0, v)).abs() < 1e-5);
            assert!((s - field.sample(u, v - 3.0)).abs() < 1e-5);
        }
    }

    #[test]
    fn test_edges_are_seamless() {
        // Texels across the wrap differ no more than ordinary neighbours do.
        let field = NoiseField::generate(&NoiseParams {
            resolution: 32,
            octaves: 3,
            frequency: 2.0,
            ..Default::default()
        })
        .unwrap();
        let n = field.resolution() as i64;
        let mut max_interior = 0.0f32;
        for y in 0..n {
            for x in 1..n {
                max_interior = max_interior.max((field.texel(x, y) - field.texel(x - 1, y)).abs());
            }
        }
        for y in 0..n {
            let seam = (field.texel(0, y) - field.texel(n - 1, y)).abs();
            assert!(seam <= max_interior * 1.5 + 2.0 / 255.0, "seam {} at row {}", seam, y);
        }
    }

    #[test]
    fn test_sample_at_texel_centre_is_exact() {
        let field = NoiseField::from_texels(2, vec![0, 255, 255, 0]).unwrap();
        assert!((field.sample(0.25, 0.25) - 0.0).abs() < 1e-6);
        assert!((field.sample(0.75, 0.25) - 1.0).abs() < 1e-6);
        // Halfway between centres blends evenly.
        assert!((field.sample(0.5, 0.25) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_from_texels_rejects_wrong_length() {
        assert!(NoiseField::from_texels(4, vec![0; 15]).is_err());
        assert!(NoiseField::from_texels(0, vec![]).is_err());
    }
}
