//! Ground grid and the CPU mirror of its vertex displacement.

use glam::{Vec2, Vec3};

use super::config::{TerrainConfig, TileOffset};
use super::height::HeightField;
use super::sphere::{floored_mod, place_on_sphere};
use crate::core::{Error, Result};

/// Finite-difference step for ground normals.
pub const NORMAL_EPSILON: f32 = 0.1;

/// Flat square grid in the XZ plane, centred on the origin.
///
/// Vertices carry only their base position; height, curvature and normals
/// are computed in the vertex stage (see [`GroundSurface`] for the CPU
/// equivalent).
#[derive(Clone, Debug)]
pub struct TerrainMesh {
    width: f32,
    resolution: u32,
    positions: Vec<[f32; 3]>,
    indices: Vec<u32>,
}

impl TerrainMesh {
    /// Build a `resolution x resolution` cell grid spanning `width`.
    pub fn new(width: f32, resolution: u32) -> Result<Self> {
        if resolution == 0 || !(width > 0.0) {
            return Err(Error::Config(format!(
                "terrain grid needs positive width and resolution (got {} / {})",
                width, resolution
            )));
        }
        let side = resolution + 1;
        let delta = width / resolution as f32;
        let half = width * 0.5;

        let mut positions = Vec::with_capacity((side * side) as usize);
        for iz in 0..side {
            for ix in 0..side {
                positions.push([-half + ix as f32 * delta, 0.0, -half + iz as f32 * delta]);
            }
        }

        let mut indices = Vec::with_capacity((resolution * resolution * 6) as usize);
        for iz in 0..resolution {
            for ix in 0..resolution {
                let a = iz * side + ix;
                let b = a + side;
                let c = a + 1;
                let d = b + 1;
                // Counter-clockwise seen from +Y.
                indices.extend_from_slice(&[a, b, c, c, b, d]);
            }
        }

        Ok(Self { width, resolution, positions, indices })
    }

    pub fn from_config(config: &TerrainConfig) -> Result<Self> {
        Self::new(config.width, config.resolution)
    }

    #[inline]
    pub fn delta(&self) -> f32 {
        self.width / self.resolution as f32
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }
}

/// Ground surface evaluation, mirroring `terrain.wgsl`.
pub struct GroundSurface<'a> {
    pub height: &'a HeightField,
    pub radius: f32,
    pub delta: f32,
    pub tile: TileOffset,
}

impl<'a> GroundSurface<'a> {
    pub fn new(height: &'a HeightField, config: &TerrainConfig) -> Self {
        Self {
            height,
            radius: config.radius,
            delta: config.delta(),
            tile: config.tile,
        }
    }

    /// Sub-cell scroll applied to every vertex so the grid slides smoothly.
    fn scroll(&self) -> Vec2 {
        let d = self.delta;
        Vec2::new(
            floored_mod(floored_mod(d * self.tile.x, d) + d, d),
            floored_mod(floored_mod(d * self.tile.z, d) + d, d),
        )
    }

    /// Displaced position of the grid vertex at `base`, probed at `eps`.
    pub fn position(&self, base: Vec2, eps: Vec2) -> Vec3 {
        let shifted = base - self.scroll();
        let x = shifted.x + eps.x;
        let z = shifted.y + eps.y;
        let lookup = base + eps + self.delta * Vec2::new(self.tile.x.floor(), self.tile.z.floor());
        let y = place_on_sphere(Vec3::new(x, 0.0, z), self.radius).max(0.0) - self.radius
            + self.height.height(lookup.x, lookup.y);
        Vec3::new(x, y, z)
    }

    /// Final vertex position.
    pub fn vertex(&self, base: Vec2) -> Vec3 {
        self.position(base, Vec2::ZERO)
    }

    /// Central-difference normal; always points up for a height field.
    pub fn normal(&self, base: Vec2) -> Vec3 {
        let e = NORMAL_EPSILON;
        let slope_x = self.position(base, Vec2::new(e, 0.0)) - self.position(base, Vec2::new(-e, 0.0));
        let slope_z = self.position(base, Vec2::new(0.0, e)) - self.position(base, Vec2::new(0.0, -e));
        slope_z.cross(slope_x).normalize_or(Vec3::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::noise::{NoiseField, NoiseParams};
    use std::sync::Arc;

    fn height_field() -> HeightField {
        let noise = NoiseField::generate(&NoiseParams { resolution: 64, ..Default::default() }).unwrap();
        HeightField::new(Arc::new(noise), 800.0, 8.0)
    }

    #[test]
    fn test_grid_counts() {
        let mesh = TerrainMesh::new(100.0, 64).unwrap();
        assert_eq!(mesh.positions().len(), 65 * 65);
        assert_eq!(mesh.indices().len(), 64 * 64 * 6);
        assert!((mesh.delta() - 1.5625).abs() < 1e-6);
        let max_index = *mesh.indices().iter().max().unwrap() as usize;
        assert_eq!(max_index, mesh.positions().len() - 1);
    }

    #[test]
    fn test_grid_spans_width() {
        let mesh = TerrainMesh::new(100.0, 4).unwrap();
        let first = mesh.positions()[0];
        let last = *mesh.positions().last().unwrap();
        assert_eq!(first, [-50.0, 0.0, -50.0]);
        assert_eq!(last, [50.0, 0.0, 50.0]);
    }

    #[test]
    fn test_triangles_face_up() {
        let mesh = TerrainMesh::new(10.0, 3).unwrap();
        for tri in mesh.indices().chunks(3) {
            let p = |i: u32| Vec3::from(mesh.positions()[i as usize]);
            let n = (p(tri[1]) - p(tri[0])).cross(p(tri[2]) - p(tri[0]));
            assert!(n.y > 0.0);
        }
    }

    #[test]
    fn test_rejects_degenerate_grid() {
        assert!(TerrainMesh::new(100.0, 0).is_err());
        assert!(TerrainMesh::new(0.0, 8).is_err());
    }

    #[test]
    fn test_vertex_at_origin_tile() {
        let h = height_field();
        let config = TerrainConfig::default();
        let surface = GroundSurface::new(&h, &config);
        let base = Vec2::new(12.5, -20.0);
        let v = surface.vertex(base);
        let expected = place_on_sphere(Vec3::new(12.5, 0.0, -20.0), 240.0).max(0.0) - 240.0
            + h.height(12.5, -20.0);
        assert_eq!(v.x, 12.5);
        assert_eq!(v.z, -20.0);
        assert!((v.y - expected).abs() < 1e-5);
    }

    #[test]
    fn test_integer_tile_shifts_height_lookup_only() {
        let h = height_field();
        let mut config = TerrainConfig::default();
        config.tile = TileOffset::new(3.0, -2.0);
        let surface = GroundSurface::new(&h, &config);
        let d = config.delta();
        let v = surface.vertex(Vec2::new(0.0, 0.0));
        assert!(v.x.abs() < 1e-4 && v.z.abs() < 1e-4);
        let expected = -240.0 + 240.0 + h.height(3.0 * d, -2.0 * d);
        assert!((v.y - expected).abs() < 1e-3);
    }

    #[test]
    fn test_normals_point_up_and_are_unit() {
        let h = height_field();
        let config = TerrainConfig::default();
        let surface = GroundSurface::new(&h, &config);
        for &(x, z) in &[(0.0, 0.0), (30.0, -10.0), (-45.0, 45.0)] {
            let n = surface.normal(Vec2::new(x, z));
            assert!((n.length() - 1.0).abs() < 1e-4);
            assert!(n.y > 0.0);
        }
    }

    #[test]
    fn test_flat_ground_normal_tilts_with_curvature() {
        let noise = NoiseField::from_texels(1, vec![128]).unwrap();
        let h = HeightField::new(Arc::new(noise), 800.0, 8.0);
        let config = TerrainConfig::default();
        let surface = GroundSurface::new(&h, &config);
        let centre = surface.normal(Vec2::ZERO);
        assert!(centre.y > 0.9999);
        // East of centre the sphere falls away towards +X.
        let east = surface.normal(Vec2::new(40.0, 0.0));
        assert!(east.x > 0.0);
    }
}
