//! Blade root placement, mirroring the top of the grass vertex stage.
//!
//! Roots scroll with the raw tile offset and wrap around the patch so the
//! field never runs out. Their height uses the same lookup as the ground
//! vertices, so blades stand on the terrain rather than float above it.

use glam::{Vec2, Vec3};

use crate::terrain::{HeightField, TerrainConfig, TileOffset};
use crate::terrain::sphere::place_on_sphere;

/// Ground description needed to seat a blade root.
pub struct RootPlacement<'a> {
    pub height: &'a HeightField,
    pub width: f32,
    pub radius: f32,
    pub delta: f32,
    pub tile: TileOffset,
}

impl<'a> RootPlacement<'a> {
    pub fn new(height: &'a HeightField, config: &TerrainConfig) -> Self {
        Self {
            height,
            width: config.width,
            radius: config.radius,
            delta: config.delta(),
            tile: config.tile,
        }
    }

    /// Root of the blade whose flat-patch offset is `offset`.
    pub fn root(&self, offset: Vec3) -> Vec3 {
        let scroll = self.delta * Vec2::new(self.tile.x, self.tile.z);
        let global = Vec2::new(offset.x, offset.z) - scroll;
        let wrap = ((global + 0.5 * self.width) / self.width).floor();
        let local = global - wrap * self.width;
        let lookup = local + scroll;
        let y = place_on_sphere(Vec3::new(local.x, 0.0, local.y), self.radius).max(0.0) - self.radius
            + self.height.height(lookup.x, lookup.y);
        Vec3::new(local.x, y, local.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::GroundSurface;
    use crate::terrain::noise::{NoiseField, NoiseParams};
    use std::sync::Arc;

    fn height_field() -> HeightField {
        let noise = NoiseField::generate(&NoiseParams { resolution: 64, ..Default::default() }).unwrap();
        HeightField::new(Arc::new(noise), 800.0, 8.0)
    }

    #[test]
    fn test_root_matches_ground_at_origin_tile() {
        let h = height_field();
        let config = TerrainConfig::default();
        let roots = RootPlacement::new(&h, &config);
        let ground = GroundSurface::new(&h, &config);
        for &(x, z) in &[(0.0, 0.0), (12.5, -20.0), (-49.0, 33.0)] {
            let root = roots.root(Vec3::new(x, 0.0, z));
            let v = ground.vertex(Vec2::new(x, z));
            assert!((root - v).length() < 1e-3, "{root:?} vs {v:?}");
        }
    }

    #[test]
    fn test_root_matches_ground_at_integer_tile() {
        let h = height_field();
        let mut config = TerrainConfig::default();
        config.tile = TileOffset::new(5.0, -3.0);
        let roots = RootPlacement::new(&h, &config);
        let ground = GroundSurface::new(&h, &config);
        let d = config.delta();
        // The root lands on a grid vertex so both lookups coincide.
        let offset = Vec3::new(10.0 * d + 5.0 * d, 0.0, -4.0 * d - 3.0 * d);
        let root = roots.root(offset);
        assert!((root.x - 10.0 * d).abs() < 1e-3);
        assert!((root.z + 4.0 * d).abs() < 1e-3);
        let v = ground.vertex(Vec2::new(root.x, root.z));
        assert!((root.y - v.y).abs() < 1e-3, "{} vs {}", root.y, v.y);
    }

    #[test]
    fn test_roots_wrap_inside_patch() {
        let h = height_field();
        let mut config = TerrainConfig::default();
        config.tile = TileOffset::new(37.25, -81.5);
        let roots = RootPlacement::new(&h, &config);
        for &(x, z) in &[(49.9, 49.9), (-50.0, -50.0), (0.0, 0.0), (25.0, -12.0)] {
            let root = roots.root(Vec3::new(x, 0.0, z));
            assert!(root.x >= -50.0 && root.x <= 50.0);
            assert!(root.z >= -50.0 && root.z <= 50.0);
            assert!(root.y.is_finite());
        }
    }
}
