//! Procedural ground: a curved, noise-displaced grid.
//!
//! The grid itself is flat; the vertex stage lifts each vertex by the shared
//! [`HeightField`] and bends the patch onto a large sphere. The CPU mirror in
//! [`GroundSurface`] is used by tests and by anything that needs to stand on
//! the ground (grass roots, props).

pub mod config;
pub mod height;
pub mod mesh;
pub mod noise;
pub mod params;
pub mod sphere;

pub use config::{GroundLighting, PointLight, TerrainConfig, TileOffset};
pub use height::HeightField;
pub use mesh::{GroundSurface, TerrainMesh};
pub use noise::{NoiseField, NoiseParams};
pub use params::{GroundUniform, TerrainUniform};
pub use sphere::place_on_sphere;
