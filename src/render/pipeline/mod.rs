//! Render pipelines

pub mod grass;
pub mod particles;
pub mod sky;
pub mod terrain;
pub mod uniform;

pub use grass::GrassPipeline;
pub use particles::ParticlePipeline;
pub use sky::SkyPipeline;
pub use terrain::TerrainPipeline;
pub use uniform::UniformBlock;
