//! GPU textures

pub mod depth;
pub mod sampled;

pub use depth::DepthTexture;
pub use sampled::SampledTexture;
