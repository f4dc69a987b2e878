//! WGSL sources and composition.
//!
//! The ground height lookup lives in one file and is prepended to every
//! stage that seats geometry on the ground, so terrain and grass compile
//! the same function.

pub const HEIGHT_LIBRARY: &str = include_str!("../../shaders/height.wgsl");
pub const TERRAIN_STAGE: &str = include_str!("../../shaders/terrain.wgsl");
pub const GRASS_STAGE: &str = include_str!("../../shaders/grass.wgsl");
pub const SKY_STAGE: &str = include_str!("../../shaders/sky.wgsl");
pub const PARTICLE_STAGE: &str = include_str!("../../shaders/particles.wgsl");

/// Join a shared library and a stage into one module source.
pub fn compose(library: &str, stage: &str) -> String {
    format!("{}\n{}", library, stage)
}

pub fn terrain_source() -> String {
    compose(HEIGHT_LIBRARY, TERRAIN_STAGE)
}

pub fn grass_source() -> String {
    compose(HEIGHT_LIBRARY, GRASS_STAGE)
}

/// Create a shader module from WGSL text.
pub fn create_module(device: &wgpu::Device, label: &str, source: &str) -> wgpu::ShaderModule {
    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    })
}
