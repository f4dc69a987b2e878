//! GPU-ready ground uniforms.

use bytemuck::{Pod, Zeroable};

use super::config::{GroundLighting, TerrainConfig};
use crate::atmosphere::AtmosphereSnapshot;
use crate::frame::Underglow;

/// Height-lookup parameters shared by the terrain and grass shaders.
/// Must match `GroundUniform` in height.wgsl.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct GroundUniform {
    pub delta: f32,
    pub tile_x: f32,
    pub tile_z: f32,
    pub radius: f32,
    // -- 16 bytes --
    pub width: f32,
    pub noise_scale: f32,
    pub height_amplitude: f32,
    pub _pad: f32,
    // -- 16 bytes --
    // Total: 32 bytes
}

impl From<&TerrainConfig> for GroundUniform {
    fn from(config: &TerrainConfig) -> Self {
        Self {
            delta: config.delta(),
            tile_x: config.tile.x,
            tile_z: config.tile.z,
            radius: config.radius,
            width: config.width,
            noise_scale: config.noise_scale,
            height_amplitude: config.height_amplitude,
            _pad: 0.0,
        }
    }
}

/// Ground material and light rig. Must match `TerrainUniform` in terrain.wgsl.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct TerrainUniform {
    pub ground_color: [f32; 3],
    pub shininess: f32,
    // -- 16 bytes --
    pub ambient_intensity: f32,
    pub hemisphere_intensity: f32,
    pub dir_light_intensity: f32,
    pub exposure: f32,
    // -- 16 bytes --
    pub hemisphere_sky: [f32; 3],
    pub point_light_intensity: f32,
    // -- 16 bytes --
    pub hemisphere_ground: [f32; 3],
    pub text_light_intensity: f32,
    // -- 16 bytes --
    pub dir_light_direction: [f32; 3],
    pub rim_light_intensity: f32,
    // -- 16 bytes --
    pub point_light_position: [f32; 3],
    pub point_light_range: f32,
    // -- 16 bytes --
    pub text_light_position: [f32; 3],
    pub text_light_range: f32,
    // -- 16 bytes --
    pub rim_light_position: [f32; 3],
    pub rim_light_range: f32,
    // -- 16 bytes --
    pub underglow_color: [f32; 3],
    pub underglow_range: f32,
    // -- 16 bytes --
    /// xyz position, w intensity.
    pub underglow: [[f32; 4]; 3],
    // -- 48 bytes --
    // Total: 192 bytes
}

impl TerrainUniform {
    pub fn new(lighting: &GroundLighting, snapshot: &AtmosphereSnapshot) -> Self {
        let p = &snapshot.params;
        let dir = glam::Vec3::from(lighting.directional_from).normalize_or(glam::Vec3::Y);
        Self {
            ground_color: lighting.ground_color,
            shininess: lighting.shininess,
            ambient_intensity: p.ambient_intensity,
            hemisphere_intensity: lighting.hemisphere_intensity,
            dir_light_intensity: p.dir_light_intensity,
            exposure: p.exposure,
            hemisphere_sky: lighting.hemisphere_sky,
            point_light_intensity: p.point_light_intensity,
            hemisphere_ground: lighting.hemisphere_ground,
            text_light_intensity: p.text_light_intensity,
            dir_light_direction: dir.to_array(),
            rim_light_intensity: p.rim_light_intensity,
            point_light_position: lighting.point_light.position,
            point_light_range: lighting.point_light.range,
            text_light_position: lighting.text_light.position,
            text_light_range: lighting.text_light.range,
            rim_light_position: lighting.rim_light.position,
            rim_light_range: lighting.rim_light.range,
            underglow_color: [0.0; 3],
            underglow_range: 1.0,
            underglow: [[0.0; 4]; 3],
        }
    }

    /// Light the ground under the floating title.
    pub fn with_underglow(mut self, glow: &Underglow) -> Self {
        self.underglow_color = glow.color;
        self.underglow_range = glow.range;
        for (slot, p) in self.underglow.iter_mut().zip(glow.positions) {
            *slot = [p.x, p.y, p.z, glow.intensity];
        }
        self
    }
}
