//! GPU-ready sky uniform (176 bytes, 16-byte aligned).

use bytemuck::{Pod, Zeroable};

/// Must match `SkyUniform` in sky.wgsl.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SkyUniform {
    pub resolution: [f32; 2],
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Cloud time (elapsed time plus the transition offset).
    pub time: f32,
    // -- 16 bytes --
    pub camera_position: [f32; 3],
    pub fog_fade: f32,
    // -- 16 bytes --
    pub look_target: [f32; 3],
    pub cloud_speed: f32,
    // -- 16 bytes --
    pub sun_direction: [f32; 3],
    pub star_intensity: f32,
    // -- 16 bytes --
    pub sky_colour: [f32; 3],
    pub glow_radius: f32,
    // -- 16 bytes --
    pub fog_color_a: [f32; 3],
    pub glow_sharpness: f32,
    // -- 16 bytes --
    pub fog_color_b: [f32; 3],
    pub star_threshold: f32,
    // -- 16 bytes --
    pub cloud_base: [f32; 3],
    pub cloud_opacity: f32,
    // -- 16 bytes --
    pub cloud_shadow: [f32; 3],
    pub fog_distance: f32,
    // -- 16 bytes --
    pub sun_glow: [f32; 3],
    pub fog_origin_height: f32,
    // -- 16 bytes --
    pub star_scale: f32,
    pub star_min_intensity: f32,
    pub _pad: [f32; 2],
    // -- 16 bytes --
    // Total: 176 bytes
}
