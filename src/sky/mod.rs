//! Procedural sky drawn as a fullscreen background pass.
//!
//! The sky is a pure function of the per-pixel view ray, cloud time and the
//! atmosphere snapshot: gradient, stars, two fBm cloud bands, sun glow and
//! fog, then ACES tone mapping and gamma. [`SkyDome`] packs those inputs into
//! a [`SkyUniform`]; [`model`] mirrors the shader on the CPU.

pub mod config;
pub mod model;
pub mod params;
pub mod ray;

pub use config::SkyConfig;
pub use params::SkyUniform;

use glam::{Vec2, Vec3};

use crate::atmosphere::AtmosphereSnapshot;
use crate::core::camera::Camera;

/// Sky inputs that live outside the per-frame snapshot.
pub struct SkyDome {
    config: SkyConfig,
    resolution: [u32; 2],
}

impl SkyDome {
    pub fn new(config: SkyConfig, width: u32, height: u32) -> Self {
        Self {
            config,
            resolution: [width.max(1), height.max(1)],
        }
    }

    /// Update the ray-reconstruction resolution. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.resolution = [width, height];
        }
    }

    pub fn resolution(&self) -> [u32; 2] {
        self.resolution
    }

    pub fn config(&self) -> &SkyConfig {
        &self.config
    }

    /// Pack this frame's inputs. `cloud_time` already includes the
    /// transition offset.
    pub fn uniform(&self, snapshot: &AtmosphereSnapshot, camera: &Camera, cloud_time: f32) -> SkyUniform {
        let p = &snapshot.params;
        let c = &self.config;
        SkyUniform {
            resolution: [self.resolution[0] as f32, self.resolution[1] as f32],
            fov_y: camera.fov_y,
            time: cloud_time,
            camera_position: camera.position.to_array(),
            fog_fade: c.fog_fade,
            look_target: (camera.position + camera.forward()).to_array(),
            cloud_speed: c.cloud_speed,
            sun_direction: snapshot.sun_direction.to_array(),
            star_intensity: snapshot.star_intensity,
            sky_colour: p.sky_colour,
            glow_radius: c.glow_radius,
            fog_color_a: p.fog_color_a,
            glow_sharpness: c.glow_sharpness,
            fog_color_b: p.fog_color_b,
            star_threshold: c.star_threshold,
            cloud_base: p.cloud_base,
            cloud_opacity: c.cloud_opacity,
            cloud_shadow: p.cloud_shadow,
            fog_distance: c.fog_distance,
            sun_glow: p.sun_glow,
            fog_origin_height: c.fog_origin_height,
            star_scale: c.star_scale,
            star_min_intensity: c.star_min_intensity,
            _pad: [0.0; 2],
        }
    }

    /// World-space ray through a pixel, as the sky shader reconstructs it.
    pub fn world_ray(uniform: &SkyUniform, pixel: Vec2) -> Vec3 {
        let local = ray::ray_direction(uniform.fov_y, pixel, Vec2::from(uniform.resolution));
        let basis = ray::look_at_basis(
            Vec3::from(uniform.camera_position),
            Vec3::from(uniform.look_target),
            Vec3::Y,
        );
        basis * local
    }

    /// Shade one pixel on the CPU.
    pub fn shade_pixel(uniform: &SkyUniform, pixel: Vec2) -> Vec3 {
        model::shade(uniform, Self::world_ray(uniform, pixel))
    }
}
