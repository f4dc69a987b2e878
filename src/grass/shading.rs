//! Blade shading, mirroring the grass fragment stage.

use glam::Vec3;

use super::params::GrassUniform;
use crate::sky::model::{aces, encode_gamma};

const TALL_TINT: Vec3 = Vec3::new(0.2, 0.8, 0.06);
const SHORT_TINT: Vec3 = Vec3::new(0.5, 0.8, 0.08);
const SKY_LIGHT: Vec3 = Vec3::new(0.12, 0.29, 0.55);
const ROOT_SHADE: Vec3 = Vec3::new(0.1, 0.25, 0.02);

/// Inputs of one blade fragment.
#[derive(Clone, Copy, Debug)]
pub struct BladeFragment {
    /// Interpolated normal, before back-face flipping.
    pub normal: Vec3,
    pub front_facing: bool,
    pub position: Vec3,
    /// Diffuse texture sample, sRGB encoded.
    pub texture: Vec3,
    pub index: f32,
    /// Fraction along the blade, 0 at the root.
    pub height_fraction: f32,
}

/// Tint mixed into the diffuse texture; the top quarter of indices is bluer.
pub fn tint(index: f32) -> Vec3 {
    if index > 0.75 { TALL_TINT } else { SHORT_TINT }
}

/// Light passing through a blade lit from behind. Zero whenever the lit side
/// faces the light.
pub fn translucency(normal: Vec3, to_light: Vec3, to_camera: Vec3, lit: Vec3, strength: f32) -> Vec3 {
    let n_dot_l = normal.dot(to_light);
    if n_dot_l > 0.0 {
        return Vec3::ZERO;
    }
    let diffuse = lit * strength * -n_dot_l;
    let forward = (-to_light).dot(to_camera);
    let scattered = if forward > 0.0 { lit * strength * forward.powf(16.0) } else { Vec3::ZERO };
    diffuse + scattered
}

/// Linear colour before tone mapping.
pub fn shade_linear(u: &GrassUniform, frag: &BladeFragment, camera: Vec3) -> Vec3 {
    let normal = if frag.front_facing { frag.normal } else { -frag.normal }.normalize_or(Vec3::Y);
    let texture = frag.texture.powf(2.2);
    let texture = (0.1 * tint(frag.index)).lerp(texture, 0.75);

    let light = Vec3::from(u.light_colour);
    let to_light = Vec3::from(u.sun_direction).normalize_or(Vec3::Y);
    let to_camera = (camera - frag.position).normalize_or(Vec3::Z);
    let half = (to_light + to_camera).normalize_or(to_light);

    let diffuse = normal.dot(to_light).max(0.0) * light * texture;
    let sky = normal.y.max(0.0) * SKY_LIGHT;
    let specular = normal.dot(half).max(0.0).powf(u.shininess) * Vec3::from(u.specular_colour) * light;
    let through = translucency(normal, to_light, to_camera, light * texture, u.translucency_strength);

    let col = 0.3 * sky * texture
        + u.ambient_strength * texture
        + u.diffuse_strength * diffuse
        + u.specular_strength * specular
        + through;
    (0.35 * ROOT_SHADE).lerp(col, frag.height_fraction) * u.grass_brightness
}

/// Display colour.
pub fn shade(u: &GrassUniform, frag: &BladeFragment, camera: Vec3) -> Vec3 {
    encode_gamma(aces(shade_linear(u, frag, camera)))
}
