//! Typed atmosphere parameters and the built-in day and night presets.

use super::bundle::{ParamKind, ParamValue, ParameterBundle};
use super::lerp::{hex_color, Lerp};
use crate::core::{Error, Result};

/// Every field an endpoint bundle must provide, with its kind.
pub const FIELDS: &[(&str, ParamKind)] = &[
    ("sky_colour", ParamKind::Vector),
    ("fog_color_a", ParamKind::Vector),
    ("fog_color_b", ParamKind::Vector),
    ("cloud_base", ParamKind::Vector),
    ("cloud_shadow", ParamKind::Vector),
    ("sun_glow", ParamKind::Vector),
    ("elevation", ParamKind::Scalar),
    ("azimuth", ParamKind::Scalar),
    ("ambient_intensity", ParamKind::Scalar),
    ("dir_light_intensity", ParamKind::Scalar),
    ("point_light_intensity", ParamKind::Scalar),
    ("particle_color", ParamKind::Vector),
    ("particle_opacity", ParamKind::Scalar),
    ("particle_speed", ParamKind::Scalar),
    ("exposure", ParamKind::Scalar),
    ("text_color", ParamKind::Vector),
    ("text_emissive", ParamKind::Vector),
    ("text_emissive_intensity", ParamKind::Scalar),
    ("grass_brightness", ParamKind::Scalar),
    ("text_light_intensity", ParamKind::Scalar),
    ("rim_light_intensity", ParamKind::Scalar),
];

/// The full set of values the day/night blend drives.
///
/// Sky, fog and cloud colours are in shader space and used as-is; material
/// colours (particles, text) are linear RGB.
#[derive(Clone, Debug, PartialEq)]
pub struct AtmosphereParams {
    pub sky_colour: [f32; 3],
    /// Fog colour looking away from the sun.
    pub fog_color_a: [f32; 3],
    /// Fog colour looking into the sun.
    pub fog_color_b: [f32; 3],
    pub cloud_base: [f32; 3],
    pub cloud_shadow: [f32; 3],
    pub sun_glow: [f32; 3],
    /// Sun elevation angle in radians.
    pub elevation: f32,
    /// Sun azimuth angle in radians.
    pub azimuth: f32,
    pub ambient_intensity: f32,
    pub dir_light_intensity: f32,
    pub point_light_intensity: f32,
    pub particle_color: [f32; 3],
    pub particle_opacity: f32,
    /// Base particle speed multiplier (the transition boost is added on top).
    pub particle_speed: f32,
    /// Tone-mapping exposure for lit geometry.
    pub exposure: f32,
    pub text_color: [f32; 3],
    pub text_emissive: [f32; 3],
    pub text_emissive_intensity: f32,
    pub grass_brightness: f32,
    pub text_light_intensity: f32,
    pub rim_light_intensity: f32,
}

impl AtmosphereParams {
    /// Bright afternoon.
    pub fn day() -> Self {
        Self {
            sky_colour: [0.012, 0.12, 0.54],
            fog_color_a: [0.35, 0.5, 0.9],
            fog_color_b: [1.0, 1.0, 0.75],
            cloud_base: [1.0, 0.98, 0.95],
            cloud_shadow: [0.65, 0.7, 0.8],
            sun_glow: [1.0, 1.0, 0.8],
            elevation: 0.2,
            azimuth: 0.4,
            ambient_intensity: 0.9,
            dir_light_intensity: 0.8,
            point_light_intensity: 1.5,
            particle_color: hex_color(0xd4c5a0),
            particle_opacity: 0.6,
            particle_speed: 1.3,
            exposure: 1.3,
            text_color: hex_color(0xdd61c0),
            text_emissive: hex_color(0xa0ac60),
            text_emissive_intensity: 0.25,
            grass_brightness: 1.0,
            text_light_intensity: 2.0,
            rim_light_intensity: 1.5,
        }
    }

    /// Moonless night with fireflies.
    pub fn night() -> Self {
        Self {
            sky_colour: [0.005, 0.012, 0.07],
            fog_color_a: [0.04, 0.04, 0.1],
            fog_color_b: [0.09, 0.06, 0.14],
            cloud_base: [0.11, 0.09, 0.15],
            cloud_shadow: [0.04, 0.035, 0.07],
            sun_glow: [0.95, 0.9, 0.7],
            elevation: -0.3,
            azimuth: 0.7,
            ambient_intensity: 0.3,
            dir_light_intensity: 0.2,
            point_light_intensity: 0.5,
            particle_color: hex_color(0xff6d1c),
            particle_opacity: 1.0,
            particle_speed: 0.85,
            exposure: 0.7,
            text_color: hex_color(0xffccaa),
            text_emissive: hex_color(0x4715bd),
            text_emissive_intensity: 0.4,
            grass_brightness: 0.45,
            text_light_intensity: 3.0,
            rim_light_intensity: 2.0,
        }
    }

    /// Field-by-field interpolation towards `other`.
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            sky_colour: self.sky_colour.lerp(&other.sky_colour, t),
            fog_color_a: self.fog_color_a.lerp(&other.fog_color_a, t),
            fog_color_b: self.fog_color_b.lerp(&other.fog_color_b, t),
            cloud_base: self.cloud_base.lerp(&other.cloud_base, t),
            cloud_shadow: self.cloud_shadow.lerp(&other.cloud_shadow, t),
            sun_glow: self.sun_glow.lerp(&other.sun_glow, t),
            elevation: self.elevation.lerp(&other.elevation, t),
            azimuth: self.azimuth.lerp(&other.azimuth, t),
            ambient_intensity: self.ambient_intensity.lerp(&other.ambient_intensity, t),
            dir_light_intensity: self.dir_light_intensity.lerp(&other.dir_light_intensity, t),
            point_light_intensity: self.point_light_intensity.lerp(&other.point_light_intensity, t),
            particle_color: self.particle_color.lerp(&other.particle_color, t),
            particle_opacity: self.particle_opacity.lerp(&other.particle_opacity, t),
            particle_speed: self.particle_speed.lerp(&other.particle_speed, t),
            exposure: self.exposure.lerp(&other.exposure, t),
            text_color: self.text_color.lerp(&other.text_color, t),
            text_emissive: self.text_emissive.lerp(&other.text_emissive, t),
            text_emissive_intensity: self.text_emissive_intensity.lerp(&other.text_emissive_intensity, t),
            grass_brightness: self.grass_brightness.lerp(&other.grass_brightness, t),
            text_light_intensity: self.text_light_intensity.lerp(&other.text_light_intensity, t),
            rim_light_intensity: self.rim_light_intensity.lerp(&other.rim_light_intensity, t),
        }
    }

    /// Sun direction from elevation and azimuth (not normalized).
    pub fn sun_direction(&self) -> glam::Vec3 {
        glam::Vec3::new(self.azimuth.sin(), self.elevation.sin(), -self.azimuth.cos())
    }

    /// Build from a bundle, rejecting unknown, missing or mis-shaped fields.
    pub fn from_bundle(bundle: &ParameterBundle, bundle_name: &str) -> Result<Self> {
        if let Some(unknown) = bundle.keys().find(|k| !FIELDS.iter().any(|(name, _)| name == k)) {
            return Err(Error::UnknownParameter(unknown.to_string()));
        }

        let reader = BundleReader { bundle, bundle_name };
        Ok(Self {
            sky_colour: reader.vector("sky_colour")?,
            fog_color_a: reader.vector("fog_color_a")?,
            fog_color_b: reader.vector("fog_color_b")?,
            cloud_base: reader.vector("cloud_base")?,
            cloud_shadow: reader.vector("cloud_shadow")?,
            sun_glow: reader.vector("sun_glow")?,
            elevation: reader.scalar("elevation")?,
            azimuth: reader.scalar("azimuth")?,
            ambient_intensity: reader.scalar("ambient_intensity")?,
            dir_light_intensity: reader.scalar("dir_light_intensity")?,
            point_light_intensity: reader.scalar("point_light_intensity")?,
            particle_color: reader.vector("particle_color")?,
            particle_opacity: reader.scalar("particle_opacity")?,
            particle_speed: reader.scalar("particle_speed")?,
            exposure: reader.scalar("exposure")?,
            text_color: reader.vector("text_color")?,
            text_emissive: reader.vector("text_emissive")?,
            text_emissive_intensity: reader.scalar("text_emissive_intensity")?,
            grass_brightness: reader.scalar("grass_brightness")?,
            text_light_intensity: reader.scalar("text_light_intensity")?,
            rim_light_intensity: reader.scalar("rim_light_intensity")?,
        })
    }

    /// Flatten into a bundle, e.g. to write a config template.
    pub fn to_bundle(&self) -> ParameterBundle {
        ParameterBundle::new()
            .with_vector("sky_colour", self.sky_colour)
            .with_vector("fog_color_a", self.fog_color_a)
            .with_vector("fog_color_b", self.fog_color_b)
            .with_vector("cloud_base", self.cloud_base)
            .with_vector("cloud_shadow", self.cloud_shadow)
            .with_vector("sun_glow", self.sun_glow)
            .with_scalar("elevation", self.elevation)
            .with_scalar("azimuth", self.azimuth)
            .with_scalar("ambient_intensity", self.ambient_intensity)
            .with_scalar("dir_light_intensity", self.dir_light_intensity)
            .with_scalar("point_light_intensity", self.point_light_intensity)
            .with_vector("particle_color", self.particle_color)
            .with_scalar("particle_opacity", self.particle_opacity)
            .with_scalar("particle_speed", self.particle_speed)
            .with_scalar("exposure", self.exposure)
            .with_vector("text_color", self.text_color)
            .with_vector("text_emissive", self.text_emissive)
            .with_scalar("text_emissive_intensity", self.text_emissive_intensity)
            .with_scalar("grass_brightness", self.grass_brightness)
            .with_scalar("text_light_intensity", self.text_light_intensity)
            .with_scalar("rim_light_intensity", self.rim_light_intensity)
    }
}

struct BundleReader<'a> {
    bundle: &'a ParameterBundle,
    bundle_name: &'a str,
}

impl BundleReader<'_> {
    fn get(&self, field: &str) -> Result<ParamValue> {
        self.bundle.get(field).ok_or_else(|| Error::MissingParameter {
            bundle: self.bundle_name.to_string(),
            field: field.to_string(),
        })
    }

    fn scalar(&self, field: &str) -> Result<f32> {
        match self.get(field)? {
            ParamValue::Scalar(v) => Ok(v),
            ParamValue::Vector(_) => Err(Error::Config(format!(
                "`{}` in {} bundle must be a scalar",
                field, self.bundle_name
            ))),
        }
    }

    fn vector(&self, field: &str) -> Result<[f32; 3]> {
        match self.get(field)? {
            ParamValue::Vector(v) => Ok(v),
            ParamValue::Scalar(_) => Err(Error::Config(format!(
                "`{}` in {} bundle must be a 3-component vector",
                field, self.bundle_name
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_cover_schema() {
        for preset in [AtmosphereParams::day(), AtmosphereParams::night()] {
            let bundle = preset.to_bundle();
            assert_eq!(bundle.len(), FIELDS.len());
            for (name, kind) in FIELDS {
                assert_eq!(bundle.get(name).map(|v| v.kind()), Some(*kind), "{}", name);
            }
        }
    }

    #[test]
    fn test_bundle_round_trip_is_exact() {
        let night = AtmosphereParams::night();
        let back = AtmosphereParams::from_bundle(&night.to_bundle(), "night").unwrap();
        assert_eq!(back, night);
    }

    #[test]
    fn test_missing_field_fails() {
        let mut bundle = AtmosphereParams::day().to_bundle();
        bundle.remove("grass_brightness");
        assert!(matches!(
            AtmosphereParams::from_bundle(&bundle, "day"),
            Err(Error::MissingParameter { ref field, .. }) if field == "grass_brightness"
        ));
    }

    #[test]
    fn test_unknown_field_fails() {
        let bundle = AtmosphereParams::day().to_bundle().with_scalar("moon_phase", 0.5);
        assert!(matches!(
            AtmosphereParams::from_bundle(&bundle, "day"),
            Err(Error::UnknownParameter(ref f)) if f == "moon_phase"
        ));
    }

    #[test]
    fn test_wrong_kind_fails() {
        let bundle = AtmosphereParams::day().to_bundle().with_scalar("sky_colour", 0.5);
        assert!(AtmosphereParams::from_bundle(&bundle, "day").is_err());
    }

    #[test]
    fn test_lerp_endpoints_and_midpoint() {
        let day = AtmosphereParams::day();
        let night = AtmosphereParams::night();
        assert_eq!(day.lerp(&night, 0.0), day);
        let mid = day.lerp(&night, 0.5);
        assert!((mid.exposure - 1.0).abs() < 1e-6);
        assert!((mid.grass_brightness - 0.725).abs() < 1e-6);
    }

    #[test]
    fn test_sun_direction() {
        let day = AtmosphereParams::day();
        let dir = day.sun_direction();
        assert!((dir.y - 0.2f32.sin()).abs() < 1e-6);
        assert!(dir.z < 0.0);
        assert!(AtmosphereParams::night().sun_direction().y < 0.0);
    }
}
