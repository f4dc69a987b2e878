//! Interpolation helpers for the day/night blend.

use std::f32::consts::PI;

// ---------------------------------------------------------------------------
// Lerp trait
// ---------------------------------------------------------------------------

/// Trait for types that can be linearly interpolated.
pub trait Lerp: Clone {
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for [f32; 3] {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        [
            self[0].lerp(&other[0], t),
            self[1].lerp(&other[1], t),
            self[2].lerp(&other[2], t),
        ]
    }
}

// ---------------------------------------------------------------------------
// Curves
// ---------------------------------------------------------------------------

/// Cubic ease-in-out on `[0, 1]`.
#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

/// Bell-shaped speed-up during a transition: `sin(t * PI)^2`.
///
/// Evaluated on the nearer half so that both ends are exactly zero and the
/// curve is exactly symmetric about `t = 0.5`.
#[inline]
pub fn transition_boost(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let s = (t.min(1.0 - t) * PI).sin();
    s * s
}

/// Convert one sRGB-encoded channel to linear.
#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Linear RGB from a `0xRRGGBB` sRGB colour.
pub fn hex_color(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
    [channel(16), channel(8), channel(0)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        let a = [0.9f32, 0.2, 0.0];
        let b = [0.3f32, 0.4, 1.0];
        assert_eq!(a.lerp(&b, 0.0), a);
        let mid = a.lerp(&b, 0.5);
        assert!((mid[0] - 0.6).abs() < 1e-6);
        assert!((2.0f32.lerp(&4.0, 0.25) - 2.5).abs() < 1e-6);
    }

    #[test]
    fn test_ease_shape() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-6);
        assert!((ease_in_out_cubic(0.25) - 0.0625).abs() < 1e-6);
        // Monotonic
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = ease_in_out_cubic(i as f32 / 100.0);
            assert!(v >= prev);
            prev = v;
        }
    }

    #[test]
    fn test_boost_shape() {
        assert_eq!(transition_boost(0.0), 0.0);
        assert_eq!(transition_boost(1.0), 0.0);
        assert!((transition_boost(0.5) - 1.0).abs() < 1e-6);
        for i in 0..=100 {
            let t = i as f32 / 100.0;
            assert!((transition_boost(t) - transition_boost(1.0 - t)).abs() < 1e-6);
        }
    }

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color(0x000000), [0.0, 0.0, 0.0]);
        let white = hex_color(0xffffff);
        assert!(white.iter().all(|c| (c - 1.0).abs() < 1e-6));
        let c = hex_color(0x808080);
        assert!((c[0] - 0.2158605).abs() < 1e-4);
    }
}
