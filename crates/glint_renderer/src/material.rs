//! Surface material: a flat color plus a mirror reflectance.

use glint_math::{Interval, Vec3};

/// Color type alias (RGB channels on the 0-255 scale)
pub type Color = Vec3;

/// Largest value a color channel can take.
pub const MAX_CHANNEL: f32 = 255.0;

const CHANNEL_RANGE: Interval = Interval {
    min: 0.0,
    max: MAX_CHANNEL,
};

const REFLECTANCE_RANGE: Interval = Interval { min: 0.0, max: 1.0 };

/// Per-surface shading parameters.
///
/// Out-of-range input is clamped, never rejected: channels into [0, 255] and
/// reflectance into [0, 1]. NaN becomes 0. The renderer relies on this to keep
/// the reflection blend energy-bounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    color: Color,
    reflectance: f32,
}

impl Material {
    /// Create an opaque (non-reflective) material.
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self::from_color(Color::new(r, g, b), 0.0)
    }

    /// Create a material with the given reflectance.
    pub fn with_reflectance(r: f32, g: f32, b: f32, reflectance: f32) -> Self {
        Self::from_color(Color::new(r, g, b), reflectance)
    }

    /// Create a material from a color vector and reflectance.
    pub fn from_color(color: Color, reflectance: f32) -> Self {
        let clamped_color = Color::new(
            clamp_to(CHANNEL_RANGE, color.x),
            clamp_to(CHANNEL_RANGE, color.y),
            clamp_to(CHANNEL_RANGE, color.z),
        );
        if clamped_color != color {
            log::warn!("Material color {} clamped to {}", color, clamped_color);
        }

        let clamped_reflectance = clamp_to(REFLECTANCE_RANGE, reflectance);
        if clamped_reflectance != reflectance {
            log::warn!(
                "Material reflectance {} clamped to {}",
                reflectance,
                clamped_reflectance
            );
        }

        Self {
            color: clamped_color,
            reflectance: clamped_reflectance,
        }
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Fraction of the final color taken from the reflected ray.
    #[inline]
    pub fn reflectance(&self) -> f32 {
        self.reflectance
    }

    #[inline]
    pub fn is_reflective(&self) -> bool {
        self.reflectance > 0.0
    }
}

impl Default for Material {
    /// Opaque white.
    fn default() -> Self {
        Self::new(MAX_CHANNEL, MAX_CHANNEL, MAX_CHANNEL)
    }
}

fn clamp_to(range: Interval, x: f32) -> f32 {
    if x.is_nan() {
        range.min
    } else {
        range.clamp(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_reflectance_is_zero() {
        let mat = Material::new(255.0, 255.0, 255.0);
        assert_eq!(mat.reflectance(), 0.0);
        assert!(!mat.is_reflective());
    }

    #[test]
    fn test_in_range_reflectance_is_exact() {
        for r in [0.0, 0.1, 0.25, 0.5, 0.75, 0.999, 1.0] {
            let mat = Material::with_reflectance(255.0, 255.0, 255.0, r);
            assert_eq!(mat.reflectance(), r);
        }
    }

    #[test]
    fn test_out_of_range_reflectance_is_clamped() {
        let low = Material::with_reflectance(255.0, 255.0, 255.0, -1.0);
        assert_eq!(low.reflectance(), 0.0);

        let high = Material::with_reflectance(255.0, 255.0, 255.0, 1.5);
        assert_eq!(high.reflectance(), 1.0);

        let nan = Material::with_reflectance(255.0, 255.0, 255.0, f32::NAN);
        assert_eq!(nan.reflectance(), 0.0);

        let inf = Material::with_reflectance(255.0, 255.0, 255.0, f32::INFINITY);
        assert_eq!(inf.reflectance(), 1.0);
    }

    #[test]
    fn test_color_is_clamped() {
        let mat = Material::new(-10.0, 128.0, 300.0);
        assert_eq!(mat.color(), Color::new(0.0, 128.0, 255.0));

        let nan = Material::new(f32::NAN, 0.0, 0.0);
        assert_eq!(nan.color(), Color::ZERO);
    }

    #[test]
    fn test_from_color() {
        let mat = Material::from_color(Color::new(0.0, 0.0, 255.0), 0.5);
        assert_eq!(mat.color(), Color::new(0.0, 0.0, 255.0));
        assert_eq!(mat.reflectance(), 0.5);
        assert!(mat.is_reflective());
    }
}
