/// Smallest ray distance accepted as a hit.
///
/// Reflected rays also start this far off the surface they leave.
pub const HIT_EPSILON: f32 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Clamps x to be within the interval [min, max].
    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }

    /// Same interval with `max` replaced, used to shrink the search range
    /// as closer hits are found.
    pub fn with_max(&self, max: f32) -> Interval {
        Interval::new(self.min, max)
    }

    /// Everything strictly in front of a ray origin.
    pub const FORWARD: Interval = Interval {
        min: HIT_EPSILON,
        max: f32::INFINITY,
    };
}
