use crate::{vector, MathResult, Vec3};

/// A ray in 3D space with an origin and a unit-length direction.
///
/// The direction is normalized on construction, so the parameter `t` passed
/// to [`Ray::at`] is a distance along the ray.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
}

impl Ray {
    /// Create a new ray, normalizing `direction`.
    ///
    /// Fails if `direction` has zero length or non-finite components.
    pub fn new(origin: Vec3, direction: Vec3) -> MathResult<Self> {
        Ok(Self {
            origin,
            direction: vector::normalize(direction)?,
        })
    }

    /// Create a ray from a direction the caller already knows is unit length.
    #[inline]
    pub fn from_normalized(origin: Vec3, direction: Vec3) -> Self {
        debug_assert!(vector::is_unit(direction), "ray direction must be normalized");
        Self { origin, direction }
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the unit direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the point at distance t along the ray.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
