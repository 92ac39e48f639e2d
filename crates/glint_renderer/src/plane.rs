//! Infinite plane primitive.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, SceneError, SceneResult,
};
use glint_math::{vector, Interval, Ray, Vec3};

/// Denominators smaller than this mean the ray runs parallel to the plane.
const PARALLEL_EPSILON: f32 = 1e-8;

/// An infinite plane through `point` with unit normal `normal`.
#[derive(Debug, Clone)]
pub struct Plane {
    point: Vec3,
    normal: Vec3,
    material: Material,
}

impl Plane {
    /// Create a new plane. The normal is normalized here.
    pub fn new(point: Vec3, normal: Vec3, material: Material) -> SceneResult<Self> {
        if !point.is_finite() {
            return Err(SceneError::InvalidPoint(point));
        }
        let normal = vector::normalize(normal).map_err(SceneError::DegenerateNormal)?;

        Ok(Self {
            point,
            normal,
            material,
        })
    }

    pub fn point(&self) -> Vec3 {
        self.point
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl Hittable for Plane {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let denom = ray.direction().dot(self.normal);

        // Ray is parallel to plane
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = (self.point - ray.origin()).dot(self.normal) / denom;
        if !ray_t.surrounds(t) {
            return None;
        }

        Some(HitRecord::new(ray, t, self.normal, &self.material))
    }

    fn normal_at(&self, _p: Vec3) -> Vec3 {
        self.normal
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
