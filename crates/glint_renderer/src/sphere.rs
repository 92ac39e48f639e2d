//! Sphere primitive for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, SceneError, SceneResult,
};
use glint_math::{Interval, Ray, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Material,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// Fails if the radius is not a positive finite number or the center
    /// is not finite.
    pub fn new(center: Vec3, radius: f32, material: Material) -> SceneResult<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(SceneError::InvalidRadius(radius));
        }
        if !center.is_finite() {
            return Err(SceneError::InvalidCenter(center));
        }

        Ok(Self {
            center,
            radius,
            material,
        })
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        // Unit direction, so the quadratic's `a` term is 1
        let oc = self.center - ray.origin();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = h - sqrtd;
        if !ray_t.surrounds(root) {
            root = h + sqrtd;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let outward_normal = self.normal_at(ray.at(root));
        Some(HitRecord::new(ray, root, outward_normal, &self.material))
    }

    fn normal_at(&self, p: Vec3) -> Vec3 {
        (p - self.center) / self.radius
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
