//! Hittable trait, HitRecord and the Scene that searches for the nearest hit.

use crate::Material;
use glint_math::{Interval, Ray, Vec3};

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Distance along the ray where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub p: Vec3,
    /// Unit surface normal at intersection (always points against ray)
    pub normal: Vec3,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
    /// Material at the intersection point
    pub material: &'a Material,
}

impl<'a> HitRecord<'a> {
    /// Build a record, orienting `outward_normal` against the ray.
    ///
    /// If the ray and the outward normal point the same way we hit the back
    /// face, so the stored normal is flipped.
    pub fn new(ray: &Ray, t: f32, outward_normal: Vec3, material: &'a Material) -> Self {
        let front_face = ray.direction().dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };

        Self {
            t,
            p: ray.at(t),
            normal,
            front_face,
            material,
        }
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Nearest intersection with `ray` whose distance lies strictly inside `ray_t`.
    ///
    /// Missing the surface is not an error; it returns `None`.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;

    /// Outward unit normal at a point on the surface.
    fn normal_at(&self, p: Vec3) -> Vec3;

    /// The surface material.
    fn material(&self) -> &Material;
}

/// The objects of a render.
///
/// Objects are borrowed: the caller builds and owns them, the scene only
/// needs them to outlive the render.
#[derive(Default, Clone)]
pub struct Scene<'a> {
    objects: Vec<&'a dyn Hittable>,
}

impl<'a> Scene<'a> {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Add an object to the scene.
    pub fn add(&mut self, object: &'a dyn Hittable) {
        self.objects.push(object);
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Test the ray against every object and keep the closest hit.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let mut closest: Option<HitRecord<'a>> = None;

        for &object in &self.objects {
            let interval = ray_t.with_max(closest.map_or(ray_t.max, |rec| rec.t));
            if let Some(rec) = object.hit(ray, interval) {
                closest = Some(rec);
            }
        }

        closest
    }
}

impl<'a> FromIterator<&'a dyn Hittable> for Scene<'a> {
    fn from_iter<I: IntoIterator<Item = &'a dyn Hittable>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().collect(),
        }
    }
}
