//! Camera for primary ray generation.

use crate::{SceneError, SceneResult};
use glint_math::{vector, Ray, Vec3};

/// Pinhole camera generating one primary ray per pixel.
///
/// Defaults to an eye at the origin looking down +Z with +Y up and a 90°
/// vertical field of view.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    // Camera positioning
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,

    /// Vertical field of view in degrees
    vfov: f32,

    // Cached computed values (set by initialize())
    center: Vec3,
    pixel00_loc: Vec3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
}

impl Camera {
    /// Create a camera with the given resolution and default view.
    pub fn new(width: u32, height: u32) -> SceneResult<Self> {
        if width == 0 || height == 0 {
            return Err(SceneError::InvalidResolution { width, height });
        }

        let mut camera = Self {
            image_width: width,
            image_height: height,
            look_from: Vec3::ZERO,
            look_at: Vec3::Z,
            vup: Vec3::Y,
            vfov: 90.0,
            center: Vec3::ZERO,
            pixel00_loc: Vec3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
        };
        camera.initialize()?;
        Ok(camera)
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> SceneResult<Self> {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self.initialize()?;
        Ok(self)
    }

    /// Set the vertical field of view in degrees.
    pub fn with_fov(mut self, vfov: f32) -> SceneResult<Self> {
        self.vfov = vfov;
        self.initialize()?;
        Ok(self)
    }

    pub fn look_from(&self) -> Vec3 {
        self.look_from
    }

    pub fn vfov(&self) -> f32 {
        self.vfov
    }

    /// Recompute the cached viewport after a setting changed.
    fn initialize(&mut self) -> SceneResult<()> {
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(SceneError::InvalidFieldOfView(self.vfov));
        }

        self.center = self.look_from;

        // Image plane sits at unit distance in front of the eye
        let theta = self.vfov.to_radians();
        let viewport_height = 2.0 * (theta / 2.0).tan();
        let viewport_width =
            viewport_height * (self.image_width as f32 / self.image_height as f32);

        // Calculate camera basis vectors
        let w = vector::normalize(self.look_from - self.look_at).map_err(SceneError::DegenerateView)?;
        let u = vector::normalize(self.vup.cross(w)).map_err(SceneError::DegenerateView)?;
        let v = w.cross(u);

        // Calculate viewport vectors
        let viewport_u = viewport_width * u;
        let viewport_v = -viewport_height * v;

        // Calculate pixel delta vectors
        self.pixel_delta_u = viewport_u / self.image_width as f32;
        self.pixel_delta_v = viewport_v / self.image_height as f32;

        // Calculate upper left pixel location
        let viewport_upper_left = self.center - w - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);

        Ok(())
    }

    /// Primary ray through the center of pixel (x, y); row 0 is the top.
    pub fn get_ray(&self, x: u32, y: u32) -> Ray {
        let pixel_center = self.pixel00_loc
            + (x as f32) * self.pixel_delta_u
            + (y as f32) * self.pixel_delta_v;

        // The image plane is one unit away, so this never has zero length
        let direction = (pixel_center - self.center).normalize();
        Ray::from_normalized(self.center, direction)
    }
}
