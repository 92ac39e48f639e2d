//! Core Whitted-style renderer.
//!
//! One primary ray per pixel, nearest-hit search over the scene, ambient plus
//! diffuse shading from a point light, and mirror reflections blended by
//! material reflectance up to a fixed bounce count.

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::{Camera, Color, HitRecord, Scene, MAX_CHANNEL};
use glint_math::{vector, Interval, Ray, Vec3, HIT_EPSILON};
use rayon::prelude::*;
use std::time::Instant;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Maximum number of reflection bounces after the primary hit
    pub max_depth: u32,
    /// Background color when ray doesn't hit anything
    pub background: Color,
    /// Fraction of the material color visible without any light, in [0, 1]
    pub ambient: f32,
    /// Position of the single point light
    pub light_position: Vec3,
    /// Tile size used by the parallel renderer
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            background: Color::ZERO,
            ambient: 0.2,
            light_position: Vec3::ZERO,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

/// Hard ceiling on reflection bounces, whatever `max_depth` asks for.
pub const MAX_BOUNCES: u32 = 64;

/// Compute the color seen by a ray.
///
/// `depth` is the number of reflection bounces still allowed, capped at
/// [`MAX_BOUNCES`]. Once it runs out a hit returns its local color only.
///
/// Each bounce blends `(1 - r) * local + r * reflected`. The blend is
/// unrolled into a loop carrying the product of reflectances so far, so the
/// stack stays flat however deep the bounces go.
pub fn ray_color(ray: &Ray, scene: &Scene<'_>, depth: u32, config: &RenderConfig) -> Color {
    let mut ray = *ray;
    let mut remaining = depth.min(MAX_BOUNCES);
    let mut color = Color::ZERO;
    let mut weight = 1.0_f32;

    loop {
        let Some(rec) = scene.hit(&ray, Interval::FORWARD) else {
            return color + weight * config.background;
        };

        let local = shade(&rec, config);
        let reflectance = rec.material.reflectance();
        if reflectance <= 0.0 || remaining == 0 {
            return color + weight * local;
        }

        color += weight * (1.0 - reflectance) * local;
        weight *= reflectance;
        ray = reflect_ray(&ray, &rec);
        remaining -= 1;
    }
}

fn warn_if_capped(config: &RenderConfig) {
    if config.max_depth > MAX_BOUNCES {
        log::warn!(
            "max_depth {} exceeds the bounce ceiling, using {}",
            config.max_depth,
            MAX_BOUNCES
        );
    }
}

/// Local color at a hit: ambient plus Lambert diffuse from the point light.
pub fn shade(rec: &HitRecord<'_>, config: &RenderConfig) -> Color {
    let ambient = config.ambient.clamp(0.0, 1.0);

    // A light sitting on the surface counts as fully aligned
    let alignment = match vector::normalize(config.light_position - rec.p) {
        Ok(to_light) => rec.normal.dot(to_light).max(0.0),
        Err(_) => 1.0,
    };

    rec.material.color() * (ambient + (1.0 - ambient) * alignment)
}

/// Mirror ray leaving a hit point.
///
/// The origin is pushed off the surface along the hit normal, which faces
/// the incoming ray, so the bounce cannot re-hit its own surface.
fn reflect_ray(ray: &Ray, rec: &HitRecord<'_>) -> Ray {
    let origin = rec.p + HIT_EPSILON * rec.normal;
    let direction = vector::reflect(ray.direction(), rec.normal).normalize();
    Ray::from_normalized(origin, direction)
}

/// Render a single pixel.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene<'_>,
    x: u32,
    y: u32,
    config: &RenderConfig,
) -> Color {
    let ray = camera.get_ray(x, y);
    ray_color(&ray, scene, config.max_depth, config)
}

/// Clamp a channel to the displayable [0, 255] range.
#[inline]
pub fn clamp_channel(x: f32) -> f32 {
    x.clamp(0.0, MAX_CHANNEL)
}

/// Convert a color to 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    [
        clamp_channel(color.x).round() as u8,
        clamp_channel(color.y).round() as u8,
        clamp_channel(color.z).round() as u8,
    ]
}

/// Image buffer for storing render output.
///
/// Pixels are row-major, channels on the 0-255 scale.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Row-major offset of (x, y), computed in `usize` so large images
    /// cannot overflow `u32`.
    #[inline]
    fn pixel_index(width: u32, x: u32, y: u32) -> usize {
        y as usize * width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[Self::pixel_index(self.width, x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = Self::pixel_index(self.width, x, y);
        self.pixels[index] = color;
    }

    /// Copy a rendered bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for (i, color) in result.pixels.iter().enumerate() {
            let local_x = i as u32 % bucket.width;
            let local_y = i as u32 / bucket.width;
            self.set(bucket.x + local_x, bucket.y + local_y, *color);
        }
    }

    /// Convert to RGB bytes (for display or saving).
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb(*color));
        }
        bytes
    }

    /// Column-major copy indexed as `[x][y][channel]`.
    pub fn to_columns(&self) -> Vec<Vec<[f32; 3]>> {
        (0..self.width)
            .map(|x| {
                (0..self.height)
                    .map(|y| self.get(x, y).to_array())
                    .collect()
            })
            .collect()
    }

}

/// Render the entire scene, buckets in parallel.
pub fn render(camera: &Camera, scene: &Scene<'_>, config: &RenderConfig) -> ImageBuffer {
    let start = Instant::now();
    warn_if_capped(config);
    let buckets = generate_buckets(camera.image_width, camera.image_height, config.bucket_size);
    log::debug!(
        "Rendering {} buckets of up to {}px over {} objects",
        buckets.len(),
        config.bucket_size,
        scene.len()
    );

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| BucketResult::new(*bucket, render_bucket(bucket, camera, scene, config)))
        .collect();

    let mut image = ImageBuffer::new(camera.image_width, camera.image_height);
    for result in &results {
        image.write_bucket(result);
    }

    log::info!(
        "Rendered {}x{} in {:?}",
        camera.image_width,
        camera.image_height,
        start.elapsed()
    );
    image
}

/// Render the entire scene on the calling thread.
pub fn render_sequential(camera: &Camera, scene: &Scene<'_>, config: &RenderConfig) -> ImageBuffer {
    warn_if_capped(config);
    let mut image = ImageBuffer::new(camera.image_width, camera.image_height);

    for y in 0..camera.image_height {
        for x in 0..camera.image_width {
            let color = render_pixel(camera, scene, x, y, config);
            image.set(x, y, color);
        }
    }

    image
}

/// Render with the default configuration.
pub fn gen_image(camera: &Camera, scene: &Scene<'_>) -> ImageBuffer {
    render(camera, scene, &RenderConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Hittable, Material, Plane, Sphere};

    fn flat_config() -> RenderConfig {
        RenderConfig {
            ambient: 1.0,
            ..RenderConfig::default()
        }
    }

    #[test]
    fn test_miss_returns_background() {
        let scene = Scene::new();
        let config = RenderConfig {
            background: Color::new(10.0, 20.0, 30.0),
            ..RenderConfig::default()
        };
        let ray = Ray::from_normalized(Vec3::ZERO, Vec3::Z);
        assert_eq!(ray_color(&ray, &scene, 5, &config), Color::new(10.0, 20.0, 30.0));
        assert_eq!(RenderConfig::default().background, Color::ZERO);
    }

    #[test]
    fn test_shading_is_monotonic_in_alignment() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, Material::new(200.0, 200.0, 200.0)).unwrap();
        let config = RenderConfig::default();

        // Light at the eye: the center of the sphere faces it head-on, the
        // rim almost side-on
        let head_on = Ray::from_normalized(Vec3::ZERO, Vec3::Z);
        let grazing = Ray::new(Vec3::ZERO, Vec3::new(0.19, 0.0, 1.0)).unwrap();

        let bright = shade(&sphere.hit(&head_on, Interval::FORWARD).unwrap(), &config);
        let dim = shade(&sphere.hit(&grazing, Interval::FORWARD).unwrap(), &config);

        assert!((bright.x - 200.0).abs() < 1e-3);
        assert!(dim.x < bright.x);
        assert!(dim.x >= 200.0 * config.ambient - 1e-3);
    }

    #[test]
    fn test_surface_facing_away_gets_ambient_only() {
        let floor = Plane::new(Vec3::new(0.0, -1.0, 0.0), Vec3::Y, Material::new(100.0, 100.0, 100.0)).unwrap();
        let config = RenderConfig {
            light_position: Vec3::new(0.0, -10.0, 0.0),
            ..RenderConfig::default()
        };

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, -1.0, 1.0)).unwrap();
        let rec = floor.hit(&ray, Interval::FORWARD).unwrap();
        let color = shade(&rec, &config);
        assert!((color.x - 100.0 * config.ambient).abs() < 1e-3);
    }

    #[test]
    fn test_reflection_blends_by_reflectance() {
        // Half-mirror in front of the camera, red wall behind the camera
        let mirror = Plane::new(
            Vec3::new(0.0, 0.0, 5.0),
            -Vec3::Z,
            Material::with_reflectance(0.0, 0.0, 200.0, 0.5),
        )
        .unwrap();
        let wall = Plane::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, Material::new(200.0, 0.0, 0.0)).unwrap();

        let mut scene = Scene::new();
        scene.add(&mirror);
        scene.add(&wall);

        let ray = Ray::from_normalized(Vec3::ZERO, Vec3::Z);
        let color = ray_color(&ray, &scene, 1, &flat_config());

        assert!((color - Color::new(100.0, 0.0, 100.0)).length() < 1e-3);
    }

    #[test]
    fn test_depth_zero_returns_local_color() {
        let mirror = Plane::new(
            Vec3::new(0.0, 0.0, 5.0),
            -Vec3::Z,
            Material::with_reflectance(0.0, 0.0, 200.0, 1.0),
        )
        .unwrap();
        let scene: Scene = std::iter::once(&mirror as &dyn Hittable).collect();

        let ray = Ray::from_normalized(Vec3::ZERO, Vec3::Z);
        let color = ray_color(&ray, &scene, 0, &flat_config());
        assert_eq!(color, Color::new(0.0, 0.0, 200.0));

        // With budget left the bounce escapes to the background
        let color = ray_color(&ray, &scene, 1, &flat_config());
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_reflected_ray_leaves_its_surface() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, Material::default()).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.1, 0.05, 1.0)).unwrap();
        let rec = sphere.hit(&ray, Interval::FORWARD).unwrap();

        let bounce = reflect_ray(&ray, &rec);
        assert!(bounce.direction().dot(rec.normal) > 0.0);
        assert!(sphere.hit(&bounce, Interval::FORWARD).is_none());
    }

    fn facing_mirrors() -> (Plane, Plane) {
        let wall1 = Plane::new(
            Vec3::new(0.0, 0.0, 20.0),
            Vec3::new(0.0, 0.0, -1.0),
            Material::with_reflectance(255.0, 255.0, 255.0, 1.0),
        )
        .unwrap();
        let wall2 = Plane::new(
            Vec3::new(0.0, 0.0, -20.0),
            Vec3::new(0.0, 0.0, 1.0),
            Material::with_reflectance(255.0, 255.0, 255.0, 1.0),
        )
        .unwrap();
        (wall1, wall2)
    }

    #[test]
    fn test_facing_mirrors_terminate() {
        let (wall1, wall2) = facing_mirrors();
        let scene: Scene = [&wall1 as &dyn Hittable, &wall2].into_iter().collect();

        let camera = Camera::new(100, 100).unwrap();
        let config = RenderConfig {
            max_depth: 1000,
            ..RenderConfig::default()
        };
        let image = render(&camera, &scene, &config);

        assert_eq!(image.pixels.len(), 100 * 100);
        assert!(image.pixels.iter().all(|c| c.is_finite()));
        // Every primary ray hits the near wall head-on or obliquely
        assert!(image.pixels.iter().all(|c| c.x > 0.0));
    }

    #[test]
    fn test_unbounded_depth_is_capped() {
        let (wall1, wall2) = facing_mirrors();
        let scene: Scene = [&wall1 as &dyn Hittable, &wall2].into_iter().collect();
        let camera = Camera::new(4, 4).unwrap();

        let unbounded = RenderConfig {
            max_depth: u32::MAX,
            ..RenderConfig::default()
        };
        let capped = RenderConfig {
            max_depth: MAX_BOUNCES,
            ..RenderConfig::default()
        };

        let image = render(&camera, &scene, &unbounded);
        assert!(image.pixels.iter().all(|c| c.is_finite()));
        assert_eq!(image, render(&camera, &scene, &capped));
        assert_eq!(image, render_sequential(&camera, &scene, &unbounded));

        let ray = Ray::from_normalized(Vec3::ZERO, Vec3::Z);
        let color = ray_color(&ray, &scene, u32::MAX, &unbounded);
        assert!((color - Color::splat(255.0)).length() < 1e-2);
    }

    #[test]
    fn test_deep_blend_matches_nested_form() {
        // Half mirrors facing each other: after n bounces the weights sum
        // the same way as (1 - r) * local + r * (...) nested n times
        let material = Material::with_reflectance(200.0, 100.0, 0.0, 0.5);
        let near = Plane::new(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z, material).unwrap();
        let far = Plane::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, material).unwrap();
        let scene: Scene = [&near as &dyn Hittable, &far].into_iter().collect();

        let ray = Ray::from_normalized(Vec3::ZERO, Vec3::Z);
        let local = Color::new(200.0, 100.0, 0.0);
        // Last hit keeps its whole local color, so the series sums to local
        for depth in [0, 1, 3, 20] {
            let color = ray_color(&ray, &scene, depth, &flat_config());
            assert!((color - local).length() < 1e-2, "depth {} gave {}", depth, color);
        }
    }

    #[test]
    fn test_pixel_index_does_not_wrap() {
        assert_eq!(ImageBuffer::pixel_index(4, 3, 2), 11);
        #[cfg(target_pointer_width = "64")]
        assert_eq!(ImageBuffer::pixel_index(70_000, 69_999, 69_999), 4_899_999_999);
    }

    #[test]
    fn test_render_is_deterministic() {
        let sphere = Sphere::new(Vec3::new(4.0, 0.0, 5.0), 2.0, Material::new(0.0, 0.0, 255.0)).unwrap();
        let sphere2 = Sphere::new(Vec3::ZERO, 5.0, Material::with_reflectance(255.0, 255.0, 255.0, 0.5)).unwrap();
        let scene: Scene = [&sphere as &dyn Hittable, &sphere2].into_iter().collect();
        let camera = Camera::new(37, 23).unwrap();
        let config = RenderConfig {
            bucket_size: 8,
            ..RenderConfig::default()
        };

        let first = render(&camera, &scene, &config);
        let second = render(&camera, &scene, &config);
        let sequential = render_sequential(&camera, &scene, &config);

        assert_eq!(first, second);
        assert_eq!(first, sequential);
    }

    #[test]
    fn test_gen_image_dimensions() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 5.0), 2.0, Material::new(255.0, 0.0, 0.0)).unwrap();
        let scene: Scene = std::iter::once(&sphere as &dyn Hittable).collect();
        let image = gen_image(&Camera::new(20, 10).unwrap(), &scene);

        assert_eq!((image.width, image.height), (20, 10));
        let columns = image.to_columns();
        assert_eq!(columns.len(), 20);
        assert_eq!(columns[0].len(), 10);
        assert_eq!(columns[3][7], image.get(3, 7).to_array());

        // Corner misses, center hits
        assert_eq!(image.get(0, 0), Color::ZERO);
        assert!(image.get(10, 5).x > 0.0);
    }

    #[test]
    fn test_color_to_rgb_clamps() {
        assert_eq!(color_to_rgb(Color::new(-5.0, 127.6, 300.0)), [0, 128, 255]);
    }

    #[test]
    fn test_image_buffer_get_set() {
        let mut image = ImageBuffer::new(4, 3);
        image.set(3, 2, Color::ONE);
        assert_eq!(image.get(3, 2), Color::ONE);
        assert_eq!(image.get(0, 0), Color::ZERO);
        assert_eq!(image.to_rgb8().len(), 4 * 3 * 3);
    }
}
