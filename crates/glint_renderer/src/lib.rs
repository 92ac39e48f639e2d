//! Glint - a recursive Whitted-style CPU ray tracer.
//!
//! One primary ray per pixel, nearest-hit search over spheres and planes,
//! ambient plus diffuse shading from a point light, and mirror reflections
//! traced to a fixed bounce limit.
//!
//! # Example
//!
//! ```
//! use glint_renderer::{gen_image, Camera, Hittable, Material, Scene, Sphere, Vec3};
//!
//! let ball = Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, Material::new(0.0, 0.0, 255.0))?;
//! let scene: Scene = std::iter::once(&ball as &dyn Hittable).collect();
//! let image = gen_image(&Camera::new(64, 64)?, &scene);
//! assert_eq!(image.pixels.len(), 64 * 64);
//! # Ok::<(), glint_renderer::SceneError>(())
//! ```

mod bucket;
mod camera;
mod error;
mod export;
mod hittable;
mod material;
mod plane;
mod renderer;
mod sphere;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use error::{ImageIoError, ImageIoResult, SceneError, SceneResult};
pub use export::{average_diff, load_image, read_image, save_image, save_ppm, write_ppm};
pub use hittable::{HitRecord, Hittable, Scene};
pub use material::{Color, Material, MAX_CHANNEL};
pub use plane::Plane;
pub use renderer::{
    clamp_channel, color_to_rgb, gen_image, ray_color, render, render_pixel, render_sequential,
    shade, ImageBuffer, RenderConfig, MAX_BOUNCES,
};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from glint_math
pub use glint_math::{Interval, MathError, Ray, Vec3};
