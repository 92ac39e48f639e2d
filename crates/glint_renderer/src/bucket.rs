//! Tile rendering.
//!
//! The image is cut into square tiles (buckets) that rayon renders
//! independently. Pixels only read the scene, so tiles never contend, and
//! stitching them back by position makes the result independent of which
//! tile finishes first.

use crate::renderer::render_pixel;
use crate::{Camera, Color, RenderConfig, Scene};

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 32;

/// A rectangular region of the image; `x`, `y` is its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Row-major tiles covering a `width` x `height` image.
///
/// Edge tiles are cropped to the image. A `bucket_size` of 0 is treated as 1.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let size = bucket_size.max(1);

    (0..height)
        .step_by(size as usize)
        .flat_map(|y| {
            (0..width).step_by(size as usize).map(move |x| {
                Bucket::new(x, y, size.min(width - x), size.min(height - y))
            })
        })
        .collect()
}

/// Render one bucket, returning its pixels in row-major order.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    scene: &Scene<'_>,
    config: &RenderConfig,
) -> Vec<Color> {
    let mut pixels = Vec::with_capacity(bucket.pixel_count());

    for y in bucket.y..bucket.y + bucket.height {
        for x in bucket.x..bucket.x + bucket.width {
            pixels.push(render_pixel(camera, scene, x, y, config));
        }
    }

    pixels
}

/// A rendered bucket waiting to be copied into the image.
#[derive(Debug, Clone)]
pub struct BucketResult {
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
}

impl BucketResult {
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }
}
