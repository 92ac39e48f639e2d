//! Errors raised while building a scene or moving images in and out.

use glint_math::{MathError, Vec3};
use thiserror::Error;

/// Invalid scene configuration, detected before any pixel is traced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("sphere radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("sphere center is not finite: {0}")]
    InvalidCenter(Vec3),

    #[error("plane point is not finite: {0}")]
    InvalidPoint(Vec3),

    #[error("degenerate plane normal: {0}")]
    DegenerateNormal(#[source] MathError),

    #[error("image resolution must be non-zero, got {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },

    #[error("vertical field of view must be in (0, 180) degrees, got {0}")]
    InvalidFieldOfView(f32),

    #[error("degenerate camera orientation: {0}")]
    DegenerateView(#[source] MathError),
}

pub type SceneResult<T> = Result<T, SceneError>;

/// Errors that can occur while saving, loading or comparing images.
#[derive(Error, Debug)]
pub enum ImageIoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("image is {actual_width}x{actual_height}, expected {expected_width}x{expected_height}")]
    DimensionMismatch {
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },
}

pub type ImageIoResult<T> = Result<T, ImageIoError>;
