use thiserror::Error;

/// Errors raised by vector and ray construction.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MathError {
    #[error("cannot normalize a zero-length vector")]
    ZeroLength,

    #[error("vector has non-finite components: {0}")]
    NonFinite(glam::Vec3),
}

pub type MathResult<T> = Result<T, MathError>;
