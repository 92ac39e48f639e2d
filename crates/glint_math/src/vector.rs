//! Vector helpers on top of glam.
//!
//! Addition, subtraction, scaling, dot and cross products come straight from
//! `glam::Vec3` operators. This module adds the operations whose failure
//! modes have to be explicit for the tracer.

use crate::{MathError, MathResult, Vec3};

/// Squared length below which a vector is treated as zero.
const MIN_LENGTH_SQUARED: f32 = 1e-12;

/// Normalize `v` to unit length.
///
/// Fails on zero-length or non-finite input instead of producing NaNs.
pub fn normalize(v: Vec3) -> MathResult<Vec3> {
    if !v.is_finite() {
        return Err(MathError::NonFinite(v));
    }
    let len_sq = v.length_squared();
    if len_sq < MIN_LENGTH_SQUARED {
        return Err(MathError::ZeroLength);
    }
    Ok(v / len_sq.sqrt())
}

/// Reflect `incident` about `normal`.
///
/// `incident - 2 * dot(incident, normal) * normal`; `normal` must be unit length.
#[inline]
pub fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    incident - 2.0 * incident.dot(normal) * normal
}

/// Returns true if `v` is unit length within a small tolerance.
#[inline]
pub fn is_unit(v: Vec3) -> bool {
    (v.length_squared() - 1.0).abs() < 1e-4
}
