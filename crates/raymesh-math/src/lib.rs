#![warn(missing_docs)]

//! Math types for the raymesh preprocessing kernel.
//!
//! Thin wrappers around nalgebra providing the vector operations the ray
//! classifier and bounding volume code are built on, plus the tolerance
//! used to decide when a vector is too short to carry a direction.

use nalgebra::Vector3;
use thiserror::Error;

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// Errors raised by vector operations.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MathError {
    /// The vector is too short to define a direction.
    #[error("cannot normalize vector of length {magnitude}")]
    DegenerateVector {
        /// Euclidean length of the rejected vector.
        magnitude: f64,
    },
}

/// Result type for math operations.
pub type Result<T> = std::result::Result<T, MathError>;

/// Tolerance used when deciding whether a vector has a direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// Vectors whose length is at or below this value are degenerate.
    pub zero_length: f64,
}

impl Tolerance {
    /// Only the exact zero vector is degenerate.
    pub const EXACT: Self = Self { zero_length: 0.0 };

    /// Rejects directions of length 1e-12 or less. Opt-in.
    pub const NEAR_ZERO: Self = Self { zero_length: 1e-12 };

    /// Default tolerance, same as [`Tolerance::EXACT`].
    pub const DEFAULT: Self = Self::EXACT;

    /// Create a tolerance with the given zero-length threshold.
    pub fn new(zero_length: f64) -> Self {
        Self { zero_length }
    }

    /// Check if a length is too small to define a direction.
    ///
    /// NaN lengths count as zero. Infinite lengths do not.
    pub fn is_zero_length(&self, len: f64) -> bool {
        len.is_nan() || len <= self.zero_length
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Largest absolute component of `v`. NaN components are skipped.
#[inline]
fn max_abs(v: &Vec3) -> f64 {
    v.x.abs().max(v.y.abs()).max(v.z.abs())
}

/// Euclidean length of `v`.
///
/// Components are scaled by the largest one before squaring, so finite
/// vectors never overflow to infinity or underflow to zero on the way.
pub fn magnitude(v: &Vec3) -> f64 {
    let scale = max_abs(v);
    if scale == 0.0 || !scale.is_finite() {
        return scale;
    }
    let (x, y, z) = (v.x / scale, v.y / scale, v.z / scale);
    scale * (x * x + y * y + z * z).sqrt()
}

/// Scale `v` to unit length.
///
/// Fails if any component is not finite or the length is within `tol` of
/// zero. The components are divided by the largest one and then multiplied
/// by the inverse length of the result, so every caller normalizing the
/// same vector gets bit-identical output.
pub fn normalize(v: &Vec3, tol: &Tolerance) -> Result<Vec3> {
    let len = magnitude(v);
    if !v.iter().all(|c| c.is_finite()) || tol.is_zero_length(len) {
        return Err(MathError::DegenerateVector { magnitude: len });
    }
    let scale = max_abs(v);
    let (x, y, z) = (v.x / scale, v.y / scale, v.z / scale);
    let inv_len = 1.0 / (x * x + y * y + z * z).sqrt();
    Ok(Vec3::new(x * inv_len, y * inv_len, z * inv_len))
}

/// Vector from `b` to `a` (`a - b`).
#[inline]
pub fn subtract(a: &Point3, b: &Point3) -> Vec3 {
    Vec3::new(a.x - b.x, a.y - b.y, a.z - b.z)
}

/// Cross product `a x b`.
#[inline]
pub fn cross(a: &Vec3, b: &Vec3) -> Vec3 {
    a.cross(b)
}

/// Dot product `a . b`.
#[inline]
pub fn dot(a: &Vec3, b: &Vec3) -> f64 {
    a.dot(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normalize_unit_length() {
        let samples = [
            Vec3::new(3.0, 4.0, 0.0),
            Vec3::new(-1.0, 2.0, -7.5),
            Vec3::new(1e-6, 0.0, 0.0),
            Vec3::new(1e8, -3e8, 2e8),
        ];
        for v in samples {
            let n = normalize(&v, &Tolerance::DEFAULT).unwrap();
            assert_relative_eq!(magnitude(&n), 1.0, epsilon = 1e-9);
            // Parallel to the input
            let c = cross(&n, &v);
            assert!(magnitude(&c) <= 1e-9 * magnitude(&v));
            assert!(dot(&n, &v) > 0.0);
        }
    }

    #[test]
    fn test_normalize_zero_vector() {
        let err = normalize(&Vec3::zeros(), &Tolerance::EXACT).unwrap_err();
        assert_eq!(err, MathError::DegenerateVector { magnitude: 0.0 });
    }

    #[test]
    fn test_normalize_below_tolerance() {
        let tol = Tolerance::new(1e-3);
        assert!(normalize(&Vec3::new(1e-4, 0.0, 0.0), &tol).is_err());
        assert!(normalize(&Vec3::new(1e-2, 0.0, 0.0), &tol).is_ok());
    }

    #[test]
    fn test_normalize_nan_is_degenerate() {
        let v = Vec3::new(f64::NAN, 1.0, 0.0);
        assert!(normalize(&v, &Tolerance::DEFAULT).is_err());
    }

    #[test]
    fn test_normalize_infinite_is_degenerate() {
        let v = Vec3::new(f64::INFINITY, 0.0, 0.0);
        assert!(normalize(&v, &Tolerance::DEFAULT).is_err());
    }

    #[test]
    fn test_subtract() {
        let a = Point3::new(4.0, 5.0, 6.0);
        let b = Point3::new(1.0, 1.0, 1.0);
        assert_eq!(subtract(&a, &b), Vec3::new(3.0, 4.0, 5.0));
    }

    #[test]
    fn test_cross_and_dot() {
        let x = Vec3::x();
        let y = Vec3::y();
        assert_eq!(cross(&x, &y), Vec3::z());
        assert_eq!(dot(&x, &y), 0.0);
        assert_eq!(dot(&x, &x), 1.0);
    }

    #[test]
    fn test_normalize_huge_components() {
        for v in [Vec3::new(1e200, 0.0, 0.0), Vec3::new(1e160, 1e160, 0.0)] {
            let n = normalize(&v, &Tolerance::EXACT).unwrap();
            assert_relative_eq!(magnitude(&n), 1.0, epsilon = 1e-12);
            assert!(n.x > 0.0);
        }
        assert_relative_eq!(magnitude(&Vec3::new(3e200, 4e200, 0.0)), 5e200, max_relative = 1e-12);
    }

    #[test]
    fn test_normalize_tiny_components() {
        let n = normalize(&Vec3::new(1e-200, 0.0, 0.0), &Tolerance::EXACT).unwrap();
        assert_eq!(n, Vec3::new(1.0, 0.0, 0.0));

        let n = normalize(&Vec3::new(3e-200, -4e-200, 0.0), &Tolerance::DEFAULT).unwrap();
        assert_relative_eq!(n.x, 0.6, epsilon = 1e-12);
        assert_relative_eq!(n.y, -0.8, epsilon = 1e-12);
        assert!(magnitude(&Vec3::new(1e-200, 0.0, 0.0)) > 0.0);
    }

    #[test]
    fn test_default_tolerance_is_exact() {
        assert_eq!(Tolerance::default(), Tolerance::EXACT);
        assert!(normalize(&Vec3::new(1e-13, 0.0, 0.0), &Tolerance::default()).is_ok());
        assert!(normalize(&Vec3::new(1e-13, 0.0, 0.0), &Tolerance::NEAR_ZERO).is_err());
    }
}
