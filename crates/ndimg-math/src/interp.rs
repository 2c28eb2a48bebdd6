//! Scalar helpers for sampling at real-valued coordinates.
//!
//! - [`fract`] - distance above the floor, the N-linear weight
//! - [`snap_to_integer`] - removes rounding noise near lattice points
//! - [`floor_snapped`], [`ceil_snapped`] - integer bounds of noisy coordinates
//!
//! # Usage
//!
//! ```rust
//! use ndimg_math::{ceil_snapped, floor_snapped, fract};
//!
//! assert_eq!(fract(-0.25), 0.75);
//!
//! // 4.0000000001 is 4 after a rotation, not 5
//! assert_eq!(ceil_snapped(4.000_000_000_1), 4);
//! assert_eq!(floor_snapped(-2.999_999_999_9), -3);
//! ```

/// Tolerance below which a coordinate counts as sitting on the lattice.
pub const SNAP_EPSILON: f64 = 1e-6;

/// Fractional part measured from the floor, always in `[0, 1)`.
///
/// Unlike [`f64::fract`], negative inputs give the distance above the next
/// lower integer: `fract(-0.25) == 0.75`.
#[inline]
pub fn fract(v: f64) -> f64 {
    v - v.floor()
}

/// Returns the nearest integer if `v` is within `eps` of it, else `v`.
///
/// # Example
///
/// ```rust
/// use ndimg_math::snap_to_integer;
///
/// assert_eq!(snap_to_integer(2.999_999_9, 1e-6), 3.0);
/// assert_eq!(snap_to_integer(2.9, 1e-6), 2.9);
/// ```
#[inline]
pub fn snap_to_integer(v: f64, eps: f64) -> f64 {
    let r = v.round();
    if (v - r).abs() < eps { r } else { v }
}

/// Floor after snapping with [`SNAP_EPSILON`].
#[inline]
pub fn floor_snapped(v: f64) -> i64 {
    snap_to_integer(v, SNAP_EPSILON).floor() as i64
}

/// Ceiling after snapping with [`SNAP_EPSILON`].
#[inline]
pub fn ceil_snapped(v: f64) -> i64 {
    snap_to_integer(v, SNAP_EPSILON).ceil() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fract() {
        assert_eq!(fract(3.0), 0.0);
        assert_relative_eq!(fract(3.7), 0.7, epsilon = 1e-12);
        assert_relative_eq!(fract(-1.2), 0.8, epsilon = 1e-12);
    }

    #[test]
    fn test_snap() {
        assert_eq!(snap_to_integer(-0.000_000_1, 1e-6), 0.0);
        assert_eq!(snap_to_integer(0.5, 1e-6), 0.5);
    }

    #[test]
    fn test_floor_ceil_snapped() {
        assert_eq!(floor_snapped(1.5), 1);
        assert_eq!(ceil_snapped(1.5), 2);
        assert_eq!(floor_snapped(0.999_999_99), 1);
        assert_eq!(ceil_snapped(-1.000_000_01), -1);
    }
}
