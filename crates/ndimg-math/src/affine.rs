//! Affine models in two and three dimensions.
//!
//! [`AffineModel`] wraps glam's double-precision affines. Coefficients are
//! addressed in **row-major** order with the translation as last column:
//!
//! ```text
//! | m00 m01 m02 tx |   | x |
//! | m10 m11 m12 ty | * | y |
//! | m20 m21 m22 tz |   | z |
//!                      | 1 |
//! ```
//!
//! glam stores the linear part column-major; [`AffineModel::coefficient`]
//! hides the difference.
//!
//! # Usage
//!
//! ```rust
//! use ndimg_core::{Interval, Position, RealPosition};
//! use ndimg_math::{AffineModel, bounding_interval};
//!
//! let shift = AffineModel::new_2d(1.0, 0.0, 0.0, 1.0, 0.5, -2.0);
//! assert_eq!(shift.apply(&RealPosition::from([1.0, 1.0])), RealPosition::from([1.5, -1.0]));
//!
//! let iv = Interval::from_dims(&[4, 4]).unwrap();
//! let bbox = bounding_interval(&shift, &iv).unwrap();
//! assert_eq!(bbox.min_position(), &Position::new([0, -2]));
//! assert_eq!(bbox.max_position(), &Position::new([4, 1]));
//! ```
//!
//! # Dependencies
//!
//! - [`glam`] - `DAffine2` / `DAffine3` storage, inversion, point transforms
//!
//! # Used By
//!
//! - `ndimg-ops` - the resampling engine

use crate::interp::{SNAP_EPSILON, ceil_snapped, floor_snapped};
use glam::{DAffine2, DAffine3, DMat2, DMat3, DVec2, DVec3};
use ndimg_core::{Interval, Position, RealPosition, Result};

/// Smallest determinant magnitude accepted by [`AffineModel::inverse`].
pub const MIN_DETERMINANT: f64 = 1e-12;

/// Linear part plus translation, in 2D or 3D.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AffineModel {
    /// Planar model
    D2(DAffine2),
    /// Volumetric model
    D3(DAffine3),
}

impl AffineModel {
    /// Creates a 2D model from its row-major coefficients.
    ///
    /// Maps `(x, y)` to `(m00*x + m01*y + tx, m10*x + m11*y + ty)`.
    pub fn new_2d(m00: f64, m01: f64, m10: f64, m11: f64, tx: f64, ty: f64) -> Self {
        Self::D2(DAffine2::from_mat2_translation(
            DMat2::from_cols(DVec2::new(m00, m10), DVec2::new(m01, m11)),
            DVec2::new(tx, ty),
        ))
    }

    /// Creates a 3D model from the three rows of its `3x4` matrix.
    pub fn new_3d(rows: [[f64; 4]; 3]) -> Self {
        let [r0, r1, r2] = rows;
        Self::D3(DAffine3::from_mat3_translation(
            DMat3::from_cols(
                DVec3::new(r0[0], r1[0], r2[0]),
                DVec3::new(r0[1], r1[1], r2[1]),
                DVec3::new(r0[2], r1[2], r2[2]),
            ),
            DVec3::new(r0[3], r1[3], r2[3]),
        ))
    }

    /// Identity model of dimensionality 2 or 3.
    pub fn identity(num_dims: usize) -> Option<Self> {
        match num_dims {
            2 => Some(Self::D2(DAffine2::IDENTITY)),
            3 => Some(Self::D3(DAffine3::IDENTITY)),
            _ => None,
        }
    }

    /// Dimensionality of the model.
    #[inline]
    pub fn num_dims(&self) -> usize {
        match self {
            Self::D2(_) => 2,
            Self::D3(_) => 3,
        }
    }

    /// Coefficient at `(row, col)`; `col == num_dims()` is the translation.
    ///
    /// # Panics
    ///
    /// Panics if `row >= num_dims()` or `col > num_dims()`.
    pub fn coefficient(&self, row: usize, col: usize) -> f64 {
        match self {
            Self::D2(a) if col == 2 => a.translation[row],
            Self::D2(a) => a.matrix2.col(col)[row],
            Self::D3(a) if col == 3 => a.translation[row],
            Self::D3(a) => a.matrix3.col(col)[row],
        }
    }

    /// Determinant of the linear part.
    #[inline]
    pub fn determinant(&self) -> f64 {
        match self {
            Self::D2(a) => a.matrix2.determinant(),
            Self::D3(a) => a.matrix3.determinant(),
        }
    }

    /// Returns `true` if every coefficient is finite.
    pub fn is_finite(&self) -> bool {
        match self {
            Self::D2(a) => a.is_finite(),
            Self::D3(a) => a.is_finite(),
        }
    }

    /// Inverse model, or `None` if the linear part is singular.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() < MIN_DETERMINANT {
            return None;
        }
        let inv = match self {
            Self::D2(a) => Self::D2(a.inverse()),
            Self::D3(a) => Self::D3(a.inverse()),
        };
        inv.is_finite().then_some(inv)
    }

    /// Maps a point.
    ///
    /// # Panics
    ///
    /// Panics if `p` has fewer axes than the model.
    #[inline]
    pub fn apply(&self, p: &RealPosition) -> RealPosition {
        match self {
            Self::D2(a) => {
                let q = a.transform_point2(DVec2::new(p[0], p[1]));
                RealPosition::from([q.x, q.y])
            }
            Self::D3(a) => {
                let q = a.transform_point3(DVec3::new(p[0], p[1], p[2]));
                RealPosition::from([q.x, q.y, q.z])
            }
        }
    }

    /// Returns `true` if `axis` passes through unchanged in scale: unit
    /// diagonal (within `1e-6`) and no coupling from any other axis.
    ///
    /// ```rust
    /// use ndimg_math::AffineModel;
    ///
    /// let per_plane = AffineModel::new_3d([
    ///     [0.0, -1.0, 0.0, 10.0],
    ///     [1.0, 0.0, 0.0, 0.0],
    ///     [0.0, 0.0, 1.0, 3.0],
    /// ]);
    /// assert!(per_plane.is_pass_through_axis(2));
    /// assert!(!per_plane.is_pass_through_axis(0));
    /// ```
    pub fn is_pass_through_axis(&self, axis: usize) -> bool {
        let n = self.num_dims();
        axis < n
            && (self.coefficient(axis, axis) - 1.0).abs() < SNAP_EPSILON
            && (0..n).all(|col| col == axis || self.coefficient(axis, col) == 0.0)
    }
}

/// Smallest integer interval enclosing the image of `interval` under `model`.
///
/// All `2^D` corners are mapped; the componentwise minimum is floored and
/// the maximum ceiled, after snapping coordinates within `1e-6` of an
/// integer so exact quarter turns do not grow the box.
///
/// # Errors
///
/// Propagates interval validation errors, which only occur for a
/// non-finite model or a dimensionality mismatch.
pub fn bounding_interval(model: &AffineModel, interval: &Interval) -> Result<Interval> {
    let n = model.num_dims();
    if interval.num_dims() != n {
        return Err(ndimg_core::Error::dimension_mismatch(n, interval.num_dims()));
    }
    let mut lo = [f64::INFINITY; 3];
    let mut hi = [f64::NEG_INFINITY; 3];
    for corner in interval.corners() {
        let q = model.apply(&corner.to_real());
        for d in 0..n {
            lo[d] = lo[d].min(q[d]);
            hi[d] = hi[d].max(q[d]);
        }
    }
    Interval::new(
        Position::new(lo[..n].iter().map(|&v| floor_snapped(v))),
        Position::new(hi[..n].iter().map(|&v| ceil_snapped(v))),
    )
}

/// Lays out a 2D model in the 12-element row-major `3x4` convention.
///
/// ```rust
/// use ndimg_math::matrix_2d;
///
/// let m = matrix_2d(2.0, 0.0, 0.0, 2.0, 1.0, -1.0);
/// assert_eq!(m[0], 2.0);
/// assert_eq!(m[3], 1.0);
/// assert_eq!(m[7], -1.0);
/// assert_eq!(m[10], 1.0);
/// ```
pub fn matrix_2d(m00: f64, m01: f64, m10: f64, m11: f64, tx: f64, ty: f64) -> [f64; 12] {
    [
        m00, m01, 0.0, tx, //
        m10, m11, 0.0, ty, //
        0.0, 0.0, 1.0, 0.0,
    ]
}
