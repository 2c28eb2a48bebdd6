//! Error types for ndimg-core operations.
//!
//! Everything below the resampling engine is total once its inputs are
//! validated, so the only failures here are construction-time checks on the
//! data model itself: malformed intervals, mismatched dimensionality and
//! buffers whose length disagrees with their shape.
//!
//! # Usage
//!
//! ```rust
//! use ndimg_core::{Error, Interval, Position};
//!
//! let err = Interval::new(Position::new([0, 5]), Position::new([3, 2])).unwrap_err();
//! assert!(matches!(err, Error::InvalidInterval { axis: 1, .. }));
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation
//!
//! # Used By
//!
//! - [`crate::interval::Interval`] - bounds validation
//! - [`crate::image::ArrayImg`] - buffer shape validation
//! - `ndimg-ops` - wrapped into `OpsError::Core`

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building positions, intervals and grids.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An interval has `min > max` along some axis.
    #[error("invalid interval: min {min} > max {max} along axis {axis}")]
    InvalidInterval {
        /// Offending axis
        axis: usize,
        /// Lower bound on that axis
        min: i64,
        /// Upper bound on that axis
        max: i64,
    },

    /// Two objects that must share a dimensionality do not.
    ///
    /// Returned when e.g. an interval's `min` and `max` have different
    /// lengths, or a position is used against a grid of another rank.
    #[error("dimension mismatch: expected {expected} axes, got {got}")]
    DimensionMismatch {
        /// Expected number of axes
        expected: usize,
        /// Actual number of axes
        got: usize,
    },

    /// A flat buffer does not hold exactly one sample per grid position.
    #[error("buffer holds {got} samples, shape requires {expected}")]
    DataLength {
        /// Number of samples required by the shape
        expected: u64,
        /// Number of samples supplied
        got: usize,
    },

    /// The element count of a shape does not fit in memory addressing.
    #[error("grid of {size} samples exceeds addressable memory")]
    TooLarge {
        /// Requested element count
        size: u64,
    },

    /// An axis index is not below the dimensionality it refers to.
    #[error("axis {axis} out of range for {num_dims} dimensions")]
    AxisOutOfRange {
        /// Requested axis
        axis: usize,
        /// Dimensionality of the domain
        num_dims: usize,
    },

    /// The same axis was requested twice where two distinct axes are needed.
    #[error("axis {0} requested twice")]
    DuplicateAxis(usize),

    /// A plane was requested from a domain that still varies along another axis.
    #[error("axis {axis} has size {size}, a plane needs every other axis fixed")]
    NotPlanar {
        /// Non-fixed axis
        axis: usize,
        /// Its size
        size: u64,
    },

    /// Zero axes, or an axis of size zero.
    #[error("empty dimensions: {0}")]
    EmptyDimensions(String),
}

impl Error {
    /// Creates an [`Error::DimensionMismatch`] error.
    #[inline]
    pub fn dimension_mismatch(expected: usize, got: usize) -> Self {
        Self::DimensionMismatch { expected, got }
    }

    /// Creates an [`Error::EmptyDimensions`] error.
    #[inline]
    pub fn empty_dimensions(reason: impl Into<String>) -> Self {
        Self::EmptyDimensions(reason.into())
    }

    /// Returns `true` if this error concerns axis selection.
    #[inline]
    pub fn is_axis_error(&self) -> bool {
        matches!(
            self,
            Self::AxisOutOfRange { .. } | Self::DuplicateAxis(_) | Self::NotPlanar { .. }
        )
    }

    /// Returns `true` if this is a shape or rank error.
    #[inline]
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            Self::DimensionMismatch { .. }
                | Self::DataLength { .. }
                | Self::TooLarge { .. }
                | Self::EmptyDimensions(_)
        )
    }
}
