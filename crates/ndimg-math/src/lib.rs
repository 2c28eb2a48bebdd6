//! # ndimg-math
//!
//! Geometry for resampling N-dimensional grids.
//!
//! - [`AffineModel`] - 2D/3D affine models over glam's `DAffine2` / `DAffine3`
//! - [`bounding_interval`] - integer box enclosing a transformed interval
//! - [`matrix_2d`] - 2D coefficients in the 12-element `3x4` convention
//! - Rounding helpers ([`fract`], [`snap_to_integer`], [`floor_snapped`], [`ceil_snapped`])
//!
//! # Design
//!
//! All geometry is double precision. Coefficients are addressed row-major
//! with column vectors, regardless of glam's column-major storage:
//!
//! ```text
//! result = model * point
//! ```
//!
//! # Dependencies
//!
//! - [`glam`] - affine storage and inversion
//! - `ndimg-core` - positions and intervals
//!
//! # Used By
//!
//! - `ndimg-ops` - the affine resampling engine

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod affine;
mod interp;

pub use affine::*;
pub use interp::*;

/// Re-export glam types for direct use
pub mod glam {
    pub use ::glam::{DAffine2, DAffine3, DVec2, DVec3};
}
