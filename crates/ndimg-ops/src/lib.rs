//! # ndimg-ops
//!
//! Operations on N-dimensional sample grids.
//!
//! # Modules
//!
//! - [`out_of_bounds`] - extending bounded sources over the whole lattice
//! - [`interpolation`] - sampling at real positions
//! - [`projector`] - 2D planes out of N-dimensional sources
//! - [`affine`] - affine resampling of 2D and 3D grids
//! - [`repaint`] - coalescing background repaint loop
//!
//! # Example
//!
//! ```rust
//! use ndimg_core::{ArrayImg, Position};
//! use ndimg_ops::{affine, AnyImg, Boundary, Mode, OutOfBoundsConfig, ResampleConfig};
//!
//! let img = ArrayImg::from_vec(&[2, 2], vec![10u8, 20, 30, 40]).unwrap();
//! let config = ResampleConfig::new(vec![2.0, 0.0, 0.0, 0.0, 2.0, 0.0])
//!     .with_mode(Mode::NearestNeighbor)
//!     .with_out_of_bounds(OutOfBoundsConfig::Mirror(Boundary::Single));
//!
//! let AnyImg::U8(scaled) = affine(&img.into(), &config).unwrap() else { unreachable!() };
//! assert_eq!(scaled.dimensions(), vec![3, 3]);
//! assert_eq!(scaled.get(&Position::new([2, 2])), Some(&40));
//! ```
//!
//! # Common Operations
//!
//! ## Slice a volume
//!
//! ```rust,ignore
//! use ndimg_ops::Projector2D;
//!
//! let mut projector = Projector2D::new(0, 1, &volume, &mut plane, Identity)?;
//! projector.set_position(2, depth);
//! projector.map()?;
//! ```
//!
//! ## Extend and interpolate
//!
//! ```rust,ignore
//! use ndimg_ops::{Mode, OutOfBoundsFactory};
//!
//! let total = OutOfBoundsFactory::Border.extend(&img);
//! let continuous = Mode::Linear.interpolate(total);
//! let v = continuous.sample_at(&RealPosition::from([0.5, 1.25]));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` - Serialize/Deserialize for [`ResampleConfig`] and the enums it holds

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod affine;
pub mod interpolation;
pub mod out_of_bounds;
pub mod projector;
pub mod repaint;

pub use error::{OpsError, OpsResult};
pub use affine::{
    affine, affine_argb, affine_real, output_interval, parse_model, AnyImg, OutOfBoundsConfig,
    ResampleConfig,
};
pub use interpolation::{Interpolator, Mode, NLinear, NearestNeighbor};
pub use out_of_bounds::{Boundary, Extended, OutOfBoundsFactory};
pub use projector::{ProjectionPath, Projector2D};
pub use repaint::{RepaintWorker, SharedPosition};
