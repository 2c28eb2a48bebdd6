//! # ndimg-core
//!
//! Core types for N-dimensional sample grids.
//!
//! This crate provides the data model every other ndimg crate builds on:
//!
//! - [`Position`], [`RealPosition`] - integer and real coordinates
//! - [`Interval`], [`IterationOrder`] - inclusive bounding boxes and traversal tokens
//! - [`RandomAccessible`], [`Bounded`], [`RealRandomAccessible`], [`IterableTarget`] - access traits
//! - [`PositionIter`], [`FlatCursor`], [`RandomAccessCursor`] - one-shot cursors
//! - [`IntervalView`], [`PlaneView`] - restricted and squeezed views
//! - [`ArrayImg`] - dense flat-order grid
//! - [`Converter`] and the provided converters
//! - [`RealSample`], [`NumericSample`], [`Argb`] - element types
//!
//! ## Design Philosophy
//!
//! Algorithms are written against the access traits, never against a concrete
//! grid. Whether a traversal walks a flat buffer or translates coordinates is
//! decided by the view, and an algorithm may ask which one it got:
//!
//! ```rust
//! use ndimg_core::prelude::*;
//!
//! let img = ArrayImg::new(&[8, 8, 3], 0.0f32).unwrap();
//! let slab = img.interval().with_axis(2, 1, 1).unwrap();
//! let view = IntervalView::new(&img, slab).unwrap();
//! assert!(view.cursor().is_sequential());
//! assert_eq!(view.cursor().len(), 64);
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//! ndimg-core (this crate)
//!    ^
//!    |
//!    +-- ndimg-math (affine model, bounding boxes)
//!    +-- ndimg-ops (out-of-bounds, interpolation, projector, resampling)
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` - Serialize/Deserialize for positions, intervals and sample enums

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod access;
pub mod converter;
pub mod cursor;
pub mod error;
pub mod image;
pub mod interval;
pub mod position;
pub mod sample;
pub mod view;

// Re-exports for convenience
pub use access::*;
pub use converter::*;
pub use cursor::{FlatCursor, LocalizingCursorMut, PositionIter, RandomAccessCursor};
pub use error::*;
pub use image::*;
pub use interval::*;
pub use position::*;
pub use sample::*;
pub use view::*;

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use ndimg_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::access::{Bounded, IterableTarget, RandomAccessible, RealRandomAccessible};
    pub use crate::converter::{
        ChannelExtract, Converter, GrayToArgb, Identity, Normalize, RealConvert,
    };
    pub use crate::error::{Error, Result};
    pub use crate::image::ArrayImg;
    pub use crate::interval::{Interval, IterationOrder};
    pub use crate::position::{Position, RealPosition};
    pub use crate::sample::{Argb, Channel, NumericSample, RealSample, Sample, SampleKind};
    pub use crate::view::{IntervalView, PlaneView, ViewCursor};
}
