//! Axis-aligned integer bounding boxes and iteration-order tokens.
//!
//! This module provides the geometric primitives every grid, view and
//! resampling result is described with:
//! - [`Interval`] - inclusive `[min, max]` box over N axes
//! - [`IterationOrder`] - opaque token describing how a domain is enumerated
//!
//! # Coordinate Convention
//!
//! Bounds are **inclusive** on both ends, so the size along axis `d` is
//! `max[d] - min[d] + 1`. Unlike image rectangles that start at zero, an
//! interval may sit anywhere on the lattice, negative coordinates included:
//!
//! ```text
//!  min ────────────────┐
//!   │  (-2,-1) .. (3,1) │   dims = [6, 3]
//!   └──────────────── max
//! ```
//!
//! # Usage
//!
//! ```rust
//! use ndimg_core::{Interval, Position};
//!
//! let iv = Interval::new(Position::new([-2, -1]), Position::new([3, 1])).unwrap();
//! assert_eq!(iv.dimensions(), vec![6, 3]);
//! assert_eq!(iv.size(), 18);
//! assert!(iv.contains(&Position::new([0, 0])));
//! assert_eq!(iv.corners().count(), 4);
//! ```
//!
//! # Used By
//!
//! - [`crate::image::ArrayImg`] - the domain of a buffer
//! - [`crate::view`] - restricted and squeezed views
//! - `ndimg-math` - bounding boxes of transformed grids

use crate::cursor::PositionIter;
use crate::error::{Error, Result};
use crate::position::{INLINE_DIMS, Position};
use smallvec::SmallVec;
use std::fmt;

/// Inclusive axis-aligned integer bounding box.
///
/// # Invariants
///
/// - `min` and `max` have the same, non-zero, dimensionality
/// - `min[d] <= max[d]` for every axis
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval {
    min: Position,
    max: Position,
}

impl Interval {
    /// Creates an interval from its inclusive corners.
    ///
    /// # Errors
    ///
    /// - [`Error::DimensionMismatch`] if `min` and `max` differ in length
    /// - [`Error::EmptyDimensions`] if they have zero axes
    /// - [`Error::InvalidInterval`] if `min[d] > max[d]` on some axis
    /// - [`Error::TooLarge`] if an axis spans all of `i64`, so its size does
    ///   not fit in a `u64`
    pub fn new(min: Position, max: Position) -> Result<Self> {
        if min.num_dims() != max.num_dims() {
            return Err(Error::dimension_mismatch(min.num_dims(), max.num_dims()));
        }
        if min.num_dims() == 0 {
            return Err(Error::empty_dimensions("interval needs at least one axis"));
        }
        for axis in 0..min.num_dims() {
            if min[axis] > max[axis] {
                return Err(Error::InvalidInterval {
                    axis,
                    min: min[axis],
                    max: max[axis],
                });
            }
            if min[axis] == i64::MIN && max[axis] == i64::MAX {
                return Err(Error::TooLarge { size: u64::MAX });
            }
        }
        Ok(Self { min, max })
    }

    /// Creates a zero-based interval with the given sizes.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ndimg_core::Interval;
    ///
    /// let iv = Interval::from_dims(&[4, 3, 2]).unwrap();
    /// assert_eq!(iv.max(0), 3);
    /// assert_eq!(iv.size(), 24);
    /// ```
    pub fn from_dims(dims: &[u64]) -> Result<Self> {
        Self::from_min_size(Position::origin(dims.len()), dims)
    }

    /// Creates an interval starting at `min` with the given sizes.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyDimensions`] if any size is zero or there are no axes,
    /// [`Error::TooLarge`] if an axis would leave the `i64` range.
    pub fn from_min_size(min: Position, dims: &[u64]) -> Result<Self> {
        if min.num_dims() != dims.len() {
            return Err(Error::dimension_mismatch(min.num_dims(), dims.len()));
        }
        if dims.is_empty() {
            return Err(Error::empty_dimensions("interval needs at least one axis"));
        }
        if let Some(axis) = dims.iter().position(|&d| d == 0) {
            return Err(Error::empty_dimensions(format!("axis {axis} has size 0")));
        }
        let mut max = min.clone();
        for (axis, &d) in dims.iter().enumerate() {
            max[axis] = i64::try_from(d - 1)
                .ok()
                .and_then(|span| min[axis].checked_add(span))
                .ok_or(Error::TooLarge { size: d })?;
        }
        Ok(Self { min, max })
    }

    /// Number of axes.
    #[inline]
    pub fn num_dims(&self) -> usize {
        self.min.num_dims()
    }

    /// Lower bound along axis `d`.
    #[inline]
    pub fn min(&self, d: usize) -> i64 {
        self.min[d]
    }

    /// Upper bound (inclusive) along axis `d`.
    #[inline]
    pub fn max(&self, d: usize) -> i64 {
        self.max[d]
    }

    /// Lower corner.
    #[inline]
    pub fn min_position(&self) -> &Position {
        &self.min
    }

    /// Upper corner (inclusive).
    #[inline]
    pub fn max_position(&self) -> &Position {
        &self.max
    }

    /// Size along axis `d`: `max - min + 1`.
    ///
    /// Never overflows: construction rejects axes spanning all of `i64`.
    #[inline]
    pub fn dimension(&self, d: usize) -> u64 {
        self.max[d].abs_diff(self.min[d]) + 1
    }

    /// Sizes along every axis.
    pub fn dimensions(&self) -> Vec<u64> {
        (0..self.num_dims()).map(|d| self.dimension(d)).collect()
    }

    /// Number of lattice positions inside the interval, saturating at
    /// `u64::MAX`.
    pub fn size(&self) -> u64 {
        (0..self.num_dims()).fold(1u64, |acc, d| acc.saturating_mul(self.dimension(d)))
    }

    /// Returns `true` if `p` lies inside the interval.
    ///
    /// Positions of a different dimensionality are never contained.
    #[inline]
    pub fn contains(&self, p: &Position) -> bool {
        p.num_dims() == self.num_dims()
            && (0..self.num_dims()).all(|d| p[d] >= self.min[d] && p[d] <= self.max[d])
    }

    /// Returns `true` if `other` lies entirely inside this interval.
    #[inline]
    pub fn contains_interval(&self, other: &Interval) -> bool {
        self.contains(&other.min) && self.contains(&other.max)
    }

    /// Returns a copy with axis `d` replaced by `[min, max]`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInterval`] if `min > max`.
    pub fn with_axis(&self, d: usize, min: i64, max: i64) -> Result<Interval> {
        let mut lo = self.min.clone();
        let mut hi = self.max.clone();
        lo.set(d, min);
        hi.set(d, max);
        Interval::new(lo, hi)
    }

    /// Iterates all `2^D` corner positions.
    ///
    /// Corner `k` takes `max` on every axis whose bit is set in `k`.
    pub fn corners(&self) -> impl Iterator<Item = Position> + '_ {
        let n = self.num_dims();
        (0..1usize << n).map(move |mask| {
            Position::new((0..n).map(|d| {
                if mask & (1 << d) != 0 { self.max[d] } else { self.min[d] }
            }))
        })
    }

    /// Iterates every position in flat order (axis 0 fastest).
    #[inline]
    pub fn positions(&self) -> PositionIter {
        PositionIter::new(self.clone())
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} .. {}]", self.min, self.max)
    }
}

/// One traversed axis of an [`IterationOrder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderedAxis {
    /// Axis label in the coordinate system of the domain being described
    pub axis: usize,
    /// Lower bound
    pub min: i64,
    /// Upper bound (inclusive)
    pub max: i64,
}

/// Equality-comparable description of how a domain enumerates its positions.
///
/// The token lists every axis of size > 1, fastest-varying first, labelled
/// with the axis index of the domain it describes. Size-1 axes never change
/// during traversal, so they are dropped; two domains whose tokens compare
/// equal visit the same positions in the same order.
///
/// # Example
///
/// ```rust
/// use ndimg_core::{Interval, IterationOrder, Position};
///
/// let plane = Interval::from_dims(&[4, 4]).unwrap();
/// let slab = Interval::from_dims(&[4, 4, 1]).unwrap();
/// assert_eq!(IterationOrder::flat(&plane), IterationOrder::flat(&slab));
///
/// // Same extents, but axis 1 varies fastest: a different order.
/// let transposed = IterationOrder::from_traversal([(1, 0, 3), (0, 0, 3)]);
/// assert_ne!(IterationOrder::flat(&plane), transposed);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IterationOrder {
    axes: SmallVec<[OrderedAxis; INLINE_DIMS]>,
}

impl IterationOrder {
    /// Flat order of `interval`: axis 0 fastest, axes labelled `0..D`.
    pub fn flat(interval: &Interval) -> Self {
        Self::from_traversal((0..interval.num_dims()).map(|d| (d, interval.min(d), interval.max(d))))
    }

    /// Builds a token from `(axis, min, max)` triples listed fastest first.
    ///
    /// Size-1 axes are dropped.
    pub fn from_traversal<I: IntoIterator<Item = (usize, i64, i64)>>(axes: I) -> Self {
        Self {
            axes: axes
                .into_iter()
                .filter(|&(_, min, max)| min != max)
                .map(|(axis, min, max)| OrderedAxis { axis, min, max })
                .collect(),
        }
    }

    /// Traversed axes, fastest first.
    #[inline]
    pub fn axes(&self) -> &[OrderedAxis] {
        &self.axes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates() {
        assert!(Interval::new(Position::new([0, 0]), Position::new([1, 1])).is_ok());
        assert_eq!(
            Interval::new(Position::new([0]), Position::new([1, 1])),
            Err(Error::dimension_mismatch(1, 2))
        );
        assert!(matches!(
            Interval::new(Position::origin(0), Position::origin(0)),
            Err(Error::EmptyDimensions(_))
        ));
        assert!(matches!(
            Interval::new(Position::new([0, 4]), Position::new([1, 3])),
            Err(Error::InvalidInterval { axis: 1, min: 4, max: 3 })
        ));
    }

    #[test]
    fn test_from_dims_rejects_zero() {
        assert!(Interval::from_dims(&[3, 0]).is_err());
        assert!(Interval::from_dims(&[]).is_err());
    }

    #[test]
    fn test_from_min_size_overflow() {
        let err = Interval::from_min_size(Position::new([i64::MAX - 1]), &[4]).unwrap_err();
        assert_eq!(err, Error::TooLarge { size: 4 });
    }

    #[test]
    fn test_full_i64_span_rejected() {
        let err = Interval::new(Position::new([0, i64::MIN]), Position::new([2, i64::MAX]));
        assert_eq!(err, Err(Error::TooLarge { size: u64::MAX }));

        let widest = Interval::new(Position::new([i64::MIN + 1]), Position::new([i64::MAX])).unwrap();
        assert_eq!(widest.dimension(0), u64::MAX);
        let huge = Interval::new(Position::new([0, 0]), Position::new([i64::MAX, i64::MAX])).unwrap();
        assert_eq!(huge.size(), u64::MAX);
    }

    #[test]
    fn test_dimension_and_size() {
        let iv = Interval::from_min_size(Position::new([-3, 10]), &[7, 2]).unwrap();
        assert_eq!(iv.min(0), -3);
        assert_eq!(iv.max(0), 3);
        assert_eq!(iv.max(1), 11);
        assert_eq!(iv.dimension(0), 7);
        assert_eq!(iv.size(), 14);
    }

    #[test]
    fn test_contains() {
        let iv = Interval::from_dims(&[2, 2]).unwrap();
        assert!(iv.contains(&Position::new([1, 1])));
        assert!(!iv.contains(&Position::new([2, 0])));
        assert!(!iv.contains(&Position::new([-1, 0])));
        assert!(!iv.contains(&Position::new([0, 0, 0])));
        assert!(iv.contains_interval(&Interval::from_dims(&[1, 2]).unwrap()));
    }

    #[test]
    fn test_with_axis() {
        let iv = Interval::from_dims(&[4, 4, 4]).unwrap();
        let slab = iv.with_axis(1, 5, 5).unwrap();
        assert_eq!(slab.dimensions(), vec![4, 1, 4]);
        assert!(iv.with_axis(0, 3, 2).is_err());
    }

    #[test]
    fn test_corners() {
        let iv = Interval::new(Position::new([0, 10, -1]), Position::new([1, 20, 1])).unwrap();
        let corners: Vec<_> = iv.corners().collect();
        assert_eq!(corners.len(), 8);
        assert_eq!(corners[0], Position::new([0, 10, -1]));
        assert_eq!(corners[1], Position::new([1, 10, -1]));
        assert_eq!(corners[7], Position::new([1, 20, 1]));
    }

    #[test]
    fn test_iteration_order_drops_singletons() {
        let a = IterationOrder::from_traversal([(0, 0, 3), (1, 5, 5), (2, 0, 3)]);
        let b = IterationOrder::from_traversal([(0, 0, 3), (2, 0, 3)]);
        assert_eq!(a, b);
        assert_eq!(a.axes().len(), 2);
    }

    #[test]
    fn test_iteration_order_bounds_matter() {
        let a = IterationOrder::flat(&Interval::from_dims(&[4, 4]).unwrap());
        let b = IterationOrder::flat(
            &Interval::from_min_size(Position::new([1, 0]), &[4, 4]).unwrap(),
        );
        assert_ne!(a, b);
    }
}
