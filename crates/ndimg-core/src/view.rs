//! Restricted views over random-access sources.
//!
//! - [`IntervalView`] - a source restricted to an [`Interval`]
//! - [`PlaneView`] - a restricted view with every fixed axis squeezed out,
//!   leaving a 2D plane
//! - [`ViewCursor`] - the cursor an [`IntervalView`] hands out
//!
//! Views borrow their source and never copy samples.
//!
//! # Cursor Selection
//!
//! A view over a source that exposes flat storage covering the view hands
//! out a sequential [`FlatCursor`]. Any other source gets a
//! [`RandomAccessCursor`], which calls [`RandomAccessible::sample`] once per
//! position. Both visit the view in flat order.
//!
//! # Usage
//!
//! ```rust
//! use ndimg_core::{ArrayImg, Interval, IntervalView, Position};
//!
//! let img = ArrayImg::from_fn(Interval::from_dims(&[4, 4]).unwrap(), |p| p[0] + 4 * p[1]).unwrap();
//! let centre = Interval::new(Position::new([1, 1]), Position::new([2, 2])).unwrap();
//! let view = IntervalView::new(&img, centre).unwrap();
//! let cursor = view.cursor();
//! assert!(cursor.is_sequential());
//! assert_eq!(cursor.collect::<Vec<_>>(), vec![5, 6, 9, 10]);
//! ```

use crate::access::{Bounded, FlatStorage, RandomAccessible};
use crate::cursor::{FlatCursor, RandomAccessCursor};
use crate::error::{Error, Result};
use crate::interval::{Interval, IterationOrder};
use crate::position::Position;

/// A source restricted to an interval.
pub struct IntervalView<'a, S: ?Sized> {
    source: &'a S,
    interval: Interval,
}

impl<'a, S: RandomAccessible + ?Sized> IntervalView<'a, S> {
    /// Restricts `source` to `interval`.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] if the interval and source disagree in
    /// dimensionality.
    pub fn new(source: &'a S, interval: Interval) -> Result<Self> {
        if interval.num_dims() != source.num_dims() {
            return Err(Error::dimension_mismatch(source.num_dims(), interval.num_dims()));
        }
        Ok(Self { source, interval })
    }

    /// Underlying source.
    #[inline]
    pub fn source(&self) -> &'a S {
        self.source
    }

    /// Order in which [`cursor`](Self::cursor) visits the view.
    pub fn iteration_order(&self) -> IterationOrder {
        IterationOrder::flat(&self.interval)
    }

    /// Flat storage of the source if it covers the whole view.
    fn covering_storage(&self) -> Option<FlatStorage<'a, S::Sample>> {
        self.source
            .storage()
            .filter(|st| st.interval.contains_interval(&self.interval))
    }

    /// Creates a cursor over the view.
    pub fn cursor(&self) -> ViewCursor<'a, S> {
        match self.covering_storage() {
            Some(st) => {
                ViewCursor::Sequential(FlatCursor::new(st.data, st.interval, self.interval.clone()))
            }
            None => ViewCursor::RandomAccess(RandomAccessCursor::new(
                self.source,
                self.interval.clone(),
            )),
        }
    }

    /// Squeezes the view down to the plane spanned by `dim_x` and `dim_y`.
    ///
    /// Every other axis must be fixed (size 1).
    ///
    /// # Errors
    ///
    /// - [`Error::DuplicateAxis`] if `dim_x == dim_y`
    /// - [`Error::AxisOutOfRange`] if either axis is not below the dimensionality
    /// - [`Error::NotPlanar`] if another axis has size > 1
    pub fn plane(&self, dim_x: usize, dim_y: usize) -> Result<PlaneView<'a, S>> {
        let n = self.interval.num_dims();
        if dim_x == dim_y {
            return Err(Error::DuplicateAxis(dim_x));
        }
        for axis in [dim_x, dim_y] {
            if axis >= n {
                return Err(Error::AxisOutOfRange { axis, num_dims: n });
            }
        }
        if let Some(axis) =
            (0..n).find(|&d| d != dim_x && d != dim_y && self.interval.dimension(d) != 1)
        {
            return Err(Error::NotPlanar {
                axis,
                size: self.interval.dimension(axis),
            });
        }

        let iv = &self.interval;
        let interval = Interval::new(
            Position::new([iv.min(dim_x), iv.min(dim_y)]),
            Position::new([iv.max(dim_x), iv.max(dim_y)]),
        )?;
        // Storage is enumerated by ascending source axis; labels say which
        // plane axis each one becomes.
        let order = match self.covering_storage() {
            Some(_) => IterationOrder::from_traversal((0..n).filter_map(|d| {
                let label = if d == dim_x {
                    0
                } else if d == dim_y {
                    1
                } else {
                    return None;
                };
                Some((label, iv.min(d), iv.max(d)))
            })),
            None => IterationOrder::flat(&interval),
        };

        Ok(PlaneView {
            source: self.source,
            dim_x,
            dim_y,
            anchor: iv.min_position().clone(),
            interval,
            order,
        })
    }
}

impl<S: RandomAccessible + ?Sized> RandomAccessible for IntervalView<'_, S> {
    type Sample = S::Sample;

    #[inline]
    fn num_dims(&self) -> usize {
        self.interval.num_dims()
    }

    #[inline]
    fn sample(&self, position: &Position) -> S::Sample {
        self.source.sample(position)
    }

    fn storage(&self) -> Option<FlatStorage<'_, S::Sample>> {
        self.covering_storage()
    }
}

impl<S: ?Sized> Bounded for IntervalView<'_, S> {
    #[inline]
    fn interval(&self) -> &Interval {
        &self.interval
    }
}

/// Cursor over an [`IntervalView`].
pub enum ViewCursor<'a, S: RandomAccessible + ?Sized> {
    /// Walks the source's flat buffer directly
    Sequential(FlatCursor<'a, S::Sample>),
    /// Samples the source position by position
    RandomAccess(RandomAccessCursor<'a, S>),
}

impl<S: RandomAccessible + ?Sized> ViewCursor<'_, S> {
    /// Returns `true` for a true sequential cursor.
    #[inline]
    pub fn is_sequential(&self) -> bool {
        matches!(self, Self::Sequential(_))
    }
}

impl<S: RandomAccessible + ?Sized> Iterator for ViewCursor<'_, S> {
    type Item = S::Sample;

    #[inline]
    fn next(&mut self) -> Option<S::Sample> {
        match self {
            Self::Sequential(c) => c.next().cloned(),
            Self::RandomAccess(c) => c.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::Sequential(c) => c.size_hint(),
            Self::RandomAccess(c) => c.size_hint(),
        }
    }
}

impl<S: RandomAccessible + ?Sized> ExactSizeIterator for ViewCursor<'_, S> {}

/// 2D view of an N-dimensional source with every other axis fixed.
///
/// Plane axis 0 is source axis `dim_x`, plane axis 1 is source axis `dim_y`.
/// Its [`iteration_order`](Self::iteration_order) describes how the backing
/// storage enumerates the plane, so a plane with `dim_x > dim_y` (stored
/// column by column) does not compare equal to a row-major 2D target.
#[derive(Debug)]
pub struct PlaneView<'a, S: ?Sized> {
    source: &'a S,
    dim_x: usize,
    dim_y: usize,
    anchor: Position,
    interval: Interval,
    order: IterationOrder,
}

impl<S: RandomAccessible + ?Sized> PlaneView<'_, S> {
    /// Source axes spanning the plane, `(dim_x, dim_y)`.
    #[inline]
    pub fn axes(&self) -> (usize, usize) {
        (self.dim_x, self.dim_y)
    }

    /// Order in which the backing storage enumerates the plane.
    #[inline]
    pub fn iteration_order(&self) -> IterationOrder {
        self.order.clone()
    }

    /// Source position of a plane position.
    pub fn source_position(&self, plane: &Position) -> Position {
        let mut p = self.anchor.clone();
        p[self.dim_x] = plane[0];
        p[self.dim_y] = plane[1];
        p
    }
}

impl<S: RandomAccessible + ?Sized> RandomAccessible for PlaneView<'_, S> {
    type Sample = S::Sample;

    #[inline]
    fn num_dims(&self) -> usize {
        2
    }

    #[inline]
    fn sample(&self, position: &Position) -> S::Sample {
        self.source.sample(&self.source_position(position))
    }
}

impl<S: ?Sized> Bounded for PlaneView<'_, S> {
    #[inline]
    fn interval(&self) -> &Interval {
        &self.interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ArrayImg;

    /// Source computed from coordinates, without storage.
    struct Coords(usize);

    impl RandomAccessible for Coords {
        type Sample = Vec<i64>;

        fn num_dims(&self) -> usize {
            self.0
        }

        fn sample(&self, p: &Position) -> Vec<i64> {
            p.as_slice().to_vec()
        }
    }

    fn cube() -> ArrayImg<i64> {
        ArrayImg::from_fn(Interval::from_dims(&[4, 4, 4]).unwrap(), |p| {
            p[0] + 10 * p[1] + 100 * p[2]
        })
        .unwrap()
    }

    fn slab(axis: usize, at: i64) -> Interval {
        Interval::from_dims(&[4, 4, 4]).unwrap().with_axis(axis, at, at).unwrap()
    }

    #[test]
    fn test_new_checks_dims() {
        let img = cube();
        assert!(IntervalView::new(&img, Interval::from_dims(&[2, 2]).unwrap()).is_err());
    }

    #[test]
    fn test_random_access_cursor_for_computed_source() {
        let src = Coords(2);
        let view = IntervalView::new(&src, Interval::from_dims(&[2, 2]).unwrap()).unwrap();
        let cursor = view.cursor();
        assert!(!cursor.is_sequential());
        assert_eq!(cursor.len(), 4);
        let all: Vec<_> = cursor.collect();
        assert_eq!(all[1], vec![1, 0]);
    }

    #[test]
    fn test_view_outside_storage_falls_back() {
        let img = cube();
        let iv = Interval::new(Position::new([2, 0, 0]), Position::new([4, 0, 0])).unwrap();
        let view = IntervalView::new(&img, iv).unwrap();
        assert!(!view.cursor().is_sequential());
        assert!(view.storage().is_none());
    }

    #[test]
    fn test_sequential_cursor_values() {
        let img = cube();
        let view = IntervalView::new(&img, slab(1, 3)).unwrap();
        let values: Vec<i64> = view.cursor().collect();
        assert_eq!(values.len(), 16);
        assert_eq!(&values[..5], &[30, 31, 32, 33, 130]);
    }

    #[test]
    fn test_plane_samples_source_axes() {
        let img = cube();
        let view = IntervalView::new(&img, slab(1, 2)).unwrap();
        let plane = view.plane(0, 2).unwrap();
        assert_eq!(plane.interval().dimensions(), vec![4, 4]);
        assert_eq!(plane.sample(&Position::new([3, 1])), 3 + 20 + 100);
        assert_eq!(plane.source_position(&Position::new([3, 1])), Position::new([3, 2, 1]));
    }

    #[test]
    fn test_plane_order_matches_flat_target() {
        let img = cube();
        let view = IntervalView::new(&img, slab(1, 2)).unwrap();
        let target = Interval::from_dims(&[4, 4]).unwrap();
        assert_eq!(view.plane(0, 2).unwrap().iteration_order(), IterationOrder::flat(&target));
    }

    #[test]
    fn test_transposed_plane_order_differs() {
        let img = cube();
        let view = IntervalView::new(&img, slab(1, 2)).unwrap();
        let target = Interval::from_dims(&[4, 4]).unwrap();
        assert_ne!(view.plane(2, 0).unwrap().iteration_order(), IterationOrder::flat(&target));
    }

    #[test]
    fn test_plane_errors() {
        let img = cube();
        let view = IntervalView::new(&img, slab(1, 2)).unwrap();
        assert_eq!(view.plane(1, 1).unwrap_err(), Error::DuplicateAxis(1));
        assert!(matches!(view.plane(0, 3), Err(Error::AxisOutOfRange { axis: 3, .. })));
        assert!(matches!(view.plane(0, 1), Err(Error::NotPlanar { axis: 2, size: 4 })));
    }
}
