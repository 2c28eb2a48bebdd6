//! Access traits shared by grids, views, extended sources and interpolators.
//!
//! The traits separate the capabilities an algorithm may ask for:
//!
//! | Trait                    | Capability                                   |
//! |--------------------------|----------------------------------------------|
//! | [`RandomAccessible`]     | sample at any integer position               |
//! | [`Bounded`]              | a finite [`Interval`] domain                 |
//! | [`RealRandomAccessible`] | sample at any real-valued position           |
//! | [`IterableTarget`]       | mutable sequential traversal of an interval  |
//!
//! A "random accessible interval" is anything that is both
//! [`RandomAccessible`] and [`Bounded`].
//!
//! Sampling a [`RandomAccessible`] outside the domain it is defined on is a
//! precondition violation. Out-of-bounds extension (`ndimg-ops`) makes a
//! bounded source total over the whole lattice.

use crate::interval::{Interval, IterationOrder};
use crate::position::{Position, RealPosition};

/// Borrowed flat buffer laid out axis 0 fastest over `interval`.
#[derive(Debug, Clone, Copy)]
pub struct FlatStorage<'a, T> {
    /// Samples, one per position of `interval`
    pub data: &'a [T],
    /// Domain the buffer covers
    pub interval: &'a Interval,
}

/// Source that can be sampled at integer positions.
pub trait RandomAccessible {
    /// Element type returned by [`sample`](Self::sample).
    type Sample: Clone;

    /// Dimensionality of the positions this source accepts.
    fn num_dims(&self) -> usize;

    /// Returns the sample at `position`.
    fn sample(&self, position: &Position) -> Self::Sample;

    /// Underlying flat buffer, if this source is backed by one.
    ///
    /// Views use it to hand out sequential cursors instead of per-position
    /// random access.
    fn storage(&self) -> Option<FlatStorage<'_, Self::Sample>> {
        None
    }
}

/// Source with a finite domain.
pub trait Bounded {
    /// Domain of the source.
    fn interval(&self) -> &Interval;
}

/// Source that can be sampled at real-valued positions.
pub trait RealRandomAccessible {
    /// Element type returned by [`sample_at`](Self::sample_at).
    type Sample;

    /// Dimensionality of the positions this source accepts.
    fn num_dims(&self) -> usize;

    /// Returns the sample at `position`.
    fn sample_at(&self, position: &RealPosition) -> Self::Sample;
}

/// Writable grid traversed sequentially.
///
/// `cursor_mut` yields samples in [`iteration_order`](Self::iteration_order);
/// `localizing_cursor_mut` yields the same samples paired with their
/// positions.
pub trait IterableTarget: Bounded {
    /// Element type stored in the target.
    type Sample;

    /// Sequential mutable cursor.
    type Cursor<'a>: Iterator<Item = &'a mut Self::Sample>
    where
        Self: 'a;

    /// Mutable cursor that also reports positions.
    type LocalizingCursor<'a>: Iterator<Item = (Position, &'a mut Self::Sample)>
    where
        Self: 'a;

    /// Order in which the cursors enumerate positions.
    fn iteration_order(&self) -> IterationOrder;

    /// Creates a sequential mutable cursor.
    fn cursor_mut(&mut self) -> Self::Cursor<'_>;

    /// Creates a localizing mutable cursor.
    fn localizing_cursor_mut(&mut self) -> Self::LocalizingCursor<'_>;
}

impl<S: RandomAccessible + ?Sized> RandomAccessible for &S {
    type Sample = S::Sample;

    #[inline]
    fn num_dims(&self) -> usize {
        (**self).num_dims()
    }

    #[inline]
    fn sample(&self, position: &Position) -> S::Sample {
        (**self).sample(position)
    }

    #[inline]
    fn storage(&self) -> Option<FlatStorage<'_, S::Sample>> {
        (**self).storage()
    }
}

impl<S: Bounded + ?Sized> Bounded for &S {
    #[inline]
    fn interval(&self) -> &Interval {
        (**self).interval()
    }
}

impl<S: RealRandomAccessible + ?Sized> RealRandomAccessible for &S {
    type Sample = S::Sample;

    #[inline]
    fn num_dims(&self) -> usize {
        (**self).num_dims()
    }

    #[inline]
    fn sample_at(&self, position: &RealPosition) -> S::Sample {
        (**self).sample_at(position)
    }
}
