//! Sequential traversal of intervals.
//!
//! A cursor is a one-shot value: it holds its current linear index and
//! current [`Position`] explicitly and is consumed as an [`Iterator`].
//! Restarting means building a new cursor, never rewinding a shared one.
//!
//! - [`PositionIter`] - bare positions of an interval, flat order
//! - [`FlatCursor`] - samples of a sub-interval of a flat buffer, storage order
//! - [`LocalizingCursorMut`] - `(Position, &mut T)` over a whole buffer
//! - [`RandomAccessCursor`] - coordinate-translating cursor over any source
//!
//! Every cursor visits each position of its interval exactly once and
//! reports an exact `size_hint`.

use crate::access::RandomAccessible;
use crate::interval::Interval;
use crate::position::{INLINE_DIMS, Position};
use smallvec::SmallVec;

/// Strides of a flat buffer laid out axis 0 fastest.
pub(crate) fn flat_strides(interval: &Interval) -> SmallVec<[usize; INLINE_DIMS]> {
    let mut strides = SmallVec::with_capacity(interval.num_dims());
    let mut acc = 1usize;
    for d in 0..interval.num_dims() {
        strides.push(acc);
        acc = acc.wrapping_mul(interval.dimension(d) as usize);
    }
    strides
}

/// Odometer over an interval that keeps a linear index in sync with the
/// position.
#[derive(Debug, Clone)]
struct Odometer {
    interval: Interval,
    position: Position,
    strides: SmallVec<[usize; INLINE_DIMS]>,
    index: usize,
    remaining: u64,
}

impl Odometer {
    fn new(interval: Interval, strides: SmallVec<[usize; INLINE_DIMS]>, start: usize) -> Self {
        Self {
            position: interval.min_position().clone(),
            remaining: interval.size(),
            interval,
            strides,
            index: start,
        }
    }

    /// Returns the current index and position, then steps forward.
    fn step(&mut self) -> Option<(usize, Position)> {
        if self.remaining == 0 {
            return None;
        }
        let position = self.position.clone();
        self.step_index().map(|index| (index, position))
    }

    /// Steps forward without materialising the position.
    fn step_index(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.index;
        self.remaining -= 1;
        if self.remaining > 0 {
            for d in 0..self.interval.num_dims() {
                if self.position[d] < self.interval.max(d) {
                    self.position[d] += 1;
                    self.index = self.index.wrapping_add(self.strides[d]);
                    break;
                }
                // wrap this axis, carry into the next one
                let span = (self.interval.dimension(d) - 1) as usize;
                self.position[d] = self.interval.min(d);
                self.index = self.index.wrapping_sub(span.wrapping_mul(self.strides[d]));
            }
        }
        Some(current)
    }

    fn remaining(&self) -> usize {
        self.remaining as usize
    }
}

/// Iterates every position of an interval in flat order (axis 0 fastest).
///
/// # Example
///
/// ```rust
/// use ndimg_core::{Interval, Position};
///
/// let iv = Interval::from_dims(&[2, 2]).unwrap();
/// let all: Vec<Position> = iv.positions().collect();
/// assert_eq!(all[1], Position::new([1, 0]));
/// assert_eq!(all[2], Position::new([0, 1]));
/// ```
#[derive(Debug, Clone)]
pub struct PositionIter {
    odometer: Odometer,
}

impl PositionIter {
    /// Creates an iterator over `interval`.
    pub fn new(interval: Interval) -> Self {
        let strides = SmallVec::from_elem(0, interval.num_dims());
        Self {
            odometer: Odometer::new(interval, strides, 0),
        }
    }
}

impl Iterator for PositionIter {
    type Item = Position;

    #[inline]
    fn next(&mut self) -> Option<Position> {
        self.odometer.step().map(|(_, p)| p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.odometer.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for PositionIter {}

/// Sequential cursor over a sub-interval of a flat, axis-0-fastest buffer.
///
/// Visits the region in storage order, stepping the linear index by the
/// buffer strides instead of recomputing it from coordinates.
#[derive(Debug, Clone)]
pub struct FlatCursor<'a, T> {
    data: &'a [T],
    odometer: Odometer,
}

impl<'a, T> FlatCursor<'a, T> {
    /// Creates a cursor over `region`, which must lie inside `storage`.
    ///
    /// # Panics
    ///
    /// Panics if `region` is not contained in `storage`.
    pub fn new(data: &'a [T], storage: &Interval, region: Interval) -> Self {
        assert!(
            storage.contains_interval(&region),
            "cursor region {region} outside storage {storage}"
        );
        let strides = flat_strides(storage);
        let start = (0..storage.num_dims())
            .map(|d| (region.min(d) - storage.min(d)) as usize * strides[d])
            .sum();
        Self {
            data,
            odometer: Odometer::new(region, strides, start),
        }
    }

    /// Linear index of the next sample to be returned.
    #[inline]
    pub fn index(&self) -> usize {
        self.odometer.index
    }

    /// Position of the next sample to be returned.
    #[inline]
    pub fn position(&self) -> &Position {
        &self.odometer.position
    }
}

impl<'a, T> Iterator for FlatCursor<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        self.odometer.step_index().map(|i| &self.data[i])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.odometer.remaining();
        (n, Some(n))
    }
}

impl<T> ExactSizeIterator for FlatCursor<'_, T> {}

/// Mutable cursor over a whole flat buffer that also reports positions.
pub struct LocalizingCursorMut<'a, T> {
    positions: PositionIter,
    samples: std::slice::IterMut<'a, T>,
}

impl<'a, T> LocalizingCursorMut<'a, T> {
    /// Creates a localizing cursor; `data` must be laid out flat over `interval`.
    pub fn new(data: &'a mut [T], interval: Interval) -> Self {
        debug_assert_eq!(data.len() as u64, interval.size());
        Self {
            positions: PositionIter::new(interval),
            samples: data.iter_mut(),
        }
    }
}

impl<'a, T> Iterator for LocalizingCursorMut<'a, T> {
    type Item = (Position, &'a mut T);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        Some((self.positions.next()?, self.samples.next()?))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.samples.size_hint()
    }
}

impl<T> ExactSizeIterator for LocalizingCursorMut<'_, T> {}

/// Cursor backed by random access: translates each position of an interval
/// into a [`RandomAccessible::sample`] call.
pub struct RandomAccessCursor<'a, S: ?Sized> {
    source: &'a S,
    positions: PositionIter,
}

impl<'a, S: RandomAccessible + ?Sized> RandomAccessCursor<'a, S> {
    /// Creates a cursor enumerating `interval` in flat order.
    pub fn new(source: &'a S, interval: Interval) -> Self {
        Self {
            source,
            positions: PositionIter::new(interval),
        }
    }
}

impl<S: RandomAccessible + ?Sized> Iterator for RandomAccessCursor<'_, S> {
    type Item = S::Sample;

    #[inline]
    fn next(&mut self) -> Option<S::Sample> {
        let p = self.positions.next()?;
        Some(self.source.sample(&p))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.positions.size_hint()
    }
}

impl<S: RandomAccessible + ?Sized> ExactSizeIterator for RandomAccessCursor<'_, S> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(min: &[i64], max: &[i64]) -> Interval {
        Interval::new(Position::from_slice(min), Position::from_slice(max)).unwrap()
    }

    #[test]
    fn test_position_iter_order_and_count() {
        let all: Vec<_> = PositionIter::new(iv(&[0, 0, 0], &[1, 2, 1])).collect();
        assert_eq!(all.len(), 12);
        assert_eq!(all[0], Position::new([0, 0, 0]));
        assert_eq!(all[1], Position::new([1, 0, 0]));
        assert_eq!(all[2], Position::new([0, 1, 0]));
        assert_eq!(all[6], Position::new([0, 0, 1]));
        assert_eq!(all[11], Position::new([1, 2, 1]));
    }

    #[test]
    fn test_index_and_position_stay_in_step_across_carries() {
        let storage = iv(&[-2, 5, 1], &[2, 8, 3]);
        let region = iv(&[-1, 6, 1], &[1, 8, 3]);
        let strides = flat_strides(&storage);
        let data: Vec<usize> = (0..storage.size() as usize).collect();
        let mut cursor = FlatCursor::new(&data, &storage, region.clone());
        for p in PositionIter::new(region) {
            assert_eq!(cursor.position(), &p);
            let expected: usize = (0..3)
                .map(|d| (p[d] - storage.min(d)) as usize * strides[d])
                .sum();
            assert_eq!(cursor.index(), expected);
            assert_eq!(cursor.next(), Some(&expected));
        }
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn test_position_iter_no_duplicates() {
        let all: Vec<_> = PositionIter::new(iv(&[-1, 3], &[2, 5])).collect();
        let unique: std::collections::HashSet<_> = all.iter().cloned().collect();
        assert_eq!(unique.len(), all.len());
        assert_eq!(all.len(), 12);
    }

    #[test]
    fn test_flat_cursor_sub_region() {
        // 4x3 buffer holding its own linear index
        let data: Vec<usize> = (0..12).collect();
        let storage = iv(&[0, 0], &[3, 2]);
        let cursor = FlatCursor::new(&data, &storage, iv(&[1, 1], &[2, 2]));
        assert_eq!(cursor.len(), 4);
        let got: Vec<usize> = cursor.copied().collect();
        assert_eq!(got, vec![5, 6, 9, 10]);
    }

    #[test]
    fn test_flat_cursor_offset_storage() {
        let data: Vec<usize> = (0..6).collect();
        let storage = iv(&[10, -1], &[12, 0]);
        let got: Vec<usize> = FlatCursor::new(&data, &storage, iv(&[11, -1], &[11, 0]))
            .copied()
            .collect();
        assert_eq!(got, vec![1, 4]);
    }

    #[test]
    fn test_flat_cursor_tracks_position() {
        let data = [0u8; 8];
        let storage = iv(&[0, 0, 0], &[1, 1, 1]);
        let mut cursor = FlatCursor::new(&data, &storage, storage.clone());
        cursor.next();
        cursor.next();
        assert_eq!(cursor.index(), 2);
        assert_eq!(cursor.position(), &Position::new([0, 1, 0]));
    }

    #[test]
    #[should_panic]
    fn test_flat_cursor_rejects_outside_region() {
        let data = [0u8; 4];
        let storage = iv(&[0, 0], &[1, 1]);
        let _ = FlatCursor::new(&data, &storage, iv(&[0, 0], &[2, 1]));
    }

    #[test]
    fn test_localizing_cursor_mut() {
        let mut data = vec![0i64; 6];
        for (p, v) in LocalizingCursorMut::new(&mut data, iv(&[0, 0], &[2, 1])) {
            *v = p[0] + 10 * p[1];
        }
        assert_eq!(data, vec![0, 1, 2, 10, 11, 12]);
    }
}
