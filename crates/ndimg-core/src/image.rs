//! Dense N-dimensional sample buffer.
//!
//! [`ArrayImg`] is the one concrete grid of the workspace: every projector
//! target, every resampling result and most test sources are array images.
//!
//! # Memory Layout
//!
//! Samples are stored in **flat order**, axis 0 fastest:
//!
//! ```text
//! 3 x 2 grid, interval [(0, 0) .. (2, 1)]
//!
//! Memory: [(0,0) (1,0) (2,0) (0,1) (1,1) (2,1)]
//!          └──── y = 0 ────┘ └──── y = 1 ────┘
//! ```
//!
//! The buffer is addressed through its [`Interval`], which may start
//! anywhere on the lattice. A resampled image whose bounding box begins at
//! `(-3, -1)` keeps that origin.
//!
//! # Usage
//!
//! ```rust
//! use ndimg_core::{ArrayImg, Position, RandomAccessible};
//!
//! let mut img = ArrayImg::new(&[4, 3], 0u8).unwrap();
//! img.set(&Position::new([1, 2]), 9);
//! assert_eq!(img.sample(&Position::new([1, 2])), 9);
//! assert_eq!(img.data()[2 * 4 + 1], 9);
//! ```
//!
//! # Dependencies
//!
//! - [`crate::interval::Interval`] - domain of the buffer
//! - [`crate::cursor`] - sequential cursors over the buffer
//! - [`crate::converter::Converter`] - element-wise conversion in [`ArrayImg::map_into`]
//!
//! # Used By
//!
//! - `ndimg-ops` - projector targets, resampling inputs and outputs

use crate::access::{Bounded, FlatStorage, IterableTarget, RandomAccessible};
use crate::converter::Converter;
use crate::cursor::{FlatCursor, LocalizingCursorMut, PositionIter, flat_strides};
use crate::error::{Error, Result};
use crate::interval::{Interval, IterationOrder};
use crate::position::{INLINE_DIMS, Position};
use smallvec::SmallVec;

/// Owned N-dimensional grid stored in flat order.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayImg<T> {
    interval: Interval,
    strides: SmallVec<[usize; INLINE_DIMS]>,
    data: Vec<T>,
}

/// Element count of `interval` as a buffer length.
fn buffer_len(interval: &Interval) -> Result<usize> {
    let size = (0..interval.num_dims())
        .try_fold(1u64, |acc, d| acc.checked_mul(interval.dimension(d)))
        .ok_or(Error::TooLarge { size: u64::MAX })?;
    usize::try_from(size).map_err(|_| Error::TooLarge { size })
}

impl<T> ArrayImg<T> {
    /// Creates a zero-based image filled with `fill`.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyDimensions`] for no axes or a zero-sized axis,
    /// [`Error::TooLarge`] if the element count overflows.
    pub fn new(dims: &[u64], fill: T) -> Result<Self>
    where
        T: Clone,
    {
        Self::with_interval(Interval::from_dims(dims)?, fill)
    }

    /// Creates an image over an arbitrary interval filled with `fill`.
    ///
    /// # Errors
    ///
    /// [`Error::TooLarge`] if the element count overflows or the buffer
    /// cannot be allocated.
    pub fn with_interval(interval: Interval, fill: T) -> Result<Self>
    where
        T: Clone,
    {
        let len = buffer_len(&interval)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| Error::TooLarge { size: len as u64 })?;
        data.resize(len, fill);
        Ok(Self {
            strides: flat_strides(&interval),
            interval,
            data,
        })
    }

    /// Wraps an existing flat buffer as a zero-based image.
    ///
    /// # Errors
    ///
    /// [`Error::DataLength`] if `data.len()` differs from the product of `dims`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ndimg_core::ArrayImg;
    ///
    /// let img = ArrayImg::from_vec(&[2, 2], vec![1.0f32, 2.0, 3.0, 4.0]).unwrap();
    /// assert_eq!(img.dimensions(), vec![2, 2]);
    /// assert!(ArrayImg::from_vec(&[2, 2], vec![1.0f32]).is_err());
    /// ```
    pub fn from_vec(dims: &[u64], data: Vec<T>) -> Result<Self> {
        Self::from_vec_in(Interval::from_dims(dims)?, data)
    }

    /// Wraps an existing flat buffer laid out over `interval`.
    pub fn from_vec_in(interval: Interval, data: Vec<T>) -> Result<Self> {
        let len = buffer_len(&interval)?;
        if data.len() != len {
            return Err(Error::DataLength {
                expected: len as u64,
                got: data.len(),
            });
        }
        Ok(Self {
            strides: flat_strides(&interval),
            interval,
            data,
        })
    }

    /// Creates an image over `interval` by evaluating `f` at every position.
    ///
    /// ```rust
    /// use ndimg_core::{ArrayImg, Interval};
    ///
    /// let ramp = ArrayImg::from_fn(Interval::from_dims(&[3, 2]).unwrap(), |p| p[0] + 10 * p[1]).unwrap();
    /// assert_eq!(ramp.data(), &[0, 1, 2, 10, 11, 12]);
    /// ```
    pub fn from_fn<F>(interval: Interval, f: F) -> Result<Self>
    where
        F: FnMut(Position) -> T,
    {
        buffer_len(&interval)?;
        let data = interval.positions().map(f).collect();
        Self::from_vec_in(interval, data)
    }

    /// Domain of the image.
    #[inline]
    pub fn interval(&self) -> &Interval {
        &self.interval
    }

    /// Number of axes.
    #[inline]
    pub fn num_dims(&self) -> usize {
        self.interval.num_dims()
    }

    /// Size along every axis.
    #[inline]
    pub fn dimensions(&self) -> Vec<u64> {
        self.interval.dimensions()
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false`: intervals have at least one sample.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flat sample buffer.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Mutable flat sample buffer.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consumes the image and returns its buffer.
    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Linear index of `p`, or `None` if it lies outside the image.
    #[inline]
    pub fn index_of(&self, p: &Position) -> Option<usize> {
        if !self.interval.contains(p) {
            return None;
        }
        Some(
            (0..self.num_dims())
                .map(|d| (p[d] - self.interval.min(d)) as usize * self.strides[d])
                .sum(),
        )
    }

    /// Sample at `p`, or `None` outside the image.
    #[inline]
    pub fn get(&self, p: &Position) -> Option<&T> {
        self.index_of(p).map(|i| &self.data[i])
    }

    /// Mutable sample at `p`, or `None` outside the image.
    #[inline]
    pub fn get_mut(&mut self, p: &Position) -> Option<&mut T> {
        self.index_of(p).map(move |i| &mut self.data[i])
    }

    /// Writes `value` at `p`.
    ///
    /// # Panics
    ///
    /// Panics if `p` lies outside the image.
    #[inline]
    pub fn set(&mut self, p: &Position, value: T) {
        let Some(i) = self.index_of(p) else {
            panic!("position {p} outside image {}", self.interval);
        };
        self.data[i] = value;
    }

    /// Sequential cursor over all samples in flat order.
    #[inline]
    pub fn cursor(&self) -> FlatCursor<'_, T> {
        FlatCursor::new(&self.data, &self.interval, self.interval.clone())
    }

    /// Every position of the image in flat order.
    #[inline]
    pub fn positions(&self) -> PositionIter {
        self.interval.positions()
    }

    /// Converts every sample into a new image of the same shape.
    ///
    /// ```rust
    /// use ndimg_core::{ArrayImg, RealConvert};
    ///
    /// let bytes = ArrayImg::from_vec(&[3], vec![0u8, 128, 255]).unwrap();
    /// let floats: ArrayImg<f32> = bytes.map_into(&RealConvert);
    /// assert_eq!(floats.data(), &[0.0, 128.0, 255.0]);
    /// ```
    pub fn map_into<B, C>(&self, converter: &C) -> ArrayImg<B>
    where
        B: Default,
        C: Converter<T, B> + ?Sized,
    {
        let data = self
            .data
            .iter()
            .map(|a| {
                let mut b = B::default();
                converter.convert(a, &mut b);
                b
            })
            .collect();
        ArrayImg {
            interval: self.interval.clone(),
            strides: self.strides.clone(),
            data,
        }
    }
}

impl<T: Clone> RandomAccessible for ArrayImg<T> {
    type Sample = T;

    #[inline]
    fn num_dims(&self) -> usize {
        self.interval.num_dims()
    }

    /// # Panics
    ///
    /// Panics outside the image; extend the image with an out-of-bounds
    /// strategy to sample the whole lattice.
    #[inline]
    fn sample(&self, position: &Position) -> T {
        match self.get(position) {
            Some(v) => v.clone(),
            None => panic!("position {position} outside image {}", self.interval),
        }
    }

    #[inline]
    fn storage(&self) -> Option<FlatStorage<'_, T>> {
        Some(FlatStorage {
            data: &self.data,
            interval: &self.interval,
        })
    }
}

impl<T> Bounded for ArrayImg<T> {
    #[inline]
    fn interval(&self) -> &Interval {
        &self.interval
    }
}

impl<T> IterableTarget for ArrayImg<T> {
    type Sample = T;
    type Cursor<'a>
        = std::slice::IterMut<'a, T>
    where
        Self: 'a;
    type LocalizingCursor<'a>
        = LocalizingCursorMut<'a, T>
    where
        Self: 'a;

    fn iteration_order(&self) -> IterationOrder {
        IterationOrder::flat(&self.interval)
    }

    fn cursor_mut(&mut self) -> Self::Cursor<'_> {
        self.data.iter_mut()
    }

    fn localizing_cursor_mut(&mut self) -> Self::LocalizingCursor<'_> {
        LocalizingCursorMut::new(&mut self.data, self.interval.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::Normalize;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_and_shape() {
        let img = ArrayImg::new(&[4, 3, 2], 1.5f32).unwrap();
        assert_eq!(img.len(), 24);
        assert_eq!(img.num_dims(), 3);
        assert!(img.data().iter().all(|&v| v == 1.5));
        assert!(ArrayImg::new(&[4, 0], 0u8).is_err());
    }

    #[test]
    fn test_too_large() {
        let err = ArrayImg::new(&[1 << 40, 1 << 40], 0u8).unwrap_err();
        assert!(matches!(err, Error::TooLarge { .. }));
    }

    #[test]
    fn test_from_vec_length() {
        assert_eq!(
            ArrayImg::from_vec(&[3, 2], vec![0u8; 5]).unwrap_err(),
            Error::DataLength { expected: 6, got: 5 }
        );
    }

    #[test]
    fn test_offset_interval_addressing() {
        let iv = Interval::from_min_size(Position::new([-2, 10]), &[3, 2]).unwrap();
        let img = ArrayImg::from_fn(iv, |p| (p[0], p[1])).unwrap();
        assert_eq!(img.index_of(&Position::new([-2, 10])), Some(0));
        assert_eq!(img.index_of(&Position::new([0, 11])), Some(5));
        assert_eq!(img.index_of(&Position::new([1, 11])), None);
        assert_eq!(img.sample(&Position::new([-1, 11])), (-1, 11));
    }

    #[test]
    fn test_get_set() {
        let mut img = ArrayImg::new(&[2, 2], 0i32).unwrap();
        img.set(&Position::new([1, 0]), 7);
        *img.get_mut(&Position::new([0, 1])).unwrap() = 3;
        assert_eq!(img.data(), &[0, 7, 3, 0]);
        assert_eq!(img.get(&Position::new([2, 0])), None);
    }

    #[test]
    #[should_panic]
    fn test_sample_outside_panics() {
        let img = ArrayImg::new(&[2, 2], 0u8).unwrap();
        img.sample(&Position::new([2, 2]));
    }

    #[test]
    fn test_storage_exposed() {
        let img = ArrayImg::new(&[2, 3], 0u16).unwrap();
        let storage = img.storage().unwrap();
        assert_eq!(storage.data.len(), 6);
        assert_eq!(storage.interval, img.interval());
    }

    #[test]
    fn test_cursor_matches_data() {
        let img = ArrayImg::from_vec(&[3, 2], vec![1, 2, 3, 4, 5, 6]).unwrap();
        let seen: Vec<i32> = img.cursor().copied().collect();
        assert_eq!(seen, img.data());
    }

    #[test]
    fn test_localizing_cursor_mut_writes_positions() {
        let iv = Interval::from_min_size(Position::new([5, 5]), &[2, 2]).unwrap();
        let mut img = ArrayImg::with_interval(iv, Position::origin(2)).unwrap();
        for (p, slot) in img.localizing_cursor_mut() {
            *slot = p;
        }
        assert_eq!(img.data()[3], Position::new([6, 6]));
        assert_eq!(img.iteration_order(), IterationOrder::flat(img.interval()));
    }

    #[test]
    fn test_map_into_normalizes() {
        let img = ArrayImg::from_vec(&[3], vec![0u16, 500, 1000]).unwrap();
        let out: ArrayImg<f32> = img.map_into(&Normalize::new(0.0, 1000.0));
        assert_relative_eq!(out.data()[1], 0.5);
        assert_eq!(out.interval(), img.interval());
    }
}
