//! Integer and real-valued coordinates in N-dimensional space.
//!
//! - [`Position`] - exact integer lattice coordinate, one `i64` per axis
//! - [`RealPosition`] - continuous coordinate used by interpolators
//!
//! Both are plain value types backed by a [`SmallVec`] so the common 2D/3D/4D
//! cases never touch the heap.
//!
//! # Axis Convention
//!
//! Axis 0 is the fastest-varying axis of every flat buffer in this workspace
//! (x for images, then y, then z / time / channel ...).
//!
//! # Usage
//!
//! ```rust
//! use ndimg_core::Position;
//!
//! let mut p = Position::new([4, 5, 6]);
//! p.set(1, -2);
//! assert_eq!(p.as_slice(), &[4, -2, 6]);
//! assert_eq!(p.to_string(), "(4, -2, 6)");
//! ```

use smallvec::SmallVec;
use std::fmt;
use std::ops::{Index, IndexMut};

/// Inline capacity of coordinate vectors.
pub const INLINE_DIMS: usize = 4;

/// Integer coordinate in an N-dimensional lattice.
///
/// No upper bound on magnitude: arithmetic is exact `i64`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    coords: SmallVec<[i64; INLINE_DIMS]>,
}

impl Position {
    /// Creates a position from its coordinates.
    #[inline]
    pub fn new<I: IntoIterator<Item = i64>>(coords: I) -> Self {
        Self {
            coords: coords.into_iter().collect(),
        }
    }

    /// Creates the all-zero position with `num_dims` axes.
    #[inline]
    pub fn origin(num_dims: usize) -> Self {
        Self {
            coords: SmallVec::from_elem(0, num_dims),
        }
    }

    /// Creates a position by copying a coordinate slice.
    #[inline]
    pub fn from_slice(coords: &[i64]) -> Self {
        Self {
            coords: SmallVec::from_slice(coords),
        }
    }

    /// Number of axes.
    #[inline]
    pub fn num_dims(&self) -> usize {
        self.coords.len()
    }

    /// Coordinates as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[i64] {
        &self.coords
    }

    /// Sets the coordinate along axis `d`.
    ///
    /// # Panics
    ///
    /// Panics if `d >= self.num_dims()`.
    #[inline]
    pub fn set(&mut self, d: usize, value: i64) {
        self.coords[d] = value;
    }

    /// Copies all coordinates from `other`.
    ///
    /// # Panics
    ///
    /// Panics if the two positions differ in dimensionality.
    #[inline]
    pub fn set_from(&mut self, other: &Position) {
        self.coords.copy_from_slice(&other.coords);
    }

    /// Iterates coordinates in axis order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.coords.iter().copied()
    }

    /// Converts to a real-valued position.
    #[inline]
    pub fn to_real(&self) -> RealPosition {
        RealPosition::new(self.coords.iter().map(|&c| c as f64))
    }
}

impl Index<usize> for Position {
    type Output = i64;

    #[inline]
    fn index(&self, d: usize) -> &i64 {
        &self.coords[d]
    }
}

impl IndexMut<usize> for Position {
    #[inline]
    fn index_mut(&mut self, d: usize) -> &mut i64 {
        &mut self.coords[d]
    }
}

impl<const N: usize> From<[i64; N]> for Position {
    fn from(coords: [i64; N]) -> Self {
        Self::new(coords)
    }
}

impl From<Vec<i64>> for Position {
    fn from(coords: Vec<i64>) -> Self {
        Self {
            coords: SmallVec::from_vec(coords),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.coords.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, ")")
    }
}

/// Continuous coordinate in N-dimensional space.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RealPosition {
    coords: SmallVec<[f64; INLINE_DIMS]>,
}

impl RealPosition {
    /// Creates a real position from its coordinates.
    #[inline]
    pub fn new<I: IntoIterator<Item = f64>>(coords: I) -> Self {
        Self {
            coords: coords.into_iter().collect(),
        }
    }

    /// Creates the all-zero position with `num_dims` axes.
    #[inline]
    pub fn origin(num_dims: usize) -> Self {
        Self {
            coords: SmallVec::from_elem(0.0, num_dims),
        }
    }

    /// Number of axes.
    #[inline]
    pub fn num_dims(&self) -> usize {
        self.coords.len()
    }

    /// Coordinates as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.coords
    }

    /// Sets the coordinate along axis `d`.
    #[inline]
    pub fn set(&mut self, d: usize, value: f64) {
        self.coords[d] = value;
    }

    /// Iterates coordinates in axis order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.coords.iter().copied()
    }

    /// Nearest lattice point, ties rounded towards positive infinity.
    ///
    /// ```rust
    /// use ndimg_core::{Position, RealPosition};
    ///
    /// let q = RealPosition::from([0.5, -0.5, 1.49]);
    /// assert_eq!(q.round_half_up(), Position::new([1, 0, 1]));
    /// ```
    pub fn round_half_up(&self) -> Position {
        Position::new(self.coords.iter().map(|&c| (c + 0.5).floor() as i64))
    }

    /// Componentwise floor.
    pub fn floor(&self) -> Position {
        Position::new(self.coords.iter().map(|&c| c.floor() as i64))
    }
}

impl Index<usize> for RealPosition {
    type Output = f64;

    #[inline]
    fn index(&self, d: usize) -> &f64 {
        &self.coords[d]
    }
}

impl<const N: usize> From<[f64; N]> for RealPosition {
    fn from(coords: [f64; N]) -> Self {
        Self::new(coords)
    }
}

impl From<&Position> for RealPosition {
    fn from(p: &Position) -> Self {
        p.to_real()
    }
}

impl fmt::Display for RealPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.coords.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin() {
        let p = Position::origin(3);
        assert_eq!(p.num_dims(), 3);
        assert!(p.iter().all(|c| c == 0));
    }

    #[test]
    fn test_set_and_index() {
        let mut p = Position::from([1, 2]);
        p[0] = 10;
        p.set(1, i64::MIN);
        assert_eq!(p[0], 10);
        assert_eq!(p[1], i64::MIN);
    }

    #[test]
    fn test_set_from() {
        let mut a = Position::origin(2);
        a.set_from(&Position::new([3, 4]));
        assert_eq!(a, Position::new([3, 4]));
    }

    #[test]
    fn test_to_real() {
        let r = Position::new([-1, 2]).to_real();
        assert_eq!(r.as_slice(), &[-1.0, 2.0]);
    }

    #[test]
    fn test_real_rounding() {
        let q = RealPosition::from([-1.5, 2.5, -0.2]);
        assert_eq!(q.round_half_up(), Position::new([-1, 3, 0]));
        assert_eq!(q.floor(), Position::new([-2, 2, -1]));
    }

    #[test]
    fn test_display() {
        assert_eq!(RealPosition::from([0.5, 1.0]).to_string(), "(0.5, 1)");
        assert_eq!(Position::from(vec![7]).to_string(), "(7)");
    }
}
