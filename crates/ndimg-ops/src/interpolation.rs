//! Interpolators: integer-lattice sources sampled at real positions.
//!
//! - [`NearestNeighbor`] - rounds every coordinate half up
//! - [`NLinear`] - weighted blend of the `2^D` surrounding lattice points
//! - [`Interpolator`] - either of the two, chosen at runtime by [`Mode`]
//!
//! Interpolators never check bounds themselves. Wrap a bounded source with
//! an out-of-bounds strategy first so every corner lookup is defined:
//!
//! ```rust
//! use ndimg_core::{ArrayImg, RealPosition, RealRandomAccessible};
//! use ndimg_ops::{Mode, OutOfBoundsFactory};
//!
//! let img = ArrayImg::from_vec(&[2], vec![0.0f32, 10.0]).unwrap();
//! let ext = OutOfBoundsFactory::Border.extend(&img);
//! let interp = Mode::Linear.interpolate(ext);
//! assert_eq!(interp.sample_at(&RealPosition::from([0.25])), 2.5);
//! assert_eq!(interp.sample_at(&RealPosition::from([7.0])), 10.0);
//! ```

use ndimg_core::{NumericSample, Position, RandomAccessible, RealPosition, RealRandomAccessible};
use ndimg_math::fract;
use smallvec::SmallVec;

/// Interpolation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// N-linear blend of the surrounding lattice points
    #[default]
    Linear,
    /// Nearest lattice point, ties rounded up
    NearestNeighbor,
}

impl Mode {
    /// Highest-quality mode available.
    pub const BEST: Mode = Mode::Linear;

    /// Builds the interpolator for this mode over `source`.
    pub fn interpolate<S>(self, source: S) -> Interpolator<S>
    where
        S: RandomAccessible,
        S::Sample: NumericSample,
    {
        match self {
            Mode::Linear => Interpolator::Linear(NLinear::new(source)),
            Mode::NearestNeighbor => Interpolator::NearestNeighbor(NearestNeighbor::new(source)),
        }
    }
}

/// Nearest-neighbor interpolation.
///
/// Works for any element type, numeric or not.
pub struct NearestNeighbor<S> {
    source: S,
}

impl<S: RandomAccessible> NearestNeighbor<S> {
    /// Wraps `source`.
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

impl<S: RandomAccessible> RealRandomAccessible for NearestNeighbor<S> {
    type Sample = S::Sample;

    #[inline]
    fn num_dims(&self) -> usize {
        self.source.num_dims()
    }

    #[inline]
    fn sample_at(&self, position: &RealPosition) -> S::Sample {
        self.source.sample(&position.round_half_up())
    }
}

/// N-linear interpolation.
///
/// With `f = floor(q)` and `t = q - f`, every corner `c` with
/// `c[d] in {f[d], f[d] + 1}` is weighted by the product of `t[d]` (upper
/// corner) or `1 - t[d]` (lower corner). Zero-weight corners are not
/// sampled, so lattice points read back exactly.
pub struct NLinear<S> {
    source: S,
}

impl<S> NLinear<S>
where
    S: RandomAccessible,
    S::Sample: NumericSample,
{
    /// Wraps `source`.
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

impl<S> RealRandomAccessible for NLinear<S>
where
    S: RandomAccessible,
    S::Sample: NumericSample,
{
    type Sample = S::Sample;

    #[inline]
    fn num_dims(&self) -> usize {
        self.source.num_dims()
    }

    fn sample_at(&self, position: &RealPosition) -> S::Sample {
        let n = position.num_dims();
        let base = position.floor();
        let t: SmallVec<[f64; 4]> = position.iter().map(fract).collect();

        let mut corner = Position::origin(n);
        let mut acc = S::Sample::zero();
        for mask in 0..1usize << n {
            let mut weight = 1.0;
            for d in 0..n {
                if mask & (1 << d) != 0 {
                    corner[d] = base[d] + 1;
                    weight *= t[d];
                } else {
                    corner[d] = base[d];
                    weight *= 1.0 - t[d];
                }
            }
            if weight != 0.0 {
                acc = acc.add(&self.source.sample(&corner).scale(weight));
            }
        }
        acc
    }
}

/// Runtime-selected interpolator.
pub enum Interpolator<S> {
    /// Nearest-neighbor
    NearestNeighbor(NearestNeighbor<S>),
    /// N-linear
    Linear(NLinear<S>),
}

impl<S> RealRandomAccessible for Interpolator<S>
where
    S: RandomAccessible,
    S::Sample: NumericSample,
{
    type Sample = S::Sample;

    #[inline]
    fn num_dims(&self) -> usize {
        match self {
            Self::NearestNeighbor(i) => i.num_dims(),
            Self::Linear(i) => i.num_dims(),
        }
    }

    #[inline]
    fn sample_at(&self, position: &RealPosition) -> S::Sample {
        match self {
            Self::NearestNeighbor(i) => i.sample_at(position),
            Self::Linear(i) => i.sample_at(position),
        }
    }
}
