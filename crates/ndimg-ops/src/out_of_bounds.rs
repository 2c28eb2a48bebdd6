//! Out-of-bounds extension of bounded sources.
//!
//! An [`OutOfBoundsFactory`] turns a bounded source into an [`Extended`]
//! source that can be sampled at **any** lattice position. Inside the
//! source's interval the extended source returns exactly what the source
//! returns; outside, the strategy decides.
//!
//! # Strategies
//!
//! ```text
//! source:            [a b c d]
//!
//! ConstantValue(v)   v v v [a b c d] v v v
//! Border             a a a [a b c d] d d d
//! Periodic           b c d [a b c d] a b c
//! Mirror(Single)     d c b [a b c d] c b a
//! Mirror(Double)     c b a [a b c d] d c b
//! ```
//!
//! Every strategy is applied per axis independently, so corners of a 2D
//! image fold along both axes.
//!
//! # Usage
//!
//! ```rust
//! use ndimg_core::{ArrayImg, Position, RandomAccessible};
//! use ndimg_ops::{Boundary, OutOfBoundsFactory};
//!
//! let img = ArrayImg::from_vec(&[4], vec![1.0f32, 2.0, 3.0, 4.0]).unwrap();
//! let mirrored = OutOfBoundsFactory::Mirror(Boundary::Single).extend(&img);
//! assert_eq!(mirrored.sample(&Position::new([-1])), 2.0);
//! assert_eq!(mirrored.sample(&Position::new([5])), 2.0);
//!
//! let padded = OutOfBoundsFactory::zero().extend(&img);
//! assert_eq!(padded.sample(&Position::new([1000])), 0.0);
//! ```

use ndimg_core::{Bounded, FlatStorage, Interval, Position, RandomAccessible};

/// Reflection policy at the domain edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Boundary {
    /// Reflect without repeating the edge sample: `-1` reads `1`
    #[default]
    Single,
    /// Reflect repeating the edge sample: `-1` reads `0`
    Double,
}

/// Recipe for extending a bounded source over the whole lattice.
#[derive(Debug, Clone, PartialEq)]
pub enum OutOfBoundsFactory<T> {
    /// A fixed value everywhere outside, however far
    ConstantValue(T),
    /// Nearest edge sample
    Border,
    /// Tiles the source
    Periodic,
    /// Folds coordinates back by reflection
    Mirror(Boundary),
}

impl<T: Default> OutOfBoundsFactory<T> {
    /// Constant extension with the element type's zero value.
    pub fn zero() -> Self {
        Self::ConstantValue(T::default())
    }
}

impl<T> OutOfBoundsFactory<T> {
    /// Same strategy with the constant value converted by `f`.
    ///
    /// Lets a composite strategy be split into per-channel ones.
    pub fn map_value<U>(&self, f: impl FnOnce(&T) -> U) -> OutOfBoundsFactory<U> {
        match self {
            Self::ConstantValue(v) => OutOfBoundsFactory::ConstantValue(f(v)),
            Self::Border => OutOfBoundsFactory::Border,
            Self::Periodic => OutOfBoundsFactory::Periodic,
            Self::Mirror(b) => OutOfBoundsFactory::Mirror(*b),
        }
    }

    /// Extends `source` over the whole lattice.
    pub fn extend<S>(&self, source: S) -> Extended<S>
    where
        S: RandomAccessible<Sample = T> + Bounded,
        T: Clone,
    {
        Extended {
            interval: source.interval().clone(),
            source,
            strategy: self.clone(),
        }
    }
}

/// A bounded source made total by an out-of-bounds strategy.
pub struct Extended<S: RandomAccessible> {
    source: S,
    interval: Interval,
    strategy: OutOfBoundsFactory<S::Sample>,
}

impl<S: RandomAccessible> Extended<S> {
    /// Interval on which the extension is the identity.
    #[inline]
    pub fn source_interval(&self) -> &Interval {
        &self.interval
    }

    /// Wrapped source.
    #[inline]
    pub fn source(&self) -> &S {
        &self.source
    }
}

/// Folds `c` into `[min, max]` along one axis.
fn fold(kind: Fold, c: i64, min: i64, max: i64) -> i64 {
    let n = max as i128 - min as i128 + 1;
    let off = c as i128 - min as i128;
    let r = match kind {
        Fold::Clamp => off.clamp(0, n - 1),
        Fold::Wrap => off.rem_euclid(n),
        Fold::Reflect(Boundary::Single) => {
            if n == 1 {
                0
            } else {
                let period = 2 * n - 2;
                let r = off.rem_euclid(period);
                if r >= n { period - r } else { r }
            }
        }
        Fold::Reflect(Boundary::Double) => {
            let period = 2 * n;
            let r = off.rem_euclid(period);
            if r >= n { period - 1 - r } else { r }
        }
    };
    (min as i128 + r) as i64
}

#[derive(Clone, Copy)]
enum Fold {
    Clamp,
    Wrap,
    Reflect(Boundary),
}

impl<S: RandomAccessible> RandomAccessible for Extended<S> {
    type Sample = S::Sample;

    #[inline]
    fn num_dims(&self) -> usize {
        self.source.num_dims()
    }

    fn sample(&self, position: &Position) -> S::Sample {
        if self.interval.contains(position) {
            return self.source.sample(position);
        }
        let kind = match &self.strategy {
            OutOfBoundsFactory::ConstantValue(v) => return v.clone(),
            OutOfBoundsFactory::Border => Fold::Clamp,
            OutOfBoundsFactory::Periodic => Fold::Wrap,
            OutOfBoundsFactory::Mirror(b) => Fold::Reflect(*b),
        };
        let mut p = position.clone();
        for d in 0..p.num_dims() {
            let (min, max) = (self.interval.min(d), self.interval.max(d));
            if p[d] < min || p[d] > max {
                p[d] = fold(kind, p[d], min, max);
            }
        }
        self.source.sample(&p)
    }

    #[inline]
    fn storage(&self) -> Option<FlatStorage<'_, S::Sample>> {
        self.source.storage()
    }
}
