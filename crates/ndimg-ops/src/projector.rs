//! 2D projection of an N-dimensional source onto a plane target.
//!
//! [`Projector2D`] fills a 2D target from the plane of an N-dimensional
//! source spanned by two chosen axes, with every other axis held at a
//! reference position. Scrubbing a time or depth axis means changing the
//! reference and calling [`map`](Projector2D::map) again.
//!
//! # Paths
//!
//! ```text
//!   target order == plane order  ──yes──▶  source cursor sequential ──yes──▶  Sequential
//!            │                                      │
//!            no                                     no
//!            ▼                                      ▼
//!       RandomAccess  ◀──────────────────────────────┘
//! ```
//!
//! The sequential path walks the target and the source's flat buffer in
//! lockstep. The random-access path walks the target's localizing cursor and
//! samples the source at each position. Both write identical results.
//!
//! # Usage
//!
//! ```rust
//! use ndimg_core::{ArrayImg, Identity, Interval, Position};
//! use ndimg_ops::{ProjectionPath, Projector2D};
//!
//! let volume = ArrayImg::from_fn(Interval::from_dims(&[4, 4, 8]).unwrap(), |p| p[2] as f32).unwrap();
//! let mut plane = ArrayImg::new(&[4, 4], 0.0f32).unwrap();
//!
//! let mut projector = Projector2D::new(0, 1, &volume, &mut plane, Identity).unwrap();
//! projector.set_position(2, 5);
//! assert_eq!(projector.map().unwrap(), ProjectionPath::Sequential);
//! assert!(plane.data().iter().all(|&v| v == 5.0));
//! ```

use crate::error::{OpsError, OpsResult};
use ndimg_core::{Converter, Interval, IntervalView, IterableTarget, Position, RandomAccessible};
use tracing::trace;

/// Traversal strategy taken by a projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionPath {
    /// Target and source cursors walked in lockstep
    Sequential,
    /// Source sampled per target position
    RandomAccess,
}

/// Projects the `(dim_x, dim_y)` plane of a source into a 2D target.
pub struct Projector2D<'a, S: ?Sized, T, C> {
    dim_x: usize,
    dim_y: usize,
    position: Position,
    source: &'a S,
    target: &'a mut T,
    converter: C,
}

impl<'a, S, T, C> Projector2D<'a, S, T, C>
where
    S: RandomAccessible + ?Sized,
    T: IterableTarget,
    C: Converter<S::Sample, T::Sample>,
{
    /// Creates a projector with the reference position at the origin.
    ///
    /// # Errors
    ///
    /// [`OpsError::Configuration`] if `dim_x == dim_y`, either axis is not
    /// below the source dimensionality, or the target is not 2D.
    pub fn new(
        dim_x: usize,
        dim_y: usize,
        source: &'a S,
        target: &'a mut T,
        converter: C,
    ) -> OpsResult<Self> {
        let n = source.num_dims();
        if dim_x == dim_y {
            return Err(OpsError::configuration(format!(
                "projection axes must differ, got {dim_x} twice"
            )));
        }
        if dim_x >= n || dim_y >= n {
            return Err(OpsError::configuration(format!(
                "projection axes ({dim_x}, {dim_y}) out of range for {n}D source"
            )));
        }
        let target_dims = target.interval().num_dims();
        if target_dims != 2 {
            return Err(OpsError::configuration(format!(
                "projection target must be 2D, got {target_dims}D"
            )));
        }
        Ok(Self {
            dim_x,
            dim_y,
            position: Position::origin(n),
            source,
            target,
            converter,
        })
    }

    /// Reference position; only the non-projected axes are used.
    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Sets the reference coordinate along axis `d`.
    ///
    /// # Panics
    ///
    /// Panics if `d` is not below the source dimensionality.
    #[inline]
    pub fn set_position(&mut self, d: usize, value: i64) {
        self.position.set(d, value);
    }

    /// Replaces the whole reference position.
    ///
    /// # Errors
    ///
    /// [`OpsError::Core`] on a dimensionality mismatch.
    pub fn set_reference(&mut self, reference: &Position) -> OpsResult<()> {
        if reference.num_dims() != self.position.num_dims() {
            return Err(ndimg_core::Error::dimension_mismatch(
                self.position.num_dims(),
                reference.num_dims(),
            )
            .into());
        }
        self.position.set_from(reference);
        Ok(())
    }

    /// Projected source axes, `(dim_x, dim_y)`.
    #[inline]
    pub fn axes(&self) -> (usize, usize) {
        (self.dim_x, self.dim_y)
    }

    /// Target grid.
    #[inline]
    pub fn target(&self) -> &T {
        self.target
    }

    /// Source interval of the current projection: fixed axes collapsed to
    /// the reference, projected axes spanning the target.
    fn fixed_interval(&self) -> OpsResult<Interval> {
        let target = self.target.interval();
        let mut min = self.position.clone();
        let mut max = self.position.clone();
        min[self.dim_x] = target.min(0);
        max[self.dim_x] = target.max(0);
        min[self.dim_y] = target.min(1);
        max[self.dim_y] = target.max(1);
        Ok(Interval::new(min, max)?)
    }

    /// Fills the target, choosing the sequential path when the target and
    /// the source plane enumerate positions in the same order.
    ///
    /// Every target sample is written exactly once; the source is not
    /// modified.
    pub fn map(&mut self) -> OpsResult<ProjectionPath> {
        let interval = self.fixed_interval()?;
        let view = IntervalView::new(self.source, interval)?;
        let plane = view.plane(self.dim_x, self.dim_y)?;
        let cursor = view.cursor();

        if cursor.is_sequential() && self.target.iteration_order() == plane.iteration_order() {
            trace!(dim_x = self.dim_x, dim_y = self.dim_y, position = %self.position, "projector: sequential");
            for (dst, src) in self.target.cursor_mut().zip(cursor) {
                self.converter.convert(&src, dst);
            }
            Ok(ProjectionPath::Sequential)
        } else {
            trace!(
                dim_x = self.dim_x,
                dim_y = self.dim_y,
                position = %self.position,
                sequential_source = cursor.is_sequential(),
                "projector: random access"
            );
            self.fill_random_access();
            Ok(ProjectionPath::RandomAccess)
        }
    }

    /// Fills the target through random access regardless of iteration order.
    pub fn map_random_access(&mut self) {
        self.fill_random_access();
    }

    fn fill_random_access(&mut self) {
        let mut p = self.position.clone();
        for (tp, dst) in self.target.localizing_cursor_mut() {
            p[self.dim_x] = tp[0];
            p[self.dim_y] = tp[1];
            let s = self.source.sample(&p);
            self.converter.convert(&s, dst);
        }
    }
}
