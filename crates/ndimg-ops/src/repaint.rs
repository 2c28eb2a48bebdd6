//! Background repaint loop for interactive viewers.
//!
//! A [`RepaintWorker`] owns one named thread that recomputes a frame
//! whenever it is asked to. Requests that arrive while a frame is being
//! computed collapse into a single follow-up frame, so a burst of input
//! events never queues up more than one frame of work.
//!
//! Stopping is cooperative: the stop flag is checked between frames only.
//! A frame that has started always runs to completion.
//!
//! The reference position a producer edits lives in a [`SharedPosition`];
//! the frame takes a [`snapshot`](SharedPosition::snapshot) before
//! projecting, so edits made mid-frame land in the next one.
//!
//! # Example
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use ndimg_core::{ArrayImg, Identity, Interval, Position};
//! use ndimg_ops::{Projector2D, RepaintWorker, SharedPosition};
//!
//! let volume = ArrayImg::from_fn(Interval::from_dims(&[4, 4, 8]).unwrap(), |p| p[2] as f32).unwrap();
//! let plane = Arc::new(Mutex::new(ArrayImg::new(&[4, 4], 0.0f32).unwrap()));
//! let position = SharedPosition::new(Position::origin(3));
//!
//! let (frame_plane, frame_position) = (Arc::clone(&plane), position.clone());
//! let mut worker = RepaintWorker::spawn("viewer-repaint", move || {
//!     let reference = frame_position.snapshot();
//!     let mut target = frame_plane.lock().unwrap();
//!     let mut projector = Projector2D::new(0, 1, &volume, &mut *target, Identity).unwrap();
//!     projector.set_reference(&reference).unwrap();
//!     projector.map().unwrap();
//! })
//! .unwrap();
//!
//! position.set(2, 6);
//! worker.request_repaint();
//! worker.stop();
//! ```

use crate::error::{OpsError, OpsResult};
use ndimg_core::Position;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use tracing::{debug, trace, warn};

#[derive(Debug, Default)]
struct RepaintState {
    requested: bool,
    stopped: bool,
}

#[derive(Debug, Default)]
struct Shared {
    state: Mutex<RepaintState>,
    wake: Condvar,
    frames: AtomicU64,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, RepaintState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Worker thread that recomputes frames on request.
///
/// Dropping the worker stops it and joins the thread.
#[derive(Debug)]
pub struct RepaintWorker {
    name: String,
    shared: Arc<Shared>,
    handle: Option<JoinHandle<()>>,
}

impl RepaintWorker {
    /// Starts the worker thread. `frame` runs once per coalesced request.
    ///
    /// # Errors
    ///
    /// [`OpsError::ProcessingFailure`] if the thread cannot be spawned.
    pub fn spawn<F>(name: impl Into<String>, frame: F) -> OpsResult<Self>
    where
        F: FnMut() + Send + 'static,
    {
        let name = name.into();
        let shared = Arc::new(Shared::default());
        let handle = thread::Builder::new()
            .name(name.clone())
            .spawn({
                let shared = Arc::clone(&shared);
                move || run(&shared, frame)
            })
            .map_err(|e| OpsError::processing_failure("start repaint worker", e.to_string()))?;
        debug!(worker = %name, "repaint worker started");
        Ok(Self {
            name,
            shared,
            handle: Some(handle),
        })
    }

    /// Asks for a new frame. Cheap; never blocks on frame computation.
    pub fn request_repaint(&self) {
        self.shared.lock().requested = true;
        self.shared.wake.notify_one();
    }

    /// Number of frames completed so far.
    pub fn frames(&self) -> u64 {
        self.shared.frames.load(Ordering::Acquire)
    }

    /// Returns `true` until [`stop`](Self::stop) has been called.
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Stops the loop after the current frame, if any, and joins the thread.
    ///
    /// Idempotent.
    pub fn stop(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        self.shared.lock().stopped = true;
        self.shared.wake.notify_all();
        if handle.join().is_err() {
            warn!(worker = %self.name, "repaint worker panicked");
        }
        debug!(worker = %self.name, frames = self.frames(), "repaint worker stopped");
    }
}

impl Drop for RepaintWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run<F: FnMut()>(shared: &Shared, mut frame: F) {
    loop {
        {
            let mut state = shared.lock();
            while !state.requested && !state.stopped {
                state = shared.wake.wait(state).unwrap_or_else(PoisonError::into_inner);
            }
            if state.stopped {
                return;
            }
            state.requested = false;
        }
        frame();
        let n = shared.frames.fetch_add(1, Ordering::AcqRel) + 1;
        trace!(frame = n, "repaint frame done");
    }
}

/// Reference position shared between an input handler and a repaint frame.
#[derive(Debug, Clone)]
pub struct SharedPosition(Arc<Mutex<Position>>);

impl SharedPosition {
    /// Wraps an initial position.
    pub fn new(position: Position) -> Self {
        Self(Arc::new(Mutex::new(position)))
    }

    fn lock(&self) -> MutexGuard<'_, Position> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sets one coordinate.
    ///
    /// # Panics
    ///
    /// Panics if `d` is out of range.
    pub fn set(&self, d: usize, value: i64) {
        self.lock().set(d, value);
    }

    /// Replaces the whole position.
    pub fn replace(&self, position: Position) {
        *self.lock() = position;
    }

    /// Copy of the current position.
    pub fn snapshot(&self) -> Position {
        self.lock().clone()
    }
}
