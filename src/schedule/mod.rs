//! Timer seams — a repeating interval scheduler for the sampler and a
//! refresh scheduler for the overlay redraw loop.
//!
//! Both hand back a [`CancelHandle`]. Scheduled work runs while holding the
//! handle's gate, and `cancel()` takes the same gate, so once `cancel()`
//! returns the work has finished and will not run again.

pub mod manual;
pub mod tokio_clock;

pub use manual::ManualFrameClock;
pub use tokio_clock::TokioScheduler;

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::AbortHandle;

/// Repeating work, boxed so schedulers can be used as trait objects.
pub type RepeatingTask = Box<dyn FnMut() + Send>;
/// One-shot frame callback.
pub type FrameCallback = Box<dyn FnOnce() + Send>;

pub trait IntervalScheduler: Send + Sync {
    /// Run `task` every `period`, first one period from now, until cancelled.
    fn every(&self, period: Duration, task: RepeatingTask) -> CancelHandle;
}

pub trait RefreshScheduler: Send + Sync {
    /// Run `callback` once on the next display refresh.
    fn request_frame(&self, callback: FrameCallback) -> CancelHandle;
}

// ── Gate ───────────────────────────────────────────────────

/// Open/closed flag that scheduled work runs under.
#[derive(Clone)]
pub(crate) struct Gate {
    open: Arc<Mutex<bool>>,
}

impl Gate {
    pub(crate) fn new() -> Self {
        Self {
            open: Arc::new(Mutex::new(true)),
        }
    }

    /// Run `f` if the gate is still open. Returns `None` when closed.
    pub(crate) fn run<R>(&self, f: impl FnOnce() -> R) -> Option<R> {
        let open = self.open.lock();
        if *open {
            Some(f())
        } else {
            None
        }
    }

    /// Close the gate, waiting for any in-flight `run`. Returns whether it was open.
    pub(crate) fn close(&self) -> bool {
        let mut open = self.open.lock();
        std::mem::replace(&mut *open, false)
    }

    pub(crate) fn is_open(&self) -> bool {
        *self.open.lock()
    }
}

// ── Cancel Handle ──────────────────────────────────────────

/// Handle to a scheduled task. Cancelling is idempotent.
///
/// Do not cancel a handle from inside its own task: the gate is held while the
/// task runs. Dropping a bare handle does not cancel; [`SamplerHandle`] and
/// [`OverlayLoop`] cancel theirs on drop.
///
/// [`SamplerHandle`]: crate::emotion::SamplerHandle
/// [`OverlayLoop`]: crate::overlay::OverlayLoop
pub struct CancelHandle {
    gate: Gate,
    abort: Option<AbortHandle>,
}

impl CancelHandle {
    pub(crate) fn new(gate: Gate, abort: Option<AbortHandle>) -> Self {
        Self { gate, abort }
    }

    /// Stop the task. Returns `true` the first time, `false` if already cancelled.
    pub fn cancel(&self) -> bool {
        let was_open = self.gate.close();
        if let Some(abort) = &self.abort {
            abort.abort();
        }
        was_open
    }

    pub fn is_cancelled(&self) -> bool {
        !self.gate.is_open()
    }
}

impl std::fmt::Debug for CancelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancelHandle")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn closed_gate_skips_work() {
        let gate = Gate::new();
        let runs = AtomicUsize::new(0);
        assert_eq!(gate.run(|| runs.fetch_add(1, Ordering::SeqCst)), Some(0));
        assert!(gate.close());
        assert_eq!(gate.run(|| runs.fetch_add(1, Ordering::SeqCst)), None);
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn cancel_is_idempotent() {
        let handle = CancelHandle::new(Gate::new(), None);
        assert!(!handle.is_cancelled());
        assert!(handle.cancel());
        assert!(!handle.cancel());
        assert!(handle.is_cancelled());
    }
}
