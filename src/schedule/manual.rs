//! Frame clock driven by the host: call [`ManualFrameClock::pump`] once per refresh.

use super::{CancelHandle, FrameCallback, Gate, RefreshScheduler};
use parking_lot::Mutex;

#[derive(Default)]
pub struct ManualFrameClock {
    pending: Mutex<Vec<(Gate, FrameCallback)>>,
}

impl ManualFrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every frame request made before this call. Requests made by the
    /// callbacks themselves wait for the next pump. Returns how many ran.
    pub fn pump(&self) -> usize {
        let due = std::mem::take(&mut *self.pending.lock());
        due.into_iter()
            .filter_map(|(gate, callback)| gate.run(callback))
            .count()
    }

    /// Requests that have not been cancelled yet.
    pub fn pending(&self) -> usize {
        self.pending
            .lock()
            .iter()
            .filter(|(gate, _)| gate.is_open())
            .count()
    }
}

impl RefreshScheduler for ManualFrameClock {
    fn request_frame(&self, callback: FrameCallback) -> CancelHandle {
        let gate = Gate::new();
        self.pending.lock().push((gate.clone(), callback));
        CancelHandle::new(gate, None)
    }
}
