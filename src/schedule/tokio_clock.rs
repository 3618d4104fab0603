//! Tokio-backed schedulers: `interval_at` for the sampler and a fixed-rate
//! sleep standing in for the display's vertical sync.

use super::{CancelHandle, FrameCallback, Gate, IntervalScheduler, RefreshScheduler, RepeatingTask};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::time::{Instant, MissedTickBehavior};

pub const DEFAULT_REFRESH_RATE_HZ: u32 = 60;

/// Shortest repeat period `every` will schedule; `interval_at` rejects zero.
pub const MIN_INTERVAL_PERIOD: Duration = Duration::from_millis(1);

#[derive(Clone)]
pub struct TokioScheduler {
    runtime: Handle,
    frame_period: Duration,
}

impl TokioScheduler {
    pub fn new(runtime: Handle, refresh_rate_hz: u32) -> Self {
        let hz = refresh_rate_hz.clamp(1, 240);
        Self {
            runtime,
            frame_period: Duration::from_secs_f64(1.0 / hz as f64),
        }
    }

    /// Bind to the runtime of the calling task. Panics outside a runtime, like `tokio::spawn`.
    pub fn current(refresh_rate_hz: u32) -> Self {
        Self::new(Handle::current(), refresh_rate_hz)
    }

    pub fn frame_period(&self) -> Duration {
        self.frame_period
    }
}

impl IntervalScheduler for TokioScheduler {
    fn every(&self, period: Duration, mut task: RepeatingTask) -> CancelHandle {
        let period = period.max(MIN_INTERVAL_PERIOD);
        let gate = Gate::new();
        let task_gate = gate.clone();
        let join = self.runtime.spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if task_gate.run(|| task()).is_none() {
                    break;
                }
            }
        });
        CancelHandle::new(gate, Some(join.abort_handle()))
    }
}

impl RefreshScheduler for TokioScheduler {
    fn request_frame(&self, callback: FrameCallback) -> CancelHandle {
        let gate = Gate::new();
        let task_gate = gate.clone();
        let period = self.frame_period;
        let join = self.runtime.spawn(async move {
            tokio::time::sleep(period).await;
            task_gate.run(callback);
        });
        CancelHandle::new(gate, Some(join.abort_handle()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn interval_fires_once_per_period() {
        let scheduler = TokioScheduler::current(60);
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = ticks.clone();
        let handle = scheduler.every(
            Duration::from_millis(2000),
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(2) + Duration::from_millis(8000)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 5);

        handle.cancel();
        tokio::time::sleep(Duration::from_millis(10_000)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_period_is_clamped_instead_of_panicking() {
        let scheduler = TokioScheduler::current(60);
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = ticks.clone();
        let handle = scheduler.every(
            Duration::ZERO,
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!handle.is_cancelled());
        let seen = ticks.load(Ordering::SeqCst);
        assert!((9..=10).contains(&seen), "expected ~one tick per ms, got {}", seen);
        handle.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_frame_never_runs() {
        let scheduler = TokioScheduler::current(60);
        let ran = Arc::new(AtomicUsize::new(0));
        let flag = ran.clone();
        let handle = scheduler.request_frame(Box::new(move || {
            flag.fetch_add(1, Ordering::SeqCst);
        }));
        assert!(handle.cancel());
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(ran.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn frame_runs_after_one_period() {
        let scheduler = TokioScheduler::current(50);
        assert_eq!(scheduler.frame_period(), Duration::from_millis(20));
        let ran = Arc::new(AtomicUsize::new(0));
        let flag = ran.clone();
        let _handle = scheduler.request_frame(Box::new(move || {
            flag.fetch_add(1, Ordering::SeqCst);
        }));
        tokio::time::sleep(Duration::from_millis(25)).await;
        assert_eq!(ran.load(Ordering::SeqCst), 1);
    }
}
