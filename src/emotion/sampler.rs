//! Emotion Sampler — timed process emitting a fresh reading every interval.

use super::generator::EmotionGenerator;
use super::types::{EmotionSample, FacialExpression};
use crate::schedule::{CancelHandle, IntervalScheduler};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Default time between readings.
pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_millis(2000);

/// Wall clock used to stamp readings.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

pub struct EmotionSampler {
    scheduler: Arc<dyn IntervalScheduler>,
    generator: Mutex<EmotionGenerator>,
}

impl EmotionSampler {
    pub fn new(scheduler: Arc<dyn IntervalScheduler>, seed: Option<u64>) -> Self {
        Self {
            scheduler,
            generator: Mutex::new(EmotionGenerator::new(seed)),
        }
    }

    /// Start producing readings. `on_sample` is called once per `interval`
    /// until the returned handle is stopped.
    pub fn start<F>(&self, interval: Duration, mut on_sample: F) -> SamplerHandle
    where
        F: FnMut(EmotionSample, FacialExpression) + Send + 'static,
    {
        let mut generator = self.generator.lock().fork();
        let interval = if interval.is_zero() {
            DEFAULT_SAMPLE_INTERVAL
        } else {
            interval
        };
        tracing::debug!(interval_ms = interval.as_millis() as u64, "sampler started");

        let timer = self.scheduler.every(
            interval,
            Box::new(move || {
                let (sample, expression) = generator.next_reading(now_millis());
                tracing::debug!(
                    emotion = %sample.emotion,
                    confidence = sample.confidence,
                    expression = %expression,
                    "sampled"
                );
                on_sample(sample, expression);
            }),
        );
        SamplerHandle { timer }
    }

    /// Same as [`SamplerHandle::stop`].
    pub fn stop(&self, handle: &SamplerHandle) {
        handle.stop();
    }
}

/// Running sampler. Stopping is idempotent; no callback runs after `stop`
/// returns. Dropping the handle stops the sampler.
#[derive(Debug)]
pub struct SamplerHandle {
    timer: CancelHandle,
}

impl SamplerHandle {
    pub fn stop(&self) {
        if self.timer.cancel() {
            tracing::debug!("sampler stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        !self.timer.is_cancelled()
    }
}

impl Drop for SamplerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::TokioScheduler;

    fn sampler() -> EmotionSampler {
        EmotionSampler::new(Arc::new(TokioScheduler::current(60)), Some(5))
    }

    #[tokio::test(start_paused = true)]
    async fn produces_floor_duration_over_interval_samples() {
        let sampler = sampler();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let handle = sampler.start(Duration::from_millis(500), move |s, e| {
            sink.lock().push((s, e));
        });

        tokio::time::sleep(Duration::from_millis(5_250)).await;
        handle.stop();

        let seen = seen.lock();
        assert_eq!(seen.len(), 10);
        for (sample, _) in seen.iter() {
            assert!((0.6..1.0).contains(&sample.confidence));
        }
        assert!(seen.windows(2).all(|w| w[0].0.timestamp <= w[1].0.timestamp));
    }

    #[tokio::test(start_paused = true)]
    async fn stop_halts_callbacks_and_is_idempotent() {
        let sampler = sampler();
        let count = Arc::new(Mutex::new(0usize));
        let counter = count.clone();
        let handle = sampler.start(DEFAULT_SAMPLE_INTERVAL, move |_, _| {
            *counter.lock() += 1;
        });

        tokio::time::sleep(Duration::from_millis(3_000)).await;
        assert_eq!(*count.lock(), 1);

        sampler.stop(&handle);
        assert!(!handle.is_running());
        handle.stop();

        tokio::time::sleep(Duration::from_millis(10_000)).await;
        assert_eq!(*count.lock(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_stops_sampling() {
        let sampler = sampler();
        let count = Arc::new(Mutex::new(0usize));
        let counter = count.clone();
        let handle = sampler.start(DEFAULT_SAMPLE_INTERVAL, move |_, _| {
            *counter.lock() += 1;
        });

        tokio::time::sleep(Duration::from_millis(2_001)).await;
        assert_eq!(*count.lock(), 1);

        drop(handle);
        drop(sampler);
        tokio::time::sleep(Duration::from_millis(10_001)).await;
        assert_eq!(*count.lock(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_interval_falls_back_to_default() {
        let sampler = sampler();
        let count = Arc::new(Mutex::new(0usize));
        let counter = count.clone();
        let handle = sampler.start(Duration::ZERO, move |_, _| {
            *counter.lock() += 1;
        });
        tokio::time::sleep(Duration::from_millis(1_999)).await;
        assert_eq!(*count.lock(), 0);
        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(*count.lock(), 1);
        handle.stop();
    }
}
