//! Mood Mirror controller — the two-mode (inactive/active) session state machine.
//!
//! Activating starts the emotion sampler and then asks the video source for a
//! stream. Sampling does not depend on the camera: a denied camera still
//! produces readings, it just never gets an overlay.

use super::state::{CameraStatus, MirrorState};
use crate::camera::{VideoSource, VideoStream};
use crate::config::MirrorConfig;
use crate::emotion::sampler::now_millis;
use crate::emotion::{EmotionSampler, SamplerHandle};
use crate::overlay::{DrawingSurface, ExpressionRenderer, OverlayLoop};
use crate::schedule::{IntervalScheduler, RefreshScheduler};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use uuid::Uuid;

struct CameraSession<S: DrawingSurface + Send + 'static> {
    id: String,
    stream: Arc<dyn VideoStream>,
    overlay: OverlayLoop<S>,
}

pub struct MoodMirror<S: DrawingSurface + Send + 'static> {
    source: Arc<dyn VideoSource>,
    refresh: Arc<dyn RefreshScheduler>,
    sampler: EmotionSampler,
    sample_interval: Duration,
    surface: Arc<Mutex<S>>,
    renderer: ExpressionRenderer,
    state: Arc<watch::Sender<MirrorState>>,
    sampling: Option<SamplerHandle>,
    session: Option<CameraSession<S>>,
}

impl<S: DrawingSurface + Send + 'static> MoodMirror<S> {
    pub fn new(
        config: &MirrorConfig,
        source: Arc<dyn VideoSource>,
        intervals: Arc<dyn IntervalScheduler>,
        refresh: Arc<dyn RefreshScheduler>,
        surface: Arc<Mutex<S>>,
    ) -> Self {
        let config = config.clone().normalized();
        let (state, _) = watch::channel(MirrorState::new(config.history_capacity, now_millis()));
        Self {
            source,
            refresh,
            sampler: EmotionSampler::new(intervals, config.seed),
            sample_interval: config.sample_interval(),
            surface,
            renderer: ExpressionRenderer::default(),
            state: Arc::new(state),
            sampling: None,
            session: None,
        }
    }

    // ── Observation ────────────────────────────────────────

    pub fn subscribe(&self) -> watch::Receiver<MirrorState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> MirrorState {
        self.state.borrow().clone()
    }

    pub fn is_active(&self) -> bool {
        self.state.borrow().active
    }

    pub fn surface(&self) -> Arc<Mutex<S>> {
        Arc::clone(&self.surface)
    }

    /// Frames drawn by the current camera session, if one is live.
    pub fn overlay_frames(&self) -> Option<u64> {
        self.session.as_ref().map(|s| s.overlay.frames_drawn())
    }

    // ── Transitions ────────────────────────────────────────

    /// Flip between inactive and active. Returns the new mode.
    pub async fn toggle(&mut self) -> bool {
        if self.is_active() {
            self.deactivate();
        } else {
            self.activate().await;
        }
        self.is_active()
    }

    /// Inactive → Active. Returns the resulting camera status; a camera failure
    /// is reported there, not as an error, because sampling keeps running.
    ///
    /// Dropping the returned future before the camera answers undoes the
    /// activation: sampling stops and the mirror is inactive again.
    pub async fn activate(&mut self) -> CameraStatus {
        if self.is_active() {
            return self.state.borrow().camera.clone();
        }

        self.state.send_modify(|s| {
            s.active = true;
            s.camera = CameraStatus::Starting;
        });

        let tx = Arc::clone(&self.state);
        let sampling = self.sampler.start(self.sample_interval, move |sample, expression| {
            tx.send_modify(|s| s.apply_reading(sample, expression));
        });
        tracing::info!(
            interval_ms = self.sample_interval.as_millis() as u64,
            "mirror activated"
        );

        // Rolls back to inactive if this future is dropped while the camera is pending.
        let pending = PendingActivation {
            state: Arc::clone(&self.state),
            sampling: Some(sampling),
        };
        let acquired = self.source.acquire().await;
        self.sampling = pending.commit();

        let status = match acquired {
            Ok(stream) => {
                let status = self.begin_session(stream);
                tracing::info!(camera = ?status, "camera live");
                status
            }
            Err(e) => {
                tracing::warn!(error = %e, "camera acquisition failed; sampling continues");
                self.surface.lock().clear();
                CameraStatus::Denied {
                    message: e.user_message(),
                }
            }
        };

        self.state.send_modify(|s| s.camera = status.clone());
        status
    }

    /// Active → Inactive. Readings and history stay as they were.
    pub fn deactivate(&mut self) {
        if !self.is_active() {
            return;
        }
        self.halt();
        self.state.send_modify(|s| {
            s.active = false;
            if !matches!(s.camera, CameraStatus::Denied { .. }) {
                s.camera = CameraStatus::Inactive;
            }
        });
        tracing::info!(history = self.state.borrow().history.len(), "mirror deactivated");
    }

    /// Teardown: cancel every timer and release the camera whatever the mode.
    pub fn shutdown(&mut self) {
        self.halt();
        self.state.send_modify(|s| {
            s.active = false;
            if s.camera.is_live() || s.camera == CameraStatus::Starting {
                s.camera = CameraStatus::Inactive;
            }
        });
    }

    fn begin_session(&mut self, stream: Arc<dyn VideoStream>) -> CameraStatus {
        let id = Uuid::new_v4().to_string();
        let rx = self.state.subscribe();
        let overlay = OverlayLoop::start(
            Arc::clone(&self.refresh),
            Arc::clone(&self.surface),
            Arc::clone(&stream),
            Box::new(move || rx.borrow().expression),
            self.renderer.clone(),
        );
        let (width, height) = stream.frame_size();
        tracing::debug!(session = %id, width, height, "camera session started");
        self.session = Some(CameraSession {
            id: id.clone(),
            stream,
            overlay,
        });
        CameraStatus::Live { session_id: id }
    }

    fn halt(&mut self) {
        if let Some(sampling) = self.sampling.take() {
            self.sampler.stop(&sampling);
        }
        if let Some(session) = self.session.take() {
            session.overlay.stop();
            session.stream.release();
            self.surface.lock().clear();
            tracing::debug!(session = %session.id, "camera session released");
        }
    }
}

struct PendingActivation {
    state: Arc<watch::Sender<MirrorState>>,
    sampling: Option<SamplerHandle>,
}

impl PendingActivation {
    fn commit(mut self) -> Option<SamplerHandle> {
        self.sampling.take()
    }
}

impl Drop for PendingActivation {
    fn drop(&mut self) {
        if let Some(sampling) = self.sampling.take() {
            sampling.stop();
            self.state.send_modify(|s| {
                s.active = false;
                s.camera = CameraStatus::Inactive;
            });
            tracing::warn!("activation cancelled while waiting for the camera");
        }
    }
}

impl<S: DrawingSurface + Send + 'static> Drop for MoodMirror<S> {
    fn drop(&mut self) {
        self.halt();
    }
}
