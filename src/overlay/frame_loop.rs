//! Overlay Loop — redraws the face sketch on every display refresh.
//!
//! At most one frame request is outstanding at a time: each frame requests
//! the next one, and stopping cancels whichever request is pending.

use super::renderer::ExpressionRenderer;
use super::surface::DrawingSurface;
use crate::camera::{VideoFrameInfo, VideoStream};
use crate::emotion::FacialExpression;
use crate::schedule::{CancelHandle, RefreshScheduler};
use parking_lot::Mutex;
use std::sync::Arc;

/// Reads the most recently committed expression.
pub type ExpressionSource = Box<dyn Fn() -> FacialExpression + Send + Sync>;

struct LoopState {
    running: bool,
    pending: Option<CancelHandle>,
    frames: u64,
}

struct LoopShared<S> {
    state: Mutex<LoopState>,
    scheduler: Arc<dyn RefreshScheduler>,
    surface: Arc<Mutex<S>>,
    stream: Arc<dyn VideoStream>,
    expression: ExpressionSource,
    renderer: ExpressionRenderer,
}

impl<S: DrawingSurface + Send + 'static> LoopShared<S> {
    fn on_frame(self: &Arc<Self>) {
        let mut state = self.state.lock();
        if !state.running {
            return;
        }

        let frame = VideoFrameInfo::from_stream(self.stream.as_ref());
        let expression = (self.expression)();
        {
            let mut surface = self.surface.lock();
            self.renderer.render(&mut *surface, frame, expression);
        }
        state.frames += 1;

        let next = Arc::clone(self);
        state.pending = Some(
            self.scheduler
                .request_frame(Box::new(move || next.on_frame())),
        );
    }
}

pub struct OverlayLoop<S: DrawingSurface + Send + 'static> {
    shared: Arc<LoopShared<S>>,
}

impl<S: DrawingSurface + Send + 'static> OverlayLoop<S> {
    /// Begin redrawing on the next refresh.
    pub fn start(
        scheduler: Arc<dyn RefreshScheduler>,
        surface: Arc<Mutex<S>>,
        stream: Arc<dyn VideoStream>,
        expression: ExpressionSource,
        renderer: ExpressionRenderer,
    ) -> Self {
        let shared = Arc::new(LoopShared {
            state: Mutex::new(LoopState {
                running: true,
                pending: None,
                frames: 0,
            }),
            scheduler,
            surface,
            stream,
            expression,
            renderer,
        });

        {
            let mut state = shared.state.lock();
            let first = Arc::clone(&shared);
            state.pending = Some(
                shared
                    .scheduler
                    .request_frame(Box::new(move || first.on_frame())),
            );
        }
        tracing::debug!("overlay loop started");
        Self { shared }
    }

    /// Cancel the pending redraw. No frame is drawn after this returns.
    pub fn stop(&self) -> bool {
        let pending = {
            let mut state = self.shared.state.lock();
            if !state.running {
                return false;
            }
            state.running = false;
            state.pending.take()
        };
        // Taken outside the state lock: a frame waiting on that lock holds this gate.
        if let Some(handle) = pending {
            handle.cancel();
        }
        tracing::debug!(frames = self.frames_drawn(), "overlay loop stopped");
        true
    }

    pub fn is_running(&self) -> bool {
        self.shared.state.lock().running
    }

    pub fn frames_drawn(&self) -> u64 {
        self.shared.state.lock().frames
    }
}

impl<S: DrawingSurface + Send + 'static> Drop for OverlayLoop<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{SyntheticCamera, VideoSource};
    use crate::overlay::display_list::DisplayList;
    use crate::schedule::ManualFrameClock;

    async fn setup() -> (
        Arc<ManualFrameClock>,
        Arc<Mutex<DisplayList>>,
        SyntheticCamera,
        Arc<dyn VideoStream>,
    ) {
        let clock = Arc::new(ManualFrameClock::new());
        let surface = Arc::new(Mutex::new(DisplayList::new()));
        let camera = SyntheticCamera::new(640, 480);
        let stream = camera.acquire().await.unwrap();
        (clock, surface, camera, stream)
    }

    #[tokio::test]
    async fn draws_once_per_refresh_with_latest_expression() {
        let (clock, surface, _camera, stream) = setup().await;
        let current = Arc::new(Mutex::new(FacialExpression::Smile));
        let reader = current.clone();
        let overlay = OverlayLoop::start(
            clock.clone(),
            surface.clone(),
            stream,
            Box::new(move || *reader.lock()),
            ExpressionRenderer::default(),
        );

        assert_eq!(clock.pump(), 1);
        assert_eq!(surface.lock().labels(), vec!["Detected: smile"]);

        *current.lock() = FacialExpression::Squint;
        assert_eq!(clock.pump(), 1);
        assert_eq!(surface.lock().labels(), vec!["Detected: squint"]);
        assert_eq!(overlay.frames_drawn(), 2);
        assert_eq!(clock.pending(), 1);
    }

    #[tokio::test]
    async fn stop_leaves_no_pending_request() {
        let (clock, surface, _camera, stream) = setup().await;
        let overlay = OverlayLoop::start(
            clock.clone(),
            surface,
            stream,
            Box::new(|| FacialExpression::Neutral),
            ExpressionRenderer::default(),
        );
        clock.pump();
        assert!(overlay.stop());
        assert!(!overlay.stop());
        assert_eq!(clock.pending(), 0);
        assert_eq!(clock.pump(), 0);
        assert_eq!(overlay.frames_drawn(), 1);
    }

    #[tokio::test]
    async fn dropping_the_loop_cancels_it() {
        let (clock, surface, _camera, stream) = setup().await;
        let overlay = OverlayLoop::start(
            clock.clone(),
            surface,
            stream,
            Box::new(|| FacialExpression::Neutral),
            ExpressionRenderer::default(),
        );
        drop(overlay);
        assert_eq!(clock.pending(), 0);
    }

    #[tokio::test]
    async fn paused_video_clears_the_overlay() {
        let (clock, surface, camera, stream) = setup().await;
        let _overlay = OverlayLoop::start(
            clock.clone(),
            surface.clone(),
            stream,
            Box::new(|| FacialExpression::Frown),
            ExpressionRenderer::default(),
        );
        clock.pump();
        assert!(!surface.lock().is_blank());

        camera.latest_stream().unwrap().set_paused(true);
        clock.pump();
        assert!(surface.lock().is_blank());
    }

    #[tokio::test]
    async fn resolution_change_resizes_surface() {
        let (clock, surface, camera, stream) = setup().await;
        let _overlay = OverlayLoop::start(
            clock.clone(),
            surface.clone(),
            stream,
            Box::new(|| FacialExpression::Neutral),
            ExpressionRenderer::default(),
        );
        clock.pump();
        assert_eq!(surface.lock().size(), (640, 480));
        camera.latest_stream().unwrap().set_frame_size(1280, 720);
        clock.pump();
        assert_eq!(surface.lock().size(), (1280, 720));
    }
}
