//! Synthetic camera — an in-process stand-in for a webcam with failure injection.

use super::{VideoSource, VideoStream};
use crate::error::{MirrorError, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// How `acquire` should fail, if at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraFailure {
    PermissionDenied,
    DeviceUnavailable,
    /// Open this many tracks, then fail.
    AfterTracks(usize),
}

// ── Track ──────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct MediaTrack {
    pub label: String,
    live: Arc<AtomicBool>,
}

impl MediaTrack {
    fn start(label: String) -> Self {
        Self {
            label,
            live: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }

    pub fn stop(&self) {
        self.live.store(false, Ordering::SeqCst);
    }
}

// ── Stream ─────────────────────────────────────────────────

pub struct SyntheticStream {
    size: Mutex<(u32, u32)>,
    paused: AtomicBool,
    ended: AtomicBool,
    tracks: Vec<MediaTrack>,
}

impl SyntheticStream {
    fn new(size: (u32, u32), tracks: Vec<MediaTrack>) -> Self {
        Self {
            size: Mutex::new(size),
            paused: AtomicBool::new(false),
            ended: AtomicBool::new(false),
            tracks,
        }
    }

    /// Simulate the device renegotiating its resolution.
    pub fn set_frame_size(&self, width: u32, height: u32) {
        *self.size.lock() = (width, height);
    }

    pub fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::SeqCst);
    }

    pub fn tracks(&self) -> &[MediaTrack] {
        &self.tracks
    }

    pub fn all_tracks_stopped(&self) -> bool {
        self.tracks.iter().all(|t| !t.is_live())
    }
}

impl VideoStream for SyntheticStream {
    fn frame_size(&self) -> (u32, u32) {
        *self.size.lock()
    }

    fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    fn is_ended(&self) -> bool {
        self.ended.load(Ordering::SeqCst)
    }

    fn release(&self) {
        for track in &self.tracks {
            track.stop();
        }
        self.ended.store(true, Ordering::SeqCst);
    }
}

// ── Camera ─────────────────────────────────────────────────

pub struct SyntheticCamera {
    width: u32,
    height: u32,
    track_count: usize,
    failure: Mutex<Option<CameraFailure>>,
    streams: Mutex<Vec<Arc<SyntheticStream>>>,
    opened_tracks: Mutex<Vec<MediaTrack>>,
}

impl SyntheticCamera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            track_count: 1,
            failure: Mutex::new(None),
            streams: Mutex::new(Vec::new()),
            opened_tracks: Mutex::new(Vec::new()),
        }
    }

    pub fn with_tracks(mut self, count: usize) -> Self {
        self.track_count = count.max(1);
        self
    }

    pub fn with_failure(self, failure: CameraFailure) -> Self {
        self.set_failure(Some(failure));
        self
    }

    /// Change the failure mode for later `acquire` calls.
    pub fn set_failure(&self, failure: Option<CameraFailure>) {
        *self.failure.lock() = failure;
    }

    /// Every stream handed out so far.
    pub fn streams(&self) -> Vec<Arc<SyntheticStream>> {
        self.streams.lock().clone()
    }

    pub fn latest_stream(&self) -> Option<Arc<SyntheticStream>> {
        self.streams.lock().last().cloned()
    }

    /// Every track ever opened, including ones from failed acquisitions.
    pub fn opened_tracks(&self) -> Vec<MediaTrack> {
        self.opened_tracks.lock().clone()
    }

    pub fn live_track_count(&self) -> usize {
        self.opened_tracks
            .lock()
            .iter()
            .filter(|t| t.is_live())
            .count()
    }

    fn open_track(&self, index: usize) -> MediaTrack {
        let track = MediaTrack::start(format!("synthetic-video-{}", index));
        self.opened_tracks.lock().push(track.clone());
        track
    }
}

#[async_trait]
impl VideoSource for SyntheticCamera {
    async fn acquire(&self) -> Result<Arc<dyn VideoStream>> {
        let failure = *self.failure.lock();
        match failure {
            Some(CameraFailure::PermissionDenied) => {
                return Err(MirrorError::PermissionDenied(
                    "user dismissed the camera prompt".into(),
                ))
            }
            Some(CameraFailure::DeviceUnavailable) => {
                return Err(MirrorError::DeviceUnavailable("no video input found".into()))
            }
            _ => {}
        }

        let mut tracks: Vec<MediaTrack> = Vec::with_capacity(self.track_count);
        for index in 0..self.track_count {
            if let Some(CameraFailure::AfterTracks(limit)) = failure {
                if index >= limit {
                    // Leave nothing running behind a failed start.
                    for track in &tracks {
                        track.stop();
                    }
                    return Err(MirrorError::DeviceUnavailable(format!(
                        "device stopped responding after {} track(s)",
                        index
                    )));
                }
            }
            tracks.push(self.open_track(index));
        }

        let stream = Arc::new(SyntheticStream::new((self.width, self.height), tracks));
        self.streams.lock().push(stream.clone());
        Ok(stream as Arc<dyn VideoStream>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn acquire_opens_live_tracks() {
        let camera = SyntheticCamera::new(640, 480).with_tracks(2);
        let stream = camera.acquire().await.unwrap();
        assert_eq!(stream.frame_size(), (640, 480));
        assert!(!stream.is_paused());
        assert_eq!(camera.live_track_count(), 2);

        stream.release();
        stream.release();
        assert!(stream.is_ended());
        assert_eq!(camera.live_track_count(), 0);
    }

    #[tokio::test]
    async fn denied_acquire_opens_nothing() {
        let camera = SyntheticCamera::new(640, 480).with_failure(CameraFailure::PermissionDenied);
        let err = camera.acquire().await.err().unwrap();
        assert!(matches!(err, MirrorError::PermissionDenied(_)));
        assert!(camera.opened_tracks().is_empty());
    }

    #[tokio::test]
    async fn partial_start_stops_opened_tracks() {
        let camera = SyntheticCamera::new(640, 480)
            .with_tracks(3)
            .with_failure(CameraFailure::AfterTracks(2));
        let err = camera.acquire().await.err().unwrap();
        assert!(matches!(err, MirrorError::DeviceUnavailable(_)));
        assert_eq!(camera.opened_tracks().len(), 2);
        assert_eq!(camera.live_track_count(), 0);
        assert!(camera.streams().is_empty());
    }

    #[tokio::test]
    async fn failure_can_be_cleared() {
        let camera = SyntheticCamera::new(320, 240).with_failure(CameraFailure::DeviceUnavailable);
        assert!(camera.acquire().await.is_err());
        camera.set_failure(None);
        assert!(camera.acquire().await.is_ok());
        assert_eq!(camera.streams().len(), 1);
    }
}
