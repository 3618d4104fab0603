//! Video source seam. The mirror only needs to open a stream, read its frame
//! size and play state, and release it.

pub mod synthetic;

pub use synthetic::{CameraFailure, MediaTrack, SyntheticCamera, SyntheticStream};

use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub trait VideoStream: Send + Sync {
    /// Current frame dimensions; `(0, 0)` until the resolution is known.
    fn frame_size(&self) -> (u32, u32);
    fn is_paused(&self) -> bool;
    fn is_ended(&self) -> bool;
    /// Stop every underlying track. Safe to call more than once.
    fn release(&self);
}

#[async_trait]
pub trait VideoSource: Send + Sync {
    /// Open the camera. Fails with `PermissionDenied` or `DeviceUnavailable`.
    async fn acquire(&self) -> Result<Arc<dyn VideoStream>>;
}

/// Frame state sampled once per redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoFrameInfo {
    pub width: u32,
    pub height: u32,
    pub paused: bool,
    pub ended: bool,
}

impl VideoFrameInfo {
    pub fn from_stream(stream: &dyn VideoStream) -> Self {
        let (width, height) = stream.frame_size();
        Self {
            width,
            height,
            paused: stream.is_paused(),
            ended: stream.is_ended(),
        }
    }
}
