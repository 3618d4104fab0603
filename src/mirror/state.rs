//! Observable mirror state — what the dashboard, avatar and overlay read.

use crate::emotion::{EmotionSample, FacialExpression, HistoryBuffer};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CameraStatus {
    Inactive,
    /// Waiting on the video source.
    Starting,
    Live { session_id: String },
    /// Acquisition failed; carries the text shown to the user.
    Denied { message: String },
}

impl CameraStatus {
    pub fn is_live(&self) -> bool {
        matches!(self, CameraStatus::Live { .. })
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            CameraStatus::Denied { message } => Some(message),
            _ => None,
        }
    }
}

/// Latest committed state. Readers always see a whole update.
#[derive(Debug, Clone, Serialize)]
pub struct MirrorState {
    pub active: bool,
    pub current: EmotionSample,
    pub expression: FacialExpression,
    pub history: HistoryBuffer,
    pub camera: CameraStatus,
    /// Readings committed since construction; bumps even once history is full.
    pub readings: u64,
}

impl MirrorState {
    pub fn new(history_capacity: usize, now_ms: i64) -> Self {
        Self {
            active: false,
            current: EmotionSample::initial(now_ms),
            expression: FacialExpression::Neutral,
            history: HistoryBuffer::with_capacity(history_capacity),
            camera: CameraStatus::Inactive,
            readings: 0,
        }
    }

    /// Commit one sampler reading.
    pub fn apply_reading(&mut self, sample: EmotionSample, expression: FacialExpression) {
        self.current = sample;
        self.expression = expression;
        self.history = self.history.appended(sample);
        self.readings += 1;
    }
}
