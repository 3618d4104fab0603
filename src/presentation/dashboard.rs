//! Mood dashboard — current-mood card and the rolling history chart.

use crate::emotion::{Emotion, EmotionSample, HistoryBuffer};
use serde::Serialize;

pub const EMPTY_HISTORY_MESSAGE: &str = "No mood data yet. Start the camera to begin tracking.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodColor {
    Green,
    Blue,
    Yellow,
    Purple,
    Gray,
}

pub fn mood_color(emotion: Emotion) -> MoodColor {
    match emotion {
        Emotion::Happy => MoodColor::Green,
        Emotion::Sad => MoodColor::Blue,
        Emotion::Surprised => MoodColor::Yellow,
        Emotion::Disgusted => MoodColor::Purple,
        Emotion::Neutral => MoodColor::Gray,
    }
}

pub fn mood_message(emotion: Emotion) -> &'static str {
    match emotion {
        Emotion::Happy => "You're radiating positivity! Keep that smile going!",
        Emotion::Sad => "It's okay to feel blue sometimes. Need a virtual hug?",
        Emotion::Surprised => "Whoa! Did something unexpected just happen?",
        Emotion::Disgusted => "Yikes! Did you smell something funky?",
        Emotion::Neutral => "Keeping it cool and collected, I see.",
    }
}

/// `0.874` → `"87%"`.
pub fn format_confidence(confidence: f32) -> String {
    format!("{}%", (confidence * 100.0).round() as i32)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryBar {
    pub emotion: Emotion,
    pub color: MoodColor,
    /// Bar height as a percentage of the chart.
    pub height_percent: f32,
    /// Older bars fade: 0.3 for the oldest, approaching 1.0 for the newest.
    pub opacity: f32,
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub emotion: Emotion,
    pub confidence_label: String,
    pub confidence_percent: f32,
    pub color: MoodColor,
    pub message: &'static str,
    pub bars: Vec<HistoryBar>,
    /// Shown instead of the chart when there is no history yet.
    pub empty_message: Option<&'static str>,
}

impl DashboardView {
    pub fn build(current: &EmotionSample, history: &HistoryBuffer) -> Self {
        let len = history.len();
        let bars = history
            .iter()
            .enumerate()
            .map(|(index, sample)| HistoryBar {
                emotion: sample.emotion,
                color: mood_color(sample.emotion),
                height_percent: sample.confidence * 100.0,
                opacity: 0.3 + (index as f32 / len as f32) * 0.7,
                tooltip: format!(
                    "{} ({})",
                    sample.emotion,
                    format_confidence(sample.confidence)
                ),
            })
            .collect();

        Self {
            emotion: current.emotion,
            confidence_label: format_confidence(current.confidence),
            confidence_percent: current.confidence * 100.0,
            color: mood_color(current.emotion),
            message: mood_message(current.emotion),
            bars,
            empty_message: history.is_empty().then_some(EMPTY_HISTORY_MESSAGE),
        }
    }
}
