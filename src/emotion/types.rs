//! Core value types: the simulated emotion, the facial expression that drives
//! the overlay, and the immutable sample produced on every sampler tick.

use serde::{Deserialize, Serialize};
use std::fmt;

// ── Emotion ────────────────────────────────────────────────

/// Emotion reported to the dashboard and avatar. Unordered; used as a display key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Sad,
    Surprised,
    Disgusted,
    Neutral,
}

impl Emotion {
    pub const ALL: [Emotion; 5] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Surprised,
        Emotion::Disgusted,
        Emotion::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Surprised => "surprised",
            Emotion::Disgusted => "disgusted",
            Emotion::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Facial Expression ──────────────────────────────────────

/// Expression drawn by the overlay. Independent of [`Emotion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FacialExpression {
    Smile,
    Frown,
    EyebrowRaise,
    Squint,
    Neutral,
}

impl FacialExpression {
    pub const ALL: [FacialExpression; 5] = [
        FacialExpression::Smile,
        FacialExpression::Frown,
        FacialExpression::EyebrowRaise,
        FacialExpression::Squint,
        FacialExpression::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FacialExpression::Smile => "smile",
            FacialExpression::Frown => "frown",
            FacialExpression::EyebrowRaise => "eyebrow-raise",
            FacialExpression::Squint => "squint",
            FacialExpression::Neutral => "neutral",
        }
    }
}

impl fmt::Display for FacialExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Emotion Sample ─────────────────────────────────────────

/// Lowest confidence the sampler can produce.
pub const MIN_CONFIDENCE: f32 = 0.6;
/// Exclusive upper bound of the confidence range.
pub const MAX_CONFIDENCE: f32 = 1.0;

/// One simulated reading. Created once per sampler tick and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionSample {
    pub emotion: Emotion,
    /// In `[0.6, 1.0)` for generated samples.
    pub confidence: f32,
    /// Wall-clock milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl EmotionSample {
    pub fn new(emotion: Emotion, confidence: f32, timestamp: i64) -> Self {
        Self {
            emotion,
            confidence,
            timestamp,
        }
    }

    /// Placeholder shown before the first tick.
    pub fn initial(timestamp: i64) -> Self {
        Self::new(Emotion::Neutral, 0.8, timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expression_names_match_wire_format() {
        for expr in FacialExpression::ALL {
            let json = serde_json::to_string(&expr).unwrap();
            assert_eq!(json, format!("\"{}\"", expr.as_str()));
        }
        assert_eq!(FacialExpression::EyebrowRaise.to_string(), "eyebrow-raise");
    }

    #[test]
    fn emotion_names_are_lowercase() {
        let names: Vec<String> = Emotion::ALL.iter().map(|e| e.to_string()).collect();
        assert_eq!(
            names,
            vec!["happy", "sad", "surprised", "disgusted", "neutral"]
        );
    }

    #[test]
    fn initial_sample_is_neutral() {
        let sample = EmotionSample::initial(42);
        assert_eq!(sample.emotion, Emotion::Neutral);
        assert!((sample.confidence - 0.8).abs() < f32::EPSILON);
        assert_eq!(sample.timestamp, 42);
    }
}
