//! Mood avatar — an emoji and an animation per emotion.

use crate::emotion::Emotion;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AvatarAnimation {
    Bounce,
    Pulse,
    Ping,
    Spin,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvatarView {
    pub glyph: &'static str,
    pub animation: AvatarAnimation,
}

impl AvatarView {
    pub fn for_emotion(emotion: Emotion) -> Self {
        let (glyph, animation) = match emotion {
            Emotion::Happy => ("😊", AvatarAnimation::Bounce),
            Emotion::Sad => ("😢", AvatarAnimation::Pulse),
            Emotion::Surprised => ("😲", AvatarAnimation::Ping),
            Emotion::Disgusted => ("🤢", AvatarAnimation::Spin),
            Emotion::Neutral => ("😐", AvatarAnimation::None),
        };
        Self { glyph, animation }
    }
}
