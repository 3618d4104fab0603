//! Random reading generator — the stand-in for a real classifier.
//!
//! Emotion and expression are drawn independently, so a "happy" emotion can
//! pair with a "frown" expression.

use super::types::{Emotion, EmotionSample, FacialExpression, MAX_CONFIDENCE, MIN_CONFIDENCE};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct EmotionGenerator {
    rng: StdRng,
}

impl EmotionGenerator {
    /// Seeded generator for reproducible runs; entropy-seeded when `seed` is `None`.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Split off an independent generator, deterministic if `self` is.
    pub fn fork(&mut self) -> Self {
        Self {
            rng: StdRng::seed_from_u64(self.rng.gen()),
        }
    }

    pub fn next_emotion(&mut self) -> Emotion {
        Emotion::ALL[self.rng.gen_range(0..Emotion::ALL.len())]
    }

    pub fn next_expression(&mut self) -> FacialExpression {
        FacialExpression::ALL[self.rng.gen_range(0..FacialExpression::ALL.len())]
    }

    pub fn next_confidence(&mut self) -> f32 {
        self.rng.gen_range(MIN_CONFIDENCE..MAX_CONFIDENCE)
    }

    /// Produce one sample stamped with `timestamp` plus an unrelated expression.
    pub fn next_reading(&mut self, timestamp: i64) -> (EmotionSample, FacialExpression) {
        let emotion = self.next_emotion();
        let expression = self.next_expression();
        let confidence = self.next_confidence();
        (EmotionSample::new(emotion, confidence, timestamp), expression)
    }
}
