//! Bounded emotion history — the newest samples, oldest first.

use super::types::EmotionSample;
use serde::Serialize;
use std::collections::VecDeque;

/// Number of samples the dashboard keeps.
pub const DEFAULT_HISTORY_CAPACITY: usize = 20;

/// Append-only, capacity-bounded sequence of samples in chronological order.
///
/// Appending at capacity evicts the oldest sample. There is no other removal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryBuffer {
    samples: VecDeque<EmotionSample>,
    #[serde(skip)]
    capacity: usize,
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryBuffer {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// A capacity of zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append in place, evicting the oldest sample when full.
    pub fn push(&mut self, sample: EmotionSample) {
        while self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// Functional append: returns the new bounded sequence and leaves `self` untouched.
    pub fn appended(&self, sample: EmotionSample) -> Self {
        let mut next = self.clone();
        next.push(sample);
        next
    }

    /// Samples in chronological order (oldest first).
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &EmotionSample> + '_ {
        self.samples.iter()
    }

    pub fn latest(&self) -> Option<&EmotionSample> {
        self.samples.back()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<'a> IntoIterator for &'a HistoryBuffer {
    type Item = &'a EmotionSample;
    type IntoIter = std::collections::vec_deque::Iter<'a, EmotionSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

// ── Tests ──────────────────────────────────────────────────
