pub mod generator;
pub mod history;
pub mod sampler;
pub mod types;

pub use generator::EmotionGenerator;
pub use history::{HistoryBuffer, DEFAULT_HISTORY_CAPACITY};
pub use sampler::{EmotionSampler, SamplerHandle, DEFAULT_SAMPLE_INTERVAL};
pub use types::{Emotion, EmotionSample, FacialExpression};
