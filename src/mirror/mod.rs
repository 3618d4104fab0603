pub mod controller;
pub mod state;


pub use controller::MoodMirror;
pub use state::{CameraStatus, MirrorState};
