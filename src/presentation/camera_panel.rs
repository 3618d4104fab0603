//! Camera panel — what sits where the video would be.

use crate::mirror::{CameraStatus, MirrorState};
use serde::Serialize;

pub const INACTIVE_MESSAGE: &str = "Camera is inactive. Click \"Start Camera\" to begin.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CameraPanel {
    Placeholder { text: &'static str },
    Alert { text: String },
    /// Video plus overlay.
    Feed,
}

impl CameraPanel {
    pub fn for_state(state: &MirrorState) -> Self {
        if let CameraStatus::Denied { message } = &state.camera {
            return CameraPanel::Alert {
                text: message.clone(),
            };
        }
        if state.active {
            CameraPanel::Feed
        } else {
            CameraPanel::Placeholder {
                text: INACTIVE_MESSAGE,
            }
        }
    }

    /// Label for the toggle button.
    pub fn toggle_label(active: bool) -> &'static str {
        if active {
            "Stop Camera"
        } else {
            "Start Camera"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CAMERA_DENIED_MESSAGE;

    #[test]
    fn inactive_shows_placeholder() {
        let state = MirrorState::new(20, 0);
        assert_eq!(
            CameraPanel::for_state(&state),
            CameraPanel::Placeholder {
                text: INACTIVE_MESSAGE
            }
        );
        assert_eq!(CameraPanel::toggle_label(state.active), "Start Camera");
    }

    #[test]
    fn denial_wins_over_mode() {
        let mut state = MirrorState::new(20, 0);
        state.camera = CameraStatus::Denied {
            message: CAMERA_DENIED_MESSAGE.into(),
        };
        for active in [true, false] {
            state.active = active;
            assert_eq!(
                CameraPanel::for_state(&state),
                CameraPanel::Alert {
                    text: CAMERA_DENIED_MESSAGE.into()
                }
            );
        }
    }

    #[test]
    fn active_shows_feed() {
        let mut state = MirrorState::new(20, 0);
        state.active = true;
        state.camera = CameraStatus::Starting;
        assert_eq!(CameraPanel::for_state(&state), CameraPanel::Feed);
        assert_eq!(CameraPanel::toggle_label(true), "Stop Camera");
    }
}
