//! Read-only view models derived from [`MirrorState`]. Nothing here writes back.

pub mod avatar;
pub mod camera_panel;
pub mod dashboard;

pub use avatar::{AvatarAnimation, AvatarView};
pub use camera_panel::CameraPanel;
pub use dashboard::{DashboardView, HistoryBar, MoodColor};

use crate::mirror::MirrorState;
use serde::Serialize;

/// Everything the page shows, computed from one state snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MirrorView {
    pub toggle_label: &'static str,
    pub camera: CameraPanel,
    pub avatar: AvatarView,
    pub dashboard: DashboardView,
}

impl MirrorView {
    pub fn from_state(state: &MirrorState) -> Self {
        Self {
            toggle_label: CameraPanel::toggle_label(state.active),
            camera: CameraPanel::for_state(state),
            avatar: AvatarView::for_emotion(state.current.emotion),
            dashboard: DashboardView::build(&state.current, &state.history),
        }
    }
}
