//! Error types shared across the mirror pipeline.

use thiserror::Error;

/// Text shown to the user whenever the camera cannot be opened.
pub const CAMERA_DENIED_MESSAGE: &str =
    "Camera access denied. Please grant permission to use this feature.";

#[derive(Debug, Error)]
pub enum MirrorError {
    /// The user (or platform) refused access to the video device.
    #[error("Camera permission denied: {0}")]
    PermissionDenied(String),

    /// No usable device, or the device failed while starting.
    #[error("Camera unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MirrorError {
    /// True for the failures that come from acquiring the video source.
    pub fn is_camera_failure(&self) -> bool {
        matches!(
            self,
            MirrorError::PermissionDenied(_) | MirrorError::DeviceUnavailable(_)
        )
    }

    /// Message suitable for the camera panel.
    pub fn user_message(&self) -> String {
        if self.is_camera_failure() {
            CAMERA_DENIED_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}

// For callers that surface errors as plain strings
impl From<MirrorError> for String {
    fn from(e: MirrorError) -> String {
        e.to_string()
    }
}

pub type Result<T> = std::result::Result<T, MirrorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_failures_share_one_user_message() {
        let denied = MirrorError::PermissionDenied("NotAllowedError".into());
        let missing = MirrorError::DeviceUnavailable("no device".into());
        assert_eq!(denied.user_message(), CAMERA_DENIED_MESSAGE);
        assert_eq!(missing.user_message(), CAMERA_DENIED_MESSAGE);
    }

    #[test]
    fn other_errors_keep_their_display_text() {
        let err = MirrorError::Config("bad interval".into());
        assert!(!err.is_camera_failure());
        assert_eq!(err.user_message(), "Config error: bad interval");
        let as_string: String = err.into();
        assert_eq!(as_string, "Config error: bad interval");
    }
}
