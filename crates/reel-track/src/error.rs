//! Error types for face tracking.

use thiserror::Error;

/// Result type for tracking operations.
pub type TrackResult<T> = Result<T, TrackError>;

/// Errors that can occur during face tracking and reframing.
#[derive(Debug, Error)]
pub enum TrackError {
    #[error("no face detection backend available")]
    DetectorUnavailable,

    #[error("face detection failed: {0}")]
    DetectionFailed(String),

    #[error("frame extraction failed at {time:.2}s: {message}")]
    FrameExtraction { time: f64, message: String },

    #[error("video crop failed: {0}")]
    CropFailed(String),

    #[error("model not found: {0}")]
    ModelNotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl TrackError {
    /// Create a detection failure error.
    pub fn detection_failed(message: impl Into<String>) -> Self {
        Self::DetectionFailed(message.into())
    }

    /// Create a frame extraction error.
    pub fn frame_extraction(time: f64, message: impl Into<String>) -> Self {
        Self::FrameExtraction {
            time,
            message: message.into(),
        }
    }

    /// Create a crop failure error.
    pub fn crop_failed(message: impl Into<String>) -> Self {
        Self::CropFailed(message.into())
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}
