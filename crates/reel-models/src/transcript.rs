//! Transcript segments.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by the validating constructor.
#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("segment start {start} must be before end {end}")]
    InvalidRange { start: f64, end: f64 },
}

/// One timestamped unit of transcribed speech.
///
/// Segments are expected in non-decreasing start order; callers that
/// build them from trusted transcripts may construct the struct
/// directly, `new` is for untrusted input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    /// Transcribed text
    pub text: String,
}

impl TranscriptSegment {
    /// Create a segment, rejecting inverted time ranges.
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Result<Self, TranscriptError> {
        if start >= end {
            return Err(TranscriptError::InvalidRange { start, end });
        }
        Ok(Self {
            start,
            end,
            text: text.into(),
        })
    }

    /// Segment duration in seconds.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}
