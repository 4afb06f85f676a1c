//! Face detection records.

use serde::{Deserialize, Serialize};

use crate::rect::BoundingBox;

/// One face found in a frame, in original-frame pixel coordinates.
///
/// Immutable once produced by the detection step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceDetection {
    /// Face center x-coordinate
    pub cx: f64,
    /// Face center y-coordinate
    pub cy: f64,
    /// Face box width
    pub width: f64,
    /// Face box height
    pub height: f64,
    /// Detection confidence in `[0, 1]`
    pub confidence: f64,
    /// Face box area in pixels
    pub area: f64,
}

impl FaceDetection {
    /// Build a detection from a pixel-space bounding box and a confidence.
    pub fn from_bbox(bbox: &BoundingBox, confidence: f64) -> Self {
        Self {
            cx: bbox.cx(),
            cy: bbox.cy(),
            width: bbox.width,
            height: bbox.height,
            confidence,
            area: bbox.area(),
        }
    }

    /// Ranking key: larger, more-confident faces rank first.
    #[inline]
    pub fn rank_score(&self) -> f64 {
        self.confidence * self.area
    }
}
