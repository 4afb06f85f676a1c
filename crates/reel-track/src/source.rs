//! Video source collaborator interface.
//!
//! The tracker never decodes video itself; it works against this trait.
//! Implementations wrap whatever decode layer the orchestrator uses and
//! hand back raster frames on demand plus derived cropped handles.

use async_trait::async_trait;
use image::RgbImage;

use crate::error::TrackResult;

/// A decodable video segment of known size and duration.
#[async_trait]
pub trait VideoSource: Send + Sync {
    /// Pixel dimensions `(width, height)`.
    fn size(&self) -> (u32, u32);

    /// Duration in seconds.
    fn duration(&self) -> f64;

    /// Extract the frame at a continuous timestamp.
    async fn frame_at(&self, time: f64) -> TrackResult<RgbImage>;

    /// Produce a derived view cropped to `[x, x + width]` horizontally,
    /// full height.
    async fn crop(&self, x: u32, width: u32) -> TrackResult<Self>
    where
        Self: Sized;
}

/// The fixed horizontal crop chosen for a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropPlan {
    /// Left edge of the crop window
    pub left: u32,
    /// Crop width (even, 9:16 against the source height)
    pub width: u32,
    /// Source height, carried through unchanged
    pub height: u32,
    /// The smoothed face center the crop was built around
    pub center_x: f64,
}
