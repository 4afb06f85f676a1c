//! Face detection backends.
//!
//! Two interchangeable implementations sit behind the [`FaceDetector`]
//! trait:
//!
//! 1. OpenCV YuNet (model-based, behind the `opencv` feature)
//! 2. Geometric skin-tone scan (always available)
//!
//! [`default_detector`] picks the best backend available at
//! construction time. A tracker cannot be built without at least one
//! working backend; that is the single fatal error in this crate.

use image::RgbImage;
use reel_models::BoundingBox;
use tracing::info;

use crate::error::TrackResult;

/// One raw face reported by a detection backend.
///
/// The bounding box is in coordinates relative to the analyzed frame
/// (all fields in `[0, 1]`), so results are independent of whatever
/// downscaling was applied before detection. Geometry-only backends
/// report `confidence: None`; the tracker estimates a confidence from
/// face area in that case.
#[derive(Debug, Clone, Copy)]
pub struct RawFace {
    /// Face bounding box in relative coordinates
    pub bbox: BoundingBox,
    /// Detector confidence, when the backend produces one
    pub confidence: Option<f64>,
}

/// Capability interface for face detection backends.
pub trait FaceDetector: Send {
    /// Detect faces in a raster frame.
    ///
    /// The frame may be a downscaled copy of the original; boxes are
    /// relative so the caller rescales them.
    fn detect(&mut self, frame: &RgbImage) -> TrackResult<Vec<RawFace>>;

    /// Best-effort release of backend resources. Must be safe to call
    /// more than once and must not panic.
    fn close(&mut self) {}

    /// Backend name for logging.
    fn name(&self) -> &'static str;
}

/// Select the best available detection backend.
///
/// Tries the YuNet model backend first when the `opencv` feature is
/// enabled and a model file is present, then falls back to the
/// geometric backend.
pub fn default_detector() -> TrackResult<Box<dyn FaceDetector>> {
    #[cfg(feature = "opencv")]
    {
        match crate::yunet::YuNetDetector::new() {
            Ok(detector) => {
                info!("using YuNet face detection backend");
                return Ok(Box::new(detector));
            }
            Err(e) => {
                tracing::warn!(error = %e, "YuNet backend unavailable, falling back to geometric detection");
            }
        }
    }

    info!("using geometric face detection backend");
    Ok(Box::new(crate::geometric::GeometricDetector::new()))
}
