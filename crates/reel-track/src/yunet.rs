//! OpenCV YuNet face detection backend.
//!
//! YuNet is a lightweight CNN face detector exposed through OpenCV's
//! FaceDetectorYN API. This backend is optional: it needs system OpenCV
//! with the DNN module plus a model file on disk, so the whole module
//! sits behind the `opencv` feature and the factory falls back to the
//! geometric backend when construction fails.

use image::RgbImage;
use opencv::core::{Mat, Size, CV_8UC3};
use opencv::objdetect::FaceDetectorYN;
use opencv::prelude::{FaceDetectorYNTrait, MatTraitConst};
use reel_models::BoundingBox;
use tracing::{debug, info, warn};

use crate::detector::{FaceDetector, RawFace};
use crate::error::{TrackError, TrackResult};

/// Confidence floor; detections below this are dropped to reduce
/// false positives (matches the short-range model defaults).
const MIN_DETECTION_CONFIDENCE: f64 = 0.5;

/// Model file locations in preference order.
const MODEL_PATHS: &[&str] = &[
    "models/face_detection_yunet_2023mar.onnx",
    "models/face_detection_yunet_2023mar_int8.onnx",
    "/usr/local/share/reelsmith/face_detection_yunet_2023mar.onnx",
];

fn find_model_path() -> Option<String> {
    if let Ok(path) = std::env::var("REEL_YUNET_MODEL") {
        if std::path::Path::new(&path).exists() {
            return Some(path);
        }
        warn!(path = %path, "REEL_YUNET_MODEL set but file does not exist");
    }
    MODEL_PATHS
        .iter()
        .find(|p| std::path::Path::new(p).exists())
        .map(|p| (*p).to_string())
}

/// Model-based face detector wrapping OpenCV's FaceDetectorYN.
pub struct YuNetDetector {
    detector: opencv::core::Ptr<FaceDetectorYN>,
    input_size: (i32, i32),
}

impl YuNetDetector {
    /// Create a detector from the first model file found.
    pub fn new() -> TrackResult<Self> {
        let model_path = find_model_path().ok_or_else(|| {
            TrackError::ModelNotFound(
                "no YuNet model file found; set REEL_YUNET_MODEL or place one under models/"
                    .to_string(),
            )
        })?;

        let detector = FaceDetectorYN::create(
            &model_path,
            "",
            Size::new(320, 320),
            MIN_DETECTION_CONFIDENCE as f32,
            0.3, // NMS threshold
            5000,
            0, // CPU backend
            0,
        )
        .map_err(|e| TrackError::detection_failed(format!("FaceDetectorYN::create: {}", e)))?;

        info!(model = %model_path, "YuNet face detector initialized");
        Ok(Self {
            detector,
            input_size: (320, 320),
        })
    }

    /// Copy an RGB frame into a BGR Mat the way OpenCV expects.
    fn frame_to_mat(frame: &RgbImage) -> TrackResult<Mat> {
        let (width, height) = frame.dimensions();
        let mut bgr = Vec::with_capacity((width * height * 3) as usize);
        for pixel in frame.pixels() {
            bgr.push(pixel[2]);
            bgr.push(pixel[1]);
            bgr.push(pixel[0]);
        }

        Mat::from_slice(&bgr)
            .and_then(|m| m.reshape(3, height as i32).map(|r| r.clone_pointee()))
            .map_err(|e| TrackError::detection_failed(format!("Mat conversion: {}", e)))
    }
}

impl FaceDetector for YuNetDetector {
    fn detect(&mut self, frame: &RgbImage) -> TrackResult<Vec<RawFace>> {
        let (width, height) = frame.dimensions();
        let mat = Self::frame_to_mat(frame)?;

        if mat.typ() != CV_8UC3 {
            return Err(TrackError::detection_failed("expected 8UC3 input"));
        }

        if self.input_size != (width as i32, height as i32) {
            self.detector
                .set_input_size(Size::new(width as i32, height as i32))
                .map_err(|e| TrackError::detection_failed(format!("set_input_size: {}", e)))?;
            self.input_size = (width as i32, height as i32);
        }

        let mut faces = Mat::default();
        self.detector
            .detect(&mat, &mut faces)
            .map_err(|e| TrackError::detection_failed(format!("detect: {}", e)))?;

        let mut results = Vec::new();
        for row in 0..faces.rows() {
            // Row layout: x, y, w, h, 5 landmark pairs, score
            let x = *faces.at_2d::<f32>(row, 0).unwrap_or(&0.0) as f64;
            let y = *faces.at_2d::<f32>(row, 1).unwrap_or(&0.0) as f64;
            let w = *faces.at_2d::<f32>(row, 2).unwrap_or(&0.0) as f64;
            let h = *faces.at_2d::<f32>(row, 3).unwrap_or(&0.0) as f64;
            let score = *faces.at_2d::<f32>(row, 14).unwrap_or(&0.0) as f64;

            if score < MIN_DETECTION_CONFIDENCE || w <= 0.0 || h <= 0.0 {
                continue;
            }

            results.push(RawFace {
                bbox: BoundingBox::new(
                    x / width as f64,
                    y / height as f64,
                    w / width as f64,
                    h / height as f64,
                ),
                confidence: Some(score.min(1.0)),
            });
        }

        debug!(faces = results.len(), "YuNet detection complete");
        Ok(results)
    }

    fn close(&mut self) {
        // FaceDetectorYN releases with the Ptr; nothing to do beyond logging.
        debug!("YuNet detector closed");
    }

    fn name(&self) -> &'static str {
        "yunet"
    }
}
