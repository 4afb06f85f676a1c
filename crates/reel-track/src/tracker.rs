//! Face tracking and static crop planning.
//!
//! The tracker samples a handful of frames across a segment, records
//! where the dominant face sits in each, smooths that trajectory, and
//! commits to a single 9:16 crop window for the whole segment. One
//! static crop trades perfect per-frame tracking for output stability;
//! a virtual camera that chases every detection looks far worse on
//! noisy detections than a well-placed fixed frame.

use image::imageops::{self, FilterType};
use image::RgbImage;
use reel_models::{AspectRatio, BoundingBox, FaceDetection};
use tracing::{debug, info, warn};

use crate::cache::DetectionCache;
use crate::config::TrackerConfig;
use crate::detector::{default_detector, FaceDetector};
use crate::error::TrackResult;
use crate::smoothing::{median, smooth_trajectory};
use crate::source::{CropPlan, VideoSource};

/// Target crop width for a source of the given height: the 9:16 width,
/// rounded to the nearest integer and then adjusted down to an even
/// value (codecs require even dimensions).
pub fn even_target_width(height: u32) -> u32 {
    let target = (height as f64 * AspectRatio::PORTRAIT.ratio()).round() as u32;
    if target % 2 == 1 {
        target - 1
    } else {
        target
    }
}

/// Tracks the dominant face across a video segment and reframes it to
/// a vertical crop.
///
/// Owns the detection backend and a per-segment detection cache. Not
/// safe to use for two segments at once: the cache is reset at segment
/// boundaries, so interleaved `track_and_crop` calls on one instance
/// would observe each other's geometry.
pub struct FaceTracker {
    detector: Box<dyn FaceDetector>,
    cache: DetectionCache,
    config: TrackerConfig,
    closed: bool,
}

impl FaceTracker {
    /// Create a tracker with the best available detection backend.
    ///
    /// Fails only when no detection backend can be constructed; that is
    /// the single unrecoverable error in this pipeline.
    pub fn new() -> TrackResult<Self> {
        Ok(Self::with_detector(
            default_detector()?,
            TrackerConfig::default(),
        ))
    }

    /// Create a tracker with an explicit backend and configuration.
    pub fn with_detector(detector: Box<dyn FaceDetector>, config: TrackerConfig) -> Self {
        Self {
            detector,
            cache: DetectionCache::new(),
            config,
            closed: false,
        }
    }

    /// Detect faces in a single frame, best-first.
    ///
    /// When `time` is given, a cached result for that timestamp is
    /// returned unchanged without re-invoking the detector, and fresh
    /// results are cached under it. Detection errors are logged and
    /// reported as zero faces; they are never fatal.
    pub fn detect_faces_in_frame(
        &mut self,
        frame: &RgbImage,
        time: Option<f64>,
    ) -> Vec<FaceDetection> {
        if let Some(t) = time {
            if let Some(cached) = self.cache.get(t) {
                return cached.clone();
            }
        }

        let (width, height) = frame.dimensions();
        let small_w = ((width as f64 * self.config.downscale) as u32).max(1);
        let small_h = ((height as f64 * self.config.downscale) as u32).max(1);
        let small = imageops::resize(frame, small_w, small_h, FilterType::Triangle);

        let raw = match self.detector.detect(&small) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(backend = self.detector.name(), error = %e, "face detection error");
                Vec::new()
            }
        };

        let frame_area = width as f64 * height as f64;
        let mut faces: Vec<FaceDetection> = raw
            .into_iter()
            .filter_map(|rf| {
                // Boxes are relative, so scaling back to original-frame
                // coordinates undoes the downscale in one step.
                let bbox = BoundingBox::from_relative(&rf.bbox, width, height).clamp(width, height);
                if bbox.area() / frame_area < self.config.min_face_area_ratio {
                    return None;
                }
                let confidence = match rf.confidence {
                    Some(c) => c.min(1.0),
                    None => self.estimate_confidence(bbox.area(), frame_area),
                };
                Some(FaceDetection::from_bbox(&bbox, confidence))
            })
            .collect();

        faces.sort_by(|a, b| {
            b.rank_score()
                .partial_cmp(&a.rank_score())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        if let Some(t) = time {
            self.cache.insert(t, faces.clone());
        }

        faces
    }

    /// Confidence estimate for geometry-only backends: a normalized
    /// function of face area relative to frame area, capped at 1.0.
    fn estimate_confidence(&self, face_area: f64, frame_area: f64) -> f64 {
        (face_area / (frame_area * self.config.reference_face_area_ratio)).min(1.0)
    }

    /// Adaptive sample count: few samples on short segments, slightly
    /// more on long ones, bounding total detection cost either way.
    fn sample_count(&self, duration: f64) -> usize {
        if duration > 10.0 {
            let (lo, hi) = self.config.long_segment_samples;
            ((duration / 4.0) as usize).clamp(lo, hi)
        } else {
            let (lo, hi) = self.config.short_segment_samples;
            ((duration / 3.0) as usize).clamp(lo, hi)
        }
    }

    /// Compute the fixed crop window for a segment, or `None` when the
    /// source is already at or narrower than the 9:16 target width.
    ///
    /// Per-frame failures (bad frame, detector hiccup) fall back to the
    /// last known position, then to the frame center; this method never
    /// fails on account of a single sample.
    pub async fn plan_crop<S: VideoSource>(&mut self, source: &S) -> Option<CropPlan> {
        let (width, height) = source.size();
        let target_width = even_target_width(height);

        if width <= target_width {
            info!(width, target_width, "segment already at target aspect, skipping face tracking");
            return None;
        }

        // Fresh cache for this segment; stale geometry must not leak in.
        self.cache.clear();

        let duration = source.duration();
        let num_samples = self.sample_count(duration);
        let frame_center = width as f64 / 2.0;

        info!(samples = num_samples, duration, "analyzing frames for face tracking");

        let step = if num_samples > 1 {
            duration / (num_samples - 1) as f64
        } else {
            0.0
        };

        let mut positions: Vec<f64> = Vec::with_capacity(num_samples);
        for i in 0..num_samples {
            let t = step * i as f64;

            let best = match source.frame_at(t).await {
                Ok(frame) => self
                    .detect_faces_in_frame(&frame, Some(t))
                    .first()
                    .map(|f| f.cx),
                Err(e) => {
                    warn!(time = t, error = %e, "frame extraction failed, using fallback position");
                    None
                }
            };

            match best {
                Some(cx) => {
                    debug!(sample = i + 1, time = t, center_x = cx, "face found");
                    positions.push(cx);
                }
                None => {
                    let fallback = positions.last().copied().unwrap_or(frame_center);
                    debug!(sample = i + 1, time = t, "no face, using fallback position");
                    positions.push(fallback);
                }
            }
        }

        // The fallback above guarantees one position per sample, but an
        // empty trajectory still degrades to a center crop.
        let center_x = if positions.is_empty() {
            warn!("no positions recorded, using center crop");
            frame_center
        } else {
            let trajectory: Vec<(f64, f64)> = positions
                .iter()
                .map(|&x| (x, height as f64 / 2.0))
                .collect();
            let smoothed = smooth_trajectory(&trajectory, self.config.crop_smoothing_window);
            let xs: Vec<f64> = smoothed.iter().map(|p| p.0).collect();
            median(&xs)
        };

        // Keep the crop window fully inside the frame.
        let half = target_width as f64 / 2.0;
        let center = center_x.max(half).min(width as f64 - half);
        let left = ((center - half).round() as u32).min(width - target_width);

        // Release per-segment memory on the way out.
        self.cache.clear();

        debug!(left, target_width, center = center, "crop plan computed");
        Some(CropPlan {
            left,
            width: target_width,
            height,
            center_x: center,
        })
    }

    /// Track the speaker across the segment and return a cropped view.
    ///
    /// Returns the source unchanged when it is already narrow enough;
    /// this design only ever narrows, never widens.
    pub async fn track_and_crop<S: VideoSource + Clone>(&mut self, source: &S) -> TrackResult<S> {
        match self.plan_crop(source).await {
            None => Ok(source.clone()),
            Some(plan) => {
                info!(
                    left = plan.left,
                    width = plan.width,
                    height = plan.height,
                    "cropping segment to 9:16"
                );
                source.crop(plan.left, plan.width).await
            }
        }
    }

    /// Release detector resources and drop cached detections.
    ///
    /// Safe to call multiple times; cleanup problems are logged by the
    /// backend and never surface as errors.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.cache.clear();
        self.detector.close();
        self.closed = true;
        debug!("face tracking resources released");
    }
}

impl Drop for FaceTracker {
    fn drop(&mut self) {
        self.close();
    }
}
