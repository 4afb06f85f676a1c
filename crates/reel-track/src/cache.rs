//! Per-segment detection cache.
//!
//! Detections are keyed by the sample timestamp so repeated lookups at
//! the same time never re-invoke the detector. The cache belongs to a
//! single video segment: it is cleared when `track_and_crop` starts and
//! again when it finishes, so geometry from a previous segment can
//! never leak into the next one.

use std::collections::HashMap;

use reel_models::FaceDetection;

/// Quantize a timestamp in seconds to an exact millisecond key.
fn key(time: f64) -> i64 {
    (time * 1000.0).round() as i64
}

/// Cache of per-timestamp detection results, best-first.
#[derive(Debug, Default)]
pub struct DetectionCache {
    entries: HashMap<i64, Vec<FaceDetection>>,
}

impl DetectionCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up cached detections for a timestamp.
    pub fn get(&self, time: f64) -> Option<&Vec<FaceDetection>> {
        self.entries.get(&key(time))
    }

    /// Store detections for a timestamp.
    pub fn insert(&mut self, time: f64, detections: Vec<FaceDetection>) {
        self.entries.insert(key(time), detections);
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached timestamps.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reel_models::BoundingBox;

    fn det() -> FaceDetection {
        FaceDetection::from_bbox(&BoundingBox::new(0.0, 0.0, 10.0, 10.0), 0.8)
    }

    #[test]
    fn test_insert_and_get() {
        let mut cache = DetectionCache::new();
        cache.insert(1.25, vec![det()]);

        assert!(cache.get(1.25).is_some());
        assert!(cache.get(1.26).is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_key_quantization_is_exact() {
        let mut cache = DetectionCache::new();
        // 0.1 + 0.2 is not exactly 0.3 in f64, but both quantize to 300ms
        cache.insert(0.1 + 0.2, vec![det()]);
        assert!(cache.get(0.3).is_some());
    }

    #[test]
    fn test_clear() {
        let mut cache = DetectionCache::new();
        cache.insert(0.0, vec![det()]);
        cache.clear();
        assert!(cache.is_empty());
    }
}
