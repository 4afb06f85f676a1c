//! Configuration for the face tracking pipeline.

/// Configuration for the face tracking pipeline.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Downscale factor applied to frames before detection (default: 0.5)
    pub downscale: f64,

    /// Default moving-average window for trajectory smoothing (default: 5)
    pub smoothing_window: usize,

    /// Tighter window used when smoothing the crop trajectory (default: 3)
    pub crop_smoothing_window: usize,

    /// Minimum face area as fraction of frame area; smaller blobs are
    /// discarded as noise (default: 0.005)
    pub min_face_area_ratio: f64,

    /// Face-to-frame area fraction that maps to confidence 1.0 for
    /// geometry-only detectors (default: 0.15)
    pub reference_face_area_ratio: f64,

    /// Sample count bounds for short segments, <= 10s (default: 3..=6)
    pub short_segment_samples: (usize, usize),

    /// Sample count bounds for longer segments (default: 6..=8)
    pub long_segment_samples: (usize, usize),
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            downscale: 0.5,
            smoothing_window: 5,
            crop_smoothing_window: 3,
            min_face_area_ratio: 0.005,
            reference_face_area_ratio: 0.15,
            short_segment_samples: (3, 6),
            long_segment_samples: (6, 8),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrackerConfig::default();
        assert_eq!(config.downscale, 0.5);
        assert_eq!(config.crop_smoothing_window, 3);
        assert!(config.short_segment_samples.0 <= config.short_segment_samples.1);
        assert!(config.long_segment_samples.0 <= config.long_segment_samples.1);
    }
}
