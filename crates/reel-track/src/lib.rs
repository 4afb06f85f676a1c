//! Face tracking and vertical reframing.
//!
//! Given a video segment of known size and duration, this crate
//! determines a single fixed horizontal crop that keeps the speaker in
//! frame and applies it through the caller-supplied [`VideoSource`].
//! Detection runs against one of two interchangeable backends picked
//! at construction time; see [`detector::default_detector`].
//!
//! Degradation is deliberate: detection hiccups become fallback
//! positions, an entirely face-free segment becomes a center crop, and
//! only a missing detection backend is fatal.

pub mod cache;
pub mod config;
pub mod detector;
pub mod error;
pub mod geometric;
pub mod smoothing;
pub mod source;
pub mod tracker;
#[cfg(feature = "opencv")]
pub mod yunet;

pub use config::TrackerConfig;
pub use detector::{default_detector, FaceDetector, RawFace};
pub use error::{TrackError, TrackResult};
pub use geometric::GeometricDetector;
pub use smoothing::smooth_trajectory;
pub use source::{CropPlan, VideoSource};
pub use tracker::{even_target_width, FaceTracker};
