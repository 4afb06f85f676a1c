//! Shared data models for the Reelsmith clip pipeline.
//!
//! Everything here is plain data: geometry for face detections, the
//! transcript units consumed by clip selection, and the candidate clip
//! records produced by it. No I/O lives in this crate.

pub mod aspect;
pub mod clip;
pub mod detection;
pub mod rect;
pub mod transcript;

pub use aspect::AspectRatio;
pub use clip::{CandidateClip, ClipConstraints};
pub use detection::FaceDetection;
pub use rect::BoundingBox;
pub use transcript::TranscriptSegment;
