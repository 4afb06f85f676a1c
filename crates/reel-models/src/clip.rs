//! Candidate clips and selection constraints.

use serde::{Deserialize, Serialize};

/// A ranked highlight window produced by clip selection.
///
/// Instances are never mutated after creation. After validation the
/// invariant holds: `min_duration <= duration() <= max_duration`,
/// `start < end <= video_duration`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateClip {
    /// Clip start in seconds
    pub start: f64,
    /// Clip end in seconds
    pub end: f64,
    /// Short title describing the moment
    pub title: String,
    /// Ranking signal, higher is better; not a probability
    pub virality_score: f64,
    /// Free-text category for why the clip is engaging (reporting only)
    pub hook_type: String,
}

impl CandidateClip {
    /// Clip duration in seconds.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Production parameters for clip selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClipConstraints {
    /// Maximum number of clips to return
    pub count: usize,
    /// Minimum clip duration in seconds
    pub min_duration: f64,
    /// Maximum clip duration in seconds
    pub max_duration: f64,
}

impl Default for ClipConstraints {
    fn default() -> Self {
        Self {
            count: 5,
            min_duration: 15.0,
            max_duration: 60.0,
        }
    }
}
