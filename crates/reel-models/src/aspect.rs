//! Target aspect ratios for output video.

use serde::{Deserialize, Serialize};

/// Target aspect ratio for output video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AspectRatio {
    /// Width component
    pub width: u32,
    /// Height component
    pub height: u32,
}

impl AspectRatio {
    /// Create a new aspect ratio.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns width/height as float.
    pub fn ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Portrait 9:16 (TikTok, Instagram Reels, YouTube Shorts)
    pub const PORTRAIT: AspectRatio = AspectRatio { width: 9, height: 16 };

    /// Landscape 16:9
    pub const LANDSCAPE: AspectRatio = AspectRatio { width: 16, height: 9 };
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}
