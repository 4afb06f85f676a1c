//! Pixel-space bounding boxes.

use serde::{Deserialize, Serialize};

/// Bounding box in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge x-coordinate
    pub x: f64,
    /// Top edge y-coordinate
    pub y: f64,
    /// Box width
    pub width: f64,
    /// Box height
    pub height: f64,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Scale a box given in relative coordinates (all fields in `[0, 1]`)
    /// up to pixel coordinates for a frame of the given size.
    pub fn from_relative(rel: &BoundingBox, frame_width: u32, frame_height: u32) -> Self {
        let w = frame_width as f64;
        let h = frame_height as f64;
        Self {
            x: rel.x * w,
            y: rel.y * h,
            width: rel.width * w,
            height: rel.height * h,
        }
    }

    /// Center x-coordinate.
    #[inline]
    pub fn cx(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Center y-coordinate.
    #[inline]
    pub fn cy(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Box area in pixels.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Clamp box to frame boundaries while preserving center when possible.
    pub fn clamp(&self, frame_width: u32, frame_height: u32) -> BoundingBox {
        let frame_width = frame_width as f64;
        let frame_height = frame_height as f64;

        let mut x = self.x.max(0.0);
        let mut y = self.y.max(0.0);
        let width = self.width.min(frame_width);
        let height = self.height.min(frame_height);

        x = x.min(frame_width - width);
        y = y.min(frame_height - height);

        BoundingBox { x, y, width, height }
    }
}
