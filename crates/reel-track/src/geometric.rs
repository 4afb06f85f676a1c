//! Geometric face detection backend.
//!
//! A model-free fallback: mark skin-toned pixels, collapse them onto a
//! coarse grid, and treat connected skin regions as face candidates.
//! Much cruder than a neural detector, but it needs no model file and
//! never fails to construct. It reports no confidence; the tracker
//! estimates one from face area.

use image::RgbImage;
use reel_models::BoundingBox;
use tracing::debug;

use crate::detector::{FaceDetector, RawFace};
use crate::error::TrackResult;

/// Side length of one grid cell in pixels.
const CELL_SIZE: u32 = 8;

/// Fraction of skin pixels required to mark a grid cell.
const CELL_SKIN_THRESHOLD: f64 = 0.3;

/// Minimum component size in cells; single-cell blips are noise.
const MIN_COMPONENT_CELLS: usize = 2;

/// Geometry-only face detector based on skin-tone segmentation.
pub struct GeometricDetector;

impl GeometricDetector {
    /// Create the detector. Never fails.
    pub fn new() -> Self {
        Self
    }
}

impl Default for GeometricDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl FaceDetector for GeometricDetector {
    fn detect(&mut self, frame: &RgbImage) -> TrackResult<Vec<RawFace>> {
        let (width, height) = frame.dimensions();
        if width < CELL_SIZE || height < CELL_SIZE {
            return Ok(Vec::new());
        }

        let grid = skin_grid(frame);
        let components = connected_components(&grid);

        let mut faces = Vec::new();
        for cells in components {
            if cells.len() < MIN_COMPONENT_CELLS {
                continue;
            }

            let min_gx = cells.iter().map(|c| c.0).min().unwrap_or(0);
            let max_gx = cells.iter().map(|c| c.0).max().unwrap_or(0);
            let min_gy = cells.iter().map(|c| c.1).min().unwrap_or(0);
            let max_gy = cells.iter().map(|c| c.1).max().unwrap_or(0);

            let x = (min_gx * CELL_SIZE) as f64;
            let y = (min_gy * CELL_SIZE) as f64;
            let w = ((max_gx - min_gx + 1) * CELL_SIZE) as f64;
            let h = ((max_gy - min_gy + 1) * CELL_SIZE) as f64;

            faces.push(RawFace {
                bbox: BoundingBox::new(
                    x / width as f64,
                    y / height as f64,
                    w / width as f64,
                    h / height as f64,
                ),
                confidence: None,
            });
        }

        debug!(faces = faces.len(), "geometric detection complete");
        Ok(faces)
    }

    fn name(&self) -> &'static str {
        "geometric"
    }
}

/// Skin classification rule for one RGB pixel.
///
/// Classic RGB-space rule: dominant red channel, enough spread between
/// channels, and a brightness floor. Coarse but cheap, and it works on
/// the downscaled frames the tracker feeds us.
fn is_skin(r: u8, g: u8, b: u8) -> bool {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    r > 95 && g > 40 && b > 20 && (max - min) > 15 && r > g && r > b && r.abs_diff(g) > 15
}

/// Grid of cells marked skin/not-skin. Indexed `grid[gy][gx]`.
fn skin_grid(frame: &RgbImage) -> Vec<Vec<bool>> {
    let (width, height) = frame.dimensions();
    let grid_w = width / CELL_SIZE;
    let grid_h = height / CELL_SIZE;

    let mut grid = vec![vec![false; grid_w as usize]; grid_h as usize];
    let cell_pixels = (CELL_SIZE * CELL_SIZE) as f64;

    for gy in 0..grid_h {
        for gx in 0..grid_w {
            let mut skin_count = 0u32;
            for dy in 0..CELL_SIZE {
                for dx in 0..CELL_SIZE {
                    let p = frame.get_pixel(gx * CELL_SIZE + dx, gy * CELL_SIZE + dy);
                    if is_skin(p[0], p[1], p[2]) {
                        skin_count += 1;
                    }
                }
            }
            grid[gy as usize][gx as usize] = skin_count as f64 / cell_pixels > CELL_SKIN_THRESHOLD;
        }
    }

    grid
}

/// 4-connected components over marked grid cells, as `(gx, gy)` lists.
fn connected_components(grid: &[Vec<bool>]) -> Vec<Vec<(u32, u32)>> {
    let grid_h = grid.len();
    let grid_w = grid.first().map(|row| row.len()).unwrap_or(0);
    let mut visited = vec![vec![false; grid_w]; grid_h];
    let mut components = Vec::new();

    for gy in 0..grid_h {
        for gx in 0..grid_w {
            if !grid[gy][gx] || visited[gy][gx] {
                continue;
            }

            let mut cells = Vec::new();
            let mut stack = vec![(gx, gy)];
            visited[gy][gx] = true;

            while let Some((cx, cy)) = stack.pop() {
                cells.push((cx as u32, cy as u32));

                let neighbors = [
                    (cx.wrapping_sub(1), cy),
                    (cx + 1, cy),
                    (cx, cy.wrapping_sub(1)),
                    (cx, cy + 1),
                ];
                for (nx, ny) in neighbors {
                    if nx < grid_w && ny < grid_h && grid[ny][nx] && !visited[ny][nx] {
                        visited[ny][nx] = true;
                        stack.push((nx, ny));
                    }
                }
            }

            components.push(cells);
        }
    }

    components
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    /// Dark frame with a skin-colored rectangle at the given bounds.
    fn frame_with_face(width: u32, height: u32, fx: u32, fy: u32, fw: u32, fh: u32) -> RgbImage {
        let mut img = RgbImage::from_pixel(width, height, Rgb([20, 20, 20]));
        for y in fy..(fy + fh).min(height) {
            for x in fx..(fx + fw).min(width) {
                img.put_pixel(x, y, Rgb([210, 150, 120]));
            }
        }
        img
    }

    #[test]
    fn test_detects_skin_region() {
        let frame = frame_with_face(320, 180, 96, 32, 64, 64);
        let mut detector = GeometricDetector::new();

        let faces = detector.detect(&frame).unwrap();
        assert_eq!(faces.len(), 1);

        let face = &faces[0];
        // Center should land inside the painted region (relative coords)
        let cx = face.bbox.cx();
        assert!(cx > 96.0 / 320.0 && cx < 160.0 / 320.0, "cx = {}", cx);
        assert!(face.confidence.is_none());
    }

    #[test]
    fn test_empty_frame_yields_no_faces() {
        let frame = RgbImage::from_pixel(320, 180, Rgb([10, 30, 60]));
        let mut detector = GeometricDetector::new();
        assert!(detector.detect(&frame).unwrap().is_empty());
    }

    #[test]
    fn test_two_separated_regions() {
        let mut frame = frame_with_face(320, 180, 16, 32, 48, 48);
        for y in 32..80 {
            for x in 240..288 {
                frame.put_pixel(x, y, Rgb([200, 140, 110]));
            }
        }

        let mut detector = GeometricDetector::new();
        let faces = detector.detect(&frame).unwrap();
        assert_eq!(faces.len(), 2);
    }

    #[test]
    fn test_tiny_frame_is_tolerated() {
        let frame = RgbImage::from_pixel(4, 4, Rgb([210, 150, 120]));
        let mut detector = GeometricDetector::new();
        assert!(detector.detect(&frame).unwrap().is_empty());
    }

    #[test]
    fn test_is_skin_rule() {
        assert!(is_skin(210, 150, 120));
        assert!(!is_skin(20, 20, 20));
        assert!(!is_skin(100, 200, 100)); // green-dominant
    }
}
