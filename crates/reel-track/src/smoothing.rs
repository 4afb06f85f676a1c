//! Trajectory smoothing.
//!
//! A centered moving average damps per-frame detection jitter without
//! erasing genuine motion. Windows are clipped at the sequence
//! boundaries, so edge windows are smaller and asymmetric.

/// Smooth a trajectory of `(x, y)` positions with a centered moving
/// average.
///
/// Sequences no longer than the window are returned unchanged:
/// averaging them would collapse the whole trajectory into one value.
/// The output always has the same length as the input.
pub fn smooth_trajectory(positions: &[(f64, f64)], window: usize) -> Vec<(f64, f64)> {
    if positions.len() <= window {
        return positions.to_vec();
    }

    let half = window / 2;
    let mut smoothed = Vec::with_capacity(positions.len());

    for i in 0..positions.len() {
        let start = i.saturating_sub(half);
        let end = (i + half + 1).min(positions.len());
        let slice = &positions[start..end];

        let n = slice.len() as f64;
        let avg_x = slice.iter().map(|p| p.0).sum::<f64>() / n;
        let avg_y = slice.iter().map(|p| p.1).sum::<f64>() / n;
        smoothed.push((avg_x, avg_y));
    }

    smoothed
}

/// Median of a value sequence. Robust against a few outlier frames,
/// which is why the crop center uses it instead of the mean.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
