//! Novelty curve smoothing and peak picking.

/// Centered moving average of odd length `size`. Size 1 returns the input.
///
/// Near the edges the average covers only the frames that exist.
pub fn smooth(curve: &[f32], size: usize) -> Vec<f32> {
    let half = size.max(1) / 2;
    if half == 0 {
        return curve.to_vec();
    }
    (0..curve.len())
        .map(|i| {
            let lo = i.saturating_sub(half);
            let hi = (i + half + 1).min(curve.len());
            curve[lo..hi].iter().sum::<f32>() / (hi - lo) as f32
        })
        .collect()
}

/// Pick slice frames from a (smoothed) novelty curve.
///
/// Frame `n` is a slice when it rises above the previous frame, is not below
/// the next frame, exceeds `threshold`, and lies at least `min_distance`
/// frames after the previous slice. The first and last frames never qualify.
pub fn pick_peaks(curve: &[f32], threshold: f32, min_distance: usize) -> Vec<usize> {
    let mut peaks = Vec::new();
    let mut last: Option<usize> = None;

    for n in 1..curve.len().saturating_sub(1) {
        let v = curve[n];
        if v <= threshold || v <= curve[n - 1] || v < curve[n + 1] {
            continue;
        }
        if last.is_some_and(|prev| n - prev < min_distance) {
            continue;
        }
        peaks.push(n);
        last = Some(n);
    }
    peaks
}
