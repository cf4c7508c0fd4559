//! Peak extraction over an angle grid
//!
//! Turns a sampled pseudospectrum (or any real function of angle) into
//! discrete angle estimates. Only strict local maxima count: grid
//! endpoints and plateaus are never peaks. Two retention policies share
//! one entry point: keep the n strongest peaks, or keep every peak above
//! a threshold relative to the grid minimum.
//!
//! ## Example
//!
//! ```rust
//! use doasim::peaks::{find_peaks, PeakPolicy};
//!
//! let grid: Vec<f64> = (0..64).map(|i| i as f64 * 0.1).collect();
//! let f = |x: f64| (x - 2.0).cos();
//! let peaks = find_peaks(&f, &grid, PeakPolicy::TopN(1));
//! assert_eq!(peaks.len(), 1);
//! assert!((peaks[0] - 2.0).abs() < 0.1);
//! ```

/// Retention policy for detected peaks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PeakPolicy {
    /// Keep the `n` strongest strict local maxima.
    TopN(usize),
    /// Keep every strict local maximum whose height exceeds
    /// `min(f over grid) * factor`.
    Threshold(f64),
}

/// Extract peak angles of `f` sampled over `grid`, returned ascending by
/// angle (not by height). Returns fewer peaks than requested when fewer
/// strict local maxima exist.
pub fn find_peaks<F>(f: F, grid: &[f64], policy: PeakPolicy) -> Vec<f64>
where
    F: Fn(f64) -> f64,
{
    let values: Vec<f64> = grid.iter().map(|&x| f(x)).collect();
    let mut angles = match policy {
        PeakPolicy::TopN(n) => top_n_peaks(grid, &values, n),
        PeakPolicy::Threshold(factor) => thresholded_peaks(grid, &values, factor),
    };
    angles.sort_by(|a, b| a.partial_cmp(b).unwrap());
    angles
}

/// Convenience wrapper for the common top-n case.
pub fn find_top_peaks<F>(f: F, grid: &[f64], n: usize) -> Vec<f64>
where
    F: Fn(f64) -> f64,
{
    find_peaks(f, grid, PeakPolicy::TopN(n))
}

fn top_n_peaks(grid: &[f64], values: &[f64], n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    // Bounded collection of the n largest peaks, kept smallest-first so
    // the replacement candidate is always at index 0.
    let mut kept: Vec<(f64, f64)> = Vec::with_capacity(n);
    for i in strict_maxima(values) {
        let candidate = (values[i], grid[i]);
        if kept.len() < n {
            kept.push(candidate);
            kept.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
        } else if candidate.0 > kept[0].0 {
            kept[0] = candidate;
            kept.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
        }
    }
    kept.into_iter().map(|(_, angle)| angle).collect()
}

fn thresholded_peaks(grid: &[f64], values: &[f64], factor: f64) -> Vec<f64> {
    let floor = values.iter().copied().fold(f64::INFINITY, f64::min);
    let gate = floor * factor;
    strict_maxima(values)
        .into_iter()
        .filter(|&i| values[i] > gate)
        .map(|i| grid[i])
        .collect()
}

/// Indices of strict local maxima, endpoints excluded.
fn strict_maxima(values: &[f64]) -> Vec<usize> {
    let mut out = Vec::new();
    for i in 1..values.len().saturating_sub(1) {
        if values[i] > values[i - 1] && values[i] > values[i + 1] {
            out.push(i);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(values: &'static [f64]) -> impl Fn(f64) -> f64 {
        move |x: f64| values[x as usize]
    }

    fn index_grid(len: usize) -> Vec<f64> {
        (0..len).map(|i| i as f64).collect()
    }

    #[test]
    fn test_exact_peaks_ascending() {
        static V: [f64; 9] = [0.0, 3.0, 0.0, 0.0, 7.0, 0.0, 5.0, 0.0, 9.0];
        // Maxima at indices 1, 4, 6; 8 is an endpoint and never a peak.
        let grid = index_grid(V.len());
        let peaks = find_top_peaks(lookup(&V), &grid, 3);
        assert_eq!(peaks, vec![1.0, 4.0, 6.0]);
    }

    #[test]
    fn test_top_n_keeps_strongest() {
        static V: [f64; 9] = [0.0, 3.0, 0.0, 0.0, 7.0, 0.0, 5.0, 0.0, 0.0];
        let grid = index_grid(V.len());
        // Strongest two are at indices 4 (7.0) and 6 (5.0); output ascends
        // by angle.
        let peaks = find_top_peaks(lookup(&V), &grid, 2);
        assert_eq!(peaks, vec![4.0, 6.0]);
    }

    #[test]
    fn test_fewer_peaks_than_requested() {
        static V: [f64; 5] = [0.0, 1.0, 0.0, 0.5, 0.4];
        let grid = index_grid(V.len());
        let peaks = find_top_peaks(lookup(&V), &grid, 4);
        assert_eq!(peaks, vec![1.0, 3.0]);
    }

    #[test]
    fn test_plateau_is_not_a_peak() {
        static V: [f64; 6] = [0.0, 2.0, 2.0, 0.0, 1.0, 0.0];
        let grid = index_grid(V.len());
        let peaks = find_top_peaks(lookup(&V), &grid, 6);
        // The plateau at indices 1-2 fails the strict test on one side.
        assert_eq!(peaks, vec![4.0]);
    }

    #[test]
    fn test_monotonic_has_no_peaks() {
        static V: [f64; 5] = [0.0, 1.0, 2.0, 3.0, 4.0];
        let grid = index_grid(V.len());
        assert!(find_top_peaks(lookup(&V), &grid, 2).is_empty());
    }

    #[test]
    fn test_threshold_policy() {
        static V: [f64; 9] = [1.0, 3.0, 1.0, 1.0, 7.0, 1.0, 1.5, 1.0, 1.0];
        let grid = index_grid(V.len());
        // Floor is 1.0; gate at 2x keeps the peaks of height 3 and 7 but
        // drops the 1.5 bump.
        let peaks = find_peaks(lookup(&V), &grid, PeakPolicy::Threshold(2.0));
        assert_eq!(peaks, vec![1.0, 4.0]);
    }

    #[test]
    fn test_top_zero_is_empty() {
        static V: [f64; 5] = [0.0, 1.0, 0.0, 1.0, 0.0];
        let grid = index_grid(V.len());
        assert!(find_top_peaks(lookup(&V), &grid, 0).is_empty());
    }
}
