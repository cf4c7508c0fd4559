//! Classical beamformer (CBF) DOA estimator
//!
//! Brute-force grid search: accumulate beamformed energy
//! `sum_k |a(theta)^H y(t_k)|^2` over K snapshots for every candidate
//! angle and return the angle with the most energy. Resolution is bounded
//! below by the grid spacing; there is no interpolation or refinement.
//!
//! Single-source only: the conventional beamformer cannot separate
//! multiple emitters, so a simulation with any other source count is
//! rejected up front.
//!
//! With the `parallel` feature the grid scan runs on Rayon; the reduction
//! preserves the first-seen tie-break of the sequential scan.
//!
//! ## Example
//!
//! ```rust
//! use doasim::antenna::AntennaArray;
//! use doasim::cbf::CbfEstimator;
//! use doasim::simulation::{NoiseModel, Simulation};
//! use doasim::source::Source;
//!
//! let array = AntennaArray::linear(8, 0.15).unwrap();
//! let src = Source::tone(0.3, 1e5);
//! let mut sim = Simulation::new(array, 1e9, NoiseModel::SpectralDensity(0.001), vec![src])
//!     .unwrap()
//!     .with_seed(1);
//! let est = CbfEstimator::new(2e6, 32).estimate(&mut sim).unwrap();
//! assert!((est - 0.3).abs() < 0.1);
//! ```

use crate::simulation::Simulation;
use crate::types::{DoaError, DoaResult, Snapshot};
use num_complex::Complex64;
use std::f64::consts::FRAC_PI_2;

/// Number of grid points in the default candidate-angle grid.
const DEFAULT_GRID_POINTS: usize = 100;

/// Conventional beamformer over a fixed candidate-angle grid.
#[derive(Debug, Clone)]
pub struct CbfEstimator {
    /// Snapshot sampling rate in Hz.
    sample_rate: f64,
    /// Number of snapshots K to accumulate.
    num_snapshots: usize,
    /// Candidate angles in radians.
    grid: Vec<f64>,
}

impl CbfEstimator {
    /// Estimator over the default grid of 100 angles uniformly spaced on
    /// `[-pi/2, pi/2]`.
    pub fn new(sample_rate: f64, num_snapshots: usize) -> Self {
        Self {
            sample_rate,
            num_snapshots,
            grid: default_grid(),
        }
    }

    /// Replace the candidate-angle grid.
    pub fn with_grid(mut self, grid: Vec<f64>) -> Self {
        self.grid = grid;
        self
    }

    pub fn grid(&self) -> &[f64] {
        &self.grid
    }

    /// Estimate the arrival angle of the simulation's single source.
    ///
    /// Draws K snapshots at `t_k = k / fs`, then scans the grid. Ties go
    /// to the earliest grid index.
    pub fn estimate(&self, sim: &mut Simulation) -> DoaResult<f64> {
        if sim.num_sources() != 1 {
            return Err(DoaError::UnsupportedConfiguration {
                operation: "cbf",
                num_sources: sim.num_sources(),
            });
        }
        if self.grid.is_empty() {
            return Err(DoaError::EmptyGrid);
        }

        let snapshots: Vec<Snapshot> = (0..self.num_snapshots)
            .map(|k| sim.snapshot(k as f64 / self.sample_rate))
            .collect();

        let (best_idx, _) = self.scan(sim, &snapshots);
        Ok(self.grid[best_idx])
    }

    /// Accumulated beamformed power at each grid angle. Exposed for
    /// spectrum inspection; `estimate` is the argmax of this.
    pub fn power_spectrum(&self, sim: &Simulation, snapshots: &[Snapshot]) -> Vec<f64> {
        self.grid
            .iter()
            .map(|&theta| beam_power(sim, theta, snapshots))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn scan(&self, sim: &Simulation, snapshots: &[Snapshot]) -> (usize, f64) {
        let mut best = (0, f64::NEG_INFINITY);
        for (i, &theta) in self.grid.iter().enumerate() {
            let p = beam_power(sim, theta, snapshots);
            if p > best.1 {
                best = (i, p);
            }
        }
        best
    }

    #[cfg(feature = "parallel")]
    fn scan(&self, sim: &Simulation, snapshots: &[Snapshot]) -> (usize, f64) {
        use rayon::prelude::*;
        self.grid
            .par_iter()
            .enumerate()
            .map(|(i, &theta)| (i, beam_power(sim, theta, snapshots)))
            .reduce(
                || (usize::MAX, f64::NEG_INFINITY),
                // Keep the larger power; on an exact tie keep the earlier
                // grid index, matching the sequential scan.
                |a, b| {
                    if b.1 > a.1 || (b.1 == a.1 && b.0 < a.0) {
                        b
                    } else {
                        a
                    }
                },
            )
    }
}

/// `sum_k |a(theta)^H y_k|^2` over the collected snapshots.
fn beam_power(sim: &Simulation, theta: f64, snapshots: &[Snapshot]) -> f64 {
    let a = sim.steering_vector(theta);
    snapshots
        .iter()
        .map(|y| {
            let combined: Complex64 = a
                .iter()
                .zip(y.iter())
                .map(|(ai, yi)| ai.conj() * yi)
                .sum();
            combined.norm_sqr()
        })
        .sum()
}

/// 100 candidate angles uniformly spaced on `[-pi/2, pi/2]`.
pub fn default_grid() -> Vec<f64> {
    uniform_grid(-FRAC_PI_2, FRAC_PI_2, DEFAULT_GRID_POINTS)
}

/// `points` angles uniformly spaced on `[start, end]`, endpoints included.
pub fn uniform_grid(start: f64, end: f64, points: usize) -> Vec<f64> {
    if points == 0 {
        return Vec::new();
    }
    if points == 1 {
        return vec![start];
    }
    let step = (end - start) / (points - 1) as f64;
    (0..points).map(|i| start + step * i as f64).collect()
}
