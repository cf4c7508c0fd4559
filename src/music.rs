//! MUSIC subspace DOA estimator
//!
//! MUltiple SIgnal Classification: estimate the spatial covariance matrix
//! from K snapshots, eigendecompose it, and project candidate steering
//! vectors onto the noise subspace. True arrival angles are (nearly)
//! orthogonal to the noise subspace, so the pseudospectrum
//! `p(theta) = 1 / ||a(theta)^H Un||^2` peaks sharply there.
//!
//! The returned [`Pseudospectrum`] is a stateless value closed over the
//! noise-subspace basis; it can be re-evaluated any number of times and
//! handed to the peak finder.
//!
//! Requires strictly fewer sources than array elements, otherwise the
//! noise subspace is empty and the call fails fast with
//! [`DoaError::InsufficientArrayAperture`].
//!
//! ## Example
//!
//! ```rust
//! use doasim::antenna::AntennaArray;
//! use doasim::music::{full_circle_grid, MusicEstimator};
//! use doasim::peaks::find_top_peaks;
//! use doasim::simulation::{NoiseModel, Simulation};
//! use doasim::source::Source;
//!
//! let array = AntennaArray::circular(8, 0.6).unwrap();
//! let src = Source::tone(1.2, 2.5e4);
//! let mut sim = Simulation::new(array, 1e9, NoiseModel::SpectralDensity(0.01), vec![src])
//!     .unwrap()
//!     .with_seed(3);
//! let ps = MusicEstimator::new(2e6, 64).pseudospectrum(&mut sim).unwrap();
//! let peaks = find_top_peaks(|t| ps.evaluate(t), &full_circle_grid(360), 1);
//! assert!((peaks[0] - 1.2).abs() < 0.05);
//! ```

use crate::manifold::ArrayManifold;
use crate::simulation::Simulation;
use crate::types::{DoaError, DoaResult};
use nalgebra::{DMatrix, DVector};
use num_complex::Complex64;
use std::f64::consts::PI;

/// MUSIC estimator configuration.
#[derive(Debug, Clone)]
pub struct MusicEstimator {
    /// Snapshot sampling rate in Hz.
    sample_rate: f64,
    /// Number of snapshots K for the covariance estimate.
    num_snapshots: usize,
}

/// Noise-subspace pseudospectrum, re-evaluable at any angle.
#[derive(Debug, Clone)]
pub struct Pseudospectrum {
    /// Orthonormal noise-subspace basis Un, M x (M-P).
    noise_subspace: DMatrix<Complex64>,
    manifold: ArrayManifold,
}

impl MusicEstimator {
    pub fn new(sample_rate: f64, num_snapshots: usize) -> Self {
        Self {
            sample_rate,
            num_snapshots,
        }
    }

    /// Run the covariance/eigendecomposition pipeline and return the
    /// pseudospectrum.
    ///
    /// Fails with [`DoaError::InsufficientArrayAperture`] unless the
    /// simulation has fewer sources than array elements.
    pub fn pseudospectrum(&self, sim: &mut Simulation) -> DoaResult<Pseudospectrum> {
        let m = sim.num_elements();
        let p = sim.num_sources();
        if p >= m {
            return Err(DoaError::InsufficientArrayAperture {
                num_elements: m,
                num_sources: p,
            });
        }

        // Unnormalized outer-product sum; the scale does not affect the
        // eigenstructure used below.
        let mut cov = DMatrix::<Complex64>::zeros(m, m);
        for k in 0..self.num_snapshots {
            let y = DVector::from_vec(sim.snapshot(k as f64 / self.sample_rate));
            cov += &y * y.adjoint();
        }

        let eig = cov.symmetric_eigen();

        // Order eigenpairs by descending eigenvalue: the first P span the
        // signal subspace, the rest the noise subspace.
        let mut order: Vec<usize> = (0..m).collect();
        order.sort_by(|&a, &b| {
            eig.eigenvalues[b]
                .partial_cmp(&eig.eigenvalues[a])
                .unwrap()
        });
        let noise_cols: Vec<DVector<Complex64>> = order[p..]
            .iter()
            .map(|&i| eig.eigenvectors.column(i).into_owned())
            .collect();

        Ok(Pseudospectrum {
            noise_subspace: DMatrix::from_columns(&noise_cols),
            manifold: sim.manifold().clone(),
        })
    }
}

impl Pseudospectrum {
    /// `1 / ||a(theta)^H Un||^2`. A near-zero projection produces a large
    /// but finite value, never a domain error.
    pub fn evaluate(&self, theta: f64) -> f64 {
        let a = self.manifold.steering_vector(theta);
        let mut denom = 0.0;
        for col in self.noise_subspace.column_iter() {
            let projection: Complex64 = a
                .iter()
                .zip(col.iter())
                .map(|(ai, ei)| ai.conj() * ei)
                .sum();
            denom += projection.norm_sqr();
        }
        if denom > 1e-20 {
            1.0 / denom
        } else {
            1e20
        }
    }

    /// Sample the pseudospectrum over a grid.
    pub fn sample(&self, grid: &[f64]) -> Vec<f64> {
        grid.iter().map(|&t| self.evaluate(t)).collect()
    }

    /// Dimension of the noise subspace, M - P.
    pub fn noise_dimension(&self) -> usize {
        self.noise_subspace.ncols()
    }
}

/// `points` angles covering `[0, 2*pi)`, endpoint excluded.
pub fn full_circle_grid(points: usize) -> Vec<f64> {
    (0..points)
        .map(|i| 2.0 * PI * i as f64 / points as f64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::antenna::AntennaArray;
    use crate::beamwidth::SPEED_OF_LIGHT;
    use crate::peaks::find_top_peaks;
    use crate::simulation::NoiseModel;
    use crate::source::Source;

    #[test]
    fn test_guard_too_many_sources() {
        let array = AntennaArray::linear(3, 0.15).unwrap();
        let sources = vec![
            Source::tone(0.1, 1e3),
            Source::tone(0.9, 2e3),
            Source::tone(2.0, 3e3),
        ];
        let mut sim = Simulation::new(array, 1e9, NoiseModel::SpectralDensity(0.1), sources)
            .unwrap()
            .with_seed(1);
        let err = MusicEstimator::new(1e6, 50)
            .pseudospectrum(&mut sim)
            .unwrap_err();
        assert_eq!(
            err,
            DoaError::InsufficientArrayAperture {
                num_elements: 3,
                num_sources: 3
            }
        );
    }

    #[test]
    fn test_pseudospectrum_positive_and_finite() {
        let array = AntennaArray::circular(6, 0.45).unwrap();
        let mut sim = Simulation::new(
            array,
            1e9,
            NoiseModel::SpectralDensity(0.1),
            vec![Source::tone(2.0, 1e4)],
        )
        .unwrap()
        .with_seed(8);
        let ps = MusicEstimator::new(1e6, 200)
            .pseudospectrum(&mut sim)
            .unwrap();
        assert_eq!(ps.noise_dimension(), 5);
        for theta in full_circle_grid(90) {
            let v = ps.evaluate(theta);
            assert!(v.is_finite() && v > 0.0, "p({theta}) = {v}");
        }
    }

    #[test]
    fn test_reevaluation_is_stable() {
        let array = AntennaArray::circular(5, 0.45).unwrap();
        let mut sim = Simulation::new(
            array,
            1e9,
            NoiseModel::SpectralDensity(0.1),
            vec![Source::tone(1.0, 1e4)],
        )
        .unwrap()
        .with_seed(8);
        let ps = MusicEstimator::new(1e6, 100)
            .pseudospectrum(&mut sim)
            .unwrap();
        assert_eq!(ps.evaluate(0.7), ps.evaluate(0.7));
    }

    #[test]
    fn test_two_source_resolution() {
        // 11-element circular array, radius 2 wavelengths at 1 GHz; two
        // tones at 0.95 and 6.0 rad must both be recovered within 0.05 rad.
        let fc = 1e9;
        let lambda = SPEED_OF_LIGHT / fc;
        let array = AntennaArray::circular(11, 2.0 * lambda).unwrap();
        let sources = vec![Source::tone(0.95, 2.5e4), Source::tone(6.0, 7.5e4)];
        let mut sim = Simulation::new(array, fc, NoiseModel::SpectralDensity(0.1), sources)
            .unwrap()
            .with_seed(42);

        let ps = MusicEstimator::new(2.00001e6, 1000)
            .pseudospectrum(&mut sim)
            .unwrap();
        let grid = full_circle_grid(360);
        let peaks = find_top_peaks(|t| ps.evaluate(t), &grid, 2);

        assert_eq!(peaks.len(), 2);
        assert!(peaks[0] < peaks[1], "peaks must ascend by angle");
        assert!(
            (peaks[0] - 0.95).abs() < 0.05,
            "first peak {} too far from 0.95",
            peaks[0]
        );
        assert!(
            (peaks[1] - 6.0).abs() < 0.05,
            "second peak {} too far from 6.0",
            peaks[1]
        );
    }

    #[test]
    fn test_full_circle_grid() {
        let g = full_circle_grid(4);
        assert_eq!(g.len(), 4);
        assert!((g[0]).abs() < 1e-12);
        assert!((g[3] - 3.0 * PI / 2.0).abs() < 1e-12);
    }
}
