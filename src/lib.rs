//! # DOA Simulation and Estimation Library
//!
//! This crate simulates narrowband radio sources impinging on an antenna
//! array and estimates their directions of arrival (DOA) from the noisy
//! array snapshots it generates.
//!
//! ## Overview
//!
//! The simulation side builds an array geometry, derives the array
//! manifold (per-element phase response as a function of arrival angle),
//! and produces snapshot vectors with independent complex Gaussian noise.
//! The estimation side consumes snapshots through two estimators:
//!
//! - **CBF**: classical beamformer, a grid search over candidate angles
//!   maximizing accumulated beamformed power (single source)
//! - **MUSIC**: subspace method, eigendecomposition of the sample
//!   covariance followed by a noise-subspace pseudospectrum whose peaks
//!   are the arrival angles (multiple sources)
//!
//! Peak extraction and a closed-form beamwidth bound round out the
//! estimation toolkit.
//!
//! ## Signal Flow
//!
//! ```text
//! Geometry → Manifold → Simulation → Snapshots → CBF argmax → angle
//!                                             └→ Covariance → MUSIC → Pseudospectrum → Peaks → angles
//! ```
//!
//! ## Example
//!
//! ```rust
//! use doasim::antenna::AntennaArray;
//! use doasim::cbf::CbfEstimator;
//! use doasim::simulation::{NoiseModel, Simulation};
//! use doasim::source::Source;
//!
//! // 8-element linear array, half-wavelength spacing at 1 GHz
//! let array = AntennaArray::linear(8, 0.15).unwrap();
//! let source = Source::tone(0.4, 1e5);
//! let mut sim = Simulation::new(array, 1e9, NoiseModel::SpectralDensity(0.01), vec![source])
//!     .unwrap()
//!     .with_seed(7);
//!
//! let estimate = CbfEstimator::new(2e6, 64).estimate(&mut sim).unwrap();
//! assert!((estimate - 0.4).abs() < sim.beamwidth());
//! ```
//!
//! ## Conventions
//!
//! Angles are radians in the x-y plane: 0 points along +y from the array
//! reference and increases counter-clockwise. All phase delays are
//! measured against the array's reference point. Snapshots are complex
//! baseband, one entry per antenna in element order.

pub mod antenna;
pub mod beamwidth;
pub mod cbf;
pub mod manifold;
pub mod music;
pub mod peaks;
pub mod position;
pub mod simulation;
pub mod source;
pub mod types;
pub mod wavefront;

pub use antenna::{Antenna, AntennaArray, GainPattern};
pub use beamwidth::{beamwidth, SPEED_OF_LIGHT};
pub use cbf::CbfEstimator;
pub use manifold::ArrayManifold;
pub use music::{MusicEstimator, Pseudospectrum};
pub use peaks::{find_peaks, find_top_peaks, PeakPolicy};
pub use position::{Position, Spherical};
pub use simulation::{NoiseModel, Simulation};
pub use source::Source;
pub use types::{DoaError, DoaResult, Snapshot};
