//! Snapshot simulation engine
//!
//! Composes an antenna array, a carrier frequency, a noise specification,
//! and a set of sources into a generator of noisy array snapshots. The
//! array manifold is precomputed once at construction; every snapshot call
//! draws fresh, independent noise from a random stream owned by the
//! simulation (one draw per antenna per source per call), so no ambient
//! global generator is ever touched.
//!
//! Two noise conventions are supported and a simulation uses exactly one:
//!
//! - [`NoiseModel::SpectralDensity`]: a simulation-wide density N0; the
//!   summed per-antenna noise power equals N0 regardless of source count.
//!   This is the primary convention.
//! - [`NoiseModel::PerSourceSnr`]: every source carries its own SNR and is
//!   assumed to have a unit-power baseband waveform; noise power per
//!   antenna and source is 1/SNR.
//!
//! ## Example
//!
//! ```rust
//! use doasim::antenna::AntennaArray;
//! use doasim::simulation::{NoiseModel, Simulation};
//! use doasim::source::Source;
//!
//! let array = AntennaArray::linear(4, 0.15).unwrap();
//! let src = Source::tone(0.3, 1e3);
//! let mut sim = Simulation::new(array, 1e9, NoiseModel::SpectralDensity(0.01), vec![src])
//!     .unwrap()
//!     .with_seed(7);
//! let y = sim.snapshot(0.0);
//! assert_eq!(y.len(), 4);
//! ```

use crate::antenna::AntennaArray;
use crate::beamwidth::{beamwidth, SPEED_OF_LIGHT};
use crate::manifold::ArrayManifold;
use crate::source::Source;
use crate::types::{DoaError, DoaResult, Snapshot};
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};
use std::f64::consts::FRAC_PI_2;

/// Noise specification for a simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoiseModel {
    /// Simulation-wide noise spectral density N0: total per-antenna noise
    /// power per snapshot.
    SpectralDensity(f64),
    /// Per-source SNR (each source must carry one; unit-power waveforms
    /// assumed).
    PerSourceSnr,
}

/// Immutable simulation of sources impinging on an array, plus an owned
/// random stream for noise.
#[derive(Debug)]
pub struct Simulation {
    array: AntennaArray,
    carrier_hz: f64,
    wavelength: f64,
    noise: NoiseModel,
    sources: Vec<Source>,
    manifold: ArrayManifold,
    rng: StdRng,
}

impl Simulation {
    /// Build a simulation. The manifold is computed here, once, from the
    /// array geometry and the carrier wavelength.
    ///
    /// Fails with [`DoaError::MissingSnr`] if the noise model is
    /// [`NoiseModel::PerSourceSnr`] and any source lacks an SNR.
    pub fn new(
        array: AntennaArray,
        carrier_hz: f64,
        noise: NoiseModel,
        sources: Vec<Source>,
    ) -> DoaResult<Self> {
        if noise == NoiseModel::PerSourceSnr {
            for (i, src) in sources.iter().enumerate() {
                if src.snr_db().is_none() {
                    return Err(DoaError::MissingSnr { source_index: i });
                }
            }
        }
        let wavelength = SPEED_OF_LIGHT / carrier_hz;
        let manifold = ArrayManifold::new(&array, wavelength);
        Ok(Self {
            array,
            carrier_hz,
            wavelength,
            noise,
            sources,
            manifold,
            rng: StdRng::from_entropy(),
        })
    }

    /// Reseed the owned random stream for reproducible noise.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// One noisy snapshot of the array at time `t` (length M).
    ///
    /// Per source: waveform(t) times the element's manifold coefficient and
    /// gain, plus one circularly-symmetric complex Gaussian draw per
    /// antenna. Draws are independent across calls.
    pub fn snapshot(&mut self, t: f64) -> Snapshot {
        let m = self.array.len();
        let p = self.sources.len();
        let mut y = vec![Complex64::new(0.0, 0.0); m];

        for src in &self.sources {
            let amplitude = src.evaluate(t);
            let theta = src.angle();
            // Per-component standard deviation so the summed per-antenna
            // noise power matches the configured convention.
            let noise_std = match self.noise {
                NoiseModel::SpectralDensity(n0) => (n0 / p as f64 / 2.0).max(0.0).sqrt(),
                NoiseModel::PerSourceSnr => {
                    let snr = src.snr_linear().unwrap_or(f64::INFINITY);
                    (1.0 / snr / 2.0).sqrt()
                }
            };

            for (i, ant) in self.array.antennas().iter().enumerate() {
                let coeff = self.manifold.coefficient(i, theta);
                let gain = ant.gain_at(FRAC_PI_2, theta);
                let n_re: f64 = StandardNormal.sample(&mut self.rng);
                let n_im: f64 = StandardNormal.sample(&mut self.rng);
                y[i] += amplitude * coeff * gain
                    + Complex64::new(n_re * noise_std, n_im * noise_std);
            }
        }

        y
    }

    /// Steering vector a(theta) from the precomputed manifold.
    pub fn steering_vector(&self, theta: f64) -> Vec<Complex64> {
        self.manifold.steering_vector(theta)
    }

    /// The precomputed manifold (geometry + wavelength only).
    pub fn manifold(&self) -> &ArrayManifold {
        &self.manifold
    }

    pub fn array(&self) -> &AntennaArray {
        &self.array
    }

    pub fn num_elements(&self) -> usize {
        self.array.len()
    }

    pub fn num_sources(&self) -> usize {
        self.sources.len()
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    pub fn carrier_hz(&self) -> f64 {
        self.carrier_hz
    }

    pub fn wavelength(&self) -> f64 {
        self.wavelength
    }

    /// Closed-form beamwidth of the array at the carrier frequency.
    pub fn beamwidth(&self) -> f64 {
        beamwidth(self.array.aperture(), self.carrier_hz)
    }
}
