//! Precomputed array manifold
//!
//! The manifold is the map from arrival angle to the vector of per-element
//! steering coefficients. It is a pure function of array geometry and
//! wavelength, fixed once at simulation construction and reused by every
//! snapshot and every estimator; noise never enters it.
//!
//! ## Example
//!
//! ```rust
//! use doasim::antenna::AntennaArray;
//! use doasim::manifold::ArrayManifold;
//!
//! let array = AntennaArray::linear(4, 0.15).unwrap();
//! let manifold = ArrayManifold::new(&array, 0.3);
//! let a = manifold.steering_vector(0.2);
//! assert_eq!(a.len(), 4);
//! assert!(a.iter().all(|c| (c.norm() - 1.0).abs() < 1e-12));
//! ```

use crate::antenna::AntennaArray;
use crate::position::Position;
use crate::wavefront::manifold_coefficient;
use num_complex::Complex64;

/// Steering-coefficient generator for a fixed geometry and wavelength.
#[derive(Debug, Clone)]
pub struct ArrayManifold {
    elements: Vec<Position>,
    reference: Position,
    wavelength: f64,
}

impl ArrayManifold {
    /// Capture the element positions and reference point of `array` at the
    /// given wavelength.
    pub fn new(array: &AntennaArray, wavelength: f64) -> Self {
        Self {
            elements: array.antennas().iter().map(|a| *a.position()).collect(),
            reference: *array.reference(),
            wavelength,
        }
    }

    /// Number of elements M.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn wavelength(&self) -> f64 {
        self.wavelength
    }

    /// Unit-modulus steering coefficient of one element toward `theta`.
    pub fn coefficient(&self, element: usize, theta: f64) -> Complex64 {
        manifold_coefficient(
            &self.elements[element],
            &self.reference,
            theta,
            self.wavelength,
        )
    }

    /// Full steering vector a(theta), length M.
    pub fn steering_vector(&self, theta: f64) -> Vec<Complex64> {
        self.elements
            .iter()
            .map(|p| manifold_coefficient(p, &self.reference, theta, self.wavelength))
            .collect()
    }
}
