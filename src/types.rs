//! Core types for array DOA processing
//!
//! Defines the complex-sample aliases used throughout the crate and the
//! error taxonomy for estimator and construction failures.
//!
//! All signal processing is done on `Complex64` I/Q values: the real part
//! is the in-phase component, the imaginary part the quadrature component.

use num_complex::Complex64;

/// Type alias for complex numbers using f64 precision
pub type Complex = Complex64;

/// One sampled instant of the received signal across all antennas
pub type Snapshot = Vec<Complex64>;

/// Result type for DOA operations
pub type DoaResult<T> = Result<T, DoaError>;

/// Errors that can occur during array construction or estimation.
///
/// All failures are synchronous, local to the failing call, and carry
/// enough context (operation, array size, source count) to diagnose.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DoaError {
    /// The estimator does not support this simulation configuration.
    #[error("{operation} supports exactly one source, but the simulation has {num_sources}")]
    UnsupportedConfiguration {
        /// Name of the rejecting operation.
        operation: &'static str,
        /// Number of sources in the simulation.
        num_sources: usize,
    },

    /// MUSIC needs a non-empty noise subspace: fewer sources than elements.
    #[error(
        "insufficient array aperture: {num_sources} sources with {num_elements} elements \
         leaves no noise subspace"
    )]
    InsufficientArrayAperture {
        /// Number of antenna elements M.
        num_elements: usize,
        /// Number of sources P (must satisfy P < M).
        num_sources: usize,
    },

    /// An antenna array must contain at least one element.
    #[error("antenna array must contain at least one element")]
    EmptyArray,

    /// A candidate-angle grid must contain at least one angle.
    #[error("candidate angle grid is empty")]
    EmptyGrid,

    /// Per-source SNR noise requires every source to carry an SNR.
    #[error("source {source_index} carries no SNR but the simulation uses per-source SNR noise")]
    MissingSnr {
        /// Index of the offending source in the simulation's source list.
        source_index: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_contains_context() {
        let e = DoaError::UnsupportedConfiguration {
            operation: "cbf",
            num_sources: 3,
        };
        let msg = e.to_string();
        assert!(msg.contains("cbf"));
        assert!(msg.contains('3'));

        let e = DoaError::InsufficientArrayAperture {
            num_elements: 4,
            num_sources: 4,
        };
        let msg = e.to_string();
        assert!(msg.contains('4'));
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(DoaError::EmptyArray, DoaError::EmptyArray);
        assert_ne!(DoaError::EmptyArray, DoaError::EmptyGrid);
    }
}
