//! Closed-form aperture-to-beamwidth conversion
//!
//! The angular resolution limit of an array at a given frequency:
//! `0.89 * lambda / aperture` radians, with the aperture taken as the
//! maximum pairwise element separation.
//!
//! ## Example
//!
//! ```rust
//! use doasim::beamwidth::beamwidth;
//!
//! // 3 m aperture at 1 GHz
//! let bw = beamwidth(3.0, 1e9);
//! assert!((bw - 0.89 * 0.299792458 / 3.0).abs() < 1e-9);
//! ```

/// Propagation speed in m/s.
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Beamwidth in radians of an array with the given aperture (metres) at
/// `frequency_hz`. A zero or negative aperture cannot resolve anything
/// and yields infinity.
pub fn beamwidth(aperture_m: f64, frequency_hz: f64) -> f64 {
    if aperture_m <= 0.0 {
        return f64::INFINITY;
    }
    0.89 * (SPEED_OF_LIGHT / frequency_hz) / aperture_m
}
