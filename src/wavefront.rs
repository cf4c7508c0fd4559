//! Wavefront geometry / phase model
//!
//! Computes the signed per-element carrier phase delay for a plane wave
//! arriving at an antenna array, from array topology alone. This is the
//! geometric core every estimator in the crate is built on: the manifold
//! coefficient `exp(j * phase_shift)` has unit modulus by construction.
//!
//! Angle convention: theta = 0 points along +y from the reference point
//! (boresight for an array laid out along the x axis) and increases
//! counter-clockwise, so the arrival unit vector is
//! `u(theta) = (-sin theta, cos theta)`. The model is planar: z offsets
//! do not contribute to the path-length difference.
//!
//! ## Example
//!
//! ```rust
//! use doasim::position::Position;
//! use doasim::wavefront::manifold_coefficient;
//!
//! let antenna = Position::planar(0.5, 0.0);
//! let reference = Position::origin();
//! let c = manifold_coefficient(&antenna, &reference, 0.3, 1.0);
//! assert!((c.norm() - 1.0).abs() < 1e-12); // always unit modulus
//! ```

use crate::position::Position;
use num_complex::Complex64;
use std::f64::consts::PI;

/// Slope tolerance below which an arrival angle is treated as axis aligned.
const SLOPE_EPS: f64 = 1e-9;

/// Normalize an angle into `[0, 2*pi)`.
pub fn normalize_angle(theta: f64) -> f64 {
    let two_pi = 2.0 * PI;
    let mut t = theta % two_pi;
    if t < 0.0 {
        t += two_pi;
    }
    // The remainder can round back up to 2*pi for tiny negative inputs.
    if t >= two_pi {
        t = 0.0;
    }
    t
}

/// Signed propagation phase delay of `antenna` relative to `reference`,
/// in radians of carrier phase, for a plane wave arriving from `theta`
/// with wavelength `wavelength`.
///
/// The wavefront is the line through the reference point perpendicular to
/// the arrival direction. The magnitude is the distance from the antenna
/// to its orthogonal projection onto that line, scaled by `2*pi/lambda`;
/// the sign is positive when the antenna sits on the source side of the
/// wavefront (the wave reaches it before the reference).
///
/// Axis-aligned arrivals (theta near 0, pi/2, pi, 3*pi/2) use exact
/// closed forms so the projection never involves an infinite slope. An
/// antenna coincident with the reference yields 0 for every theta.
pub fn phase_shift(antenna: &Position, reference: &Position, theta: f64, wavelength: f64) -> f64 {
    let theta = normalize_angle(theta);
    let dx = antenna.x - reference.x;
    let dy = antenna.y - reference.y;
    if dx.abs() < f64::EPSILON && dy.abs() < f64::EPSILON {
        return 0.0;
    }

    let k = 2.0 * PI / wavelength;
    let (sin_t, cos_t) = theta.sin_cos();

    let toward_source = if sin_t.abs() < SLOPE_EPS {
        // theta near 0 or pi: propagation along the y axis, the projection
        // line is vertical.
        if cos_t > 0.0 {
            dy
        } else {
            -dy
        }
    } else if cos_t.abs() < SLOPE_EPS {
        // theta near pi/2 or 3*pi/2: the wavefront line is vertical.
        if sin_t > 0.0 {
            -dx
        } else {
            dx
        }
    } else {
        // General case: project the antenna onto the wavefront line
        // (direction theta + pi/2 through the reference) and take the
        // distance to the projection, signed by which side of the line
        // the antenna falls on.
        let (ux, uy) = (-sin_t, cos_t); // toward the source
        let (wx, wy) = (-uy, ux); // along the wavefront
        let along = dx * wx + dy * wy;
        let (px, py) = (along * wx, along * wy); // projection, relative to reference
        let dist = (dx - px).hypot(dy - py);
        let side = dx * ux + dy * uy;
        if side >= 0.0 {
            dist
        } else {
            -dist
        }
    };

    k * toward_source
}

/// Unit-modulus manifold (steering) coefficient for one element:
/// `exp(j * phase_shift(antenna, reference, theta, wavelength))`.
pub fn manifold_coefficient(
    antenna: &Position,
    reference: &Position,
    theta: f64,
    wavelength: f64,
) -> Complex64 {
    Complex64::from_polar(1.0, phase_shift(antenna, reference, theta, wavelength))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(0.0)).abs() < TOL);
        assert!((normalize_angle(2.0 * PI)).abs() < TOL);
        assert!((normalize_angle(-PI / 2.0) - 3.0 * PI / 2.0).abs() < TOL);
        assert!((normalize_angle(5.0 * PI) - PI).abs() < TOL);
        let t = normalize_angle(-1e-18);
        assert!((0.0..2.0 * PI).contains(&t));
    }

    #[test]
    fn test_unit_modulus_everywhere() {
        let antennas = [
            Position::planar(0.3, 0.0),
            Position::planar(-1.2, 0.8),
            Position::new(0.1, -2.0, 5.0),
        ];
        let reference = Position::origin();
        for ant in &antennas {
            for i in 0..64 {
                let theta = i as f64 * PI / 8.0 - 2.0 * PI;
                for lambda in [0.1, 0.3, 2.5] {
                    let c = manifold_coefficient(ant, &reference, theta, lambda);
                    assert!(
                        (c.norm() - 1.0).abs() < TOL,
                        "|coeff| != 1 at theta={theta}, lambda={lambda}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_coincident_antenna_is_zero() {
        let p = Position::planar(1.5, -2.5);
        for i in 0..16 {
            let theta = i as f64 * PI / 8.0;
            assert_eq!(phase_shift(&p, &p, theta, 0.3), 0.0);
        }
    }

    #[test]
    fn test_broadside_ignores_x_offset() {
        // Wave from theta=0 travels along -y; elements offset only in x lie
        // on the wavefront and see zero delay.
        let reference = Position::origin();
        let ant = Position::planar(2.0, 0.0);
        assert!(phase_shift(&ant, &reference, 0.0, 1.0).abs() < TOL);
        // An element ahead in +y is reached first: positive shift.
        let ahead = Position::planar(0.0, 0.25);
        let ps = phase_shift(&ahead, &reference, 0.0, 1.0);
        assert!((ps - 2.0 * PI * 0.25).abs() < TOL);
        // Behind: negative.
        let behind = Position::planar(0.0, -0.25);
        assert!((phase_shift(&behind, &reference, 0.0, 1.0) + 2.0 * PI * 0.25).abs() < TOL);
    }

    #[test]
    fn test_degenerate_quarter_angles_finite() {
        let reference = Position::origin();
        let ant = Position::planar(0.7, 0.4);
        for theta in [PI / 2.0, 3.0 * PI / 2.0, 0.0, PI] {
            // Nudge within machine epsilon of the degenerate slope.
            for eps in [-1e-13, 0.0, 1e-13] {
                let ps = phase_shift(&ant, &reference, theta + eps, 0.3);
                assert!(ps.is_finite(), "phase at theta={theta}+{eps} not finite");
            }
        }
        // theta = pi/2: arrival from -x side, element at +x lags.
        let right = Position::planar(0.5, 0.0);
        let ps = phase_shift(&right, &reference, PI / 2.0, 1.0);
        assert!((ps + PI).abs() < TOL, "ps={ps}");
    }

    #[test]
    fn test_general_branch_matches_projection() {
        // For a pure-y offset the delay must follow cos(theta) regardless
        // of which branch computes it.
        let reference = Position::origin();
        let ant = Position::planar(0.0, 1.0);
        for i in 1..8 {
            let theta = i as f64 * PI / 9.0; // avoids the axis-aligned angles
            let ps = phase_shift(&ant, &reference, theta, 1.0);
            assert!(
                (ps - 2.0 * PI * theta.cos()).abs() < 1e-9,
                "theta={theta}: ps={ps}"
            );
        }
    }

    #[test]
    fn test_sign_flips_with_opposite_arrival() {
        let reference = Position::origin();
        let ant = Position::planar(0.8, 0.3);
        for i in 0..12 {
            let theta = 0.1 + i as f64 * 0.5;
            let a = phase_shift(&ant, &reference, theta, 0.3);
            let b = phase_shift(&ant, &reference, theta + PI, 0.3);
            assert!((a + b).abs() < 1e-9, "theta={theta}: {a} vs {b}");
        }
    }
}
