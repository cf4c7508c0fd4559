//! Antenna elements and array geometry
//!
//! An [`Antenna`] is a position plus a gain pattern (isotropic unless
//! overridden). An [`AntennaArray`] is an ordered list of antennas with a
//! reference point; element order is significant because it fixes the
//! indexing of every snapshot vector, and all phase computations are
//! relative to the reference point rather than the origin.
//!
//! ## Example
//!
//! ```rust
//! use doasim::antenna::AntennaArray;
//!
//! // 8-element linear array, half-wavelength spacing at lambda = 0.3 m
//! let array = AntennaArray::linear(8, 0.15).unwrap();
//! assert_eq!(array.len(), 8);
//! assert!((array.aperture() - 7.0 * 0.15).abs() < 1e-12);
//! ```

use crate::position::Position;
use crate::types::{DoaError, DoaResult};
use std::f64::consts::PI;
use std::fmt;
use std::sync::Arc;

/// Directional gain of a single element, as a function of
/// (polar, azimuth) arrival angles.
#[derive(Clone, Default)]
pub enum GainPattern {
    /// Unit gain in every direction.
    #[default]
    Isotropic,
    /// Arbitrary user-supplied pattern.
    Custom(Arc<dyn Fn(f64, f64) -> f64 + Send + Sync>),
}

impl GainPattern {
    /// Evaluate the gain toward (polar, azimuth).
    pub fn evaluate(&self, polar: f64, azimuth: f64) -> f64 {
        match self {
            GainPattern::Isotropic => 1.0,
            GainPattern::Custom(f) => f(polar, azimuth),
        }
    }
}

// Trait objects have no useful Debug; print the variant only.
impl fmt::Debug for GainPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GainPattern::Isotropic => write!(f, "Isotropic"),
            GainPattern::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// One array element: a position and a gain pattern.
#[derive(Debug, Clone)]
pub struct Antenna {
    position: Position,
    gain: GainPattern,
}

impl Antenna {
    /// Isotropic antenna at `position`.
    pub fn new(position: Position) -> Self {
        Self {
            position,
            gain: GainPattern::Isotropic,
        }
    }

    /// Antenna with an explicit gain pattern.
    pub fn with_gain(position: Position, gain: GainPattern) -> Self {
        Self { position, gain }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn z(&self) -> f64 {
        self.position.z
    }

    /// Gain toward the given (polar, azimuth) direction.
    pub fn gain_at(&self, polar: f64, azimuth: f64) -> f64 {
        self.gain.evaluate(polar, azimuth)
    }
}

/// Ordered antenna elements plus the reference point all phase delays are
/// measured against.
#[derive(Debug, Clone)]
pub struct AntennaArray {
    antennas: Vec<Antenna>,
    reference: Position,
}

impl AntennaArray {
    /// Build an array from explicit antennas. Fails on an empty list.
    pub fn new(antennas: Vec<Antenna>, reference: Position) -> DoaResult<Self> {
        if antennas.is_empty() {
            return Err(DoaError::EmptyArray);
        }
        Ok(Self {
            antennas,
            reference,
        })
    }

    /// Build an isotropic array from element positions.
    pub fn from_positions(positions: Vec<Position>, reference: Position) -> DoaResult<Self> {
        Self::new(positions.into_iter().map(Antenna::new).collect(), reference)
    }

    /// Uniform linear array along the x axis, centred on the origin, with
    /// the reference at the origin.
    pub fn linear(num_elements: usize, spacing: f64) -> DoaResult<Self> {
        let centre = (num_elements.saturating_sub(1)) as f64 / 2.0;
        let positions = (0..num_elements)
            .map(|i| Position::planar((i as f64 - centre) * spacing, 0.0))
            .collect();
        Self::from_positions(positions, Position::origin())
    }

    /// Uniform circular array in the x-y plane about the origin, with the
    /// reference at the centre.
    pub fn circular(num_elements: usize, radius: f64) -> DoaResult<Self> {
        let n = num_elements as f64;
        let positions = (0..num_elements)
            .map(|i| {
                let phi = 2.0 * PI * i as f64 / n;
                Position::planar(radius * phi.cos(), radius * phi.sin())
            })
            .collect();
        Self::from_positions(positions, Position::origin())
    }

    /// Number of elements M.
    pub fn len(&self) -> usize {
        self.antennas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.antennas.is_empty()
    }

    pub fn antennas(&self) -> &[Antenna] {
        &self.antennas
    }

    pub fn reference(&self) -> &Position {
        &self.reference
    }

    /// Closed-form beamwidth of this array at `frequency_hz`.
    pub fn beamwidth(&self, frequency_hz: f64) -> f64 {
        crate::beamwidth::beamwidth(self.aperture(), frequency_hz)
    }

    /// Array aperture: the maximum pairwise element separation in metres.
    /// 0 for a single-element array.
    pub fn aperture(&self) -> f64 {
        let mut max = 0.0f64;
        for (i, a) in self.antennas.iter().enumerate() {
            for b in &self.antennas[i + 1..] {
                max = max.max(a.position().distance_to(b.position()));
            }
        }
        max
    }
}
