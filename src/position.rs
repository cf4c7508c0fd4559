//! Position types and spherical conversions
//!
//! Cartesian element positions with bidirectional conversion to spherical
//! form (radius, polar angle, azimuth). Planar arrays leave z at 0.
//!
//! ## Example
//!
//! ```rust
//! use doasim::position::Position;
//!
//! let p = Position::new(1.0, 2.0, 2.0);
//! let s = p.to_spherical();
//! assert!((s.radius - 3.0).abs() < 1e-12);
//! let back = Position::from_spherical(&s);
//! assert!((back.x - 1.0).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

/// Cartesian position in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    /// Height; 0 for planar arrays.
    pub z: f64,
}

/// Spherical form of a [`Position`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spherical {
    /// Distance from the origin in metres.
    pub radius: f64,
    /// Polar angle from the +z axis in radians (0 to pi).
    pub polar: f64,
    /// Azimuth from the +x axis in radians (-pi to pi).
    pub azimuth: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Planar position with z = 0.
    pub fn planar(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    pub fn origin() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Euclidean distance to another position in metres.
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Convert to spherical form.
    ///
    /// The origin maps to radius 0 with polar and azimuth both 0.
    pub fn to_spherical(&self) -> Spherical {
        let radius = (self.x * self.x + self.y * self.y + self.z * self.z).sqrt();
        if radius < 1e-300 {
            return Spherical {
                radius: 0.0,
                polar: 0.0,
                azimuth: 0.0,
            };
        }
        Spherical {
            radius,
            polar: (self.z / radius).clamp(-1.0, 1.0).acos(),
            azimuth: self.y.atan2(self.x),
        }
    }

    /// Convert back from spherical form. Exact inverse of
    /// [`to_spherical`](Self::to_spherical) up to floating tolerance for
    /// radius > 0.
    pub fn from_spherical(s: &Spherical) -> Self {
        let sin_polar = s.polar.sin();
        Self {
            x: s.radius * sin_polar * s.azimuth.cos(),
            y: s.radius * sin_polar * s.azimuth.sin(),
            z: s.radius * s.polar.cos(),
        }
    }
}
