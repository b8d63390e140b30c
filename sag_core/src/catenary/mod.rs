//! # Catenary
//!
//! The curve of a cable hanging under its own weight between two
//! attachment points, parameterized by horizontal tension `H`, unit weight
//! `w`, and the spacing between endpoints.
//!
//! ## Coordinates
//!
//! The origin is the back attachment. `x` runs horizontally toward the
//! ahead attachment and `z` is elevation. Internally positions are also
//! measured from the catenary low point (`u`), where the curve is
//! `z = a·cosh(u/a)` with catenary constant `a = H/w`.
//!
//! ## Example
//!
//! ```rust
//! use sag_core::catenary::Catenary;
//! use sag_core::geometry::Vector3d;
//!
//! let catenary = Catenary::new(Vector3d::new(500.0, 0.0, 0.0), 1.5, 9000.0);
//! assert!(catenary.validate().is_ok());
//!
//! // Close to the parabolic estimate wL²/8H
//! let parabolic = 1.5 * 500.0_f64.powi(2) / (8.0 * 9000.0);
//! assert!((catenary.sag() - parabolic).abs() < 0.01);
//! ```

pub mod solver;

pub use solver::CatenarySolver;

use serde::{Deserialize, Serialize};

use crate::errors::{SagError, SagResult};
use crate::geometry::{Point3d, SpanEnd, Vector3d};

/// Largest hyperbolic argument before the geometry stops being finite
const ARGUMENT_LIMIT: f64 = 700.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catenary {
    spacing_endpoints: Vector3d,
    weight_unit: f64,
    tension_horizontal: f64,
}

impl Catenary {
    /// Build a catenary from endpoint spacing (x horizontal, z vertical),
    /// vertical unit weight, and horizontal tension.
    pub fn new(spacing_endpoints: Vector3d, weight_unit: f64, tension_horizontal: f64) -> Self {
        Catenary {
            spacing_endpoints,
            weight_unit,
            tension_horizontal,
        }
    }

    pub fn spacing_endpoints(&self) -> Vector3d {
        self.spacing_endpoints
    }

    pub fn weight_unit(&self) -> f64 {
        self.weight_unit
    }

    pub fn tension_horizontal(&self) -> f64 {
        self.tension_horizontal
    }

    /// Catenary constant `a = H/w`
    pub fn constant(&self) -> f64 {
        self.tension_horizontal / self.weight_unit
    }

    /// Absolute ratio of vertical to horizontal endpoint spacing
    pub fn elevation_factor(&self) -> f64 {
        (self.spacing_endpoints.z / self.spacing_endpoints.x).abs()
    }

    /// Positions of the back and ahead attachments measured from the low point.
    fn positions_from_low_point(&self) -> (f64, f64) {
        let a = self.constant();
        let h = self.spacing_endpoints.x;
        let v = self.spacing_endpoints.z;

        let midpoint = a * (v / (2.0 * a * (h / (2.0 * a)).sinh())).asinh();
        (midpoint - h / 2.0, midpoint + h / 2.0)
    }

    /// Elevation of the curve relative to the back attachment at horizontal
    /// position `x` from the back attachment.
    pub fn height_at(&self, x: f64) -> f64 {
        let a = self.constant();
        let (u_back, _) = self.positions_from_low_point();
        let p = (u_back + x) / a;
        let q = u_back / a;
        // cosh(p) - cosh(q) without cancellation
        2.0 * a * ((p + q) / 2.0).sinh() * ((p - q) / 2.0).sinh()
    }

    /// Slope dz/dx of the curve at horizontal position `x`
    pub fn slope_at(&self, x: f64) -> f64 {
        let (u_back, _) = self.positions_from_low_point();
        ((u_back + x) / self.constant()).sinh()
    }

    /// Vertical distance from the chord line down to the curve at `x`
    pub fn sag_at(&self, x: f64) -> f64 {
        let chord = self.spacing_endpoints.z * x / self.spacing_endpoints.x;
        chord - self.height_at(x)
    }

    /// Horizontal position where the curve is parallel to the chord
    pub fn position_sag_max(&self) -> f64 {
        let a = self.constant();
        let (u_back, _) = self.positions_from_low_point();
        let slope_chord = self.spacing_endpoints.z / self.spacing_endpoints.x;
        a * slope_chord.asinh() - u_back
    }

    /// Maximum sag, measured vertically from the chord
    pub fn sag(&self) -> f64 {
        self.sag_at(self.position_sag_max())
    }

    /// Curve length between attachments
    pub fn length(&self) -> f64 {
        let a = self.constant();
        let (u_back, u_ahead) = self.positions_from_low_point();
        let p = u_ahead / a;
        let q = u_back / a;
        2.0 * a * ((p + q) / 2.0).cosh() * ((p - q) / 2.0).sinh()
    }

    /// Point on the curve at a fraction (0 = back, 1 = ahead) of the curve length.
    pub fn coordinate(&self, fraction_length: f64) -> Point3d {
        let a = self.constant();
        let (u_back, _) = self.positions_from_low_point();
        let s = fraction_length * self.length();
        let u = a * ((u_back / a).sinh() + s / a).asinh();
        let x = u - u_back;
        Point3d::new(x, 0.0, self.height_at(x))
    }

    /// Total cable tension at a span end
    pub fn tension_at_end(&self, end: SpanEnd) -> f64 {
        let (u_back, u_ahead) = self.positions_from_low_point();
        let u = match end {
            SpanEnd::Back => u_back,
            SpanEnd::Ahead => u_ahead,
        };
        self.tension_horizontal * (u / self.constant()).cosh()
    }

    /// Check that the catenary describes a real, finite curve.
    pub fn validate(&self) -> SagResult<()> {
        let spacing = self.spacing_endpoints;
        if !spacing.x.is_finite() || spacing.x <= 0.0 {
            return Err(SagError::catenary_unsolved(format!(
                "horizontal spacing {} must be positive",
                spacing.x
            )));
        }
        if !spacing.z.is_finite() {
            return Err(SagError::catenary_unsolved("vertical spacing is not finite"));
        }
        if !self.weight_unit.is_finite() || self.weight_unit <= 0.0 {
            return Err(SagError::catenary_unsolved(format!(
                "unit weight {} must be positive",
                self.weight_unit
            )));
        }
        if !self.tension_horizontal.is_finite() || self.tension_horizontal <= 0.0 {
            return Err(SagError::catenary_unsolved(format!(
                "horizontal tension {} must be positive",
                self.tension_horizontal
            )));
        }

        let (u_back, u_ahead) = self.positions_from_low_point();
        let a = self.constant();
        if !(u_back / a).is_finite()
            || !(u_ahead / a).is_finite()
            || ARGUMENT_LIMIT < (u_back / a).abs()
            || ARGUMENT_LIMIT < (u_ahead / a).abs()
        {
            return Err(SagError::catenary_unsolved(
                "tension is too low for the span geometry",
            ));
        }

        let sag = self.sag();
        if !sag.is_finite() || !self.length().is_finite() {
            return Err(SagError::catenary_unsolved("geometry is not finite"));
        }

        Ok(())
    }
}
