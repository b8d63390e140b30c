//! # Temperature-Tension Curve
//!
//! Interpolates horizontal tension at a target temperature from the five
//! cable calibration points.
//!
//! ## Method
//!
//! 1. Reject targets outside the first/last calibration temperature.
//! 2. Pick a 3-point neighborhood: points 0-2 when the target is at or below
//!    the median point's temperature, otherwise points 2-4. The two fits
//!    can disagree at the median temperature.
//! 3. Fit the interpolating quadratic on the absolute temperature scale
//!    (Rankine or Kelvin) in Newton divided-difference form.
//! 4. Apply the [`TensionFitPolicy`] at the target, then evaluate.
//!
//! ## Example
//!
//! ```rust
//! use sag_core::calculations::tension_curve::{TensionCurve, TensionFitPolicy};
//! use sag_core::model::TensionPoint;
//! use sag_core::units::UnitSystem;
//!
//! let points = [
//!     TensionPoint::new(0.0, 10000.0),
//!     TensionPoint::new(25.0, 9000.0),
//!     TensionPoint::new(50.0, 8200.0),
//!     TensionPoint::new(75.0, 7600.0),
//!     TensionPoint::new(100.0, 7200.0),
//! ];
//! let curve = TensionCurve::new(&points, UnitSystem::Imperial);
//! let tension = curve.tension_horizontal(50.0, TensionFitPolicy::NonIncreasing).unwrap();
//! assert!((tension - 8200.0).abs() < 1e-6);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{SagError, SagResult};
use crate::model::{TensionPoint, TENSION_POINT_COUNT};
use crate::units::UnitSystem;

/// Which shape of fitted curve is accepted at the target temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TensionFitPolicy {
    /// Tension may not rise with temperature at the target (slope ≤ 0)
    #[default]
    NonIncreasing,
    /// Curve may not be convex at the target (second derivative ≤ 0,
    /// rounded to 4 decimals)
    Concave,
}

/// Quadratic through three points in Newton form:
/// `y = y0 + d1·(x - x0) + d2·(x - x0)·(x - x1)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TensionPolynomial {
    x0: f64,
    x1: f64,
    y0: f64,
    d1: f64,
    d2: f64,
}

impl TensionPolynomial {
    /// Fit through three (absolute temperature, tension) points.
    pub fn fit(points: [(f64, f64); 3]) -> Self {
        let [(x0, y0), (x1, y1), (x2, y2)] = points;
        let d01 = (y1 - y0) / (x1 - x0);
        let d12 = (y2 - y1) / (x2 - x1);
        let d2 = (d12 - d01) / (x2 - x0);
        TensionPolynomial { x0, x1, y0, d1: d01, d2 }
    }

    pub fn value(&self, x: f64) -> f64 {
        self.y0 + (x - self.x0) * (self.d1 + self.d2 * (x - self.x1))
    }

    pub fn slope(&self, x: f64) -> f64 {
        self.d1 + self.d2 * (2.0 * x - self.x0 - self.x1)
    }

    pub fn concavity(&self) -> f64 {
        2.0 * self.d2
    }
}

/// Borrowed view over a cable's calibration points.
#[derive(Debug, Clone, Copy)]
pub struct TensionCurve<'a> {
    points: &'a [TensionPoint],
    units: UnitSystem,
}

impl<'a> TensionCurve<'a> {
    pub fn new(points: &'a [TensionPoint], units: UnitSystem) -> Self {
        TensionCurve { points, units }
    }

    /// The fitted quadratic for a target temperature (relative scale).
    pub fn polynomial_for(&self, temperature: f64) -> SagResult<TensionPolynomial> {
        if self.points.len() != TENSION_POINT_COUNT {
            return Err(SagError::invalid_input(
                "tensions",
                self.points.len().to_string(),
                format!("Exactly {} temperature-tension points are required", TENSION_POINT_COUNT),
            ));
        }

        let first = self.points[0].temperature;
        let last = self.points[TENSION_POINT_COUNT - 1].temperature;
        if !(first..=last).contains(&temperature) {
            return Err(SagError::TemperatureOutOfRange {
                temperature,
                min: first,
                max: last,
            });
        }

        let neighborhood = if temperature <= self.points[2].temperature {
            &self.points[0..3]
        } else {
            &self.points[2..5]
        };

        let absolute = |p: &TensionPoint| (self.units.absolute_temperature(p.temperature), p.tension_horizontal);
        Ok(TensionPolynomial::fit([
            absolute(&neighborhood[0]),
            absolute(&neighborhood[1]),
            absolute(&neighborhood[2]),
        ]))
    }

    /// Interpolated horizontal tension at a target temperature (relative scale).
    pub fn tension_horizontal(&self, temperature: f64, policy: TensionFitPolicy) -> SagResult<f64> {
        let polynomial = self.polynomial_for(temperature)?;
        let x = self.units.absolute_temperature(temperature);

        match policy {
            TensionFitPolicy::NonIncreasing => {
                let slope = polynomial.slope(x);
                if 0.0 < slope {
                    return Err(SagError::TensionFitRejected {
                        temperature,
                        reason: format!("tension increases with temperature (slope {:.4})", slope),
                    });
                }
            }
            TensionFitPolicy::Concave => {
                let concavity = polynomial.concavity();
                if 0.0 < round_to(concavity, 4) {
                    return Err(SagError::TensionFitRejected {
                        temperature,
                        reason: format!("fitted curve is convex (second derivative {:.4})", concavity),
                    });
                }
            }
        }

        Ok(polynomial.value(x))
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points() -> Vec<TensionPoint> {
        vec![
            TensionPoint::new(0.0, 10000.0),
            TensionPoint::new(25.0, 9000.0),
            TensionPoint::new(50.0, 8200.0),
            TensionPoint::new(75.0, 7600.0),
            TensionPoint::new(100.0, 7200.0),
        ]
    }

    /// Points exactly on a concave, decreasing quadratic
    fn concave_points() -> Vec<TensionPoint> {
        let f = |t: f64| 9000.0 - 10.0 * t - 0.2 * t * t;
        [0.0, 20.0, 40.0, 60.0, 80.0]
            .iter()
            .map(|&t| TensionPoint::new(t, f(t)))
            .collect()
    }

    #[test]
    fn test_interpolates_between_points() {
        let points = points();
        let curve = TensionCurve::new(&points, UnitSystem::Metric);
        // Newton form over points 0-2: 10000 - 40·10 + 0.16·10·(-15)
        let t = curve.tension_horizontal(10.0, TensionFitPolicy::NonIncreasing).unwrap();
        assert!((t - 9576.0).abs() < 1e-6);
        // points 2-4: 8200 - 24·40 + 0.16·40·15
        let t = curve.tension_horizontal(90.0, TensionFitPolicy::NonIncreasing).unwrap();
        assert!((t - 7336.0).abs() < 1e-6);
    }

    #[test]
    fn test_reproduces_calibration_points() {
        let points = concave_points();
        for units in [UnitSystem::Imperial, UnitSystem::Metric] {
            let curve = TensionCurve::new(&points, units);
            for point in &points {
                let t = curve
                    .tension_horizontal(point.temperature, TensionFitPolicy::Concave)
                    .unwrap();
                assert!((t - point.tension_horizontal).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_result_independent_of_unit_shift() {
        let points = points();
        let imperial = TensionCurve::new(&points, UnitSystem::Imperial)
            .tension_horizontal(63.0, TensionFitPolicy::NonIncreasing)
            .unwrap();
        let metric = TensionCurve::new(&points, UnitSystem::Metric)
            .tension_horizontal(63.0, TensionFitPolicy::NonIncreasing)
            .unwrap();
        assert!((imperial - metric).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let points = points();
        let curve = TensionCurve::new(&points, UnitSystem::Imperial);

        let below = curve.tension_horizontal(-1.0, TensionFitPolicy::NonIncreasing);
        assert!(matches!(below, Err(SagError::TemperatureOutOfRange { temperature, .. }) if temperature == -1.0));

        let above = curve.tension_horizontal(100.5, TensionFitPolicy::NonIncreasing);
        assert!(matches!(above, Err(SagError::TemperatureOutOfRange { .. })));

        // the range ends are inclusive
        assert!(curve.tension_horizontal(0.0, TensionFitPolicy::NonIncreasing).is_ok());
        assert!(curve.tension_horizontal(100.0, TensionFitPolicy::NonIncreasing).is_ok());
    }

    #[test]
    fn test_concave_policy_rejects_convex_fit() {
        let points = points();
        let curve = TensionCurve::new(&points, UnitSystem::Imperial);
        let result = curve.tension_horizontal(30.0, TensionFitPolicy::Concave);
        assert!(matches!(result, Err(SagError::TensionFitRejected { .. })));
    }

    #[test]
    fn test_non_increasing_policy_rejects_rising_tension() {
        // flat then strongly convex: fit over points 2-4 turns upward near 100
        let points = vec![
            TensionPoint::new(0.0, 9000.0),
            TensionPoint::new(25.0, 8500.0),
            TensionPoint::new(50.0, 8000.0),
            TensionPoint::new(75.0, 7000.0),
            TensionPoint::new(100.0, 7000.0),
        ];
        let curve = TensionCurve::new(&points, UnitSystem::Imperial);
        assert!(curve.tension_horizontal(95.0, TensionFitPolicy::NonIncreasing).is_err());
        assert!(curve.tension_horizontal(60.0, TensionFitPolicy::NonIncreasing).is_ok());
    }

    #[test]
    fn test_median_split_uses_lower_neighborhood() {
        let points = points();
        let curve = TensionCurve::new(&points, UnitSystem::Imperial);
        let at_median = curve.polynomial_for(50.0).unwrap();
        let lower = curve.polynomial_for(10.0).unwrap();
        assert_eq!(at_median, lower);
        assert_ne!(curve.polynomial_for(50.1).unwrap(), lower);
    }
}
