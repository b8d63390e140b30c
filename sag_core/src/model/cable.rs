//! # Sag Cable
//!
//! A cable as seen by sagging: its unit weight, field corrections, and the
//! temperature to horizontal tension calibration curve produced by a
//! separate sag-tension analysis.

use serde::{Deserialize, Serialize};

use crate::errors::SagError;

/// Number of temperature-tension calibration points every cable carries
pub const TENSION_POINT_COUNT: usize = 5;

/// Allowed calibration point temperature range
const TEMPERATURE_POINT_MIN: f64 = -50.0;
const TEMPERATURE_POINT_MAX: f64 = 150.0;

/// One calibration point of the temperature-tension curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TensionPoint {
    pub temperature: f64,
    pub tension_horizontal: f64,
}

impl TensionPoint {
    pub fn new(temperature: f64, tension_horizontal: f64) -> Self {
        TensionPoint {
            temperature,
            tension_horizontal,
        }
    }
}

/// Cable inputs for one span.
///
/// ## JSON Example
///
/// ```json
/// {
///   "name": "Drake ACSR",
///   "scale": 1.0,
///   "correction_creep": 0.0,
///   "correction_sag": 0.0,
///   "weight_unit": 1.094,
///   "tensions": [
///     { "temperature": 0.0, "tension_horizontal": 6500.0 },
///     { "temperature": 30.0, "tension_horizontal": 5900.0 },
///     { "temperature": 60.0, "tension_horizontal": 5400.0 },
///     { "temperature": 90.0, "tension_horizontal": 5000.0 },
///     { "temperature": 120.0, "tension_horizontal": 4700.0 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SagCable {
    /// Cable name
    pub name: String,

    /// Pre-stress multiplier, in (0, 10]
    pub scale: f64,

    /// Temperature offset subtracted before tension lookup, in [0, 100]
    pub correction_creep: f64,

    /// Length offset added to the catenary sag, in [-100, 100]
    pub correction_sag: f64,

    /// Linear weight, in (0, 100]
    pub weight_unit: f64,

    /// Calibration points, increasing temperature and non-increasing tension
    pub tensions: Vec<TensionPoint>,
}

impl SagCable {
    /// Lowest and highest calibrated temperature, if any points exist.
    pub fn temperature_range(&self) -> Option<(f64, f64)> {
        let first = self.tensions.first()?;
        let last = self.tensions.last()?;
        Some((first.temperature, last.temperature))
    }

    /// Collect every validation problem with this cable.
    pub fn validation_errors(&self) -> Vec<SagError> {
        let mut errors = Vec::new();

        if !(0.0..=100.0).contains(&self.correction_creep) {
            errors.push(SagError::invalid_input(
                "correction_creep",
                self.correction_creep.to_string(),
                "Invalid creep correction, must be within 0 to 100",
            ));
        }

        if !(-100.0..=100.0).contains(&self.correction_sag) {
            errors.push(SagError::invalid_input(
                "correction_sag",
                self.correction_sag.to_string(),
                "Invalid sag correction, must be within -100 to 100",
            ));
        }

        if !self.scale.is_finite() || self.scale <= 0.0 || 10.0 < self.scale {
            errors.push(SagError::invalid_input(
                "scale",
                self.scale.to_string(),
                "Invalid scale factor, must be within (0, 10]",
            ));
        }

        if !self.weight_unit.is_finite() || self.weight_unit <= 0.0 || 100.0 < self.weight_unit {
            errors.push(SagError::invalid_input(
                "weight_unit",
                self.weight_unit.to_string(),
                "Invalid unit weight, must be within (0, 100]",
            ));
        }

        if self.tensions.len() != TENSION_POINT_COUNT {
            errors.push(SagError::invalid_input(
                "tensions",
                self.tensions.len().to_string(),
                format!("Exactly {} temperature-tension points are required", TENSION_POINT_COUNT),
            ));
        }

        let mut previous: Option<&TensionPoint> = None;
        for point in &self.tensions {
            if !(TEMPERATURE_POINT_MIN..=TEMPERATURE_POINT_MAX).contains(&point.temperature) {
                errors.push(SagError::invalid_input(
                    "tensions.temperature",
                    point.temperature.to_string(),
                    "Invalid tension point, temperature is out of range",
                ));
            }

            if !point.tension_horizontal.is_finite() || point.tension_horizontal <= 0.0 {
                errors.push(SagError::invalid_input(
                    "tensions.tension_horizontal",
                    point.tension_horizontal.to_string(),
                    "Invalid tension point, tension is out of range",
                ));
            }

            if let Some(prev) = previous {
                if point.temperature <= prev.temperature {
                    errors.push(SagError::invalid_input(
                        "tensions.temperature",
                        point.temperature.to_string(),
                        "Invalid tension point, temperature is constant or decreasing",
                    ));
                }
                if prev.tension_horizontal < point.tension_horizontal {
                    errors.push(SagError::invalid_input(
                        "tensions.tension_horizontal",
                        point.tension_horizontal.to_string(),
                        "Invalid tension point, tension is increasing",
                    ));
                }
            }
            previous = Some(point);
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_cable() -> SagCable {
        SagCable {
            name: "Test".to_string(),
            scale: 1.0,
            correction_creep: 0.0,
            correction_sag: 0.0,
            weight_unit: 1.5,
            tensions: vec![
                TensionPoint::new(0.0, 10000.0),
                TensionPoint::new(25.0, 9000.0),
                TensionPoint::new(50.0, 8200.0),
                TensionPoint::new(75.0, 7600.0),
                TensionPoint::new(100.0, 7200.0),
            ],
        }
    }

    #[test]
    fn test_valid_cable() {
        let cable = test_cable();
        assert!(cable.validation_errors().is_empty());
        assert_eq!(cable.temperature_range(), Some((0.0, 100.0)));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut cable = test_cable();
        cable.scale = 0.0;
        cable.weight_unit = -1.0;
        cable.correction_creep = 150.0;

        let errors = cable.validation_errors();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_non_finite_scale_rejected() {
        let mut cable = test_cable();
        cable.scale = f64::NAN;
        assert_eq!(cable.validation_errors().len(), 1);
    }

    #[test]
    fn test_increasing_tension_rejected() {
        let mut cable = test_cable();
        cable.tensions[3].tension_horizontal = 8300.0;

        let errors = cable.validation_errors();
        assert!(errors.iter().any(|e| e.to_string().contains("tension is increasing")));
    }

    #[test]
    fn test_wrong_point_count_rejected() {
        let mut cable = test_cable();
        cable.tensions.pop();
        assert!(!cable.validation_errors().is_empty());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let cable = test_cable();
        let json = serde_json::to_string_pretty(&cable).unwrap();
        let roundtrip: SagCable = serde_json::from_str(&json).unwrap();
        assert_eq!(cable, roundtrip);
    }
}
