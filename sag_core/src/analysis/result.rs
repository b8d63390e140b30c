//! # Analysis Results
//!
//! One [`AnalysisResult`] per target temperature. Only the fields of the
//! span's active method are populated; an unsolved slot has no temperature.
//!
//! ## JSON Example (dynamometer)
//!
//! ```json
//! {
//!   "temperature_cable": 50.0,
//!   "catenary": {
//!     "spacing_endpoints": { "x": 500.0, "y": 0.0, "z": 0.0 },
//!     "weight_unit": 1.5,
//!     "tension_horizontal": 8200.0
//!   },
//!   "offset_coordinates": { "x": 0.0, "y": 0.0 },
//!   "method": { "type": "Dynamometer", "tension_dyno": 8208.6 }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::catenary::Catenary;
use crate::geometry::{AxisDirection, Point2d};

/// Method-specific values of a solved result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MethodResult {
    Dynamometer {
        tension_dyno: f64,
    },
    Stopwatch {
        time_stopwatch: f64,
        speed_wave: f64,
    },
    Transit {
        angle_transit: f64,
        direction_transit: Option<AxisDirection>,
        /// Vertical distance from the sighted attachment to the target
        distance_target: Option<f64>,
        point_target: Point2d,
        factor_control: f64,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Cable temperature, `None` when this slot has no usable solution
    pub temperature_cable: Option<f64>,

    pub catenary: Option<Catenary>,

    /// Offset from catenary coordinates to span coordinates (back attachment)
    pub offset_coordinates: Point2d,

    pub method: Option<MethodResult>,
}

impl AnalysisResult {
    pub fn is_solved(&self) -> bool {
        self.temperature_cable.is_some()
    }

    pub fn tension_dyno(&self) -> Option<f64> {
        match self.method {
            Some(MethodResult::Dynamometer { tension_dyno }) => Some(tension_dyno),
            _ => None,
        }
    }

    pub fn time_stopwatch(&self) -> Option<f64> {
        match self.method {
            Some(MethodResult::Stopwatch { time_stopwatch, .. }) => Some(time_stopwatch),
            _ => None,
        }
    }

    pub fn speed_wave(&self) -> Option<f64> {
        match self.method {
            Some(MethodResult::Stopwatch { speed_wave, .. }) => Some(speed_wave),
            _ => None,
        }
    }

    pub fn factor_control(&self) -> Option<f64> {
        match self.method {
            Some(MethodResult::Transit { factor_control, .. }) => Some(factor_control),
            _ => None,
        }
    }

    pub fn point_target(&self) -> Option<Point2d> {
        match self.method {
            Some(MethodResult::Transit { point_target, .. }) => Some(point_target),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unsolved() {
        let result = AnalysisResult::default();
        assert!(!result.is_solved());
        assert!(result.catenary.is_none());
        assert_eq!(result.tension_dyno(), None);
    }

    #[test]
    fn test_method_accessors() {
        let result = AnalysisResult {
            temperature_cable: Some(60.0),
            catenary: None,
            offset_coordinates: Point2d::default(),
            method: Some(MethodResult::Stopwatch {
                time_stopwatch: 6.2,
                speed_wave: 320.0,
            }),
        };
        assert_eq!(result.time_stopwatch(), Some(6.2));
        assert_eq!(result.speed_wave(), Some(320.0));
        assert_eq!(result.tension_dyno(), None);
        assert_eq!(result.point_target(), None);
    }

    #[test]
    fn test_result_serialization() {
        let result = AnalysisResult {
            temperature_cable: Some(50.0),
            catenary: None,
            offset_coordinates: Point2d::new(10.0, 2.0),
            method: Some(MethodResult::Dynamometer { tension_dyno: 8208.6 }),
        };
        let json = serde_json::to_string_pretty(&result).unwrap();
        assert!(json.contains("tension_dyno"));
        assert!(json.contains("\"type\": \"Dynamometer\""));

        let roundtrip: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, result);
    }
}
