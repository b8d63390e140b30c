//! # Sag Method
//!
//! The field technique used to check sag. Exactly one variant is active
//! per span; the solver dispatches on it with a single exhaustive match.
//!
//! ## JSON Serialization
//!
//! ```json
//! { "type": "Dynamometer", "end": "Back" }
//! { "type": "Stopwatch", "wave_return": 3 }
//! { "type": "Transit", "point_transit": { "x": 0.0, "y": -10.0 } }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::SagError;
use crate::geometry::{Point2d, SpanEnd};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SagMethod {
    /// Tension measured at one end of the span
    Dynamometer { end: SpanEnd },
    /// Time for a struck wave to return `wave_return` times
    Stopwatch { wave_return: u32 },
    /// Sight line from a transit tangent to the cable
    Transit { point_transit: Point2d },
}

impl SagMethod {
    /// Method name used in messages and reports
    pub fn name(&self) -> &'static str {
        match self {
            SagMethod::Dynamometer { .. } => "dynamometer",
            SagMethod::Stopwatch { .. } => "stopwatch",
            SagMethod::Transit { .. } => "transit",
        }
    }

    /// Collect every validation problem with this method.
    pub fn validation_errors(&self) -> Vec<SagError> {
        let mut errors = Vec::new();
        match self {
            SagMethod::Dynamometer { .. } => {}
            SagMethod::Stopwatch { wave_return } => {
                if *wave_return == 0 {
                    errors.push(SagError::invalid_input(
                        "wave_return",
                        wave_return.to_string(),
                        "Invalid return wave, must be positive",
                    ));
                }
            }
            SagMethod::Transit { point_transit } => {
                if !point_transit.is_finite() {
                    errors.push(SagError::invalid_input(
                        "point_transit",
                        format!("({}, {})", point_transit.x, point_transit.y),
                        "Invalid transit position",
                    ));
                }
            }
        }
        errors
    }
}

impl fmt::Display for SagMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopwatch_requires_positive_waves() {
        assert_eq!(SagMethod::Stopwatch { wave_return: 0 }.validation_errors().len(), 1);
        assert!(SagMethod::Stopwatch { wave_return: 3 }.validation_errors().is_empty());
    }

    #[test]
    fn test_transit_requires_finite_point() {
        let method = SagMethod::Transit {
            point_transit: Point2d::new(f64::INFINITY, 0.0),
        };
        assert_eq!(method.validation_errors().len(), 1);
    }

    #[test]
    fn test_tagged_serialization() {
        let method = SagMethod::Dynamometer { end: SpanEnd::Ahead };
        let json = serde_json::to_string(&method).unwrap();
        assert_eq!(json, r#"{"type":"Dynamometer","end":"Ahead"}"#);

        let roundtrip: SagMethod = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, method);
    }
}
