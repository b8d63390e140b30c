//! # Sag Span
//!
//! The complete input of a sagging analysis: cable, method, the two end
//! structures, and the temperatures to solve for. Spans are owned by the
//! document layer and only ever borrowed by the engine.

use serde::{Deserialize, Serialize};

use crate::errors::SagError;
use crate::model::{SagCable, SagMethod, SagStructure};

/// Number of temperatures solved per analysis (base ± 2 intervals)
pub const TARGET_TEMPERATURE_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SagSpan {
    /// User label (e.g., "Str 12 - Str 13")
    pub description: String,

    /// Free-form notes
    #[serde(default)]
    pub notes: String,

    pub cable: SagCable,

    pub method: SagMethod,

    pub structure_back: SagStructure,

    pub structure_ahead: SagStructure,

    /// Center of the solved temperature set
    pub temperature_base: f64,

    /// Step between solved temperatures, must be positive
    pub temperature_interval: f64,
}

impl SagSpan {
    /// Collect every validation problem with this span and its parts.
    ///
    /// These checks do not depend on any single target temperature.
    pub fn validation_errors(&self) -> Vec<SagError> {
        let mut errors = self.cable.validation_errors();
        errors.extend(self.method.validation_errors());
        errors.extend(self.structure_ahead.validation_errors());
        errors.extend(self.structure_back.validation_errors());

        let back = self.structure_back.point_attachment;
        let ahead = self.structure_ahead.point_attachment;
        if back.is_finite() && ahead.is_finite() && ahead.x <= back.x {
            errors.push(SagError::invalid_input(
                "structure_ahead",
                ahead.x.to_string(),
                "Ahead structure must be horizontally ahead of the back structure",
            ));
        }

        if !self.temperature_base.is_finite() || self.temperature_base < 0.0 {
            errors.push(SagError::invalid_input(
                "temperature_base",
                self.temperature_base.to_string(),
                "Invalid base temperature",
            ));
        }

        if !self.temperature_interval.is_finite() || self.temperature_interval <= 0.0 {
            errors.push(SagError::invalid_input(
                "temperature_interval",
                self.temperature_interval.to_string(),
                "Invalid interval temperature",
            ));
        }

        errors
    }

    /// Temperatures solved by an analysis, ascending:
    /// `base - 2i, base - i, base, base + i, base + 2i`.
    pub fn target_temperatures(&self) -> [f64; TARGET_TEMPERATURE_COUNT] {
        let low = self.temperature_base - 2.0 * self.temperature_interval;
        std::array::from_fn(|i| low + i as f64 * self.temperature_interval)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::dyno_span;

    #[test]
    fn test_valid_span() {
        let span = dyno_span(50.0, 20.0);
        assert!(span.validation_errors().is_empty());
    }

    #[test]
    fn test_target_temperatures() {
        let span = dyno_span(50.0, 20.0);
        assert_eq!(span.target_temperatures(), [10.0, 30.0, 50.0, 70.0, 90.0]);

        let span = dyno_span(5.0, 3.0);
        assert_eq!(span.target_temperatures(), [-1.0, 2.0, 5.0, 8.0, 11.0]);
    }

    #[test]
    fn test_interval_must_be_positive() {
        let span = dyno_span(50.0, 0.0);
        let errors = span.validation_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_structures_must_be_ordered() {
        let mut span = dyno_span(50.0, 20.0);
        span.structure_ahead.point_attachment.x = -10.0;
        assert_eq!(span.validation_errors().len(), 1);
    }

    #[test]
    fn test_errors_from_all_parts_are_collected() {
        let mut span = dyno_span(-5.0, 20.0);
        span.cable.weight_unit = 0.0;
        span.structure_back.point_attachment.y = f64::NAN;
        assert_eq!(span.validation_errors().len(), 3);
    }
}
