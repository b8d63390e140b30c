//! Shared span fixtures for unit tests.

use crate::geometry::{Point2d, SpanEnd};
use crate::model::{SagCable, SagMethod, SagSpan, SagStructure, TensionPoint};

/// Cable with a monotonic decreasing calibration curve over 0-100 degrees
pub fn test_cable() -> SagCable {
    SagCable {
        name: "Test Cable".to_string(),
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

/// Level 500 ft span checked with a dynamometer at the back end
pub fn dyno_span(temperature_base: f64, temperature_interval: f64) -> SagSpan {
    span_with_method(
        SagMethod::Dynamometer { end: SpanEnd::Back },
        temperature_base,
        temperature_interval,
    )
}

pub fn span_with_method(method: SagMethod, temperature_base: f64, temperature_interval: f64) -> SagSpan {
    SagSpan {
        description: "Str 1 - Str 2".to_string(),
        notes: String::new(),
        cable: test_cable(),
        method,
        structure_back: SagStructure::new("Str 1", Point2d::new(0.0, 0.0)),
        structure_ahead: SagStructure::new("Str 2", Point2d::new(500.0, 0.0)),
        temperature_base,
        temperature_interval,
    }
}
