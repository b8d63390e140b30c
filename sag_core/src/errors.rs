//! # Error Types
//!
//! Structured error types for sag_core. Each variant carries enough context
//! (field, temperature, method) to locate the cause of a failed validation
//! or a failed per-temperature solve without re-running the analysis.
//!
//! ## Example
//!
//! ```rust
//! use sag_core::errors::{SagError, SagResult};
//!
//! fn validate_interval(interval: f64) -> SagResult<()> {
//!     if interval <= 0.0 {
//!         return Err(SagError::invalid_input(
//!             "temperature_interval",
//!             interval.to_string(),
//!             "Interval must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for sag_core operations
pub type SagResult<T> = Result<T, SagError>;

/// Structured error type for sagging operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum SagError {
    /// An input value is invalid (out of range, non-finite, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A solver input has not been set
    #[error("Missing required input: {field}")]
    MissingField { field: String },

    /// Target temperature lies outside the cable calibration points
    #[error("Target temperature {temperature} is outside the cable temperature-tension points ({min} to {max})")]
    TemperatureOutOfRange { temperature: f64, min: f64, max: f64 },

    /// The fitted temperature-tension curve was rejected at the target
    #[error("Tension fit rejected at {temperature} degrees - {reason}")]
    TensionFitRejected { temperature: f64, reason: String },

    /// No valid catenary could be built
    #[error("Couldn't solve for a catenary: {reason}")]
    CatenaryUnsolved { reason: String },

    /// The method-specific sub-solve failed
    #[error("Couldn't solve for a {method} sagging solution: {reason}")]
    SaggingUnsolved { method: String, reason: String },

    /// Transit control factor is below the table minimum (or outside the table)
    #[error("Control factor {control_factor:.3} rejected for elevation factor {elevation_factor:.3}. Try relocating transit.")]
    ControlFactorRejected {
        elevation_factor: f64,
        control_factor: f64,
    },

    /// An accessor was called for a method other than the active one
    #[error("Method mismatch: requested {requested}, span uses {active}")]
    MethodMismatch { requested: String, active: String },

    /// Span validation failed, analysis aborted before any solve
    #[error("Span '{span}' has {} validation error(s), analysis aborted", .errors.len())]
    SpanInvalid { span: String, errors: Vec<SagError> },

    /// A worker thread could not be started
    #[error("Couldn't start analysis worker {worker}: {reason}")]
    WorkerStart { worker: usize, reason: String },

    /// File system operation failed
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON encoding or decoding failed
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Project file written by an incompatible schema version
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl SagError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        SagError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        SagError::MissingField {
            field: field.into(),
        }
    }

    /// Create a CatenaryUnsolved error
    pub fn catenary_unsolved(reason: impl Into<String>) -> Self {
        SagError::CatenaryUnsolved {
            reason: reason.into(),
        }
    }

    /// Create a SaggingUnsolved error
    pub fn sagging_unsolved(method: impl Into<String>, reason: impl Into<String>) -> Self {
        SagError::SaggingUnsolved {
            method: method.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        SagError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for failures of the catenary stage (interpolation, sag correction, geometry)
    pub fn is_catenary_stage(&self) -> bool {
        matches!(
            self,
            SagError::TemperatureOutOfRange { .. }
                | SagError::TensionFitRejected { .. }
                | SagError::CatenaryUnsolved { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            SagError::InvalidInput { .. } => "INVALID_INPUT",
            SagError::MissingField { .. } => "MISSING_FIELD",
            SagError::TemperatureOutOfRange { .. } => "TEMPERATURE_OUT_OF_RANGE",
            SagError::TensionFitRejected { .. } => "TENSION_FIT_REJECTED",
            SagError::CatenaryUnsolved { .. } => "CATENARY_UNSOLVED",
            SagError::SaggingUnsolved { .. } => "SAGGING_UNSOLVED",
            SagError::ControlFactorRejected { .. } => "CONTROL_FACTOR_REJECTED",
            SagError::MethodMismatch { .. } => "METHOD_MISMATCH",
            SagError::SpanInvalid { .. } => "SPAN_INVALID",
            SagError::WorkerStart { .. } => "WORKER_START",
            SagError::FileError { .. } => "FILE_ERROR",
            SagError::SerializationError { .. } => "SERIALIZATION_ERROR",
            SagError::VersionMismatch { .. } => "VERSION_MISMATCH",
            SagError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}
