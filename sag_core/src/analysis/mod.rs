//! # Span Analysis
//!
//! Solves a span at its five target temperatures and keeps the results for
//! the caller:
//!
//! - [`controller`] - validates the span, partitions the temperatures across
//!   worker threads and collects results and messages
//! - [`worker`] - solves its assigned temperatures with a private sagger
//! - [`result`] - per-temperature result slots
//! - [`report`] - printable rows for solved results
//!
//! A failure at one temperature never aborts the run. The slot for that
//! temperature stays unsolved and an [`AnalysisMessage`] names the
//! temperature and the stage that failed.

pub mod controller;
pub mod report;
pub mod result;
pub mod worker;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::SagError;

pub use controller::{AnalysisController, AnalysisOutcome};
pub use report::{AnalysisReport, ReportRow};
pub use result::{AnalysisResult, MethodResult};
pub use worker::{AnalysisJob, AnalysisWorker};

/// Stage of the per-temperature solve that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStage {
    Inputs,
    Catenary,
    Sagging,
}

impl SolveStage {
    pub fn of(error: &SagError) -> Self {
        match error {
            SagError::InvalidInput { .. } | SagError::MissingField { .. } => SolveStage::Inputs,
            _ if error.is_catenary_stage() => SolveStage::Catenary,
            _ => SolveStage::Sagging,
        }
    }
}

impl fmt::Display for SolveStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStage::Inputs => write!(f, "inputs"),
            SolveStage::Catenary => write!(f, "catenary"),
            SolveStage::Sagging => write!(f, "sagging"),
        }
    }
}

/// Error from one temperature of an analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMessage {
    pub temperature: f64,
    pub stage: SolveStage,
    pub error: SagError,
}

impl AnalysisMessage {
    pub fn new(temperature: f64, error: SagError) -> Self {
        AnalysisMessage {
            temperature,
            stage: SolveStage::of(&error),
            error,
        }
    }
}

impl fmt::Display for AnalysisMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "No sagging solution for {:.0} degrees - {}: {}",
            self.temperature, self.stage, self.error
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_classification() {
        assert_eq!(SolveStage::of(&SagError::missing_field("cable")), SolveStage::Inputs);
        assert_eq!(
            SolveStage::of(&SagError::catenary_unsolved("no solution")),
            SolveStage::Catenary
        );
        assert_eq!(
            SolveStage::of(&SagError::ControlFactorRejected {
                elevation_factor: 0.0,
                control_factor: 0.25,
            }),
            SolveStage::Sagging
        );
    }

    #[test]
    fn test_message_names_temperature() {
        let message = AnalysisMessage::new(
            -1.0,
            SagError::TemperatureOutOfRange {
                temperature: -1.0,
                min: 0.0,
                max: 100.0,
            },
        );
        let text = message.to_string();
        assert!(text.starts_with("No sagging solution for -1 degrees"));
        assert!(text.contains("catenary"));
    }
}
