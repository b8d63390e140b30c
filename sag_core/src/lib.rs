//! # sag_core - Overhead Cable Sagging Engine
//!
//! `sag_core` computes the field values a line crew uses to sag a cable
//! between two structures. A span is solved at five temperatures around a
//! base temperature, and each solution is expressed in the span's field
//! method: dynamometer tension, stopwatch wave-return time, or a transit
//! sight angle with its control factor.
//!
//! ## Design Philosophy
//!
//! - **JSON-First**: All inputs and results implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types with stable error codes
//! - **Per-temperature isolation**: One failed temperature never aborts
//!   the others
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sag_core::analysis::AnalysisController;
//! use sag_core::project::AnalysisSettings;
//!
//! let mut controller = AnalysisController::new(&AnalysisSettings::default());
//! let outcome = controller.run_analysis(Some(&span))?;
//! for result in controller.results().iter().filter(|r| r.is_solved()) {
//!     println!("{:?} -> {:?}", result.temperature_cable, result.tension_dyno());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`model`] - Span, cable, structure and sagging method inputs
//! - [`catenary`] - Catenary curve and sag-to-tension solver
//! - [`saggers`] - Dynamometer, stopwatch and transit sub-solvers
//! - [`calculations`] - Tension curve, control factor table, span sagger
//! - [`analysis`] - Multi-temperature analysis runs and reports
//! - [`project`] - Project container and analysis settings
//! - [`units`] - Unit systems and physical constants
//! - [`errors`] - Structured error types
//! - [`file_io`] - Atomic project saves and versioned loads

pub mod analysis;
pub mod calculations;
pub mod catenary;
pub mod errors;
pub mod file_io;
pub mod geometry;
pub mod model;
pub mod project;
pub mod saggers;
pub mod units;

#[cfg(test)]
mod test_support;

// Re-export commonly used types at crate root for convenience
pub use analysis::{AnalysisController, AnalysisMessage, AnalysisOutcome, AnalysisReport, AnalysisResult};
pub use errors::{SagError, SagResult};
pub use file_io::{load_project, save_project};
pub use model::{SagCable, SagMethod, SagSpan, SagStructure, TensionPoint};
pub use project::{AnalysisSettings, SagProject};
pub use units::UnitSystem;
