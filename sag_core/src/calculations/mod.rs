//! # Sagging Calculations
//!
//! Per-temperature solving for a single span:
//!
//! - [`tension_curve`] - horizontal tension at a temperature from the cable
//!   calibration points
//! - [`control_factor`] - minimum transit control factor table
//! - [`span_sagger`] - catenary and method-specific solution at one
//!   temperature
//!
//! Batches of temperatures are driven by [`crate::analysis`].

pub mod control_factor;
pub mod span_sagger;
pub mod tension_curve;

// Re-export commonly used types
pub use control_factor::{is_valid_control_factor, minimum_control_factor};
pub use span_sagger::SpanSagger;
pub use tension_curve::{TensionCurve, TensionFitPolicy};
