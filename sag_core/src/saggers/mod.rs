//! # Method Sub-Solvers
//!
//! Each field method turns a solved catenary into the quantity the crew
//! actually measures:
//!
//! - [`dyno`] - tension read on a dynamometer at one span end
//! - [`stopwatch`] - time for a struck wave to return a number of times
//! - [`transit`] - sight line tangent to the cable and its target point
//!
//! All sub-solvers work in catenary coordinates (origin at the back
//! attachment) and are pure functions of their inputs.

pub mod dyno;
pub mod stopwatch;
pub mod transit;

pub use dyno::DynoSagger;
pub use stopwatch::StopwatchSagger;
pub use transit::TransitSagger;
