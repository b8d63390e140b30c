//! # Span Data Model
//!
//! Inputs of a sagging analysis. All types are JSON-serializable and are
//! never mutated by the engine.
//!
//! ## Structure
//!
//! ```text
//! SagSpan
//! ├── cable: SagCable (unit weight, corrections, 5 temperature-tension points)
//! ├── method: SagMethod (Dynamometer | Stopwatch | Transit)
//! ├── structure_back: SagStructure
//! ├── structure_ahead: SagStructure
//! └── temperature_base / temperature_interval
//! ```

pub mod cable;
pub mod method;
pub mod span;
pub mod structure;

pub use cable::{SagCable, TensionPoint, TENSION_POINT_COUNT};
pub use method::SagMethod;
pub use span::{SagSpan, TARGET_TEMPERATURE_COUNT};
pub use structure::SagStructure;
