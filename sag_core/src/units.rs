//! # Unit Systems
//!
//! Sagging data is entered in one consistent unit system per analysis. The
//! engine never converts between systems (that belongs to the document
//! layer); it only needs the few constants that depend on the system:
//!
//! - the shift from the relative temperature scale to the absolute one
//!   (Fahrenheit to Rankine, Celsius to Kelvin), used by tension fitting
//! - gravitational acceleration, used by the stopwatch method
//!
//! ## Example
//!
//! ```rust
//! use sag_core::units::UnitSystem;
//!
//! let units = UnitSystem::Metric;
//! assert_eq!(units.absolute_temperature(0.0), 273.15);
//! assert_eq!(units.temperature_label(), "deg C");
//! ```

use serde::{Deserialize, Serialize};

/// Offset from degrees Fahrenheit to degrees Rankine
pub const FAHRENHEIT_TO_RANKINE: f64 = 459.67;

/// Offset from degrees Celsius to Kelvin
pub const CELSIUS_TO_KELVIN: f64 = 273.15;

/// Standard gravity in ft/s²
pub const GRAVITY_FT_PER_S2: f64 = 32.17405;

/// Standard gravity in m/s²
pub const GRAVITY_M_PER_S2: f64 = 9.80665;

/// Unit system of all span inputs.
///
/// | System   | Length | Force | Unit weight | Temperature |
/// |----------|--------|-------|-------------|-------------|
/// | Imperial | ft     | lbs   | lbs/ft      | deg F       |
/// | Metric   | m      | N     | N/m         | deg C       |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UnitSystem {
    #[default]
    Imperial,
    Metric,
}

impl UnitSystem {
    /// Shift added to a relative temperature to reach the absolute scale
    pub fn absolute_temperature_shift(self) -> f64 {
        match self {
            UnitSystem::Imperial => FAHRENHEIT_TO_RANKINE,
            UnitSystem::Metric => CELSIUS_TO_KELVIN,
        }
    }

    /// Convert a relative temperature to the absolute scale
    pub fn absolute_temperature(self, temperature: f64) -> f64 {
        temperature + self.absolute_temperature_shift()
    }

    /// Gravitational acceleration in length units per second squared
    pub fn gravity(self) -> f64 {
        match self {
            UnitSystem::Imperial => GRAVITY_FT_PER_S2,
            UnitSystem::Metric => GRAVITY_M_PER_S2,
        }
    }

    pub fn length_label(self) -> &'static str {
        match self {
            UnitSystem::Imperial => "ft",
            UnitSystem::Metric => "m",
        }
    }

    pub fn force_label(self) -> &'static str {
        match self {
            UnitSystem::Imperial => "lbs",
            UnitSystem::Metric => "N",
        }
    }

    pub fn temperature_label(self) -> &'static str {
        match self {
            UnitSystem::Imperial => "deg F",
            UnitSystem::Metric => "deg C",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_shift() {
        assert_eq!(UnitSystem::Imperial.absolute_temperature(0.0), 459.67);
        assert_eq!(UnitSystem::Metric.absolute_temperature(25.0), 298.15);
    }

    #[test]
    fn test_gravity() {
        assert!((UnitSystem::Imperial.gravity() - 32.174).abs() < 0.001);
        assert!((UnitSystem::Metric.gravity() - 9.807).abs() < 0.001);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&UnitSystem::Metric).unwrap();
        assert_eq!(json, "\"Metric\"");

        let roundtrip: UnitSystem = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, UnitSystem::Metric);
    }
}
