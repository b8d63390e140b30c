//! # Stopwatch Sagging
//!
//! A wave struck at one end travels to the far end and back. The crew
//! times a number of returns; each return covers twice the cable length at
//! the transverse wave speed `v = sqrt(H·g/w)`.

use serde::{Deserialize, Serialize};

use crate::catenary::Catenary;
use crate::errors::{SagError, SagResult};
use crate::units::UnitSystem;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StopwatchSagger {
    speed_wave: f64,
    length: f64,
}

impl StopwatchSagger {
    pub fn solve(catenary: &Catenary, units: UnitSystem) -> SagResult<Self> {
        catenary.validate()?;

        let speed_wave =
            (catenary.tension_horizontal() * units.gravity() / catenary.weight_unit()).sqrt();
        let length = catenary.length();

        if !speed_wave.is_finite() || speed_wave <= 0.0 {
            return Err(SagError::sagging_unsolved(
                "stopwatch",
                format!("wave speed {} is not valid", speed_wave),
            ));
        }

        Ok(StopwatchSagger { speed_wave, length })
    }

    /// Transverse wave speed, length units per second
    pub fn speed_wave(&self) -> f64 {
        self.speed_wave
    }

    /// Seconds for `waves` returns
    pub fn time_return(&self, waves: u32) -> f64 {
        f64::from(waves) * 2.0 * self.length / self.speed_wave
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vector3d;

    #[test]
    fn test_classic_sag_formula() {
        // field rule: sag ≈ g·t²/32 for one return
        let catenary = Catenary::new(Vector3d::new(400.0, 0.0, 0.0), 1.0, 4000.0);
        let sagger = StopwatchSagger::solve(&catenary, UnitSystem::Imperial).unwrap();
        let t = sagger.time_return(1);
        let sag_estimate = UnitSystem::Imperial.gravity() * t * t / 32.0;
        assert!((sag_estimate - catenary.sag()).abs() / catenary.sag() < 0.01);
    }

    #[test]
    fn test_time_scales_with_waves() {
        let catenary = Catenary::new(Vector3d::new(150.0, 0.0, 10.0), 15.0, 20000.0);
        let sagger = StopwatchSagger::solve(&catenary, UnitSystem::Metric).unwrap();
        assert!((sagger.time_return(3) - 3.0 * sagger.time_return(1)).abs() < 1e-12);
    }
}
