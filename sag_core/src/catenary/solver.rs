//! # Catenary Solver
//!
//! Finds the horizontal tension that produces a target sag for a given
//! endpoint spacing and unit weight. Sag falls monotonically as tension
//! rises, so the catenary constant is bracketed and then bisected.

use crate::catenary::Catenary;
use crate::errors::{SagError, SagResult};
use crate::geometry::Vector3d;

const MAX_BRACKET_STEPS: usize = 64;
const MAX_BISECTION_STEPS: usize = 200;
const RELATIVE_TOLERANCE: f64 = 1e-12;

/// Solves for a catenary with a target sag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatenarySolver {
    pub spacing_endpoints: Vector3d,
    pub weight_unit: f64,
    pub sag_target: f64,
}

impl CatenarySolver {
    pub fn new(spacing_endpoints: Vector3d, weight_unit: f64, sag_target: f64) -> Self {
        CatenarySolver {
            spacing_endpoints,
            weight_unit,
            sag_target,
        }
    }

    fn sag_for_constant(&self, constant: f64) -> f64 {
        self.catenary_for_constant(constant).sag()
    }

    fn catenary_for_constant(&self, constant: f64) -> Catenary {
        Catenary::new(self.spacing_endpoints, self.weight_unit, constant * self.weight_unit)
    }

    /// Solve for the catenary, or report why no catenary has the target sag.
    pub fn solve(&self) -> SagResult<Catenary> {
        let h = self.spacing_endpoints.x;
        let target = self.sag_target;

        if !target.is_finite() || target <= 0.0 {
            return Err(SagError::catenary_unsolved(format!(
                "target sag {} must be positive",
                target
            )));
        }
        if !h.is_finite() || h <= 0.0 || !self.weight_unit.is_finite() || self.weight_unit <= 0.0 {
            return Err(SagError::catenary_unsolved(
                "spacing and unit weight must be positive to solve for sag",
            ));
        }

        // parabolic estimate of the catenary constant
        let estimate = h * h / (8.0 * target);
        let mut low = estimate / 2.0;
        let mut high = estimate * 2.0;

        // low constant = deep sag
        let mut steps = 0;
        loop {
            let sag = self.sag_for_constant(low);
            if !sag.is_finite() || self.catenary_for_constant(low).validate().is_err() {
                return Err(SagError::catenary_unsolved(format!(
                    "no catenary reaches a sag of {:.3}",
                    target
                )));
            }
            if target <= sag {
                break;
            }
            steps += 1;
            if MAX_BRACKET_STEPS < steps {
                return Err(SagError::catenary_unsolved("couldn't bracket the target sag"));
            }
            low /= 2.0;
        }

        steps = 0;
        while target < self.sag_for_constant(high) {
            steps += 1;
            if MAX_BRACKET_STEPS < steps {
                return Err(SagError::catenary_unsolved("couldn't bracket the target sag"));
            }
            high *= 2.0;
        }

        for _ in 0..MAX_BISECTION_STEPS {
            let mid = (low + high) / 2.0;
            if self.sag_for_constant(mid) < target {
                high = mid;
            } else {
                low = mid;
            }
            if high - low <= RELATIVE_TOLERANCE * high {
                break;
            }
        }

        let catenary = self.catenary_for_constant((low + high) / 2.0);
        catenary.validate()?;
        Ok(catenary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recovers_known_tension() {
        let spacing = Vector3d::new(500.0, 0.0, 0.0);
        let known = Catenary::new(spacing, 1.5, 8200.0);

        let solved = CatenarySolver::new(spacing, 1.5, known.sag()).solve().unwrap();
        assert!((solved.tension_horizontal() - 8200.0).abs() < 1e-6);
    }

    #[test]
    fn test_inclined_span() {
        let spacing = Vector3d::new(800.0, 0.0, -60.0);
        let solved = CatenarySolver::new(spacing, 2.0, 25.0).solve().unwrap();
        assert!((solved.sag() - 25.0).abs() < 1e-6);
    }

    #[test]
    fn test_larger_sag_needs_less_tension() {
        let spacing = Vector3d::new(500.0, 0.0, 0.0);
        let shallow = CatenarySolver::new(spacing, 1.5, 4.0).solve().unwrap();
        let deep = CatenarySolver::new(spacing, 1.5, 9.0).solve().unwrap();
        assert!(deep.tension_horizontal() < shallow.tension_horizontal());
    }

    #[test]
    fn test_non_positive_target_fails() {
        let spacing = Vector3d::new(500.0, 0.0, 0.0);
        assert!(CatenarySolver::new(spacing, 1.5, 0.0).solve().is_err());
        assert!(CatenarySolver::new(spacing, 1.5, -2.0).solve().is_err());
        assert!(CatenarySolver::new(spacing, 1.5, f64::NAN).solve().is_err());
    }
}
