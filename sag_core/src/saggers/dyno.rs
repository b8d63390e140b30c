//! # Dynamometer Sagging
//!
//! The dynamometer sits in line with the cable at one end, so it reads the
//! total support tension there: `T = H·cosh(u_end/a)`.

use serde::{Deserialize, Serialize};

use crate::catenary::Catenary;
use crate::errors::{SagError, SagResult};
use crate::geometry::SpanEnd;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DynoSagger {
    pub end: SpanEnd,
    tension: f64,
}

impl DynoSagger {
    pub fn solve(catenary: &Catenary, end: SpanEnd) -> SagResult<Self> {
        catenary.validate()?;

        let tension = catenary.tension_at_end(end);
        if !tension.is_finite() || tension <= 0.0 {
            return Err(SagError::sagging_unsolved(
                "dynamometer",
                format!("end tension {} is not valid", tension),
            ));
        }

        Ok(DynoSagger { end, tension })
    }

    /// Tension read on the dynamometer
    pub fn tension(&self) -> f64 {
        self.tension
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vector3d;

    #[test]
    fn test_lower_end_reads_less_tension() {
        // ahead end is 60 higher
        let catenary = Catenary::new(Vector3d::new(600.0, 0.0, 60.0), 1.2, 5000.0);
        let back = DynoSagger::solve(&catenary, SpanEnd::Back).unwrap();
        let ahead = DynoSagger::solve(&catenary, SpanEnd::Ahead).unwrap();

        assert!(back.tension() < ahead.tension());
        // difference in support tension equals w times difference in elevation
        assert!((ahead.tension() - back.tension() - 1.2 * 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_catenary_rejected() {
        let catenary = Catenary::new(Vector3d::new(600.0, 0.0, 0.0), 1.2, -5.0);
        assert!(DynoSagger::solve(&catenary, SpanEnd::Back).is_err());
    }
}
