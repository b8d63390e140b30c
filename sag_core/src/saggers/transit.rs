//! # Transit Sagging
//!
//! The transit is set up below the cable near one structure and sighted
//! along a line tangent to the cable. The crew sags the cable until it just
//! touches the line of sight, which lands on the far structure at the
//! target point.
//!
//! The control factor (sag at the tangent point divided by the maximum sag)
//! measures how well the sight line controls the sag; tangent points near
//! the span ends control poorly.

use serde::{Deserialize, Serialize};

use crate::catenary::Catenary;
use crate::errors::{SagError, SagResult};
use crate::geometry::{AxisDirection, Point3d};

const MAX_BISECTION_STEPS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitSagger {
    point_transit: Point3d,
    point_tangent: Point3d,
    point_target: Point3d,
    direction: AxisDirection,
    angle_low: f64,
    factor_control: f64,
}

impl TransitSagger {
    /// Solve the sight line for a transit point in catenary coordinates.
    pub fn solve(catenary: &Catenary, point_transit: Point3d) -> SagResult<Self> {
        catenary.validate()?;

        let fail = |reason: String| SagError::sagging_unsolved("transit", reason);

        if !point_transit.x.is_finite() || !point_transit.z.is_finite() {
            return Err(fail("transit position is not finite".to_string()));
        }

        let span = catenary.spacing_endpoints().x;
        let xp = point_transit.x;
        let zp = point_transit.z;

        if zp >= catenary.height_at(xp) {
            return Err(fail("transit must be below the cable".to_string()));
        }

        // sight toward the farther structure
        let (direction, x_target) = if xp < span / 2.0 {
            (AxisDirection::Positive, span)
        } else {
            (AxisDirection::Negative, 0.0)
        };

        // zero where the line from the transit touches the curve
        let tangency = |x: f64| catenary.height_at(x) - zp - catenary.slope_at(x) * (x - xp);

        if tangency(x_target) >= 0.0 {
            return Err(fail(
                "sight line doesn't touch the cable before the target structure".to_string(),
            ));
        }

        // tangency is positive at the transit and negative at the target
        let mut near = xp;
        let mut far = x_target;
        for _ in 0..MAX_BISECTION_STEPS {
            let mid = (near + far) / 2.0;
            if tangency(mid) > 0.0 {
                near = mid;
            } else {
                far = mid;
            }
            if (far - near).abs() <= 1e-12 * span {
                break;
            }
        }
        let x_tangent = (near + far) / 2.0;

        if !(0.0..=span).contains(&x_tangent) {
            return Err(fail("tangent point lies outside the span".to_string()));
        }

        let slope = catenary.slope_at(x_tangent);
        let point_tangent = Point3d::new(x_tangent, 0.0, catenary.height_at(x_tangent));
        let point_target = Point3d::new(x_target, 0.0, zp + slope * (x_target - xp));

        let slope_sight = match direction {
            AxisDirection::Positive => slope,
            AxisDirection::Negative => -slope,
        };
        let angle_low = slope_sight.atan().to_degrees();

        let sag_max = catenary.sag();
        let factor_control = catenary.sag_at(x_tangent) / sag_max;

        Ok(TransitSagger {
            point_transit,
            point_tangent,
            point_target,
            direction,
            angle_low,
            factor_control,
        })
    }

    pub fn point_transit(&self) -> Point3d {
        self.point_transit
    }

    /// Where the sight line touches the cable
    pub fn point_tangent(&self) -> Point3d {
        self.point_tangent
    }

    /// Where the sight line meets the far structure
    pub fn point_target(&self) -> Point3d {
        self.point_target
    }

    /// Direction the transit is sighted
    pub fn direction(&self) -> AxisDirection {
        self.direction
    }

    /// Vertical angle of the sight line in degrees, positive above horizontal
    pub fn angle_low(&self) -> f64 {
        self.angle_low
    }

    /// Sag at the tangent point divided by the maximum sag
    pub fn factor_control(&self) -> f64 {
        self.factor_control
    }
}
