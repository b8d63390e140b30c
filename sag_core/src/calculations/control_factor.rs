//! # Transit Control Factor Table
//!
//! Minimum acceptable control factor as a function of the span elevation
//! factor (|vertical spacing / horizontal spacing|). Inclined spans need the
//! sight line to touch the cable closer to the maximum sag point.
//!
//! Elevation factors outside the table (below 0.00 or above 0.75) are never
//! acceptable.

/// (elevation factor, minimum control factor), ascending
pub const CONTROL_FACTOR_MINIMUMS: [(f64, f64); 16] = [
    (0.00, 0.750),
    (0.05, 0.750),
    (0.10, 0.850),
    (0.15, 0.910),
    (0.20, 0.940),
    (0.25, 0.960),
    (0.30, 0.970),
    (0.35, 0.980),
    (0.40, 0.985),
    (0.45, 0.990),
    (0.50, 0.992),
    (0.55, 0.994),
    (0.60, 0.996),
    (0.65, 0.997),
    (0.70, 0.998),
    (0.75, 0.999),
];

/// Minimum control factor for an elevation factor, or `None` outside the table.
pub fn minimum_control_factor(elevation_factor: f64) -> Option<f64> {
    let (first_x, first_y) = CONTROL_FACTOR_MINIMUMS[0];
    if elevation_factor == first_x {
        return Some(first_y);
    }

    CONTROL_FACTOR_MINIMUMS.windows(2).find_map(|segment| {
        let (x0, y0) = segment[0];
        let (x1, y1) = segment[1];
        if elevation_factor == x1 {
            Some(y1)
        } else if x0 < elevation_factor && elevation_factor < x1 {
            Some(y0 + (y1 - y0) * (elevation_factor - x0) / (x1 - x0))
        } else {
            None
        }
    })
}

/// Whether an observed control factor clears the table minimum.
pub fn is_valid_control_factor(elevation_factor: f64, control_factor: f64) -> bool {
    match minimum_control_factor(elevation_factor) {
        Some(minimum) => minimum <= control_factor,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_breakpoints() {
        assert_eq!(minimum_control_factor(0.0), Some(0.750));
        assert_eq!(minimum_control_factor(0.10), Some(0.850));
        assert_eq!(minimum_control_factor(0.75), Some(0.999));
    }

    #[test]
    fn test_linear_interpolation() {
        let minimum = minimum_control_factor(0.125).unwrap();
        assert!((minimum - 0.880).abs() < 1e-12);
    }

    #[test]
    fn test_boundaries_accepted() {
        assert!(is_valid_control_factor(0.0, 0.75));
        assert!(is_valid_control_factor(0.75, 0.999));
        assert!(is_valid_control_factor(0.75, 1.0));
    }

    #[test]
    fn test_outside_table_rejected() {
        assert!(!is_valid_control_factor(0.76, 1.0));
        assert!(!is_valid_control_factor(1.75, 1.0));
        assert!(!is_valid_control_factor(-0.01, 1.0));
        assert!(!is_valid_control_factor(f64::NAN, 1.0));
    }

    #[test]
    fn test_below_minimum_rejected() {
        assert!(!is_valid_control_factor(0.0, 0.70));
        assert!(!is_valid_control_factor(0.30, 0.96));
        assert!(is_valid_control_factor(0.30, 0.97));
    }
}
