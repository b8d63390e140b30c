//! # Geometry Primitives
//!
//! Span coordinates are 2D (x = horizontal position, y = elevation).
//! Catenary coordinates are 3D with the catenary plane in x-z
//! (x = horizontal, z = vertical), origin at the back attachment.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Point in span coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2d {
    pub x: f64,
    pub y: f64,
}

impl Point2d {
    pub fn new(x: f64, y: f64) -> Self {
        Point2d { x, y }
    }

    /// Both coordinates are finite numbers
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point2d {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Point2d::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2d {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Point2d::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Point in catenary coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3d {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3d {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Point3d { x, y, z }
    }

    /// Lift a span point into the catenary plane (y -> z)
    pub fn from_span(point: Point2d) -> Self {
        Point3d::new(point.x, 0.0, point.y)
    }

    /// Project back onto the span plane (z -> y)
    pub fn to_span(self) -> Point2d {
        Point2d::new(self.x, self.z)
    }
}

/// Vector between catenary endpoints or a distributed load vector
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3d {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3d {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vector3d { x, y, z }
    }
}

/// Direction along the span axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisDirection {
    /// Toward the ahead structure
    Positive,
    /// Toward the back structure
    Negative,
}

/// One end of a span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpanEnd {
    Back,
    Ahead,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_roundtrip_through_catenary_plane() {
        let point = Point2d::new(120.0, -14.5);
        let lifted = Point3d::from_span(point);
        assert_eq!(lifted.z, -14.5);
        assert_eq!(lifted.to_span(), point);
    }

    #[test]
    fn test_point_arithmetic() {
        let a = Point2d::new(10.0, 5.0);
        let b = Point2d::new(2.0, 1.0);
        assert_eq!(a - b, Point2d::new(8.0, 4.0));
        assert_eq!(a + b, Point2d::new(12.0, 6.0));
    }

    #[test]
    fn test_finite_check() {
        assert!(Point2d::new(0.0, 0.0).is_finite());
        assert!(!Point2d::new(f64::NAN, 0.0).is_finite());
    }
}
