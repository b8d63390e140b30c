//! # Sag Structure
//!
//! An end structure of a span and the point where the cable attaches.

use serde::{Deserialize, Serialize};

use crate::errors::SagError;
use crate::geometry::Point2d;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SagStructure {
    /// Structure name (e.g., "Str 12")
    pub name: String,

    /// Attachment description (e.g., "Top phase, east")
    pub description: String,

    /// Attachment point (x = horizontal position, y = elevation)
    pub point_attachment: Point2d,
}

impl SagStructure {
    pub fn new(name: impl Into<String>, point_attachment: Point2d) -> Self {
        SagStructure {
            name: name.into(),
            description: String::new(),
            point_attachment,
        }
    }

    pub fn validation_errors(&self) -> Vec<SagError> {
        let mut errors = Vec::new();
        if !self.point_attachment.is_finite() {
            errors.push(SagError::invalid_input(
                "point_attachment",
                format!("({}, {})", self.point_attachment.x, self.point_attachment.y),
                format!("Invalid attachment point on structure '{}'", self.name),
            ));
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_must_be_set() {
        let structure = SagStructure::new("Str 1", Point2d::new(0.0, f64::NAN));
        assert_eq!(structure.validation_errors().len(), 1);

        let structure = SagStructure::new("Str 1", Point2d::new(0.0, 35.0));
        assert!(structure.validation_errors().is_empty());
    }
}
