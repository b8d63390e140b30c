//! # Sagging Project
//!
//! `SagProject` holds the spans of one job, the analysis settings and the
//! span currently selected for analysis. Projects serialize to JSON.
//!
//! ## Structure
//!
//! ```text
//! SagProject
//! ├── meta: ProjectMetadata (version, name, engineer, timestamps)
//! ├── settings: AnalysisSettings (units, worker limit, tension fit policy)
//! ├── spans: HashMap<Uuid, SagSpan>
//! └── activated: Option<Uuid>
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use sag_core::project::SagProject;
//!
//! let mut project = SagProject::new("Line 12 rebuild", "Jane Engineer");
//! let id = project.add_span(span);
//! project.activate(id)?;
//!
//! let mut controller = project.controller();
//! let outcome = project.run_analysis(&mut controller)?;
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::{AnalysisController, AnalysisOutcome};
use crate::calculations::tension_curve::TensionFitPolicy;
use crate::errors::{SagError, SagResult};
use crate::model::SagSpan;
use crate::units::UnitSystem;

/// Current schema version for project files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Settings applied to every analysis run of a project.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisSettings {
    pub units: UnitSystem,

    /// Worker thread limit, `None` for the detected hardware parallelism
    #[serde(default)]
    pub max_workers: Option<usize>,

    #[serde(default)]
    pub tension_fit: TensionFitPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SagProject {
    pub meta: ProjectMetadata,

    pub settings: AnalysisSettings,

    /// All spans, keyed by UUID
    pub spans: HashMap<Uuid, SagSpan>,

    /// Span selected for analysis
    #[serde(default)]
    pub activated: Option<Uuid>,
}

impl SagProject {
    pub fn new(name: impl Into<String>, engineer: impl Into<String>) -> Self {
        let now = Utc::now();
        SagProject {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                name: name.into(),
                engineer: engineer.into(),
                created: now,
                modified: now,
            },
            settings: AnalysisSettings::default(),
            spans: HashMap::new(),
            activated: None,
        }
    }

    /// Add a span and return its UUID.
    pub fn add_span(&mut self, span: SagSpan) -> Uuid {
        let id = Uuid::new_v4();
        self.spans.insert(id, span);
        self.touch();
        id
    }

    /// Remove a span, deactivating it if it was selected.
    pub fn remove_span(&mut self, id: &Uuid) -> Option<SagSpan> {
        let span = self.spans.remove(id);
        if span.is_some() {
            if self.activated.as_ref() == Some(id) {
                self.activated = None;
            }
            self.touch();
        }
        span
    }

    pub fn get_span(&self, id: &Uuid) -> Option<&SagSpan> {
        self.spans.get(id)
    }

    /// Mutable access to a span. Marks the project as modified when found.
    pub fn get_span_mut(&mut self, id: &Uuid) -> Option<&mut SagSpan> {
        if self.spans.contains_key(id) {
            self.meta.modified = Utc::now();
            self.spans.get_mut(id)
        } else {
            None
        }
    }

    pub fn span_count(&self) -> usize {
        self.spans.len()
    }

    /// Select the span used by [`SagProject::run_analysis`].
    pub fn activate(&mut self, id: Uuid) -> SagResult<()> {
        if !self.spans.contains_key(&id) {
            return Err(SagError::invalid_input("activated", id.to_string(), "No span with this id"));
        }
        self.activated = Some(id);
        Ok(())
    }

    pub fn deactivate(&mut self) {
        self.activated = None;
    }

    pub fn activated_span(&self) -> Option<&SagSpan> {
        self.activated.as_ref().and_then(|id| self.spans.get(id))
    }

    /// Controller configured from the project settings.
    pub fn controller(&self) -> AnalysisController {
        AnalysisController::new(&self.settings)
    }

    /// Analyze the activated span. With no span activated the controller
    /// results are cleared and the outcome is empty.
    pub fn run_analysis(&self, controller: &mut AnalysisController) -> SagResult<AnalysisOutcome> {
        controller.run_analysis(self.activated_span())
    }

    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

impl Default for SagProject {
    fn default() -> Self {
        SagProject::new("", "")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    pub name: String,

    /// Name of the responsible engineer
    pub engineer: String,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::dyno_span;

    #[test]
    fn test_project_creation() {
        let project = SagProject::new("Line 12", "Jane Engineer");
        assert_eq!(project.meta.name, "Line 12");
        assert_eq!(project.meta.version, SCHEMA_VERSION);
        assert_eq!(project.settings.units, UnitSystem::Imperial);
        assert_eq!(project.settings.tension_fit, TensionFitPolicy::NonIncreasing);
        assert!(project.activated_span().is_none());
    }

    #[test]
    fn test_project_serialization() {
        let mut project = SagProject::new("Line 12", "Jane Engineer");
        let id = project.add_span(dyno_span(50.0, 20.0));
        project.activate(id).unwrap();

        let json = serde_json::to_string_pretty(&project).unwrap();
        assert!(json.contains("Jane Engineer"));
        assert!(json.contains("Str 1 - Str 2"));

        let roundtrip: SagProject = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.activated, Some(id));
        assert_eq!(roundtrip.get_span(&id), project.get_span(&id));
    }

    #[test]
    fn test_settings_defaults_from_partial_json() {
        let settings: AnalysisSettings = serde_json::from_str(r#"{"units": "Metric"}"#).unwrap();
        assert_eq!(settings.units, UnitSystem::Metric);
        assert_eq!(settings.max_workers, None);
        assert_eq!(settings.tension_fit, TensionFitPolicy::NonIncreasing);
    }

    #[test]
    fn test_remove_activated_span() {
        let mut project = SagProject::default();
        let id = project.add_span(dyno_span(50.0, 20.0));
        project.activate(id).unwrap();

        assert!(project.remove_span(&id).is_some());
        assert_eq!(project.span_count(), 0);
        assert!(project.activated.is_none());
    }

    #[test]
    fn test_activate_unknown_span() {
        let mut project = SagProject::default();
        let err = project.activate(Uuid::new_v4()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_run_analysis_on_activated_span() {
        let mut project = SagProject::default();
        project.settings.max_workers = Some(2);
        let id = project.add_span(dyno_span(50.0, 20.0));

        let mut controller = project.controller();
        let outcome = project.run_analysis(&mut controller).unwrap();
        assert_eq!(outcome.job_count, 0);
        assert!(controller.results().is_empty());

        project.activate(id).unwrap();
        let outcome = project.run_analysis(&mut controller).unwrap();
        assert_eq!(outcome.job_count, 5);
        assert_eq!(outcome.worker_count, 2);
        assert_eq!(controller.results().len(), 5);
    }
}
