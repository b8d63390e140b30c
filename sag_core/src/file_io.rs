//! # Project Files
//!
//! Projects are stored as pretty-printed JSON. Saves write a temporary
//! file next to the target, sync it, then rename it over the target so an
//! interrupted save never leaves a truncated project behind.
//!
//! ## Example
//!
//! ```rust,no_run
//! use sag_core::file_io::{load_project, save_project};
//! use sag_core::project::SagProject;
//! use std::path::Path;
//!
//! let project = SagProject::new("Line 12", "Engineer");
//! save_project(&project, Path::new("line12.sag.json"))?;
//! let loaded = load_project(Path::new("line12.sag.json"))?;
//! # Ok::<(), sag_core::errors::SagError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::errors::{SagError, SagResult};
use crate::project::{SagProject, SCHEMA_VERSION};

/// Save a project atomically.
pub fn save_project(project: &SagProject, path: &Path) -> SagResult<()> {
    let json = serde_json::to_string_pretty(project).map_err(|e| SagError::SerializationError {
        reason: e.to_string(),
    })?;

    let tmp_path = path.with_extension("tmp");

    let mut tmp_file = File::create(&tmp_path)
        .map_err(|e| SagError::file_error("create temp file", tmp_path.display().to_string(), e.to_string()))?;
    tmp_file
        .write_all(json.as_bytes())
        .map_err(|e| SagError::file_error("write temp file", tmp_path.display().to_string(), e.to_string()))?;
    tmp_file
        .sync_all()
        .map_err(|e| SagError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string()))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        SagError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!(path = %path.display(), spans = project.span_count(), "Project saved");
    Ok(())
}

/// Load a project, rejecting files from an incompatible schema version.
pub fn load_project(path: &Path) -> SagResult<SagProject> {
    let contents = fs::read_to_string(path)
        .map_err(|e| SagError::file_error("read", path.display().to_string(), e.to_string()))?;

    let project: SagProject = serde_json::from_str(&contents).map_err(|e| SagError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })?;

    validate_version(&project.meta.version)?;

    debug!(path = %path.display(), spans = project.span_count(), "Project loaded");
    Ok(project)
}

/// Major versions must match; while on 0.x a newer minor is also rejected.
fn validate_version(file_version: &str) -> SagResult<()> {
    let parse = |version: &str| -> Vec<u32> { version.split('.').filter_map(|part| part.parse().ok()).collect() };
    let file_parts = parse(file_version);
    let current_parts = parse(SCHEMA_VERSION);

    let mismatch = || SagError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let (Some(&file_major), Some(&current_major)) = (file_parts.first(), current_parts.first()) else {
        return Err(mismatch());
    };
    if file_major != current_major {
        return Err(mismatch());
    }
    if current_major == 0 {
        if let (Some(&file_minor), Some(&current_minor)) = (file_parts.get(1), current_parts.get(1)) {
            if file_minor > current_minor {
                return Err(mismatch());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::dyno_span;
    use std::env::temp_dir;
    use std::path::PathBuf;

    fn temp_project_path(name: &str) -> PathBuf {
        temp_dir().join(format!("sag_core_test_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_project_path("roundtrip");

        let mut project = SagProject::new("Line 12", "Test Engineer");
        let id = project.add_span(dyno_span(50.0, 20.0));
        project.activate(id).unwrap();
        save_project(&project, &path).unwrap();

        let loaded = load_project(&path).unwrap();
        assert_eq!(loaded.meta.engineer, "Test Engineer");
        assert_eq!(loaded.activated, Some(id));
        assert_eq!(loaded.get_span(&id), project.get_span(&id));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_project(Path::new("/nonexistent/line.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_load_invalid_json() {
        let path = temp_project_path("invalid");
        fs::write(&path, "{ not json").unwrap();

        let err = load_project(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version("0.1.0").is_ok());
        assert!(validate_version("0.0.9").is_ok());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("garbage").is_err());
    }
}
