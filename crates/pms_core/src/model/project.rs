//! Project domain model.
//!
//! # Responsibility
//! - Define the canonical project record persisted by the store.
//! - Keep the field-by-field storage mapping explicit and reflection-free.
//!
//! # Invariants
//! - `id` is assigned exactly once; `None` means the store has not yet
//!   allocated a key for this record.
//! - `name` is never empty after trimming.
//! - `end_date` must not be earlier than `start_date` when both are set.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Integer primary key distinguishing one project from all others.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ProjectId = i64;

/// Coarse project lifecycle label.
///
/// The store persists this value opaquely; no transition rules are
/// enforced at the persistence boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Planned but not started.
    #[default]
    Planned,
    /// Work is underway.
    Active,
    /// Delivered.
    Completed,
    /// Paused without a planned resume date.
    OnHold,
}

/// Validation error raised before a project reaches storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectValidationError {
    /// Name is empty or whitespace-only.
    EmptyName,
    /// `end_date` is earlier than `start_date`.
    InvalidDateRange { start: i64, end: i64 },
}

impl Display for ProjectValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "project name must not be empty"),
            Self::InvalidDateRange { start, end } => {
                write!(f, "project end date {end} is earlier than start date {start}")
            }
        }
    }
}

impl Error for ProjectValidationError {}

/// Canonical project record.
///
/// Serialized field names follow the external camelCase wire shape
/// (`projectId`, `projectName`, `startDate`, `endDate`) consumed by hosts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Store-assigned primary key. `None` until first persisted.
    #[serde(rename = "projectId")]
    pub id: Option<ProjectId>,
    /// Required display name.
    #[serde(rename = "projectName")]
    pub name: String,
    /// Free-text summary (nullable).
    pub description: Option<String>,
    /// Planned start in epoch milliseconds.
    pub start_date: Option<i64>,
    /// Planned end in epoch milliseconds. Should be >= `start_date` when set.
    pub end_date: Option<i64>,
    /// Lifecycle label, persisted opaquely.
    #[serde(default)]
    pub status: ProjectStatus,
}

impl Project {
    /// Creates a new project whose key assignment is delegated to the store.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
            start_date: None,
            end_date: None,
            status: ProjectStatus::default(),
        }
    }

    /// Creates a project with a caller-provided key.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(id: ProjectId, name: impl Into<String>) -> Self {
        let mut project = Self::new(name);
        project.id = Some(id);
        project
    }

    /// Checks record-level invariants before any write reaches storage.
    ///
    /// # Errors
    /// - `EmptyName` when the trimmed name is empty.
    /// - `InvalidDateRange` when both dates are set and inverted.
    pub fn validate(&self) -> Result<(), ProjectValidationError> {
        if self.name.trim().is_empty() {
            return Err(ProjectValidationError::EmptyName);
        }

        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(ProjectValidationError::InvalidDateRange { start, end });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Project, ProjectStatus, ProjectValidationError};

    #[test]
    fn new_project_has_no_key_and_default_status() {
        let project = Project::new("Apollo");
        assert_eq!(project.id, None);
        assert_eq!(project.status, ProjectStatus::Planned);
    }

    #[test]
    fn validate_rejects_whitespace_only_name() {
        let project = Project::new("   ");
        assert_eq!(project.validate(), Err(ProjectValidationError::EmptyName));
    }

    #[test]
    fn validate_rejects_inverted_date_range() {
        let mut project = Project::new("Apollo");
        project.start_date = Some(2_000);
        project.end_date = Some(1_000);
        assert_eq!(
            project.validate(),
            Err(ProjectValidationError::InvalidDateRange {
                start: 2_000,
                end: 1_000
            })
        );
    }

    #[test]
    fn validate_accepts_point_dates_and_open_ranges() {
        let mut project = Project::new("Apollo");
        project.start_date = Some(1_000);
        assert_eq!(project.validate(), Ok(()));

        project.end_date = Some(1_000);
        assert_eq!(project.validate(), Ok(()));
    }

    #[test]
    fn serializes_with_external_camel_case_names() {
        let mut project = Project::with_id(7, "Alpha");
        project.description = Some("pilot rollout".to_string());
        project.start_date = Some(1_700_000_000_000);
        project.status = ProjectStatus::Active;

        let json = serde_json::to_value(&project).expect("project should serialize");
        assert_eq!(json["projectId"], 7);
        assert_eq!(json["projectName"], "Alpha");
        assert_eq!(json["description"], "pilot rollout");
        assert_eq!(json["startDate"], 1_700_000_000_000_i64);
        assert_eq!(json["status"], "active");
    }

    #[test]
    fn deserializes_status_with_default_when_absent() {
        let json = r#"{"projectId":null,"projectName":"Beta","description":null,"startDate":null,"endDate":null}"#;
        let project: Project = serde_json::from_str(json).expect("project should deserialize");
        assert_eq!(project.status, ProjectStatus::Planned);
    }
}
