//! Project use-case service.
//!
//! # Responsibility
//! - Provide project create/update/get/list/delete APIs for hosts.
//! - Normalize caller input before it reaches the repository.
//!
//! # Invariants
//! - `update_project` uses full replacement semantics.
//! - Service APIs never bypass repository validation contracts.
//! - Store-level absence semantics are preserved for get/delete/exists.

use crate::model::project::{Project, ProjectId, ProjectStatus};
use crate::repo::project_repo::{ProjectRepository, RepoError, RepoResult};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for project use-cases.
#[derive(Debug)]
pub enum ProjectServiceError {
    /// Name input is empty after trimming.
    InvalidName(String),
    /// Update target does not exist.
    ProjectNotFound(ProjectId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for ProjectServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(value) => write!(f, "invalid project name: `{value}`"),
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => {
                write!(f, "inconsistent project state: {details}")
            }
        }
    }
}

impl Error for ProjectServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ProjectServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Request model for creating or replacing a project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateProjectRequest {
    /// Display name; trimmed before persistence.
    pub name: String,
    /// Free-text summary.
    pub description: Option<String>,
    /// Planned start in epoch milliseconds.
    pub start_date: Option<i64>,
    /// Planned end in epoch milliseconds.
    pub end_date: Option<i64>,
    /// Lifecycle label; defaults to `planned` when omitted.
    pub status: Option<ProjectStatus>,
}

/// Project service facade over repository implementations.
pub struct ProjectService<R: ProjectRepository> {
    repo: R,
}

impl<R: ProjectRepository> ProjectService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a project and returns the stored record with its assigned key.
    pub fn create_project(
        &self,
        request: CreateProjectRequest,
    ) -> Result<Project, ProjectServiceError> {
        let project = build_project(None, request)?;
        let stored = self.repo.save(&project)?;
        let id = stored
            .id
            .ok_or(ProjectServiceError::InconsistentState(
                "store did not assign a key on create",
            ))?;

        self.repo
            .find_by_id(id)?
            .ok_or(ProjectServiceError::InconsistentState(
                "created project not found in read-back",
            ))
    }

    /// Replaces all fields of an existing project.
    ///
    /// Unlike the raw store contract, a missing target id is an error at
    /// this layer: hosts calling update expect the record to exist.
    pub fn update_project(
        &self,
        id: ProjectId,
        request: CreateProjectRequest,
    ) -> Result<Project, ProjectServiceError> {
        if !self.repo.exists_by_id(id)? {
            return Err(ProjectServiceError::ProjectNotFound(id));
        }

        let project = build_project(Some(id), request)?;
        self.repo.save(&project)?;
        self.repo
            .find_by_id(id)?
            .ok_or(ProjectServiceError::InconsistentState(
                "updated project not found in read-back",
            ))
    }

    /// Gets one project by key. Absence is `Ok(None)`.
    pub fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        self.repo.find_by_id(id)
    }

    /// Lists all projects ordered by key.
    pub fn list_projects(&self) -> RepoResult<Vec<Project>> {
        self.repo.find_all()
    }

    /// Deletes one project by key. Idempotent.
    pub fn delete_project(&self, id: ProjectId) -> RepoResult<()> {
        self.repo.delete_by_id(id)
    }

    /// Returns whether a project with the given key exists.
    pub fn project_exists(&self, id: ProjectId) -> RepoResult<bool> {
        self.repo.exists_by_id(id)
    }

    /// Returns the number of projects currently stored.
    pub fn count_projects(&self) -> RepoResult<u64> {
        self.repo.count()
    }
}

fn build_project(
    id: Option<ProjectId>,
    request: CreateProjectRequest,
) -> Result<Project, ProjectServiceError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(ProjectServiceError::InvalidName(request.name.clone()));
    }

    Ok(Project {
        id,
        name: name.to_string(),
        description: request.description,
        start_date: request.start_date,
        end_date: request.end_date,
        status: request.status.unwrap_or_default(),
    })
}
