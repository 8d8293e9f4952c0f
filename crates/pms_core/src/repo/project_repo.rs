//! Project repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide primary-key-indexed CRUD access to project records.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths must call `Project::validate()` before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - `find_by_id` and `delete_by_id` treat a missing key as a normal
//!   outcome, not an error.

use crate::db::{migrations, DbError};
use crate::model::project::{Project, ProjectId, ProjectStatus, ProjectValidationError};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PROJECT_SELECT_SQL: &str = "SELECT
    id,
    name,
    description,
    start_date,
    end_date,
    status
FROM projects";

const PROJECT_COLUMNS: &[&str] = &[
    "id",
    "name",
    "description",
    "start_date",
    "end_date",
    "status",
    "created_at",
    "updated_at",
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Store-level error taxonomy for project persistence.
#[derive(Debug)]
pub enum RepoError {
    /// Record failed validation before reaching storage.
    Validation(ProjectValidationError),
    /// The backing medium could not be reached or failed mid-operation.
    Unavailable(DbError),
    /// A write violated a constraint enforced by the backing medium.
    ConstraintViolation(String),
    /// Persisted state could not be mapped back to a valid record.
    InvalidData(String),
    /// The connection has not been migrated to the expected schema version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// A table required by the mapping is absent.
    MissingRequiredTable(&'static str),
    /// A column required by the mapping is absent.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Unavailable(err) => write!(f, "storage unavailable: {err}"),
            Self::ConstraintViolation(message) => {
                write!(f, "storage constraint violated: {message}")
            }
            Self::InvalidData(message) => {
                write!(f, "invalid persisted project data: {message}")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection not migrated: expected schema version {expected_version}, found {actual_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Unavailable(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ProjectValidationError> for RepoError {
    fn from(value: ProjectValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Unavailable(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::SqliteFailure(code, message)
                if code.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Self::ConstraintViolation(message.unwrap_or_else(|| code.to_string()))
            }
            other => Self::Unavailable(DbError::Sqlite(other)),
        }
    }
}

/// Repository interface for project CRUD operations.
///
/// The capability set is intentionally closed: create-or-update, fetch by
/// key, fetch all, delete by key, existence check and count. Filtering,
/// pagination and sorting belong to callers, not to this contract.
pub trait ProjectRepository {
    /// Inserts a new record or overwrites the record sharing its key.
    ///
    /// Returns the persisted record with any store-assigned key populated.
    fn save(&self, project: &Project) -> RepoResult<Project>;
    /// Gets the record for `id`. Absence is `Ok(None)`, never an error.
    fn find_by_id(&self, id: ProjectId) -> RepoResult<Option<Project>>;
    /// Returns all records currently present, ordered by key.
    fn find_all(&self) -> RepoResult<Vec<Project>>;
    /// Removes the record for `id`. Idempotent: a missing key is `Ok(())`.
    fn delete_by_id(&self, id: ProjectId) -> RepoResult<()>;
    /// Returns whether a record for `id` is currently present.
    fn exists_by_id(&self, id: ProjectId) -> RepoResult<bool>;
    /// Returns the number of records currently present.
    fn count(&self) -> RepoResult<u64>;
}

/// SQLite-backed project repository.
///
/// Borrows an externally opened connection; the repository never opens,
/// pools or reconfigures connections itself.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn save(&self, project: &Project) -> RepoResult<Project> {
        project.validate()?;

        match project.id {
            None => {
                self.conn.execute(
                    "INSERT INTO projects (name, description, start_date, end_date, status)
                     VALUES (?1, ?2, ?3, ?4, ?5);",
                    params![
                        project.name.as_str(),
                        project.description.as_deref(),
                        project.start_date,
                        project.end_date,
                        status_to_db(project.status),
                    ],
                )?;

                let mut stored = project.clone();
                stored.id = Some(self.conn.last_insert_rowid());
                Ok(stored)
            }
            Some(id) => {
                self.conn.execute(
                    "INSERT INTO projects (id, name, description, start_date, end_date, status)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                     ON CONFLICT(id) DO UPDATE SET
                        name = excluded.name,
                        description = excluded.description,
                        start_date = excluded.start_date,
                        end_date = excluded.end_date,
                        status = excluded.status,
                        updated_at = (strftime('%s', 'now') * 1000);",
                    params![
                        id,
                        project.name.as_str(),
                        project.description.as_deref(),
                        project.start_date,
                        project.end_date,
                        status_to_db(project.status),
                    ],
                )?;

                Ok(project.clone())
            }
        }
    }

    fn find_by_id(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_project_row(row)?));
        }

        Ok(None)
    }

    fn find_all(&self) -> RepoResult<Vec<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} ORDER BY id ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }

        Ok(projects)
    }

    fn delete_by_id(&self, id: ProjectId) -> RepoResult<()> {
        // Zero affected rows means the key was already absent; that is a
        // normal outcome for this operation.
        self.conn
            .execute("DELETE FROM projects WHERE id = ?1;", params![id])?;
        Ok(())
    }

    fn exists_by_id(&self, id: ProjectId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM projects WHERE id = ?1);",
            params![id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn count(&self) -> RepoResult<u64> {
        let count: u64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM projects;", [], |row| row.get(0))?;
        Ok(count)
    }
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    let status_text: String = row.get("status")?;
    let status = parse_status(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid status `{status_text}` in projects.status"
        ))
    })?;

    let project = Project {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        description: row.get("description")?,
        start_date: row.get("start_date")?,
        end_date: row.get("end_date")?,
        status,
    };
    project.validate()?;
    Ok(project)
}

fn status_to_db(status: ProjectStatus) -> &'static str {
    match status {
        ProjectStatus::Planned => "planned",
        ProjectStatus::Active => "active",
        ProjectStatus::Completed => "completed",
        ProjectStatus::OnHold => "on_hold",
    }
}

fn parse_status(value: &str) -> Option<ProjectStatus> {
    match value {
        "planned" => Some(ProjectStatus::Planned),
        "active" => Some(ProjectStatus::Active),
        "completed" => Some(ProjectStatus::Completed),
        "on_hold" => Some(ProjectStatus::OnHold),
        _ => None,
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = migrations::latest_version();
    let actual_version: u32 =
        conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "projects")? {
        return Err(RepoError::MissingRequiredTable("projects"));
    }

    for &column in PROJECT_COLUMNS {
        if !table_has_column(conn, "projects", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "projects",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
