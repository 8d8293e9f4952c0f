//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the primary-key CRUD contract for project records.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Project::validate()` before persistence.
//! - Absence is a normal read/delete outcome, never an error.

pub mod project_repo;
