//! Domain model for the project persistence core.
//!
//! # Responsibility
//! - Define the canonical record shape stored and returned by repositories.
//! - Keep validation rules next to the data they protect.
//!
//! # Invariants
//! - Every persisted project is identified by a stable integer `ProjectId`.
//! - Records are validated before any write reaches the storage layer.

pub mod project;
