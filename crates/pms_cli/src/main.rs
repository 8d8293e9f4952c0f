//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `pms_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use pms_core::{Project, ProjectRepository, SqliteProjectRepository};

fn main() {
    println!("pms_core ping={}", pms_core::ping());
    println!("pms_core version={}", pms_core::core_version());

    if let Err(err) = smoke_roundtrip() {
        eprintln!("pms_core smoke roundtrip failed: {err}");
        std::process::exit(1);
    }
}

/// Runs one save/fetch round trip against an in-memory store.
fn smoke_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
    let conn = pms_core::db::open_db_in_memory()?;
    let repo = SqliteProjectRepository::try_new(&conn)?;

    let stored = repo.save(&Project::new("smoke"))?;
    let id = stored.id.ok_or("store did not assign a project id")?;
    let loaded = repo
        .find_by_id(id)?
        .ok_or("saved project missing on read-back")?;

    println!("pms_core smoke project_id={} name={}", id, loaded.name);
    Ok(())
}
