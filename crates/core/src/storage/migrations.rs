//! Schema versions for the SQLite key-value backend
//!
//! The store holds one row per collection key. Each schema step is applied
//! once and recorded in `schema_migrations`.

use chrono::Utc;
use rusqlite::{params, Connection};
use tracing::{info, instrument};

use crate::error::Result;

/// One schema step
pub struct SchemaStep {
    pub version: u32,
    pub summary: &'static str,
    pub sql: &'static str,
}

const STEPS: &[SchemaStep] = &[SchemaStep {
    version: 1,
    summary: "Key-value entries for JSON collections",
    sql: r#"
        CREATE TABLE IF NOT EXISTS kv_entries (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
    "#,
}];

fn ensure_version_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            description TEXT NOT NULL,
            applied_at TEXT NOT NULL
        )",
        [],
    )?;
    Ok(())
}

/// Highest applied step, 0 for a fresh file
pub(crate) fn schema_version(conn: &Connection) -> Result<u32> {
    let version: Option<u32> =
        conn.query_row("SELECT MAX(version) FROM schema_migrations", [], |row| row.get(0))?;
    Ok(version.unwrap_or(0))
}

/// Bring the key-value schema up to the latest step
#[instrument(skip(conn))]
pub fn migrate(conn: &Connection) -> Result<()> {
    ensure_version_table(conn)?;
    let from = schema_version(conn)?;

    for step in STEPS.iter().filter(|s| s.version > from) {
        info!(version = step.version, summary = step.summary, "Applying schema step");
        conn.execute_batch(step.sql)?;
        conn.execute(
            "INSERT INTO schema_migrations (version, description, applied_at) VALUES (?1, ?2, ?3)",
            params![step.version, step.summary, Utc::now().to_rfc3339()],
        )?;
    }

    let to = schema_version(conn)?;
    if to > from {
        info!(from, to, "Key-value schema updated");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn latest() -> u32 {
        STEPS.last().map(|s| s.version).unwrap_or(0)
    }

    #[test]
    fn test_fresh_store_reaches_latest() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(schema_version_after(&conn), latest());

        conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at) VALUES ('polls', '[]', 'now')",
            [],
        )
        .unwrap();
    }

    #[test]
    fn test_second_migrate_is_noop() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at) VALUES ('events', '[]', 'now')",
            [],
        )
        .unwrap();

        migrate(&conn).unwrap();

        let steps: u32 = conn
            .query_row("SELECT COUNT(*) FROM schema_migrations", [], |row| row.get(0))
            .unwrap();
        let entries: u32 = conn
            .query_row("SELECT COUNT(*) FROM kv_entries", [], |row| row.get(0))
            .unwrap();
        assert_eq!(steps, latest());
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_step_versions_are_contiguous() {
        let versions: Vec<u32> = STEPS.iter().map(|s| s.version).collect();
        let expected: Vec<u32> = (1..=STEPS.len() as u32).collect();
        assert_eq!(versions, expected);
    }

    fn schema_version_after(conn: &Connection) -> u32 {
        migrate(conn).unwrap();
        schema_version(conn).unwrap()
    }
}
