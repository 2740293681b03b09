use rusqlite::{Connection, Result};
use tracing::{info, warn};

/// Highest schema version this build knows how to create.
pub const DB_SCHEMA_VERSION: i64 = 1;

pub fn schema_version(conn: &Connection) -> Result<i64> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
}

/// Check if a table exists.
pub fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let n: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
        [name],
        |row| row.get(0),
    )?;
    Ok(n > 0)
}

/// v1: debtor table keyed by phone, plus the key/value config table.
fn migration_1_base_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS debtors (
            phone     TEXT PRIMARY KEY,
            name      TEXT NOT NULL DEFAULT '',
            value     REAL NOT NULL DEFAULT 0,
            due_date  TEXT NOT NULL DEFAULT '',
            discount  REAL NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS config (
            key    TEXT PRIMARY KEY,
            value  TEXT
        );
        "#,
    )
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    let mut version = schema_version(conn)?;

    if version < 1 {
        migration_1_base_schema(conn)?;
        version = 1;
        conn.pragma_update(None, "user_version", version)?;
        info!(version, "applied schema migration");
    }

    if version > DB_SCHEMA_VERSION {
        warn!(
            version,
            known = DB_SCHEMA_VERSION,
            "database schema is newer than this build"
        );
    }

    Ok(())
}
