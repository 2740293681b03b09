use crate::db::migrate::run_pending_migrations;
use crate::db::queries::seed_config;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Initialize the database.
/// Schema comes from the migration engine; afterwards the `pix_key` row is
/// seeded if it is missing.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    run_pending_migrations(conn)?;
    seed_config(conn)?;
    Ok(())
}
