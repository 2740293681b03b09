use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::migrate::{DB_SCHEMA_VERSION, schema_version};
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

/// Store maintenance. `--migrate` runs the same init the server runs on open,
/// so a migrated file also gets its `pix_key` row.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
    } = cmd
    {
        let pool = if *migrate {
            let pool = DbPool::new(&cfg.database)?;
            let before = schema_version(&pool.conn)?;
            init_db(&pool.conn)?;
            let after = schema_version(&pool.conn)?;
            if after > before {
                success(format!("Schema migrated: v{} → v{}", before, after));
            } else {
                info(format!("Schema already at v{}.", after));
            }
            pool
        } else {
            DbPool::new(&cfg.database)?
        };

        if *show_info {
            stats::print_db_info(&pool, &cfg.database)?;
        }

        if *check {
            let integrity: String = pool
                .conn
                .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;
            if integrity == "ok" {
                success("Integrity check passed.");
            } else {
                warning(format!("Integrity check failed: {}", integrity));
            }

            let health = stats::health(&pool)?;
            if health.schema_version != DB_SCHEMA_VERSION {
                warning(format!(
                    "Schema is v{} (expected v{}); run `debtpix db --migrate`.",
                    health.schema_version, DB_SCHEMA_VERSION
                ));
            }
            if !health.pix_key_seeded {
                warning("Missing pix_key row; run `debtpix db --migrate`.");
            }
            if !health.malformed_phones.is_empty() {
                warning(format!(
                    "Debtors with malformed phone keys: {}",
                    health.malformed_phones.join(", ")
                ));
            }
            if health.is_healthy() {
                success("Store check passed.");
            }
        }

        if *vacuum {
            let before = stats::collect(&pool)?;
            pool.conn.execute_batch("VACUUM;")?;
            success(format!(
                "Vacuum completed ({} debtor(s), {} config row(s) kept).",
                before.debtors, before.config_rows
            ));
        }
    }

    Ok(())
}
