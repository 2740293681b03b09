use crate::db::migrate::{DB_SCHEMA_VERSION, schema_version, table_exists};
use crate::db::pool::DbPool;
use crate::models::pix::ConfigKey;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::formatting::money;
use std::fs;

#[derive(Debug, Clone, PartialEq)]
pub struct StoreStats {
    pub debtors: i64,
    pub config_rows: i64,
    pub outstanding: f64,
}

pub fn collect(pool: &DbPool) -> rusqlite::Result<StoreStats> {
    let (debtors, outstanding): (i64, f64) = pool.conn.query_row(
        "SELECT COUNT(*), COALESCE(SUM(value - discount), 0) FROM debtors",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    let config_rows: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM config", [], |row| row.get(0))?;

    Ok(StoreStats {
        debtors,
        config_rows,
        outstanding,
    })
}

/// Problems found by `db --check`, beyond SQLite's own integrity check.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreHealth {
    pub schema_version: i64,
    pub pix_key_seeded: bool,
    /// Keys that are empty or carry non-digit characters.
    pub malformed_phones: Vec<String>,
}

impl StoreHealth {
    pub fn is_healthy(&self) -> bool {
        self.schema_version == DB_SCHEMA_VERSION
            && self.pix_key_seeded
            && self.malformed_phones.is_empty()
    }
}

pub fn health(pool: &DbPool) -> rusqlite::Result<StoreHealth> {
    let schema_version = schema_version(&pool.conn)?;
    if !table_exists(&pool.conn, "debtors")? || !table_exists(&pool.conn, "config")? {
        return Ok(StoreHealth {
            schema_version,
            pix_key_seeded: false,
            malformed_phones: Vec::new(),
        });
    }

    let pix_key_seeded: bool = pool.conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM config WHERE key = ?1)",
        [ConfigKey::PixKey.to_db_str()],
        |row| row.get(0),
    )?;

    let mut stmt = pool
        .conn
        .prepare("SELECT phone FROM debtors WHERE phone = '' OR phone GLOB '*[^0-9]*'")?;
    let malformed_phones = stmt
        .query_map([], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;

    Ok(StoreHealth {
        schema_version,
        pix_key_seeded,
        malformed_phones,
    })
}

pub fn print_db_info(pool: &DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) COUNTS
    //
    let stats = collect(pool)?;
    println!(
        "{}• Debtors:{} {}{}{}",
        CYAN, RESET, GREEN, stats.debtors, RESET
    );
    println!("{}• Config rows:{} {}", CYAN, RESET, stats.config_rows);

    //
    // 3) OUTSTANDING
    //
    if stats.debtors > 0 {
        println!(
            "{}• Outstanding (after discounts):{} R$ {}",
            CYAN,
            RESET,
            money(stats.outstanding)
        );
    } else {
        println!("{}• Outstanding:{} {GREY}--{RESET}", CYAN, RESET);
    }

    println!();
    Ok(())
}
