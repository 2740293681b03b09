use crate::errors::AppResult;
use crate::models::debtor::{Debtor, DebtorCandidate, normalize_phone};
use crate::models::pix::ConfigKey;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_row(row: &Row) -> Result<Debtor> {
    Ok(Debtor {
        phone: row.get("phone")?,
        name: row.get("name")?,
        value: row.get("value")?,
        due_date: row.get("due_date")?,
        discount: row.get("discount")?,
    })
}

pub fn load_debtor(conn: &Connection, phone: &str) -> AppResult<Option<Debtor>> {
    let mut stmt = conn.prepare_cached(
        "SELECT phone, name, value, due_date, discount FROM debtors WHERE phone = ?1",
    )?;
    Ok(stmt.query_row([phone], map_row).optional()?)
}

/// All records in rowid (insertion) order.
pub fn load_debtors(conn: &Connection) -> AppResult<Vec<Debtor>> {
    let mut stmt = conn.prepare(
        "SELECT phone, name, value, due_date, discount FROM debtors ORDER BY rowid ASC",
    )?;

    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Delete every record and insert `candidates` in one transaction.
///
/// Candidates whose phone has no digits are skipped. Any insert failure
/// (e.g. a duplicate phone) rolls back the delete as well.
/// Returns the number of rows written.
pub fn replace_debtors(conn: &mut Connection, candidates: Vec<DebtorCandidate>) -> AppResult<usize> {
    let tx = conn.transaction()?;
    let mut written = 0;

    {
        delete_all_debtors(&tx)?;

        let mut insert = tx.prepare(
            "INSERT INTO debtors (phone, name, value, due_date, discount)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;

        for d in candidates.into_iter().filter_map(DebtorCandidate::into_debtor) {
            insert.execute(params![d.phone, d.name, d.value, d.due_date, d.discount])?;
            written += 1;
        }
    }

    tx.commit()?;
    Ok(written)
}

pub fn delete_debtor(conn: &Connection, phone: &str) -> AppResult<usize> {
    let n = conn.execute(
        "DELETE FROM debtors WHERE phone = ?1",
        [normalize_phone(phone)],
    )?;
    Ok(n)
}

pub fn delete_all_debtors(conn: &Connection) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM debtors", [])?)
}

pub fn get_config(conn: &Connection, key: ConfigKey) -> AppResult<Option<String>> {
    let mut stmt = conn.prepare_cached("SELECT value FROM config WHERE key = ?1")?;
    let value: Option<Option<String>> = stmt
        .query_row([key.to_db_str()], |row| row.get(0))
        .optional()?;
    Ok(value.flatten())
}

pub fn set_config(conn: &Connection, key: ConfigKey, value: &str) -> AppResult<()> {
    conn.execute(
        "INSERT OR REPLACE INTO config (key, value) VALUES (?1, ?2)",
        params![key.to_db_str(), value],
    )?;
    Ok(())
}

/// Insert the empty `pix_key` row if it is missing.
pub fn seed_config(conn: &Connection) -> AppResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO config (key, value) VALUES (?1, '')",
        [ConfigKey::PixKey.to_db_str()],
    )?;
    Ok(())
}

/// Wipe records and configuration, then reseed `pix_key = ''`.
pub fn reset_all(conn: &mut Connection) -> AppResult<()> {
    let tx = conn.transaction()?;
    delete_all_debtors(&tx)?;
    tx.execute("DELETE FROM config", [])?;
    tx.execute(
        "INSERT INTO config (key, value) VALUES (?1, '')",
        [ConfigKey::PixKey.to_db_str()],
    )?;
    tx.commit()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::DbPool;

    fn candidate(phone: &str) -> DebtorCandidate {
        DebtorCandidate {
            phone: Some(phone.into()),
            name: Some(format!("Cliente {phone}")),
            value: Some(10.0),
            ..Default::default()
        }
    }

    #[test]
    fn replace_drops_rows_without_phone() {
        let mut pool = DbPool::in_memory().unwrap();
        let n = replace_debtors(&mut pool.conn, vec![candidate("1"), candidate("")]).unwrap();

        assert_eq!(n, 1);
        let all = load_debtors(&pool.conn).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].phone, "1");
    }

    #[test]
    fn replace_with_duplicate_keys_keeps_previous_set() {
        let mut pool = DbPool::in_memory().unwrap();
        replace_debtors(&mut pool.conn, vec![candidate("111")]).unwrap();

        let res = replace_debtors(
            &mut pool.conn,
            vec![candidate("222"), candidate("(22) 2"), candidate("222")],
        );
        assert!(res.is_err());

        let all = load_debtors(&pool.conn).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].phone, "111");
    }

    #[test]
    fn stored_phone_is_normalized() {
        let mut pool = DbPool::in_memory().unwrap();
        replace_debtors(&mut pool.conn, vec![candidate("(11) 99999-8888")]).unwrap();

        assert!(load_debtor(&pool.conn, "11999998888").unwrap().is_some());
        assert_eq!(delete_debtor(&pool.conn, "(11) 99999-8888").unwrap(), 1);
        assert!(load_debtor(&pool.conn, "11999998888").unwrap().is_none());
    }

    #[test]
    fn reset_leaves_single_empty_pix_key() {
        let mut pool = DbPool::in_memory().unwrap();
        replace_debtors(&mut pool.conn, vec![candidate("1"), candidate("2")]).unwrap();
        set_config(&pool.conn, ConfigKey::PixKey, "abc").unwrap();
        set_config(&pool.conn, ConfigKey::QrCode, "data:image/png;base64,AA").unwrap();

        reset_all(&mut pool.conn).unwrap();

        assert!(load_debtors(&pool.conn).unwrap().is_empty());
        let rows: i64 = pool
            .conn
            .query_row("SELECT COUNT(*) FROM config", [], |r| r.get(0))
            .unwrap();
        assert_eq!(rows, 1);
        assert_eq!(get_config(&pool.conn, ConfigKey::PixKey).unwrap().as_deref(), Some(""));
        assert_eq!(get_config(&pool.conn, ConfigKey::QrCode).unwrap(), None);
    }

    #[test]
    fn seed_does_not_overwrite_existing_key() {
        let pool = DbPool::in_memory().unwrap();
        set_config(&pool.conn, ConfigKey::PixKey, "chave").unwrap();
        seed_config(&pool.conn).unwrap();
        assert_eq!(
            get_config(&pool.conn, ConfigKey::PixKey).unwrap().as_deref(),
            Some("chave")
        );
    }
}
