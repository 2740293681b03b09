//! Lookup & management operations over an explicitly constructed store.
//!
//! Every method is a plain request→response mapping; the only state is the
//! store itself and the configured admin credential.

use crate::core::auth::AdminCredential;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::db::stats::{self, StoreStats};
use crate::errors::{AppError, AppResult};
use crate::models::debtor::{Debtor, DebtorCandidate, PhoneInput};
use crate::models::pix::{ConfigKey, PixConfig, PixConfigUpdate};
use tracing::{debug, info, warn};

pub const MSG_PHONE_REQUIRED: &str = "Telefone é obrigatório.";
pub const MSG_PHONE_UNKNOWN: &str = "Número não identificado em nossa base de débitos.";
pub const MSG_WRONG_PASSWORD: &str = "Senha incorreta.";

pub struct Service {
    pool: DbPool,
    credential: AdminCredential,
}

impl Service {
    pub fn new(pool: DbPool, credential: AdminCredential) -> Self {
        Self { pool, credential }
    }

    pub fn admin_enabled(&self) -> bool {
        self.credential.is_configured()
    }

    /// Find a debtor by phone of any formatting.
    pub fn lookup(&self, phone: Option<&PhoneInput>) -> AppResult<Debtor> {
        let phone = phone
            .map(PhoneInput::normalized)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| AppError::Validation(MSG_PHONE_REQUIRED.into()))?;

        match queries::load_debtor(&self.pool.conn, &phone)? {
            Some(d) => {
                debug!(phone = %phone, "lookup hit");
                Ok(d)
            }
            None => {
                debug!(phone = %phone, "lookup miss");
                Err(AppError::NotFound(MSG_PHONE_UNKNOWN.into()))
            }
        }
    }

    pub fn authenticate(&self, password: &str) -> AppResult<()> {
        if self.credential.verify(password) {
            info!("admin authenticated");
            Ok(())
        } else {
            warn!("admin authentication rejected");
            Err(AppError::Unauthorized(MSG_WRONG_PASSWORD.into()))
        }
    }

    pub fn list(&self) -> AppResult<Vec<Debtor>> {
        queries::load_debtors(&self.pool.conn)
    }

    /// Atomically replace the whole record set.
    pub fn replace(&mut self, candidates: Vec<DebtorCandidate>) -> AppResult<usize> {
        let submitted = candidates.len();
        let written = queries::replace_debtors(&mut self.pool.conn, candidates)?;
        info!(submitted, written, "debtor list replaced");
        Ok(written)
    }

    pub fn delete(&self, phone: &str) -> AppResult<()> {
        let removed = queries::delete_debtor(&self.pool.conn, phone)?;
        info!(phone, removed, "debtor deleted");
        Ok(())
    }

    /// Wipe records and configuration; `pix_key` is reseeded empty.
    pub fn reset(&mut self) -> AppResult<()> {
        queries::reset_all(&mut self.pool.conn)?;
        warn!("system reset: all debtors and configuration removed");
        Ok(())
    }

    pub fn pix_config(&self) -> AppResult<PixConfig> {
        Ok(PixConfig {
            key: queries::get_config(&self.pool.conn, ConfigKey::PixKey)?,
            qr_code: queries::get_config(&self.pool.conn, ConfigKey::QrCode)?,
        })
    }

    /// Partial update: each non-empty field is written on its own.
    pub fn update_pix_config(&self, update: &PixConfigUpdate) -> AppResult<()> {
        for (key, value) in update.writes() {
            queries::set_config(&self.pool.conn, key, value)?;
            info!(key = key.to_db_str(), "pix config updated");
        }
        Ok(())
    }

    pub fn stats(&self) -> AppResult<StoreStats> {
        Ok(stats::collect(&self.pool)?)
    }
}
