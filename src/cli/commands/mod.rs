pub mod config;
pub mod db;
pub mod del;
pub mod hash;
pub mod import;
pub mod init;
pub mod list;
pub mod pix;
pub mod reset;
pub mod serve;

use crate::config::Config;
use crate::core::Service;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

/// Open the configured database (running migrations) and build the service.
pub fn open_service(cfg: &Config) -> AppResult<Service> {
    let pool = DbPool::open(&cfg.database)?;
    Ok(Service::new(pool, cfg.admin_credential()?))
}
