use crate::cli::commands::open_service;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::server;
use tracing::{info, warn};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Serve { bind, mode, assets } = cmd {
        let mut cfg = cfg.clone();
        if let Some(b) = bind {
            cfg.bind = b.clone();
        }
        if let Some(m) = mode {
            cfg.mode = m.parse()?;
        }
        if let Some(a) = assets {
            cfg.assets_dir = a.clone();
        }

        let service = open_service(&cfg)?;
        info!(database = %cfg.database, "store opened");
        if !service.admin_enabled() {
            warn!("no admin credential configured; set DEBTPIX_ADMIN_PASSWORD or admin_password_sha256");
        }

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        runtime.block_on(server::serve(&cfg, service))?;
    }

    Ok(())
}
