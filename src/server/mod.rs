//! HTTP surface: axum router over the shared service plus static assets.

pub mod assets;
pub mod handlers;
pub mod response;

use crate::config::Config;
use crate::core::Service;
use crate::errors::AppResult;
use assets::AssetDir;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tracing::info;

/// QR images travel inline as data URIs.
pub const BODY_LIMIT: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<Mutex<Service>>,
    pub assets: Arc<AssetDir>,
}

impl AppState {
    pub fn new(service: Service, assets: AssetDir) -> Self {
        Self {
            service: Arc::new(Mutex::new(service)),
            assets: Arc::new(assets),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/login", post(handlers::login))
        .route("/api/admin/login", post(handlers::admin_login))
        .route(
            "/api/admin/debtors",
            get(handlers::list_debtors).post(handlers::replace_debtors),
        )
        .route("/api/admin/debtors/:phone", delete(handlers::delete_debtor))
        .route("/api/admin/reset", post(handlers::reset))
        .route("/api/pix-config", get(handlers::get_pix_config))
        .route("/api/admin/pix-config", post(handlers::set_pix_config))
        .fallback(assets::serve_asset)
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .with_state(state)
}

/// Bind and serve until Ctrl-C.
pub async fn serve(cfg: &Config, service: Service) -> AppResult<()> {
    let addr: SocketAddr = cfg
        .bind
        .parse()
        .map_err(|e| crate::errors::AppError::Config(format!("invalid bind '{}': {e}", cfg.bind)))?;

    let assets = AssetDir::new(&cfg.assets_dir, cfg.mode);
    let app = router(AppState::new(service, assets));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        addr = %addr,
        mode = %cfg.mode,
        assets = %cfg.assets_dir,
        "server running on http://{}",
        addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}
