//! Static asset delivery for the client bundle.
//!
//! Development serves whatever is on disk with caching disabled; production
//! lets browsers cache everything except `index.html`. Unknown paths fall
//! back to `index.html` so client-side routes resolve.

use crate::config::AppMode;
use crate::server::AppState;
use crate::server::response::Failure;
use axum::Json;
use axum::extract::State;
use axum::http::{HeaderValue, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct AssetDir {
    pub root: PathBuf,
    pub mode: AppMode,
}

impl AssetDir {
    pub fn new(root: impl Into<PathBuf>, mode: AppMode) -> Self {
        Self {
            root: root.into(),
            mode,
        }
    }

    /// Map a request path onto a file under `root`, refusing `..` and the like.
    pub fn resolve(&self, request_path: &str) -> Option<PathBuf> {
        let rel = Path::new(request_path.trim_start_matches('/'));
        let mut out = self.root.clone();
        for c in rel.components() {
            match c {
                Component::Normal(part) => out.push(part),
                Component::CurDir => {}
                _ => return None,
            }
        }
        Some(out)
    }

    fn cache_control(&self, is_index: bool) -> &'static str {
        match self.mode {
            AppMode::Development => "no-cache",
            AppMode::Production if is_index => "no-cache",
            AppMode::Production => "public, max-age=3600",
        }
    }
}

pub fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()).unwrap_or("") {
        "html" => "text/html; charset=utf-8",
        "js" | "mjs" => "text/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" => "application/json",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        "woff2" => "font/woff2",
        "txt" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

fn not_found(message: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(Failure {
            success: false,
            message: message.to_string(),
        }),
    )
        .into_response()
}

async fn file_response(assets: &AssetDir, path: &Path) -> Option<Response> {
    let bytes = tokio::fs::read(path).await.ok()?;
    let is_index = path.file_name().is_some_and(|n| n == "index.html");

    let mut resp = (StatusCode::OK, bytes).into_response();
    let headers = resp.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(content_type(path)),
    );
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(assets.cache_control(is_index)),
    );
    Some(resp)
}

/// Router fallback: anything that is not an API route.
pub async fn serve_asset(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    let path = uri.path();

    if path.starts_with("/api/") || path == "/api" {
        return not_found("Rota não encontrada.");
    }
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let assets = &state.assets;
    if let Some(file) = assets.resolve(path)
        && file.is_file()
        && let Some(resp) = file_response(assets, &file).await
    {
        debug!(path, "asset served");
        return resp;
    }

    match file_response(assets, &assets.root.join("index.html")).await {
        Some(resp) => resp,
        None => not_found("Aplicação não encontrada."),
    }
}
