use crate::core::Service;
use crate::errors::{AppError, AppResult};
use crate::models::debtor::{Debtor, DebtorCandidate, PhoneInput};
use crate::models::pix::{PixConfig, PixConfigUpdate};
use crate::server::AppState;
use crate::server::response::{Ack, LoginResponse};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Path, State};
use serde::Deserialize;
use std::sync::{Mutex, MutexGuard};

/// `Json` whose rejection goes through `AppError`, so malformed bodies get
/// the failure envelope too.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(format!("Requisição inválida: {}", rejection.body_text()))
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub phone: Option<PhoneInput>,
}

#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ReplaceRequest {
    #[serde(default)]
    pub debtors: Vec<DebtorCandidate>,
}

fn lock(service: &Mutex<Service>) -> AppResult<MutexGuard<'_, Service>> {
    service
        .lock()
        .map_err(|_| AppError::Store("service lock poisoned".into()))
}

pub async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let debtor = lock(&state.service)?.lookup(req.phone.as_ref())?;
    Ok(Json(LoginResponse {
        success: true,
        debtor,
    }))
}

pub async fn admin_login(
    State(state): State<AppState>,
    AppJson(req): AppJson<AdminLoginRequest>,
) -> AppResult<Json<Ack>> {
    lock(&state.service)?.authenticate(&req.password)?;
    Ok(Ack::ok())
}

pub async fn list_debtors(State(state): State<AppState>) -> AppResult<Json<Vec<Debtor>>> {
    Ok(Json(lock(&state.service)?.list()?))
}

pub async fn replace_debtors(
    State(state): State<AppState>,
    AppJson(req): AppJson<ReplaceRequest>,
) -> AppResult<Json<Ack>> {
    lock(&state.service)?.replace(req.debtors)?;
    Ok(Ack::ok())
}

pub async fn delete_debtor(
    State(state): State<AppState>,
    Path(phone): Path<String>,
) -> AppResult<Json<Ack>> {
    lock(&state.service)?.delete(&phone)?;
    Ok(Ack::ok())
}

pub async fn reset(State(state): State<AppState>) -> AppResult<Json<Ack>> {
    lock(&state.service)?.reset()?;
    Ok(Ack::ok())
}

pub async fn get_pix_config(State(state): State<AppState>) -> AppResult<Json<PixConfig>> {
    Ok(Json(lock(&state.service)?.pix_config()?))
}

pub async fn set_pix_config(
    State(state): State<AppState>,
    AppJson(update): AppJson<PixConfigUpdate>,
) -> AppResult<Json<Ack>> {
    lock(&state.service)?.update_pix_config(&update)?;
    Ok(Ack::ok())
}
