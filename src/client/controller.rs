//! Drives `ClientState` against a backend: performs the calls, applies the
//! transitions and owns the timers.
//!
//! Timers are tokio tasks, so every method that navigates must run inside a
//! tokio runtime. Each pending timer's handle is kept and aborted as soon as a
//! competing navigation happens.

use crate::client::backend::Backend;
use crate::client::mask::MIN_DIGITS;
use crate::client::state::{AdminTab, ClientState, LoadingTicket, ManualEntry, TransitionError};
use crate::core::import::{ImportSource, parse_rows};
use crate::errors::{AppError, AppResult};
use crate::models::debtor::{DebtorCandidate, normalize_phone};
use crate::models::pix::PixConfigUpdate;
use crate::ui::prompt::Prompt;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Length of the transitional loading screen.
pub const LOADING_DELAY: Duration = Duration::from_secs(2);

/// How long the "copied" badge stays on after copying the PIX key.
pub const COPY_FEEDBACK: Duration = Duration::from_secs(2);

pub const MSG_INCOMPLETE_NUMBER: &str = "Número incompleto";
pub const MSG_CONNECTION: &str = "Erro ao conectar com o servidor.";
pub const MSG_MANUAL_REQUIRED: &str = "Preencha ao menos telefone e nome.";
pub const CONFIRM_DELETE: &str = "Deseja realmente apagar este cliente?";
pub const CONFIRM_WIPE: &str = "APAGAR TUDO? Todos os clientes cadastrados serão removidos.";
pub const CONFIRM_RESET: &str = "ZONA DE PERIGO: Esta ação apagará todos os clientes cadastrados e todas as configurações de uma vez. Deseja continuar?";

impl From<TransitionError> for AppError {
    fn from(e: TransitionError) -> Self {
        AppError::Validation(e.to_string())
    }
}

pub struct Controller<B, P> {
    state: Arc<Mutex<ClientState>>,
    backend: B,
    prompt: P,
    loading_delay: Duration,
    loading_timer: Option<JoinHandle<()>>,
    copy_timer: Option<JoinHandle<()>>,
}

impl<B: Backend, P: Prompt> Controller<B, P> {
    pub fn new(backend: B, prompt: P) -> Self {
        Self {
            state: Arc::new(Mutex::new(ClientState::new())),
            backend,
            prompt,
            loading_delay: LOADING_DELAY,
            loading_timer: None,
            copy_timer: None,
        }
    }

    pub fn with_loading_delay(mut self, delay: Duration) -> Self {
        self.loading_delay = delay;
        self
    }

    fn state(&self) -> MutexGuard<'_, ClientState> {
        // A poisoned lock only means a timer task panicked mid-update; the
        // state itself is still a valid FSM value.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Copy of the current state, for rendering.
    pub fn snapshot(&self) -> ClientState {
        self.state().clone()
    }

    // ---------------------------
    // Timers
    // ---------------------------

    fn cancel_loading(&mut self) {
        if let Some(h) = self.loading_timer.take() {
            h.abort();
        }
    }

    fn schedule_loading(&mut self, ticket: LoadingTicket) {
        self.cancel_loading();
        let state = Arc::clone(&self.state);
        let delay = self.loading_delay;

        self.loading_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut s = state.lock().unwrap_or_else(|e| e.into_inner());
            if !s.complete_loading(ticket) {
                debug!(generation = ticket.generation, "stale loading ticket dropped");
            }
        }));
    }

    // ---------------------------
    // Startup
    // ---------------------------

    /// Fetch the PIX config once; failure keeps the placeholder.
    pub async fn start(&mut self) {
        self.refresh_pix().await;
    }

    async fn refresh_pix(&mut self) {
        match self.backend.pix_config().await {
            Ok(cfg) => self.state().set_pix_config(cfg),
            Err(e) => warn!(error = %e, "failed to fetch PIX config"),
        }
    }

    async fn refresh_admin_list(&mut self) -> AppResult<()> {
        let list = self.backend.list_debtors().await?;
        self.state().admin_debtors = list;
        Ok(())
    }

    // ---------------------------
    // Customer flow
    // ---------------------------

    pub fn type_phone(&mut self, raw: &str) {
        self.state().set_phone_input(raw);
    }

    /// Look up the typed phone. On success the loading screen starts and the
    /// dashboard follows after the delay.
    pub async fn submit_login(&mut self) -> bool {
        let digits = normalize_phone(&self.state().phone_input);
        if digits.len() < MIN_DIGITS {
            self.state().lookup_failed(MSG_INCOMPLETE_NUMBER);
            return false;
        }

        match self.backend.lookup(&digits).await {
            Ok(debtor) => {
                let ticket = self.state().lookup_succeeded(debtor);
                match ticket {
                    Ok(t) => {
                        self.schedule_loading(t);
                        true
                    }
                    Err(e) => {
                        debug!(error = %e, "lookup result arrived after navigation");
                        false
                    }
                }
            }
            Err(e @ (AppError::Validation(_) | AppError::NotFound(_))) => {
                self.state().lookup_failed(e.to_string());
                false
            }
            Err(e) => {
                warn!(error = %e, "lookup failed");
                self.state().lookup_failed(MSG_CONNECTION);
                false
            }
        }
    }

    pub fn go_to_pix(&mut self) -> Result<(), TransitionError> {
        let ticket = self.state().begin_pix()?;
        self.schedule_loading(ticket);
        Ok(())
    }

    pub fn back_to_dashboard(&mut self) -> Result<(), TransitionError> {
        self.cancel_loading();
        self.state().back_to_dashboard()
    }

    pub fn logout(&mut self) {
        self.cancel_loading();
        self.state().logout();
    }

    /// Returns the key to put on the clipboard and shows the copied badge.
    pub fn copy_pix_key(&mut self) -> Option<String> {
        let key = self.state().pix_view()?.key;

        if let Some(h) = self.copy_timer.take() {
            h.abort();
        }
        self.state().pix_copied = true;

        let state = Arc::clone(&self.state);
        self.copy_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(COPY_FEEDBACK).await;
            state.lock().unwrap_or_else(|e| e.into_inner()).pix_copied = false;
        }));

        Some(key)
    }

    // ---------------------------
    // Admin
    // ---------------------------

    /// Check the password; on failure nothing in the state changes.
    pub async fn admin_login(&mut self, password: &str) -> AppResult<()> {
        self.backend.admin_login(password).await?;
        let list = self.backend.list_debtors().await?;

        self.cancel_loading();
        self.state().admin_authenticated(list);
        Ok(())
    }

    pub fn open_admin(&mut self) -> Result<(), TransitionError> {
        self.state().open_admin()?;
        self.cancel_loading();
        Ok(())
    }

    pub fn select_tab(&mut self, tab: AdminTab) -> Result<(), TransitionError> {
        self.state().select_tab(tab)
    }

    pub fn set_import_text(&mut self, text: &str) {
        self.state().import_text = text.to_string();
    }

    /// Replace the list with the pasted rows. Blank input is a no-op.
    pub async fn import_text(&mut self) -> AppResult<usize> {
        self.state().require_admin()?;
        let text = self.state().import_text.clone();
        if text.trim().is_empty() {
            return Ok(0);
        }

        let rows = parse_rows(&text, ImportSource::Pasted)?;
        let n = rows.len();
        self.backend.replace_debtors(rows).await?;

        self.state().import_text.clear();
        self.refresh_admin_list().await?;
        Ok(n)
    }

    /// Replace the list with an uploaded CSV file (first line is a header).
    pub async fn import_csv(&mut self, contents: &str) -> AppResult<usize> {
        self.state().require_admin()?;
        let rows = parse_rows(contents, ImportSource::CsvFile)?;
        let n = rows.len();
        self.backend.replace_debtors(rows).await?;
        self.refresh_admin_list().await?;
        Ok(n)
    }

    pub fn set_manual(&mut self, entry: ManualEntry) {
        self.state().manual = entry;
    }

    /// Append the manual entry to the current list and replace the whole set.
    pub async fn save_manual(&mut self) -> AppResult<()> {
        let (entry, current) = {
            let s = self.state();
            s.require_admin()?;
            (s.manual.clone(), s.admin_debtors.clone())
        };
        if !entry.is_complete() {
            return Err(AppError::Validation(MSG_MANUAL_REQUIRED.into()));
        }

        let mut rows: Vec<DebtorCandidate> = current.into_iter().map(DebtorCandidate::from).collect();
        rows.push(entry.to_candidate());
        self.backend.replace_debtors(rows).await?;

        self.state().manual = ManualEntry::default();
        self.refresh_admin_list().await
    }

    /// Returns false when the user declines.
    pub async fn delete_debtor(&mut self, phone: &str) -> AppResult<bool> {
        self.state().require_admin()?;
        if !self.prompt.confirm(CONFIRM_DELETE) {
            return Ok(false);
        }
        self.backend.delete_debtor(phone).await?;
        self.refresh_admin_list().await?;
        Ok(true)
    }

    /// Empty the debtor list after confirmation. PIX config is kept.
    pub async fn wipe_debtors(&mut self) -> AppResult<bool> {
        self.state().require_admin()?;
        if !self.prompt.confirm(CONFIRM_WIPE) {
            return Ok(false);
        }
        self.backend.replace_debtors(Vec::new()).await?;
        self.refresh_admin_list().await?;
        Ok(true)
    }

    pub fn set_new_pix_key(&mut self, key: &str) {
        self.state().new_pix_key = key.to_string();
    }

    pub async fn save_pix_key(&mut self) -> AppResult<()> {
        let key = {
            let s = self.state();
            s.require_admin()?;
            s.new_pix_key.clone()
        };
        self.backend
            .update_pix_config(PixConfigUpdate {
                key: Some(key),
                qr_code: None,
            })
            .await?;
        self.refresh_pix().await;
        Ok(())
    }

    /// Store a new QR image, already encoded as a data URI.
    pub async fn upload_qr(&mut self, data_uri: &str) -> AppResult<()> {
        self.state().require_admin()?;
        self.backend
            .update_pix_config(PixConfigUpdate {
                key: None,
                qr_code: Some(data_uri.to_string()),
            })
            .await?;
        self.refresh_pix().await;
        Ok(())
    }

    /// Wipe everything after confirmation, then land on the login screen.
    pub async fn reset_system(&mut self) -> AppResult<bool> {
        self.state().require_admin()?;
        if !self.prompt.confirm(CONFIRM_RESET) {
            return Ok(false);
        }

        self.backend.reset().await?;
        self.refresh_admin_list().await?;
        self.refresh_pix().await;
        self.logout();
        Ok(true)
    }
}

impl<B, P> Drop for Controller<B, P> {
    fn drop(&mut self) {
        for h in [self.loading_timer.take(), self.copy_timer.take()]
            .into_iter()
            .flatten()
        {
            h.abort();
        }
    }
}
