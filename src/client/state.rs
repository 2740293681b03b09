//! Client view state as an explicit finite state machine.
//!
//! Screens: login, loading, dashboard, pix, admin. Every navigation bumps a
//! generation counter; a loading ticket only completes if its generation is
//! still current, so a superseded timer can never move the user.

use crate::client::mask::format_phone;
use crate::models::debtor::{Debtor, DebtorCandidate, PhoneInput};
use crate::models::pix::PixConfig;
use crate::utils::formatting::money;
use thiserror::Error;

/// Key shown on the PIX screen before the real config arrives.
pub const PLACEHOLDER_PIX_KEY: &str = "suachave@pix.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Loading,
    Dashboard,
    Pix,
    Admin,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AdminTab {
    #[default]
    Import,
    Clients,
    PixConfig,
}

/// Handed out when entering the loading screen; redeemed when the delay ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadingTicket {
    pub generation: u64,
    pub target: View,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("transition not allowed from {from:?} to {to:?}")]
    NotAllowed { from: View, to: View },

    #[error("no debtor loaded")]
    NoDebtor,

    #[error("admin access required")]
    NotAdmin,
}

/// Form buffer for adding a single debtor by hand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManualEntry {
    pub phone: String,
    pub name: String,
    pub value: f64,
    pub due_date: String,
    pub discount: f64,
}

impl ManualEntry {
    pub fn is_complete(&self) -> bool {
        !self.phone.trim().is_empty() && !self.name.trim().is_empty()
    }

    pub fn to_candidate(&self) -> DebtorCandidate {
        DebtorCandidate {
            phone: Some(PhoneInput::Text(self.phone.clone())),
            name: Some(self.name.trim().to_string()),
            value: Some(self.value),
            due_date: Some(self.due_date.trim().to_string()),
            discount: Some(self.discount),
        }
    }
}

/// What the dashboard renders.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub name: String,
    pub phone: String,
    pub due_date: String,
    pub total: String,
    /// Present only when a discount applies.
    pub discount: Option<String>,
}

/// What the PIX screen renders.
#[derive(Debug, Clone, PartialEq)]
pub struct PixView {
    pub key: String,
    pub qr_code: Option<String>,
    pub total: String,
    pub copied: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientState {
    view: View,
    next_view: View,
    generation: u64,

    pub phone_input: String,
    pub error: Option<String>,
    debtor: Option<Debtor>,
    pub pix: PixConfig,
    pub pix_copied: bool,

    is_admin: bool,
    admin_tab: AdminTab,
    pub admin_debtors: Vec<Debtor>,
    pub import_text: String,
    pub manual: ManualEntry,
    pub new_pix_key: String,
}

impl Default for ClientState {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientState {
    pub fn new() -> Self {
        Self {
            view: View::Login,
            next_view: View::Dashboard,
            generation: 0,
            phone_input: String::new(),
            error: None,
            debtor: None,
            pix: PixConfig {
                key: Some(PLACEHOLDER_PIX_KEY.to_string()),
                qr_code: None,
            },
            pix_copied: false,
            is_admin: false,
            admin_tab: AdminTab::default(),
            admin_debtors: Vec::new(),
            import_text: String::new(),
            manual: ManualEntry::default(),
            new_pix_key: String::new(),
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// Where the current (or last) loading screen leads.
    pub fn next_view(&self) -> View {
        self.next_view
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn debtor(&self) -> Option<&Debtor> {
        self.debtor.as_ref()
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn admin_tab(&self) -> AdminTab {
        self.admin_tab
    }

    fn navigate(&mut self, to: View) {
        self.generation += 1;
        self.view = to;
    }

    fn begin_loading(&mut self, target: View) -> LoadingTicket {
        self.next_view = target;
        self.navigate(View::Loading);
        LoadingTicket {
            generation: self.generation,
            target,
        }
    }

    // ---------------------------
    // Login / lookup
    // ---------------------------

    /// Store what the user typed, reformatted through the display mask.
    pub fn set_phone_input(&mut self, raw: &str) {
        self.phone_input = format_phone(raw);
    }

    pub fn lookup_succeeded(&mut self, debtor: Debtor) -> Result<LoadingTicket, TransitionError> {
        if self.view != View::Login {
            return Err(TransitionError::NotAllowed {
                from: self.view,
                to: View::Dashboard,
            });
        }
        self.debtor = Some(debtor);
        self.error = None;
        Ok(self.begin_loading(View::Dashboard))
    }

    pub fn lookup_failed(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    // ---------------------------
    // Loading
    // ---------------------------

    /// Finish a loading screen. Returns false for a stale ticket.
    pub fn complete_loading(&mut self, ticket: LoadingTicket) -> bool {
        if self.view != View::Loading || ticket.generation != self.generation {
            return false;
        }
        self.navigate(ticket.target);
        true
    }

    // ---------------------------
    // Dashboard / PIX
    // ---------------------------

    pub fn begin_pix(&mut self) -> Result<LoadingTicket, TransitionError> {
        if self.view != View::Dashboard {
            return Err(TransitionError::NotAllowed {
                from: self.view,
                to: View::Pix,
            });
        }
        if self.debtor.is_none() {
            return Err(TransitionError::NoDebtor);
        }
        Ok(self.begin_loading(View::Pix))
    }

    pub fn back_to_dashboard(&mut self) -> Result<(), TransitionError> {
        if self.view != View::Pix {
            return Err(TransitionError::NotAllowed {
                from: self.view,
                to: View::Dashboard,
            });
        }
        self.navigate(View::Dashboard);
        Ok(())
    }

    pub fn dashboard(&self) -> Option<DashboardView> {
        let d = self.debtor.as_ref()?;
        Some(DashboardView {
            name: d.name.clone(),
            phone: format_phone(&d.phone),
            due_date: d.due_date.clone(),
            total: money(d.total()),
            discount: (d.discount > 0.0).then(|| money(d.discount)),
        })
    }

    pub fn pix_view(&self) -> Option<PixView> {
        let d = self.debtor.as_ref()?;
        Some(PixView {
            key: self.pix.key.clone().unwrap_or_default(),
            qr_code: self.pix.qr_code.clone(),
            total: money(d.total()),
            copied: self.pix_copied,
        })
    }

    /// Fresh config from the server also seeds the admin key field.
    pub fn set_pix_config(&mut self, cfg: PixConfig) {
        self.new_pix_key = cfg.key.clone().unwrap_or_default();
        self.pix = cfg;
    }

    // ---------------------------
    // Logout
    // ---------------------------

    /// Back to login from anywhere. Admin tab selection does not survive.
    pub fn logout(&mut self) {
        self.debtor = None;
        self.error = None;
        self.phone_input.clear();
        self.pix_copied = false;
        self.admin_tab = AdminTab::default();
        self.navigate(View::Login);
    }

    // ---------------------------
    // Admin
    // ---------------------------

    pub fn admin_authenticated(&mut self, debtors: Vec<Debtor>) {
        self.is_admin = true;
        self.admin_debtors = debtors;
        self.navigate(View::Admin);
    }

    /// The persistent admin control, once authenticated.
    pub fn open_admin(&mut self) -> Result<(), TransitionError> {
        if !self.is_admin {
            return Err(TransitionError::NotAdmin);
        }
        self.navigate(View::Admin);
        Ok(())
    }

    pub fn select_tab(&mut self, tab: AdminTab) -> Result<(), TransitionError> {
        if self.view != View::Admin {
            return Err(TransitionError::NotAllowed {
                from: self.view,
                to: View::Admin,
            });
        }
        self.admin_tab = tab;
        Ok(())
    }

    pub fn require_admin(&self) -> Result<(), TransitionError> {
        if self.is_admin {
            Ok(())
        } else {
            Err(TransitionError::NotAdmin)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn debtor(value: f64, discount: f64) -> Debtor {
        Debtor {
            phone: "11999998888".into(),
            name: "João Silva".into(),
            value,
            due_date: "15/02".into(),
            discount,
        }
    }

    #[test]
    fn login_flow_reaches_dashboard_after_loading() {
        let mut s = ClientState::new();
        let t = s.lookup_succeeded(debtor(100.0, 20.0)).unwrap();
        assert_eq!(s.view(), View::Loading);
        assert_eq!(t.target, View::Dashboard);

        assert!(s.complete_loading(t));
        assert_eq!(s.view(), View::Dashboard);

        let dash = s.dashboard().unwrap();
        assert_eq!(dash.total, "80.00");
        assert_eq!(dash.discount.as_deref(), Some("20.00"));
        assert_eq!(dash.phone, "(11) 99999-8888");
    }

    #[test]
    fn stale_ticket_is_ignored_after_logout() {
        let mut s = ClientState::new();
        let t = s.lookup_succeeded(debtor(10.0, 0.0)).unwrap();
        s.logout();

        assert!(!s.complete_loading(t));
        assert_eq!(s.view(), View::Login);
        assert!(s.debtor().is_none());
    }

    #[test]
    fn ticket_redeems_once() {
        let mut s = ClientState::new();
        let t = s.lookup_succeeded(debtor(10.0, 0.0)).unwrap();
        assert!(s.complete_loading(t));
        assert!(!s.complete_loading(t));
    }

    #[test]
    fn pix_round_trip() {
        let mut s = ClientState::new();
        let t = s.lookup_succeeded(debtor(10.0, 0.0)).unwrap();
        s.complete_loading(t);

        let t = s.begin_pix().unwrap();
        assert_eq!(t.target, View::Pix);
        s.complete_loading(t);
        assert_eq!(s.view(), View::Pix);
        assert_eq!(s.pix_view().unwrap().key, PLACEHOLDER_PIX_KEY);
        assert!(s.dashboard().unwrap().discount.is_none());

        s.back_to_dashboard().unwrap();
        assert_eq!(s.view(), View::Dashboard);
    }

    #[test]
    fn illegal_transitions_are_rejected() {
        let mut s = ClientState::new();
        assert!(matches!(s.begin_pix(), Err(TransitionError::NotAllowed { .. })));
        assert!(s.back_to_dashboard().is_err());
        assert_eq!(s.open_admin(), Err(TransitionError::NotAdmin));
        assert!(s.select_tab(AdminTab::Clients).is_err());
        assert_eq!(s.view(), View::Login);
    }

    #[test]
    fn admin_tab_survives_switching_but_not_logout() {
        let mut s = ClientState::new();
        s.admin_authenticated(vec![]);
        s.select_tab(AdminTab::PixConfig).unwrap();

        let t = s.lookup_succeeded(debtor(1.0, 0.0));
        assert!(t.is_err());

        s.open_admin().unwrap();
        assert_eq!(s.admin_tab(), AdminTab::PixConfig);

        s.logout();
        assert_eq!(s.admin_tab(), AdminTab::Import);
        assert!(s.is_admin());
    }

    #[test]
    fn admin_gate_cancels_pending_loading() {
        let mut s = ClientState::new();
        let t = s.lookup_succeeded(debtor(1.0, 0.0)).unwrap();
        s.admin_authenticated(vec![]);
        assert!(!s.complete_loading(t));
        assert_eq!(s.view(), View::Admin);
    }

    #[test]
    fn phone_input_is_masked() {
        let mut s = ClientState::new();
        s.set_phone_input("11999998888");
        assert_eq!(s.phone_input, "(11) 99999-8888");
    }

    #[test]
    fn manual_entry_requires_phone_and_name() {
        let mut m = ManualEntry::default();
        assert!(!m.is_complete());
        m.phone = "11 9".into();
        assert!(!m.is_complete());
        m.name = "Ana".into();
        assert!(m.is_complete());
        assert_eq!(m.to_candidate().into_debtor().unwrap().phone, "119");
    }
}
