//! The calls the client makes against the service.

use crate::core::Service;
use crate::errors::{AppError, AppResult};
use crate::models::debtor::{Debtor, DebtorCandidate, PhoneInput};
use crate::models::pix::{PixConfig, PixConfigUpdate};
use std::future::{Future, ready};
use std::sync::{Arc, Mutex};

pub trait Backend {
    fn lookup(&self, phone: &str) -> impl Future<Output = AppResult<Debtor>> + Send;
    fn admin_login(&self, password: &str) -> impl Future<Output = AppResult<()>> + Send;
    fn list_debtors(&self) -> impl Future<Output = AppResult<Vec<Debtor>>> + Send;
    fn replace_debtors(
        &self,
        debtors: Vec<DebtorCandidate>,
    ) -> impl Future<Output = AppResult<()>> + Send;
    fn delete_debtor(&self, phone: &str) -> impl Future<Output = AppResult<()>> + Send;
    fn reset(&self) -> impl Future<Output = AppResult<()>> + Send;
    fn pix_config(&self) -> impl Future<Output = AppResult<PixConfig>> + Send;
    fn update_pix_config(
        &self,
        update: PixConfigUpdate,
    ) -> impl Future<Output = AppResult<()>> + Send;
}

/// In-process backend sharing the same service object the HTTP layer uses.
#[derive(Clone)]
pub struct LocalBackend {
    service: Arc<Mutex<Service>>,
}

impl LocalBackend {
    pub fn new(service: Arc<Mutex<Service>>) -> Self {
        Self { service }
    }

    fn with<T>(&self, f: impl FnOnce(&mut Service) -> AppResult<T>) -> AppResult<T> {
        let mut svc = self
            .service
            .lock()
            .map_err(|_| AppError::Store("service lock poisoned".into()))?;
        f(&mut svc)
    }
}

impl Backend for LocalBackend {
    fn lookup(&self, phone: &str) -> impl Future<Output = AppResult<Debtor>> + Send {
        let phone = PhoneInput::Text(phone.to_string());
        ready(self.with(|s| s.lookup(Some(&phone))))
    }

    fn admin_login(&self, password: &str) -> impl Future<Output = AppResult<()>> + Send {
        ready(self.with(|s| s.authenticate(password)))
    }

    fn list_debtors(&self) -> impl Future<Output = AppResult<Vec<Debtor>>> + Send {
        ready(self.with(|s| s.list()))
    }

    fn replace_debtors(
        &self,
        debtors: Vec<DebtorCandidate>,
    ) -> impl Future<Output = AppResult<()>> + Send {
        ready(self.with(|s| s.replace(debtors).map(|_| ())))
    }

    fn delete_debtor(&self, phone: &str) -> impl Future<Output = AppResult<()>> + Send {
        ready(self.with(|s| s.delete(phone)))
    }

    fn reset(&self) -> impl Future<Output = AppResult<()>> + Send {
        ready(self.with(|s| s.reset()))
    }

    fn pix_config(&self) -> impl Future<Output = AppResult<PixConfig>> + Send {
        ready(self.with(|s| s.pix_config()))
    }

    fn update_pix_config(
        &self,
        update: PixConfigUpdate,
    ) -> impl Future<Output = AppResult<()>> + Send {
        ready(self.with(|s| s.update_pix_config(&update)))
    }
}
