#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use debtpix::core::Service;
use debtpix::core::auth::AdminCredential;
use debtpix::db::pool::DbPool;
use debtpix::models::debtor::DebtorCandidate;
use std::path::PathBuf;
use tempfile::TempDir;

pub const ADMIN_PASSWORD: &str = "net@2025";

/// Isolated HOME plus a database path inside it.
pub struct Sandbox {
    pub home: TempDir,
    pub db_path: String,
}

impl Sandbox {
    pub fn new() -> Self {
        let home = tempfile::tempdir().expect("create temp home");
        let db_path = home
            .path()
            .join("debtpix_test.sqlite")
            .to_string_lossy()
            .to_string();
        Self { home, db_path }
    }

    /// `debtpix` with HOME pointed at the sandbox and no credential from the env.
    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("debtpix");
        cmd.env("HOME", self.home.path())
            .env_remove("DEBTPIX_ADMIN_PASSWORD")
            .env_remove("DEBTPIX_ENV")
            .env_remove("NODE_ENV")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Same as `cmd()` with `--db <sandbox db>` already set.
    pub fn db_cmd(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.args(["--db", &self.db_path]);
        cmd
    }

    pub fn file(&self, name: &str, contents: &str) -> PathBuf {
        let p = self.home.path().join(name);
        std::fs::write(&p, contents).expect("write sandbox file");
        p
    }

    pub fn init(&self) {
        self.db_cmd().args(["--test", "init"]).assert().success();
    }
}

pub fn candidate(phone: &str, name: &str, value: f64, discount: f64) -> DebtorCandidate {
    DebtorCandidate {
        phone: Some(phone.into()),
        name: Some(name.to_string()),
        value: Some(value),
        due_date: Some("15/02".to_string()),
        discount: Some(discount),
    }
}

/// In-memory service with the test credential and `seed` already stored.
pub fn service_with(seed: Vec<DebtorCandidate>) -> Service {
    let mut svc = Service::new(
        DbPool::in_memory().expect("in-memory store"),
        AdminCredential::from_plaintext(ADMIN_PASSWORD),
    );
    svc.replace(seed).expect("seed debtors");
    svc
}
