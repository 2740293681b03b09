use crate::core::auth::AdminCredential;
use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::str::FromStr;

pub mod migrate;

/// Asset delivery mode. API behavior is identical in both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppMode {
    #[default]
    Development,
    Production,
}

impl FromStr for AppMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(AppMode::Development),
            "production" | "prod" => Ok(AppMode::Production),
            other => Err(AppError::Config(format!("unknown mode '{other}'"))),
        }
    }
}

impl fmt::Display for AppMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppMode::Development => f.write_str("development"),
            AppMode::Production => f.write_str("production"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default)]
    pub mode: AppMode,
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,
    /// Hex SHA-256 of the admin password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_password_sha256: Option<String>,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_bind() -> String {
    "0.0.0.0:3000".to_string()
}
fn default_assets_dir() -> String {
    "dist".to_string()
}
fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            bind: default_bind(),
            mode: AppMode::default(),
            assets_dir: default_assets_dir(),
            admin_password_sha256: None,
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("debtpix")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".debtpix")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("debtpix.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("debtpix.sqlite")
    }

    /// Load configuration from file, or return defaults if not found.
    /// Environment overrides are applied on top.
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        let mut cfg: Config = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_yaml::from_str(&content)?
        } else {
            Config::default()
        };

        cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();
        cfg.apply_env()?;
        Ok(cfg)
    }

    /// `DEBTPIX_BIND`, `DEBTPIX_ENV` (or `NODE_ENV`) override the file.
    pub fn apply_env(&mut self) -> AppResult<()> {
        if let Ok(bind) = env::var("DEBTPIX_BIND") {
            self.bind = bind;
        }
        if let Ok(mode) = env::var("DEBTPIX_ENV").or_else(|_| env::var("NODE_ENV")) {
            // NODE_ENV may hold values like "test"; anything but production is development.
            self.mode = mode.parse().unwrap_or(AppMode::Development);
        }
        Ok(())
    }

    /// Admin credential: `DEBTPIX_ADMIN_PASSWORD` wins over the stored hash.
    pub fn admin_credential(&self) -> AppResult<AdminCredential> {
        if let Ok(pw) = env::var("DEBTPIX_ADMIN_PASSWORD")
            && !pw.is_empty()
        {
            return Ok(AdminCredential::from_plaintext(&pw));
        }

        match &self.admin_password_sha256 {
            Some(hex) => AdminCredential::from_sha256_hex(hex),
            None => Ok(AdminCredential::disabled()),
        }
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> io::Result<Config> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_name {
            let p = expand_tilde(&name);
            if p.is_absolute() { p } else { dir.join(p) }
        } else {
            Self::database_file()
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config).map_err(io::Error::other)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        Ok(config)
    }
}
