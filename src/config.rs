//! Configuration for eventease-admin
//!
//! Read from `~/.eventease-admin/config.json` (or `--config <path>`), then
//! overridden by `EVENTEASE_*` environment variables and CLI flags.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::BaseDirs;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::types::{AdminError, Result};

const APP_DIR: &str = ".eventease-admin";
const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_FIRESTORE_URL: &str = "https://firestore.googleapis.com/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Operator credentials accepted by the login screen
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Top-level configuration file schema
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    pub project_id: Option<String>,
    pub api_key: Option<String>,
    pub bearer_token: Option<String>,
    /// Offline JSON snapshot; takes precedence over Firestore
    pub data_file: Option<PathBuf>,
    pub admin: Option<AdminCredentials>,
    /// Periodic full re-fetch in the TUI
    pub refresh_interval_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub firestore_base_url: Option<String>,
    /// Captures unknown fields for warnings
    #[serde(flatten)]
    pub unknown_fields: BTreeMap<String, Value>,
}

/// Connection settings for the Firestore REST store
#[derive(Debug, Clone)]
pub struct FirestoreSettings {
    pub project_id: String,
    pub api_key: Option<String>,
    pub bearer_token: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
}

/// Which record store to open
#[derive(Debug, Clone)]
pub enum StoreConfig {
    Snapshot(PathBuf),
    Firestore(FirestoreSettings),
}

impl Config {
    /// Load configuration: an explicit path must exist, the default path is optional.
    /// Environment overrides are applied afterwards.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = app_dir()?.join(CONFIG_FILENAME);
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse a config file and warn about unknown keys
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AdminError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: Config = serde_json::from_str(&content).map_err(|e| {
            AdminError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        for key in config.unknown_fields.keys() {
            warn!(key = %key, "unknown config field will be ignored");
        }
        Ok(config)
    }

    /// Apply `EVENTEASE_*` overrides from a variable lookup
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = non_empty("EVENTEASE_PROJECT_ID") {
            self.project_id = Some(v);
        }
        if let Some(v) = non_empty("EVENTEASE_API_KEY") {
            self.api_key = Some(v);
        }
        if let Some(v) = non_empty("EVENTEASE_BEARER_TOKEN") {
            self.bearer_token = Some(v);
        }
        if let Some(v) = non_empty("EVENTEASE_DATA_FILE") {
            self.data_file = Some(PathBuf::from(v));
        }

        let user = non_empty("EVENTEASE_ADMIN_USER");
        let password = non_empty("EVENTEASE_ADMIN_PASSWORD");
        match (user, password) {
            (Some(username), Some(password)) => {
                self.admin = Some(AdminCredentials { username, password });
            }
            (Some(username), None) => match self.admin.as_mut() {
                Some(admin) => admin.username = username,
                None => warn!("EVENTEASE_ADMIN_USER ignored without a password"),
            },
            (None, Some(password)) => match self.admin.as_mut() {
                Some(admin) => admin.password = password,
                None => warn!("EVENTEASE_ADMIN_PASSWORD ignored without a username"),
            },
            (None, None) => {}
        }
    }

    /// Force the snapshot store (the `--data` flag)
    pub fn with_data_file(mut self, path: PathBuf) -> Self {
        self.data_file = Some(path);
        self
    }

    /// Resolve the store to open
    pub fn store(&self) -> Result<StoreConfig> {
        if let Some(path) = &self.data_file {
            return Ok(StoreConfig::Snapshot(path.clone()));
        }

        let project_id = self
            .project_id
            .clone()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| {
                AdminError::Config(
                    "no record store configured: set project_id (or EVENTEASE_PROJECT_ID), \
                     or pass --data <snapshot.json>"
                        .into(),
                )
            })?;

        Ok(StoreConfig::Firestore(FirestoreSettings {
            project_id,
            api_key: self.api_key.clone(),
            bearer_token: self.bearer_token.clone(),
            base_url: self
                .firestore_base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_FIRESTORE_URL.to_string()),
            timeout_secs: self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        }))
    }

    pub fn credentials(&self) -> Option<&AdminCredentials> {
        self.admin.as_ref()
    }

    /// Auto-refresh period; zero disables it
    pub fn refresh_interval(&self) -> Option<Duration> {
        self.refresh_interval_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

/// `~/.eventease-admin`
pub fn app_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new()
        .ok_or_else(|| AdminError::Config("Cannot determine home directory".into()))?;
    Ok(base_dirs.home_dir().join(APP_DIR))
}
