//! Operator session: a logged-in flag with durable storage
//!
//! The flag lives behind [`SessionGate`]; a [`Session`] owns a gate plus the
//! configured credentials and is handed to the TUI and CLI explicitly.

use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::{app_dir, AdminCredentials};
use crate::types::{AdminError, Result};

const SESSION_FILENAME: &str = "session.json";

/// Storage for the boolean logged-in flag
pub trait SessionGate: Send {
    fn is_authenticated(&self) -> bool;
    fn set_authenticated(&mut self, value: bool) -> Result<()>;
}

/// Flag kept in memory only; lost on exit
#[derive(Debug, Default)]
pub struct MemorySessionGate {
    authenticated: bool,
}

impl SessionGate for MemorySessionGate {
    fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    fn set_authenticated(&mut self, value: bool) -> Result<()> {
        self.authenticated = value;
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    #[serde(rename = "isLoggedIn")]
    is_logged_in: bool,
}

/// Flag persisted as `{"isLoggedIn": true}` in `~/.eventease-admin/session.json`
#[derive(Debug)]
pub struct FileSessionGate {
    path: PathBuf,
}

impl FileSessionGate {
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(app_dir()?.join(SESSION_FILENAME)))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SessionGate for FileSessionGate {
    /// Unreadable or corrupt files count as logged out
    fn is_authenticated(&self) -> bool {
        let Ok(content) = fs::read_to_string(&self.path) else {
            return false;
        };
        match serde_json::from_str::<SessionFile>(&content) {
            Ok(file) => file.is_logged_in,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring corrupt session file");
                false
            }
        }
    }

    fn set_authenticated(&mut self, value: bool) -> Result<()> {
        if !value {
            if self.path.exists() {
                fs::remove_file(&self.path)?;
            }
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string(&SessionFile { is_logged_in: true })
            .map_err(|e| AdminError::Config(format!("Failed to serialize session: {}", e)))?;
        let temp_path = self.path.with_extension("json.tmp");
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

/// The operator's session, passed explicitly to whatever hosts the views
pub struct Session {
    gate: Box<dyn SessionGate>,
    credentials: Option<AdminCredentials>,
}

impl Session {
    pub fn new(gate: Box<dyn SessionGate>, credentials: Option<AdminCredentials>) -> Self {
        Self { gate, credentials }
    }

    pub fn is_authenticated(&self) -> bool {
        self.gate.is_authenticated()
    }

    /// Error unless logged in
    pub fn require(&self) -> Result<()> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(AdminError::NotAuthenticated)
        }
    }

    /// Check credentials against configuration and set the flag.
    /// Refuses outright when no credentials are configured.
    pub fn login(&mut self, username: &str, password: &str) -> Result<()> {
        let expected = self.credentials.as_ref().ok_or_else(|| {
            AdminError::Config(
                "no admin credentials configured (set `admin` in config.json \
                 or EVENTEASE_ADMIN_USER / EVENTEASE_ADMIN_PASSWORD)"
                    .into(),
            )
        })?;

        if expected.username != username || expected.password != password {
            warn!(username, "login rejected");
            return Err(AdminError::InvalidCredentials);
        }

        self.gate.set_authenticated(true)?;
        info!(username, "logged in");
        Ok(())
    }

    pub fn logout(&mut self) -> Result<()> {
        self.gate.set_authenticated(false)?;
        info!("logged out");
        Ok(())
    }
}
