//! Terminal host settings.
//!
//! Reads/writes `~/.openerp/scrap.toml`. Command-line flags override
//! whatever the file says.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings for one ERP connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapConfig {
    /// ERP base URL (e.g. "http://localhost:8069").
    pub server: String,

    /// Database to log in to.
    pub database: String,

    pub login: String,

    /// Stored password. Prompted for when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// UI language, "en" or "cs".
    pub locale: String,

    /// Currency code printed after amounts.
    pub currency: String,

    /// Delay before the barcode field regains focus after a new session.
    pub refocus_delay_ms: u64,
}

impl Default for ScrapConfig {
    fn default() -> Self {
        Self {
            server: "http://localhost:8069".to_string(),
            database: String::new(),
            login: String::new(),
            password: None,
            locale: "en".to_string(),
            currency: "CZK".to_string(),
            refocus_delay_ms: 100,
        }
    }
}

impl ScrapConfig {
    /// Default config file path: ~/.openerp/scrap.toml.
    pub fn default_path() -> PathBuf {
        dirs_path().join("scrap.toml")
    }

    /// Load config from disk, or return default if file doesn't exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: ScrapConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn refocus_delay(&self) -> Duration {
        Duration::from_millis(self.refocus_delay_ms)
    }

    /// Fail early on settings no session can start without. A reused
    /// session id needs only the server.
    pub fn validate(&self, static_session: bool) -> anyhow::Result<()> {
        if self.server.trim().is_empty() {
            anyhow::bail!("No server URL. Pass --server or set `server` in the config file.");
        }
        if static_session {
            return Ok(());
        }
        if self.database.trim().is_empty() {
            anyhow::bail!("No database. Pass --db or set `database` in the config file.");
        }
        if self.login.trim().is_empty() {
            anyhow::bail!("No login. Pass --login or set `login` in the config file.");
        }
        Ok(())
    }
}

/// Return the OpenERP config directory (~/.openerp).
fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".openerp")
}
