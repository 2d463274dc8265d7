use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackerError};
use crate::view::{SortKey, StatusFilter};

const SERVER_URL_ENV: &str = "READTRACK_SERVER_URL";

/// Root application configuration, loaded from `~/.config/readtrack/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

/// Where the library service lives and how to talk to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub base_url: String,
    pub user_agent: String,
    /// Request timeout; the transport default applies when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub default_sort: SortKey,
    pub default_filter: StatusFilter,
    pub toast_duration_ms: u64,
    pub tick_rate_ms: u64,
    /// Percentage points added or removed per progress key press.
    pub progress_step: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

// ─── Defaults ──────────────────────────────────────────────

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            user_agent: format!("readtrack/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: None,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_sort: SortKey::Recent,
            default_filter: StatusFilter::All,
            toast_duration_ms: 3000,
            tick_rate_ms: 100,
            progress_step: 5,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl ServiceConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl UiConfig {
    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(10))
    }
}

// ─── Load / Save ───────────────────────────────────────────

impl AppConfig {
    /// Standard config file path: `~/.config/readtrack/config.toml`
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("READTRACK_CONFIG") {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("readtrack")
            .join("config.toml")
    }

    /// Load config from a specific path, falling back to defaults if the
    /// file doesn't exist. Environment overrides are applied separately.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }

    /// Apply `READTRACK_SERVER_URL`, whichever file the config came from.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_with(|key| std::env::var(key).ok())
    }

    fn apply_overrides_with(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = lookup(SERVER_URL_ENV) {
            self.set_base_url(url)?;
        }
        Ok(())
    }

    pub fn set_base_url(&mut self, url: impl Into<String>) -> Result<()> {
        self.service.base_url = url.into();
        self.validate()
    }

    fn validate(&self) -> Result<()> {
        let url = self.service.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(TrackerError::Config(format!(
                "service.base_url must be an http(s) URL, got {url:?}"
            )));
        }
        if self.ui.progress_step == 0 || self.ui.progress_step > 100 {
            return Err(TrackerError::Config(
                "ui.progress_step must be between 1 and 100".to_string(),
            ));
        }
        Ok(())
    }

    // ─── Derived paths ─────────────────────────────────────

    /// Log file, defaulting to `<data dir>/readtrack/readtrack.log`.
    pub fn log_path(&self) -> PathBuf {
        match self.logging.file {
            Some(ref file) => PathBuf::from(file),
            None => dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("/tmp"))
                .join("readtrack")
                .join("readtrack.log"),
        }
    }
}
