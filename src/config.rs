use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::autosave::DEFAULT_AUTOSAVE_DELAY_MS;
use crate::domain::session_token::SESSION_MAX_AGE_DAYS;

pub const PRODUCT_ID_ENV: &str = "GUMROAD_PRODUCT_ID";
pub const SESSION_SECRET_ENV: &str = "APP_SESSION_SECRET";

const DEFAULT_QUOTA_BYTES: u64 = 5_000_000;

fn default_autosave_delay_ms() -> u64 {
    DEFAULT_AUTOSAVE_DELAY_MS
}

fn default_quota_bytes() -> u64 {
    DEFAULT_QUOTA_BYTES
}

fn default_session_max_age_days() -> u64 {
    SESSION_MAX_AGE_DAYS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub data_dir: PathBuf,
    pub audio_dir: PathBuf,
    #[serde(default = "default_autosave_delay_ms")]
    pub autosave_delay_ms: u64,
    /// Total bytes the journal store may use; 0 disables the limit.
    #[serde(default = "default_quota_bytes")]
    pub storage_quota_bytes: u64,
    #[serde(default = "default_session_max_age_days")]
    pub session_max_age_days: u64,
    #[serde(default)]
    pub gumroad_product_id: Option<String>,
    #[serde(default)]
    pub session_secret: Option<String>,
    #[serde(default)]
    pub increment_uses_count: bool,
}

impl Config {
    pub fn load(config_dir: &Path) -> Result<Self> {
        let config_path = config_dir.join("config.toml");

        if !config_path.exists() {
            let default_config = Self::default_with_dir(config_dir);
            default_config.save(config_dir)?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(&config_path).context("Failed to read config file")?;

        toml::from_str(&content).context("Failed to parse config file")
    }

    pub fn save(&self, config_dir: &Path) -> Result<()> {
        let config_path = config_dir.join("config.toml");
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, content).context("Failed to write config file")?;
        Ok(())
    }

    pub fn storage_quota(&self) -> Option<u64> {
        Some(self.storage_quota_bytes).filter(|q| *q > 0)
    }

    /// Product id from the environment, falling back to the config file.
    pub fn product_id(&self) -> Option<String> {
        env::var(PRODUCT_ID_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.gumroad_product_id.clone())
    }

    /// Session secret from the environment, falling back to the config file.
    pub fn session_secret(&self) -> Option<String> {
        env::var(SESSION_SECRET_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| self.session_secret.clone())
    }

    fn default_with_dir(config_dir: &Path) -> Self {
        Self {
            data_dir: config_dir.join("data"),
            audio_dir: config_dir.join("audio"),
            autosave_delay_ms: DEFAULT_AUTOSAVE_DELAY_MS,
            storage_quota_bytes: DEFAULT_QUOTA_BYTES,
            session_max_age_days: SESSION_MAX_AGE_DAYS,
            gumroad_product_id: None,
            session_secret: None,
            increment_uses_count: false,
        }
    }
}

pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Failed to get home directory")?;
    let config_dir = home.join(".dailyreset");

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
    }

    Ok(config_dir)
}

/// Expands a leading `~` to the home directory.
pub fn expand_home(path: &str) -> Result<PathBuf> {
    match path.strip_prefix('~') {
        Some(rest) => {
            let home = dirs::home_dir().context("Failed to get home directory")?;
            Ok(home.join(rest.trim_start_matches('/')))
        }
        None => Ok(PathBuf::from(path)),
    }
}
