use anyhow::{Context, Result};
use chrono::NaiveTime;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::clock::DailyWindow;

const DEFAULT_CONFIG_FILE: &str = "config.json";
const DEFAULT_LOG_FILE: &str = "f2pool.log";
const DEFAULT_POOL_API_URL: &str = "https://api.f2pool.com";
const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
const DEFAULT_HEALTHCHECK_URL: &str = "https://hc-ping.com";
const DEFAULT_HEALTHCHECK_TIMEOUT_SECONDS: u64 = 10;
const TERA: f64 = 1_000_000_000_000.0;

/// Accounts to watch and the credentials used to report on them.
///
/// Mirrors the JSON file layout:
/// `{"currency": {"bitcoin": ["alice"]}, "tg_bot_token": "...", "tg_group_id": "...", "healthcheck_uuid": "..."}`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub currency: BTreeMap<String, Vec<String>>,
    pub tg_bot_token: String,
    pub tg_group_id: String,
    pub healthcheck_uuid: String,
}

impl Config {
    /// Load the account file.
    ///
    /// Returns `Ok(None)` when the file does not exist; callers treat that as fatal.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let path = path.as_ref();
        if !path.is_file() {
            return Ok(None);
        }
        info!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(Some(config))
    }

    /// Iterate every `(currency, account)` pair in the order they are checked.
    pub fn accounts(&self) -> impl Iterator<Item = (&str, &str)> {
        self.currency.iter().flat_map(|(currency, accounts)| {
            accounts
                .iter()
                .map(move |account| (currency.as_str(), account.as_str()))
        })
    }
}

/// Runtime constants of a single monitoring pass.
#[derive(Debug, Clone)]
pub struct Settings {
    pub config_file: PathBuf,
    pub log_file: PathBuf,
    pub pool_api_url: String,
    pub telegram_api_url: String,
    pub healthcheck_url: String,
    pub healthcheck_timeout_seconds: u64,
    pub daily_window: DailyWindow,
    pub hashrate_unit: f64,
    pub hashrate_unit_label: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config_file: PathBuf::from(DEFAULT_CONFIG_FILE),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            pool_api_url: DEFAULT_POOL_API_URL.to_string(),
            telegram_api_url: DEFAULT_TELEGRAM_API_URL.to_string(),
            healthcheck_url: DEFAULT_HEALTHCHECK_URL.to_string(),
            healthcheck_timeout_seconds: DEFAULT_HEALTHCHECK_TIMEOUT_SECONDS,
            daily_window: DailyWindow::new(
                NaiveTime::from_hms_opt(20, 0, 0).unwrap_or_default(),
                NaiveTime::from_hms_opt(21, 10, 0).unwrap_or_default(),
            ),
            hashrate_unit: TERA,
            hashrate_unit_label: "TH/s".to_string(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        let mut settings = Settings::default();

        // Override with environment variables if present
        if let Ok(path) = std::env::var("POOL_MONITOR_CONFIG") {
            settings.config_file = PathBuf::from(path);
        }

        if let Ok(path) = std::env::var("POOL_MONITOR_LOG_FILE") {
            settings.log_file = PathBuf::from(path);
        }

        if let Ok(url) = std::env::var("POOL_API_URL") {
            settings.pool_api_url = url;
        }

        if let Ok(url) = std::env::var("TELEGRAM_API_URL") {
            settings.telegram_api_url = url;
        }

        if let Ok(url) = std::env::var("HEALTHCHECK_URL") {
            settings.healthcheck_url = url;
        }

        settings
    }
}
