//! Configuration management
//!
//! User preferences live in `user_settings.json` inside the data directory:
//! ```json
//! {
//!   "user_currencies": ["USD", "EUR"],
//!   "user_main_currency": "RUB",
//!   "user_stocks": ["AAPL", "AMZN", "GOOGL", "MSFT", "TSLA"]
//! }
//! ```
//! The quote API key and base URL come from the environment.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub const SETTINGS_FILE: &str = "user_settings.json";
pub const DATA_DIR_ENV: &str = "SPENDSCOPE_DIR";
pub const API_KEY_ENV: &str = "TWELVEDATA_API_KEY";
pub const BASE_URL_ENV: &str = "TWELVEDATA_BASE_URL";
pub const DEFAULT_QUOTE_BASE_URL: &str = "https://api.twelvedata.com";

/// Raw user_settings.json structure
#[derive(Debug, Clone, Default, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    user_currencies: Option<Vec<String>>,
    #[serde(default)]
    user_main_currency: Option<String>,
    #[serde(default)]
    user_stocks: Option<Vec<String>>,
}

/// Instruments shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    pub user_currencies: Vec<String>,
    pub user_main_currency: String,
    pub user_stocks: Vec<String>,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            user_currencies: vec!["USD".to_string(), "EUR".to_string()],
            user_main_currency: "RUB".to_string(),
            user_stocks: ["AAPL", "AMZN", "GOOGL", "MSFT", "TSLA"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Spendscope configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub settings: UserSettings,
    pub quote_api_key: Option<String>,
    pub quote_base_url: String,
}

impl Config {
    /// Default data directory: `$SPENDSCOPE_DIR`, else `~/.spendscope`
    pub fn default_data_dir() -> PathBuf {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            if !dir.trim().is_empty() {
                return PathBuf::from(dir);
            }
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".spendscope")
    }

    /// Load config from the data directory and the process environment
    pub fn load(data_dir: &Path) -> Result<Self> {
        Self::load_with_env(data_dir, |key| std::env::var(key).ok())
    }

    /// Load config with an explicit environment lookup
    ///
    /// A malformed settings file falls back to defaults; so does each
    /// missing field.
    pub fn load_with_env(data_dir: &Path, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let raw = read_settings_file(data_dir)?;
        let defaults = UserSettings::default();

        let settings = UserSettings {
            user_currencies: raw.user_currencies.unwrap_or(defaults.user_currencies),
            user_main_currency: raw.user_main_currency.unwrap_or(defaults.user_main_currency),
            user_stocks: raw.user_stocks.unwrap_or(defaults.user_stocks),
        };

        let quote_api_key = env(API_KEY_ENV).filter(|k| !k.trim().is_empty());
        let quote_base_url = env(BASE_URL_ENV)
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_QUOTE_BASE_URL.to_string());

        Ok(Self {
            data_dir: data_dir.to_path_buf(),
            settings,
            quote_api_key,
            quote_base_url,
        })
    }

    /// Default transaction export
    pub fn transactions_path(&self) -> PathBuf {
        self.data_dir.join("data").join("operations.xlsx")
    }

    /// Where the last category report is written
    pub fn report_path(&self) -> PathBuf {
        self.data_dir.join("reports_data").join("report.json")
    }
}

fn read_settings_file(data_dir: &Path) -> Result<SettingsFile> {
    let settings_path = data_dir.join(SETTINGS_FILE);
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }
    let content = std::fs::read_to_string(&settings_path)?;
    Ok(serde_json::from_str(&content).unwrap_or_default())
}
