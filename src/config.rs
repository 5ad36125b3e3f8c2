use crate::plan::{DEFAULT_START_DATE, DEFAULT_TOTAL_DAYS};
use crate::reminder::DEFAULT_REMINDER_HOUR;
use crate::sync::DEFAULT_SAVE_INTERVAL;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Sync API bind host
    pub host: String,

    /// Sync API bind port
    pub port: u16,

    /// Root directory of the blob store served by the sync API
    pub blob_dir: PathBuf,

    /// Base URL the client syncs against
    pub api_url: String,

    /// Root directory of the client's local store
    pub data_dir: PathBuf,

    pub start_date: NaiveDate,
    pub total_days: u32,

    /// Minimum interval between debounced remote saves
    pub sync_debounce: Duration,

    /// Local hour of the daily reminder
    pub reminder_hour: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            blob_dir: PathBuf::from("./data/blobs"),
            api_url: "http://localhost:3000".to_string(),
            data_dir: PathBuf::from("./data/local"),
            start_date: DEFAULT_START_DATE,
            total_days: DEFAULT_TOTAL_DAYS,
            sync_debounce: DEFAULT_SAVE_INTERVAL,
            reminder_hour: DEFAULT_REMINDER_HOUR,
        }
    }
}

impl AppConfig {
    /// Reads `EPHI_*` variables, after loading `.env` if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("EPHI_PORT") {
            Some(raw) => raw.parse::<u16>().context("EPHI_PORT must be a valid u16")?,
            None => defaults.port,
        };

        let start_date = match lookup("EPHI_START_DATE") {
            Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .context("EPHI_START_DATE must be a date formatted YYYY-MM-DD")?,
            None => defaults.start_date,
        };

        let total_days = match lookup("EPHI_TOTAL_DAYS") {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|days| *days > 0)
                .context("EPHI_TOTAL_DAYS must be a positive integer")?,
            None => defaults.total_days,
        };

        let sync_debounce = match lookup("EPHI_SYNC_DEBOUNCE_MS") {
            Some(raw) => Duration::from_millis(
                raw.parse::<u64>()
                    .context("EPHI_SYNC_DEBOUNCE_MS must be a number of milliseconds")?,
            ),
            None => defaults.sync_debounce,
        };

        let reminder_hour = match lookup("EPHI_REMINDER_HOUR") {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|hour| *hour < 24)
                .context("EPHI_REMINDER_HOUR must be an hour between 0 and 23")?,
            None => defaults.reminder_hour,
        };

        Ok(Self {
            host: lookup("EPHI_HOST").unwrap_or(defaults.host),
            port,
            blob_dir: lookup("EPHI_BLOB_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.blob_dir),
            api_url: lookup("EPHI_API_URL").unwrap_or(defaults.api_url),
            data_dir: lookup("EPHI_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            start_date,
            total_days,
            sync_debounce,
            reminder_hour,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
