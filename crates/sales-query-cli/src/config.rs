//! Configuration loading from TOML files
//!
//! Config file is selected via:
//! 1. --config <path> command line argument
//! 2. SALES_QUERY_CONFIG environment variable
//! 3. Built-in defaults (no file)

use anyhow::Context;
use chrono::NaiveDate;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "SALES_QUERY_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// JSON array of sale records.
    pub records: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Fixed anchor date; the host's local date when unset.
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter when RUST_LOG is not set.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub clock: ClockConfig,
    pub log: LogConfig,
}

impl Config {
    /// Load from an explicit path, else from `SALES_QUERY_CONFIG`, else defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match env::var_os(CONFIG_ENV) {
                Some(path) => Self::from_file(Path::new(&path)),
                None => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Anchor date: CLI override, then config, then the host's local date.
    pub fn today(&self, cli_today: Option<NaiveDate>) -> NaiveDate {
        cli_today
            .or(self.clock.today)
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    /// Records file: CLI override, then config.
    pub fn records_path<'a>(&'a self, cli_records: Option<&'a Path>) -> Option<&'a Path> {
        cli_records.or(self.data.records.as_deref())
    }
}
