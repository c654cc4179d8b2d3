//! Configuration management
//!
//! Handles loading of the optional JSON configuration file with environment
//! variable support for API credentials. Every field has a default, so the
//! bot runs against the testnet without any file at all.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::binance::{ClientConfig, Credentials, MAINNET_BASE_URL, TESTNET_BASE_URL};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub exchange: ExchangeConfig,
    #[serde(default)]
    pub console: ConsoleConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read config file {}", path.as_ref().display())
        })?;
        serde_json::from_str(&contents).context("Failed to parse config JSON")
    }

    /// Load from `path` when given, defaults otherwise
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }
}

/// Exchange connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeConfig {
    /// Use the futures testnet. Production only when this is false.
    pub testnet: bool,
    /// Overrides the endpoint chosen by `testnet`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub recv_window_ms: u64,
    pub timeout_secs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_secret: Option<String>,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        ExchangeConfig {
            testnet: true,
            base_url: None,
            recv_window_ms: 5000,
            timeout_secs: 30,
            api_key: None,
            api_secret: None,
        }
    }
}

impl ExchangeConfig {
    pub fn base_url(&self) -> &str {
        match &self.base_url {
            Some(url) => url,
            None if self.testnet => TESTNET_BASE_URL,
            None => MAINNET_BASE_URL,
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::default()
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_recv_window(self.recv_window_ms)
    }

    /// Credentials from `BINANCE_API_KEY` / `BINANCE_API_SECRET`, falling back
    /// to the config file. `None` when neither source has both parts.
    pub fn credentials(&self) -> Option<Credentials> {
        if let Ok(creds) = Credentials::from_env() {
            if creds.is_complete() {
                return Some(creds);
            }
        }
        match (&self.api_key, &self.api_secret) {
            (Some(key), Some(secret)) => Some(Credentials::new(key.as_str(), secret.as_str()))
                .filter(Credentials::is_complete),
            _ => None,
        }
    }
}

/// Operator console settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// ANSI colors in console output
    pub color: bool,
    /// Show the current price before asking for order details. Adds a ticker
    /// call to every order flow, declined ones included.
    pub price_preview: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        ConsoleConfig {
            color: true,
            price_preview: false,
        }
    }
}

/// Log file settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            dir: PathBuf::from("logs"),
        }
    }
}
