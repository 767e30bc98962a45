use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, Result};
use log::{debug, info, warn};
use serde::Deserialize;
use url::Url;

/// Top-level configuration structure containing all config sections
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub exchange: ExchangeConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub trading: TradingConfig,
}

/// Where and how requests are sent
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExchangeConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_scope")]
    pub scope: String,
}

/// Which slice of the market the console works with
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TradingConfig {
    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default = "default_kind")]
    pub kind: String,

    #[serde(default)]
    pub order_book_depth: Option<u32>,
}

fn default_base_url() -> String {
    "https://test.deribit.com/api/v2".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_scope() -> String {
    "session:deribit-trader expires:2592000".to_string()
}

fn default_currency() -> String {
    "BTC".to_string()
}

fn default_kind() -> String {
    "future".to_string()
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { scope: default_scope() }
    }
}

impl Default for TradingConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            kind: default_kind(),
            order_book_depth: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let config_str = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file '{}': {}", path.display(), e))?;

        let config = Self::from_toml_str(&config_str)
            .map_err(|e| anyhow!("Failed to parse config file '{}': {}", path.display(), e))?;

        info!("Loaded configuration from {}", path.display());
        debug!("Exchange endpoint: {}", config.exchange.base_url);

        Ok(config)
    }

    pub fn from_toml_str(config_str: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(config_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to the defaults.
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            warn!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.exchange.base_url)
            .map_err(|e| anyhow!("Invalid exchange.base_url '{}': {}", self.exchange.base_url, e))?;
        if self.exchange.timeout_secs == 0 {
            return Err(anyhow!("exchange.timeout_secs must be greater than zero"));
        }
        if self.trading.currency.trim().is_empty() {
            return Err(anyhow!("trading.currency cannot be empty"));
        }
        if self.trading.kind.trim().is_empty() {
            return Err(anyhow!("trading.kind cannot be empty"));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.exchange.timeout_secs)
    }
}
