//! Storefront configuration.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use terroa_auth::{LoginPolicy, DEFAULT_ADMIN_EMAIL};
use terroa_cache::{FileStore, KvStore, MemoryStore};
use terroa_commerce::cart::WholesaleMinimum;
use terroa_commerce::catalog::DEFAULT_LOW_STOCK_THRESHOLD;
use terroa_commerce::checkout::DEFAULT_SETTLEMENT_LATENCY;
use terroa_commerce::{Currency, Money};

/// Storefront configuration file. Every field has a default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Currency of the catalog and all totals.
    #[serde(default)]
    pub currency: Currency,

    /// Minimum wholesale order, as a decimal string (e.g. "500.00").
    #[serde(default = "default_wholesale_min_order")]
    pub wholesale_min_order: String,

    /// Simulated payment latency.
    #[serde(default = "default_settlement_latency_ms")]
    pub settlement_latency_ms: u64,

    /// Email that signs in as the administrator.
    #[serde(default = "default_admin_email")]
    pub admin_email: String,

    /// Stock level under which products are flagged on the dashboard.
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: u32,

    /// Durable storage backend.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging.
    #[serde(default)]
    pub log: LogConfig,
}

fn default_wholesale_min_order() -> String {
    "500.00".to_string()
}

fn default_settlement_latency_ms() -> u64 {
    DEFAULT_SETTLEMENT_LATENCY.as_millis() as u64
}

fn default_admin_email() -> String {
    DEFAULT_ADMIN_EMAIL.to_string()
}

fn default_low_stock_threshold() -> u32 {
    DEFAULT_LOW_STOCK_THRESHOLD
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            wholesale_min_order: default_wholesale_min_order(),
            settlement_latency_ms: default_settlement_latency_ms(),
            admin_email: default_admin_email(),
            low_stock_threshold: default_low_stock_threshold(),
            storage: StorageConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load config from a file. `.json` files are read as JSON, anything
    /// else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file, in the format implied by the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// The wholesale minimum in the configured currency.
    pub fn wholesale_minimum(&self) -> Result<WholesaleMinimum> {
        let amount = Money::parse(&self.wholesale_min_order, self.currency).with_context(|| {
            format!("Invalid wholesale_min_order: {:?}", self.wholesale_min_order)
        })?;
        anyhow::ensure!(
            !amount.is_negative(),
            "wholesale_min_order must not be negative"
        );
        Ok(WholesaleMinimum::new(amount))
    }

    pub fn settlement_latency(&self) -> Duration {
        Duration::from_millis(self.settlement_latency_ms)
    }

    pub fn login_policy(&self) -> LoginPolicy {
        LoginPolicy::new(self.admin_email.clone())
    }

    /// Open the configured durable store.
    pub fn open_store(&self) -> Result<Arc<dyn KvStore>> {
        match &self.storage {
            StorageConfig::Memory => Ok(Arc::new(MemoryStore::new())),
            StorageConfig::File { path } => {
                let store = FileStore::open(path)
                    .with_context(|| format!("Failed to open store at {}", path.display()))?;
                Ok(Arc::new(store))
            }
        }
    }
}

/// Durable storage backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StorageConfig {
    /// Nothing survives a restart.
    #[default]
    Memory,
    /// One JSON file per record under `path`.
    File { path: PathBuf },
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Human,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directives used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "terroa=info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}
