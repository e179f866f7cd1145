use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::product::ProductId;
use super::webhook::WebhookTarget;

/// Environment variable that overrides the default config location
pub const CONFIG_ENV_VAR: &str = "YS_MONITOR_CONFIG";

pub const DEFAULT_API_BASE_URL: &str = "https://www.yeezysupply.com/api";
pub const DEFAULT_SITE_URL: &str = "https://www.yeezysupply.com";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/81.0.4044.113 Safari/537.36";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Full webhook URL, e.g. https://discord.com/api/webhooks/<id>/<token>
    pub webhook: String,
    /// Products to monitor, one task each, labelled by position
    pub skus: Vec<ProductId>,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_site_url")]
    pub site_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub intervals: PollIntervals,
}

/// Sleep between polling cycles, per outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollIntervals {
    /// After a failed request or unreadable response
    pub error_secs: u64,
    /// After the product page reports no stock loaded yet
    pub not_loaded_secs: u64,
    /// After an unchanged snapshot or a notification
    pub standard_secs: u64,
}

impl Default for PollIntervals {
    fn default() -> Self {
        Self {
            error_secs: 10,
            not_loaded_secs: 60,
            standard_secs: 30,
        }
    }
}

impl PollIntervals {
    pub fn error(&self) -> Duration {
        Duration::from_secs(self.error_secs)
    }

    pub fn not_loaded(&self) -> Duration {
        Duration::from_secs(self.not_loaded_secs)
    }

    pub fn standard(&self) -> Duration {
        Duration::from_secs(self.standard_secs)
    }

    /// Every interval must be non-zero or a failing task would spin.
    pub fn validate(&self) -> Result<()> {
        let named = [
            ("error_secs", self.error_secs),
            ("not_loaded_secs", self.not_loaded_secs),
            ("standard_secs", self.standard_secs),
        ];

        for (name, secs) in named {
            if secs == 0 {
                anyhow::bail!("intervals.{} must be at least 1", name);
            }
        }

        Ok(())
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_site_url() -> String {
    DEFAULT_SITE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    15
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Config {
    pub fn new(webhook: String, skus: Vec<ProductId>) -> Self {
        Self {
            webhook,
            skus,
            api_base_url: default_api_base_url(),
            site_url: default_site_url(),
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
            intervals: PollIntervals::default(),
        }
    }

    /// Load the config from an explicit path, or from the resolved default location.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::get_config_path()?,
        };

        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        let data = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let config: Config = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

        config.validate()?;

        Ok(config)
    }

    pub fn save(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let data = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, data)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        Ok(())
    }

    /// Config file location: `$YS_MONITOR_CONFIG`, else the per-user config directory.
    pub fn get_config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Ok(PathBuf::from(path));
        }

        let config_dir =
            dirs::config_dir().with_context(|| "Could not determine config directory")?;

        Ok(config_dir.join("ys-monitor").join("config.json"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.skus.is_empty() {
            anyhow::bail!("No skus configured; add at least one product to monitor");
        }

        if self.skus.iter().any(|sku| sku.as_str().trim().is_empty()) {
            anyhow::bail!("Config contains an empty sku");
        }

        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be at least 1");
        }

        self.intervals.validate()?;
        self.webhook_target()?;

        Ok(())
    }

    pub fn webhook_target(&self) -> Result<WebhookTarget> {
        WebhookTarget::parse(&self.webhook).context("Invalid webhook URL in config")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
