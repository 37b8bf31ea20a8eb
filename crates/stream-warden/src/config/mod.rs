use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;
use uuid::Uuid;

pub mod defaults;

use defaults::*;

/// Application-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Public base URL; restream output URLs are derived from it
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Owner identity stamped onto auto-discovered records
    #[serde(default = "default_owner_id")]
    pub owner_id: Uuid,
}

/// Database connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// Autonomous lifecycle settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoConfig {
    /// Whether `discover` may insert new streams
    #[serde(default)]
    pub discover_enabled: bool,
    /// Whether a failed probe inside `check` triggers an immediate restart
    #[serde(default)]
    pub restart_enabled: bool,
    /// Interval hint for the external scheduler; not acted on in-process
    #[serde(default = "default_check_interval_seconds")]
    pub check_interval_seconds: u64,
    /// Hard cap on registry size enforced during discovery
    #[serde(default = "default_max_streams")]
    pub max_streams: u64,
    /// Playlist URLs scanned by `discover`
    #[serde(default)]
    pub playlist_urls: Vec<String>,
    /// Country allow-list; empty means no restriction
    #[serde(default = "default_countries")]
    pub countries: Vec<String>,
    /// Category allow-list; empty means no restriction
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
    /// Country code assigned when detection finds nothing
    #[serde(default = "default_country")]
    pub default_country: String,
    #[serde(default = "default_probe_timeout_seconds")]
    pub probe_timeout_seconds: u64,
    /// Concurrent probe cap for `check` and `update`
    #[serde(default = "default_probe_concurrency")]
    pub probe_concurrency: usize,
    /// Optional JSONL file receiving one line per probe
    #[serde(default)]
    pub check_log_path: Option<PathBuf>,
}

/// Outbound alert settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertConfig {
    #[serde(default)]
    pub telegram_bot_token: Option<String>,
    #[serde(default)]
    pub telegram_chat_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auto: AutoConfig,
    #[serde(default)]
    pub alerts: AlertConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            owner_id: default_owner_id(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
        }
    }
}

impl Default for AutoConfig {
    fn default() -> Self {
        Self {
            discover_enabled: false,
            restart_enabled: false,
            check_interval_seconds: default_check_interval_seconds(),
            max_streams: default_max_streams(),
            playlist_urls: Vec::new(),
            countries: default_countries(),
            categories: default_categories(),
            default_country: default_country(),
            probe_timeout_seconds: default_probe_timeout_seconds(),
            probe_concurrency: default_probe_concurrency(),
            check_log_path: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app: AppConfig::default(),
            database: DatabaseConfig::default(),
            auto: AutoConfig::default(),
            alerts: AlertConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_file =
            std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_from_file(&config_file)
    }

    pub fn load_from_file(config_file: &str) -> Result<Self> {
        if std::path::Path::new(&config_file).exists() {
            let contents = std::fs::read_to_string(config_file)?;
            Ok(toml::from_str(&contents)?)
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config)?;
            std::fs::write(config_file, contents)?;
            info!("Created default config file: {}", config_file);
            Ok(default_config)
        }
    }
}
