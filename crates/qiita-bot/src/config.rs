//! Application configuration loaded from environment variables.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// LINE channel credentials (required)
    pub line: LineConfig,

    /// Qiita API configuration
    #[serde(default)]
    pub qiita: QiitaConfig,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Bot configuration
    #[serde(default)]
    pub bot: BotConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LineConfig {
    /// Channel secret used to verify webhook signatures
    pub channel_secret: String,

    /// Channel access token for the reply API
    pub channel_access_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QiitaConfig {
    /// Optional personal access token; raises the remote rate limit
    #[serde(default)]
    pub access_token: Option<String>,

    /// API base URL
    #[serde(default = "default_qiita_url")]
    pub base_url: String,

    /// Request timeout
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for QiitaConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            base_url: default_qiita_url(),
            timeout: default_timeout(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_qiita_url() -> String {
    "https://qiita.com".into()
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Nested keys use a double-underscore separator, e.g.
    /// `LINE__CHANNEL_SECRET`, `QIITA__ACCESS_TOKEN`, `SERVER__PORT`.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    // Tokens must stay strings even when they look numeric.
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
