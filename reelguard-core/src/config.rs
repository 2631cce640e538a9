//! reelguard configuration loading
//!
//! Loads configuration from `~/.config/reelguard/reelguard.toml` (or the
//! `REELGUARD_CONFIG` env override). Missing file means defaults; every
//! field has a default so a partial file is fine.

use serde::Deserialize;
use std::path::PathBuf;

use crate::errors::{ReelguardError, Result};
use crate::sensitivity::SensitivityLevel;

/// Root configuration for the reelguard service
#[derive(Debug, Deserialize, Clone)]
pub struct ReelguardConfig {
    /// Address the HTTP service binds to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Number of request worker threads
    #[serde(default = "default_worker_threads")]
    pub worker_threads: usize,

    /// Path to the sensitivity store database
    #[serde(default = "default_db_path")]
    pub db_path: String,

    /// Maximum sensitivity level retained by the list endpoint (0..=3)
    #[serde(default)]
    pub sensitivity_threshold: i64,

    /// Upstream catalog settings
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Content-advisory source settings
    #[serde(default)]
    pub advisory: AdvisoryConfig,
}

fn default_bind_addr() -> String {
    "127.0.0.1:8300".to_string()
}

fn default_worker_threads() -> usize {
    4
}

fn default_db_path() -> String {
    dirs::data_local_dir()
        .map(|d| {
            d.join("reelguard")
                .join("sensitivity-cache.db")
                .to_string_lossy()
                .into_owned()
        })
        .unwrap_or_else(|| "sensitivity-cache.db".to_string())
}

/// Upstream catalog configuration
#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    /// Base URL every proxied path is appended to
    #[serde(default = "default_upstream_base_url")]
    pub base_url: String,

    /// User-Agent sent on upstream requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Connect-level retry attempts on the passthrough path
    #[serde(default = "default_connect_retries")]
    pub connect_retries: usize,

    /// Initial backoff between retries, in seconds
    #[serde(default = "default_backoff_factor_secs")]
    pub backoff_factor_secs: f64,

    /// Request timeout, in seconds
    #[serde(default = "default_upstream_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_upstream_base_url() -> String {
    "https://shows.cf".to_string()
}

fn default_user_agent() -> String {
    "Popcorn Time NodeJS".to_string()
}

fn default_connect_retries() -> usize {
    3
}

fn default_backoff_factor_secs() -> f64 {
    0.5
}

fn default_upstream_timeout_secs() -> u64 {
    30
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_upstream_base_url(),
            user_agent: default_user_agent(),
            connect_retries: default_connect_retries(),
            backoff_factor_secs: default_backoff_factor_secs(),
            timeout_secs: default_upstream_timeout_secs(),
        }
    }
}

/// Content-advisory source configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AdvisoryConfig {
    /// Base URL of the advisory host; pages live at
    /// `{base_url}/title/{id}/parentalguide`
    #[serde(default = "default_advisory_base_url")]
    pub base_url: String,

    /// Advisory fetch timeout, in seconds (single attempt, no retries)
    #[serde(default = "default_advisory_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_advisory_base_url() -> String {
    "https://www.imdb.com".to_string()
}

fn default_advisory_timeout_secs() -> u64 {
    10
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            base_url: default_advisory_base_url(),
            timeout_secs: default_advisory_timeout_secs(),
        }
    }
}

impl Default for ReelguardConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            worker_threads: default_worker_threads(),
            db_path: default_db_path(),
            sensitivity_threshold: 0,
            upstream: UpstreamConfig::default(),
            advisory: AdvisoryConfig::default(),
        }
    }
}

impl ReelguardConfig {
    /// Environment variable for config path override
    pub const ENV_CONFIG_PATH: &'static str = "REELGUARD_CONFIG";

    /// Default config filename
    pub const DEFAULT_CONFIG_FILENAME: &'static str = "reelguard.toml";

    /// Load configuration from file
    ///
    /// Resolution order:
    /// 1. `REELGUARD_CONFIG` environment variable
    /// 2. `~/.config/reelguard/reelguard.toml`
    ///
    /// If the config file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let path = Self::resolve_config_path();

        if !path.exists() {
            tracing::info!(
                path = %path.display(),
                "config not found, using defaults"
            );
            return Ok(Self::default());
        }

        Self::load_from_path(&path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ReelguardError::config_with_source(
                format!("failed to read config at {}", path.display()),
                e,
            )
        })?;

        Self::parse(&contents)
    }

    /// Parse configuration from TOML string
    pub fn parse(contents: &str) -> Result<Self> {
        let cfg: ReelguardConfig = toml::from_str(contents)
            .map_err(|e| ReelguardError::config_with_source("failed to parse config", e))?;

        cfg.validate()?;
        Ok(cfg)
    }

    fn resolve_config_path() -> PathBuf {
        if let Ok(path) = std::env::var(Self::ENV_CONFIG_PATH) {
            return PathBuf::from(path);
        }

        dirs::home_dir()
            .map(|h| {
                h.join(".config")
                    .join("reelguard")
                    .join(Self::DEFAULT_CONFIG_FILENAME)
            })
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_CONFIG_FILENAME))
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if SensitivityLevel::from_i64(self.sensitivity_threshold).is_none() {
            return Err(ReelguardError::config(format!(
                "sensitivity_threshold must be 0..=3, got {}",
                self.sensitivity_threshold
            )));
        }

        if self.worker_threads == 0 {
            return Err(ReelguardError::config("worker_threads must be at least 1"));
        }

        if self.upstream.backoff_factor_secs < 0.0 {
            return Err(ReelguardError::config(
                "upstream.backoff_factor_secs must not be negative",
            ));
        }

        Ok(())
    }

    /// The configured threshold as a typed level.
    pub fn threshold(&self) -> SensitivityLevel {
        // validate() guarantees the range.
        SensitivityLevel::from_i64(self.sensitivity_threshold)
            .unwrap_or(SensitivityLevel::None)
    }

    /// Get the resolved database path (expanding ~ if needed)
    pub fn resolved_db_path(&self) -> PathBuf {
        let path = &self.db_path;
        if let Some(stripped) = path.strip_prefix("~/")
            && let Some(home) = dirs::home_dir()
        {
            return home.join(stripped);
        }
        PathBuf::from(path)
    }
}
