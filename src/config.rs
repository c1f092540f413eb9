use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants;

/// Environment variable that overrides `openfda.api_key`.
pub const OPENFDA_API_KEY_ENV: &str = "OPENFDA_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub openfda: OpenFdaConfig,

    pub pricing: PricingConfig,

    pub drugs: DrugsConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/drug_pricing.db".to_string(),
            log_level: "info".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,

    pub port: u16,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 5000,
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenFdaConfig {
    pub base_url: String,

    /// Optional key; requests are sent without one when empty.
    pub api_key: String,

    /// Request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,

    /// Result count requested when searching for generic alternatives.
    pub alternatives_limit: u32,
}

impl Default for OpenFdaConfig {
    fn default() -> Self {
        Self {
            base_url: constants::openfda::DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            request_timeout_seconds: constants::openfda::REQUEST_TIMEOUT_SECONDS,
            alternatives_limit: constants::alternatives::SEARCH_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Quotes older than this are ignored by the cache (default: 24)
    pub cache_ttl_hours: i64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            cache_ttl_hours: constants::cache::PRICING_TTL_HOURS,
        }
    }
}

/// How a stored drug record is matched against a requested name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameMatch {
    /// Stored name must equal the requested name.
    #[default]
    Exact,

    /// Stored name must contain the requested name. The shortest stored name
    /// wins, then the oldest record.
    Contains,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DrugsConfig {
    pub name_match: NameMatch,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,

    pub loki_enabled: bool,

    pub loki_url: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
            loki_enabled: false,
            loki_url: "http://localhost:3100".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        let mut config = None;
        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                config = Some(Self::load_from_path(path)?);
                break;
            }
        }

        let mut config = config.unwrap_or_else(|| {
            info!("No config file found, using defaults");
            Self::default()
        });
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(OPENFDA_API_KEY_ENV)
            && !key.trim().is_empty()
        {
            self.openfda.api_key = key.trim().to_string();
        }
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("drug-pricing").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".drug-pricing").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.openfda.base_url.trim().is_empty() {
            anyhow::bail!("openFDA base URL cannot be empty");
        }

        if self.openfda.request_timeout_seconds == 0 {
            anyhow::bail!("openFDA request timeout must be > 0");
        }

        if self.pricing.cache_ttl_hours <= 0 {
            anyhow::bail!("Pricing cache TTL must be > 0 hours");
        }

        if self.pricing.cache_ttl_hours > constants::cache::MAX_PRICING_TTL_HOURS {
            anyhow::bail!(
                "Pricing cache TTL must be <= {} hours",
                constants::cache::MAX_PRICING_TTL_HOURS
            );
        }

        if self.server.port == 0 {
            anyhow::bail!("Server port must be > 0");
        }

        Ok(())
    }
}
