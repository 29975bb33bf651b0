use super::country::Country;
use super::currency::is_valid_rate;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};
use tracing::debug;

pub const PHONE_NUMBER_ENV: &str = "WHATSAPP_PHONE_NUMBER";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GeoProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RatesProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    #[serde(default = "default_geo")]
    pub geo: GeoProviderConfig,
    #[serde(default = "default_rates")]
    pub rates: RatesProviderConfig,
}

fn default_geo() -> GeoProviderConfig {
    GeoProviderConfig {
        base_url: "https://ipapi.co".to_string(),
    }
}

fn default_rates() -> RatesProviderConfig {
    RatesProviderConfig {
        base_url: "https://open.er-api.com".to_string(),
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            geo: default_geo(),
            rates: default_rates(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WhatsAppConfig {
    #[serde(default)]
    pub phone_number: String,
    #[serde(default = "default_store_name")]
    pub store_name: String,
}

fn default_store_name() -> String {
    "MILO".to_string()
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        WhatsAppConfig {
            phone_number: String::new(),
            store_name: default_store_name(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_country")]
    pub base_country: Country,
    #[serde(default = "default_country")]
    pub fallback_country: Country,
    /// Guaraníes per peso, used in whichever direction `base_country` needs.
    #[serde(default = "default_fallback_rate")]
    pub fallback_rate: f64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_rate_cache_ttl_secs")]
    pub rate_cache_ttl_secs: u64,
    #[serde(default)]
    pub data_path: Option<String>,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub whatsapp: WhatsAppConfig,
}

fn default_country() -> Country {
    Country::Argentina
}

fn default_fallback_rate() -> f64 {
    1000.0
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_rate_cache_ttl_secs() -> u64 {
    3600
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            base_country: default_country(),
            fallback_country: default_country(),
            fallback_rate: default_fallback_rate(),
            request_timeout_secs: default_request_timeout_secs(),
            rate_cache_ttl_secs: default_rate_cache_ttl_secs(),
            data_path: None,
            providers: ProvidersConfig::default(),
            whatsapp: WhatsAppConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, or built-in defaults if no file exists yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default().with_env_overrides());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("co", "milowear", "vitrina")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("co", "milowear", "vitrina")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config.with_env_overrides())
    }

    pub fn validate(&self) -> Result<()> {
        if !is_valid_rate(self.fallback_rate) {
            anyhow::bail!(
                "fallback_rate must be a positive number, got {}",
                self.fallback_rate
            );
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be at least 1");
        }
        Ok(())
    }

    /// Fallback rate from `base_country` to the other market.
    pub fn fallback_rate_from_base(&self) -> f64 {
        match self.base_country {
            Country::Argentina => self.fallback_rate,
            Country::Paraguay => 1.0 / self.fallback_rate,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn rate_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.rate_cache_ttl_secs)
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(phone) = std::env::var(PHONE_NUMBER_ENV) {
            if !phone.trim().is_empty() {
                debug!("Using WhatsApp phone number from {}", PHONE_NUMBER_ENV);
                self.whatsapp.phone_number = phone;
            }
        }
        self
    }
}
