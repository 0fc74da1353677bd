use crate::error::{AgroError, Result};
use crate::models::Shop;
use dialoguer::{Input, Password};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const APP_DIR: &str = "agroadvisor";
const API_KEY_ENV: &str = "OPENWEATHERMAP_API_KEY";

/// New Delhi, used when a weather request carries no coordinates
pub const DEFAULT_LATITUDE: f64 = 28.6139;
pub const DEFAULT_LONGITUDE: f64 = 77.2090;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub openweathermap: Option<OpenWeatherMapConfig>,
    /// Input supplier directory served by the nearby-shops endpoint
    #[serde(default)]
    pub shops: Vec<Shop>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

fn default_bind() -> String {
    "0.0.0.0:3000".into()
}

fn default_body_limit() -> usize {
    1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

#[derive(Clone, Deserialize, Serialize)]
pub struct OpenWeatherMapConfig {
    pub api_key: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_latitude")]
    pub default_latitude: f64,
    #[serde(default = "default_longitude")]
    pub default_longitude: f64,
    /// API root; overridden for a local mirror or stub server
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

pub const OWM_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

fn default_base_url() -> String {
    OWM_BASE_URL.to_string()
}

fn default_enabled() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_latitude() -> f64 {
    DEFAULT_LATITUDE
}

fn default_longitude() -> f64 {
    DEFAULT_LONGITUDE
}

impl std::fmt::Debug for OpenWeatherMapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapConfig")
            .field("api_key", &"[REDACTED]")
            .field("enabled", &self.enabled)
            .field("timeout_secs", &self.timeout_secs)
            .field("default_latitude", &self.default_latitude)
            .field("default_longitude", &self.default_longitude)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl OpenWeatherMapConfig {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            enabled: default_enabled(),
            timeout_secs: default_timeout_secs(),
            default_latitude: DEFAULT_LATITUDE,
            default_longitude: DEFAULT_LONGITUDE,
            base_url: default_base_url(),
        }
    }

    /// An unset `${VAR}` placeholder survives substitution verbatim, so it
    /// counts as no key at all.
    pub fn is_usable(&self) -> bool {
        self.enabled && !self.api_key.trim().is_empty() && !self.api_key.contains("${")
    }
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(AgroError::Config(format!(
                "Config file not found at {:?}. Run `agroadvisor init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| AgroError::Config(format!("Failed to read config: {}", e)))?;

        let mut config = Self::parse(&config_str)?;
        config.apply_env();
        tracing::debug!("Loaded config from {}", config_path.display());
        Ok(config)
    }

    /// Load the config file if there is one, otherwise fall back to defaults.
    /// The service stays usable without any config: weather is served from
    /// sample data and the shop directory is empty.
    pub fn load_or_default(config_override: Option<PathBuf>) -> Result<Self> {
        if Self::exists(config_override.as_ref()) {
            return Self::load(config_override);
        }
        if let Some(path) = &config_override {
            return Err(AgroError::Config(format!(
                "Config file not found at {:?}",
                path
            )));
        }

        tracing::warn!("No config file found, using defaults. Run `agroadvisor init` to create one.");
        let mut config = Config::default();
        config.apply_env();
        Ok(config)
    }

    /// Parse YAML config text, substituting `${VAR}` placeholders first
    pub fn parse(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AgroError::Config(format!("Failed to parse config: {}", e)))
    }

    /// A bare OPENWEATHERMAP_API_KEY enables the weather service even
    /// without an `openweathermap:` section.
    fn apply_env(&mut self) {
        if self.openweathermap.is_some() {
            return;
        }
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.openweathermap = Some(OpenWeatherMapConfig::with_api_key(key));
            }
        }
    }

    /// Usable weather settings, if any
    pub fn weather(&self) -> Option<&OpenWeatherMapConfig> {
        self.openweathermap.as_ref().filter(|owm| owm.is_usable())
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join(APP_DIR).join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        Self::default_config_path()
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/agroadvisor/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AgroError::Config("Cannot determine config directory".into()))?
            .join(APP_DIR);
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        let input_err = |e: dialoguer::Error| AgroError::Config(format!("Input error: {}", e));

        println!();
        println!("Let's set up AgroAdvisor!");
        println!();

        println!("Server");
        let bind: String = Input::new()
            .with_prompt("  Listen address")
            .default(default_bind())
            .interact_text()
            .map_err(input_err)?;

        println!();

        println!("OpenWeatherMap (leave API key blank to serve sample weather)");
        let owm_api_key: String = Password::new()
            .with_prompt("  API key")
            .allow_empty_password(true)
            .interact()
            .map_err(input_err)?;

        let openweathermap = if owm_api_key.is_empty() {
            None
        } else {
            let default_latitude: f64 = Input::new()
                .with_prompt("  Default latitude")
                .default(DEFAULT_LATITUDE)
                .interact_text()
                .map_err(input_err)?;

            let default_longitude: f64 = Input::new()
                .with_prompt("  Default longitude")
                .default(DEFAULT_LONGITUDE)
                .interact_text()
                .map_err(input_err)?;

            Some(OpenWeatherMapConfig {
                default_latitude,
                default_longitude,
                ..OpenWeatherMapConfig::with_api_key(owm_api_key)
            })
        };

        println!();

        let config = Config {
            server: ServerConfig {
                bind,
                ..ServerConfig::default()
            },
            openweathermap,
            shops: Vec::new(),
        };

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| AgroError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# AgroAdvisor Configuration\n# Generated by `agroadvisor init`\n# Environment variable substitution (${{VAR}}) is supported.\n# Add input suppliers under `shops:` (see config/config.yaml.example).\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        let mut result = content.to_string();

        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| AgroError::Config(format!("Invalid substitution pattern: {}", e)))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        Ok(result)
    }
}
