use serde::Deserialize;
use std::env;

use crate::error::{NutriError, Result};

pub const DEFAULT_USDA_BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";
pub const DEFAULT_RECOGNITION_SERVICE_URL: &str = "http://localhost:8000";

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

/// Reads an optional string variable, treating blank values as unset.
fn env_non_empty(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub recognition: RecognitionConfig,
    pub nutrition: NutritionConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Maximum accepted upload size in bytes.
    pub max_upload_size: usize,
}

/// Recognition (vision model) collaborator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RecognitionConfig {
    /// `<provider>/<model>`, e.g. `service/internvl3-2b` or `openai/gpt-4o-mini`
    pub model: String,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

/// USDA FoodData Central configuration
#[derive(Debug, Clone, Deserialize)]
pub struct NutritionConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
    pub page_size: u32,
    // Estimate-only mode: no remote lookups, no credential required
    pub offline: bool,
    // Lookup cache capacity, 0 disables caching
    pub cache_size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            model: "service/internvl3-2b".to_string(),
            base_url: None,
            api_key: None,
            timeout_secs: 60,
        }
    }
}

impl Default for NutritionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_USDA_BASE_URL.to_string(),
            timeout_secs: 10,
            page_size: 5,
            offline: false,
            cache_size: 256,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("NUTRISCAN_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("NUTRISCAN_PORT", 8001),
                max_upload_size: parse_env_or("MAX_UPLOAD_SIZE", 20 * 1024 * 1024),
            },
            recognition: RecognitionConfig {
                model: env::var("RECOGNITION_MODEL")
                    .unwrap_or_else(|_| "service/internvl3-2b".to_string()),
                base_url: env_non_empty("RECOGNITION_BASE_URL"),
                api_key: env_non_empty("RECOGNITION_API_KEY"),
                timeout_secs: parse_env_or("RECOGNITION_TIMEOUT", 60),
            },
            nutrition: NutritionConfig {
                api_key: env_non_empty("USDA_API_KEY"),
                base_url: env::var("USDA_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_USDA_BASE_URL.to_string()),
                timeout_secs: parse_env_or("USDA_TIMEOUT", 10),
                page_size: parse_env_or("USDA_PAGE_SIZE", 5),
                offline: parse_env_or("NUTRITION_OFFLINE", false),
                cache_size: parse_env_or("NUTRITION_CACHE_SIZE", 256),
            },
            logging: LoggingConfig {
                format: parse_env_or("LOG_FORMAT", LogFormat::Text),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Startup validation. Anything reported here is fatal.
    pub fn validate(&self) -> Result<()> {
        if !self.nutrition.offline && self.nutrition.api_key.is_none() {
            return Err(NutriError::Config(
                "USDA_API_KEY is required (set NUTRITION_OFFLINE=true to run on local estimates only)"
                    .to_string(),
            ));
        }

        if self.nutrition.page_size == 0 || self.nutrition.page_size > 200 {
            return Err(NutriError::Config(format!(
                "USDA_PAGE_SIZE must be between 1 and 200, got {}",
                self.nutrition.page_size
            )));
        }

        if self.recognition.timeout_secs == 0 || self.nutrition.timeout_secs == 0 {
            return Err(NutriError::Config(
                "Timeouts must be at least one second".to_string(),
            ));
        }

        if self.server.max_upload_size == 0 {
            return Err(NutriError::Config(
                "MAX_UPLOAD_SIZE must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Known recognition providers
pub const KNOWN_RECOGNITION_PROVIDERS: &[&str] = &["service", "openai"];

/// Parse a recognition model name into (provider, model) tuple.
pub fn parse_recognition_provider_model(model: &str) -> (&str, &str) {
    if let Some((prefix, rest)) = model.split_once('/') {
        let prefix_lower = prefix.to_lowercase();
        if KNOWN_RECOGNITION_PROVIDERS.contains(&prefix_lower.as_str()) {
            return (prefix, rest);
        }
    }
    // Bare names are served by the local recognition service
    ("service", model)
}
