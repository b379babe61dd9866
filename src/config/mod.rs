//! Configuration management
//!
//! This module handles loading and parsing configuration for the bursary
//! client. Configuration can be loaded from:
//! - config.yml file
//! - Environment variables (override file settings)
//!
//! Missing optional values are filled with sensible defaults. A missing API
//! base URL or payment key is legal at startup: the flows that need them
//! fail with a user-visible error instead of aborting the process.

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend API configuration
    #[serde(default)]
    pub api: ApiConfig,
    /// External identity provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Payment provider configuration
    #[serde(default)]
    pub payment: PaymentConfig,
    /// Listing configuration
    #[serde(default)]
    pub listing: ListingConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend REST API
    #[serde(default)]
    pub base_url: Option<String>,
}

/// External identity provider configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the provider's account REST endpoint
    #[serde(default)]
    pub base_url: Option<String>,
    /// Public API key issued by the provider
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Payment provider configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentConfig {
    /// Publishable key for the hosted payment provider
    #[serde(default)]
    pub public_key: Option<String>,
}

/// Listing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Number of items requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

fn default_page_size() -> u32 {
    9
}

/// Error type for configuration parsing
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },
}

impl Config {
    /// Load configuration from file.
    ///
    /// If the file doesn't exist or is empty, returns default configuration.
    /// If the file exists but is invalid YAML, returns an error with details.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: format_yaml_error(&e),
        })?;

        Ok(config)
    }

    /// Load configuration from file with environment variable overrides.
    ///
    /// Environment variables follow the pattern:
    /// - BURSARY_API_URL
    /// - BURSARY_PROVIDER_URL
    /// - BURSARY_PROVIDER_KEY
    /// - BURSARY_PAYMENT_KEY
    /// - BURSARY_PAGE_SIZE
    pub fn load_with_env(path: &std::path::Path) -> anyhow::Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("BURSARY_API_URL") {
            self.api.base_url = Some(url);
        }
        if let Ok(url) = std::env::var("BURSARY_PROVIDER_URL") {
            self.provider.base_url = Some(url);
        }
        if let Ok(key) = std::env::var("BURSARY_PROVIDER_KEY") {
            self.provider.api_key = Some(key);
        }
        if let Ok(key) = std::env::var("BURSARY_PAYMENT_KEY") {
            self.payment.public_key = Some(key);
        }
        if let Ok(size) = std::env::var("BURSARY_PAGE_SIZE") {
            if let Ok(size) = size.parse::<u32>() {
                if size > 0 {
                    self.listing.page_size = size;
                }
            }
        }
    }
}

/// Format YAML parsing error with location and context
fn format_yaml_error(e: &serde_yaml::Error) -> String {
    if let Some(location) = e.location() {
        format!(
            "at line {}, column {}: {}",
            location.line(),
            location.column(),
            e
        )
    } else {
        e.to_string()
    }
}
