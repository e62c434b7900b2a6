//! Configuration module for PetFriends QA
//!
//! Handles loading and parsing of YAML configuration files with support for
//! environment variable expansion and validation. Credentials never live in
//! the file itself; the expected shape is `${PF_VALID_EMAIL}` placeholders
//! resolved from the environment at load time.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

mod loader;

pub use loader::ConfigLoader;

/// Default deployment probed by the suite
pub const DEFAULT_BASE_URL: &str = "https://petfriends.skillfactory.ru";

/// Validate that a URL starts with http:// or https://
fn is_valid_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// An email/password pair for one remote account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// The two validity classes of credentials the suite needs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Accounts {
    /// A registered account; most scenarios authenticate with it
    pub valid: Credentials,
    /// Credentials the service must reject with 403
    pub invalid: Credentials,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the PetFriends deployment under test
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub accounts: Accounts,
}

impl Config {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        ConfigLoader::load(path)
    }

    /// Build a configuration purely from `PF_*` environment variables
    ///
    /// Used by the live test suite so it can run without a config file.
    /// Fails when the valid account's credentials are not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let require = |var: &str| {
            std::env::var(var).map_err(|_| {
                ConfigError::ValidationError(format!("Environment variable {} is not set", var))
            })
        };

        let config = Self {
            base_url: std::env::var("PF_BASE_URL").unwrap_or_else(|_| default_base_url()),
            accounts: Accounts {
                valid: Credentials {
                    email: require("PF_VALID_EMAIL")?,
                    password: require("PF_VALID_PASSWORD")?,
                },
                invalid: Credentials {
                    email: std::env::var("PF_INVALID_EMAIL")
                        .unwrap_or_else(|_| "nobody@example.invalid".to_string()),
                    password: std::env::var("PF_INVALID_PASSWORD")
                        .unwrap_or_else(|_| "wrong-password".to_string()),
                },
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_http_url(&self.base_url) {
            return Err(ConfigError::ValidationError(
                "Invalid base_url: must start with http:// or https://".into(),
            ));
        }

        if self.accounts.valid.email.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Valid account email cannot be empty".into(),
            ));
        }

        if self.accounts.valid.password.is_empty() {
            return Err(ConfigError::ValidationError(
                "Valid account password cannot be empty".into(),
            ));
        }

        Ok(())
    }
}
