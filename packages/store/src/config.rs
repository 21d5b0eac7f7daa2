//! # Startup configuration
//!
//! The client needs four values before it can do anything: the identity
//! provider's region, user-pool id and app-client id, and the base URL of the
//! todo resource. On the web they are baked into the bundle at build time
//! (see [`AppConfig::from_build_env`]), either one variable per value or as a
//! whole TOML document in `TODO_CONFIG_TOML`:
//!
//! ```toml
//! region = "us-east-1"
//! user_pool_id = "us-east-1_AbCdEf"
//! client_id = "1h2j3k4l5m6n7o8p"
//! api_url = "https://abc123.execute-api.us-east-1.amazonaws.com/prod/todos"
//! ```
//!
//! A single variable overrides the same key from the TOML document. A missing
//! or blank value is a [`ConfigError::Missing`] listing every absent key, so
//! the user sees the whole problem at once.

use serde::Deserialize;
use thiserror::Error;

pub const ENV_REGION: &str = "TODO_AWS_REGION";
pub const ENV_USER_POOL_ID: &str = "TODO_USER_POOL_ID";
pub const ENV_CLIENT_ID: &str = "TODO_USER_POOL_CLIENT_ID";
pub const ENV_API_URL: &str = "TODO_API_URL";
pub const ENV_CONFIG_TOML: &str = "TODO_CONFIG_TOML";

/// Errors raised while assembling the startup configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing configuration values: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
    #[error("invalid configuration: {0}")]
    Parse(String),
}

/// Validated startup configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub region: String,
    pub user_pool_id: String,
    pub client_id: String,
    /// Base URL of the todo resource, without trailing slash.
    pub api_url: String,
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    region: Option<String>,
    user_pool_id: Option<String>,
    client_id: Option<String>,
    api_url: Option<String>,
}

impl RawConfig {
    fn from_toml(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Fill every value missing here from `fallback`.
    fn or(self, fallback: RawConfig) -> Self {
        let present = |v: Option<String>| v.filter(|v| !v.trim().is_empty());
        Self {
            region: present(self.region).or(fallback.region),
            user_pool_id: present(self.user_pool_id).or(fallback.user_pool_id),
            client_id: present(self.client_id).or(fallback.client_id),
            api_url: present(self.api_url).or(fallback.api_url),
        }
    }

    fn validate(self) -> Result<AppConfig, ConfigError> {
        let mut missing = Vec::new();
        let mut take = |value: Option<String>, key: &'static str| {
            let value = value.map(|v| v.trim().to_string()).unwrap_or_default();
            if value.is_empty() {
                missing.push(key);
            }
            value
        };
        let region = take(self.region, ENV_REGION);
        let user_pool_id = take(self.user_pool_id, ENV_USER_POOL_ID);
        let client_id = take(self.client_id, ENV_CLIENT_ID);
        let api_url = take(self.api_url, ENV_API_URL);

        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }
        Ok(AppConfig {
            region,
            user_pool_id,
            client_id,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }
}

impl AppConfig {
    /// Build the config from a key lookup (keys are the `ENV_*` constants).
    ///
    /// A TOML document under [`ENV_CONFIG_TOML`] supplies any value the
    /// individual keys leave out.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let single = RawConfig {
            region: lookup(ENV_REGION),
            user_pool_id: lookup(ENV_USER_POOL_ID),
            client_id: lookup(ENV_CLIENT_ID),
            api_url: lookup(ENV_API_URL),
        };
        let document = match lookup(ENV_CONFIG_TOML) {
            Some(doc) => RawConfig::from_toml(&doc)?,
            None => RawConfig::default(),
        };
        single.or(document).validate()
    }

    /// Read the values captured from the environment when the bundle was compiled.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| {
            let value = match key {
                ENV_REGION => option_env!("TODO_AWS_REGION"),
                ENV_USER_POOL_ID => option_env!("TODO_USER_POOL_ID"),
                ENV_CLIENT_ID => option_env!("TODO_USER_POOL_CLIENT_ID"),
                ENV_API_URL => option_env!("TODO_API_URL"),
                ENV_CONFIG_TOML => option_env!("TODO_CONFIG_TOML"),
                _ => None,
            };
            value.map(str::to_string)
        })
    }
}
