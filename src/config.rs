//! Configuration module

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Duration;
use serde::Deserialize;
use thiserror::Error;

use crate::constants;
use crate::logic::directory::AuthParams;

/// Relay configuration, read from `triage_bot.json`
#[derive(Clone, Deserialize)]
pub struct Config {
    /// AWS region hosting the dispatch Lambda
    pub aws_region: String,

    pub aws_access_key_id: String,

    pub aws_secret_access_key: String,

    /// OAuth client id for the Person API
    pub person_api_client_id: String,

    pub person_api_client_secret: String,

    /// Name (or ARN) of the Lambda that notifies users
    pub aws_lambda_function: String,

    #[serde(default = "default_oauth_url")]
    pub oauth_url: String,

    #[serde(default = "default_person_api_base")]
    pub person_api_base: String,

    #[serde(default)]
    pub person_api_audience: String,

    #[serde(default)]
    pub person_api_scope: String,

    #[serde(default)]
    pub person_api_grants: String,

    /// Token refresh window in hours
    #[serde(default = "default_token_validity_hours")]
    pub token_validity_hours: i64,
}

fn default_oauth_url() -> String {
    constants::DEFAULT_OAUTH_URL.to_string()
}

fn default_person_api_base() -> String {
    constants::DEFAULT_PERSON_API_BASE.to_string()
}

fn default_token_validity_hours() -> i64 {
    constants::TOKEN_VALIDITY_WINDOW_HOURS
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Parse and validate configuration from a JSON document
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the path in `TRIAGE_CONFIG` (or the default file),
    /// then apply endpoint overrides from the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut config = Self::load(constants::get_config_path())?;

        if let Some(url) = constants::get_oauth_url_override() {
            config.oauth_url = url;
        }
        if let Some(base) = constants::get_person_api_base_override() {
            config.person_api_base = base;
        }

        Ok(config)
    }

    /// Credentials used to obtain a Person API access token
    pub fn auth_params(&self) -> AuthParams {
        AuthParams {
            client_id: self.person_api_client_id.clone(),
            client_secret: self.person_api_client_secret.clone(),
            audience: self.person_api_audience.clone(),
            scope: self.person_api_scope.clone(),
            grants: self.person_api_grants.clone(),
        }
    }

    /// Token validity window, clamped to the accepted range
    pub fn token_validity(&self) -> Duration {
        Duration::hours(
            self.token_validity_hours
                .clamp(1, constants::MAX_TOKEN_VALIDITY_HOURS),
        )
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("aws_region", &self.aws_region),
            ("aws_access_key_id", &self.aws_access_key_id),
            ("aws_secret_access_key", &self.aws_secret_access_key),
            ("person_api_client_id", &self.person_api_client_id),
            ("person_api_client_secret", &self.person_api_client_secret),
            ("aws_lambda_function", &self.aws_lambda_function),
        ];

        if let Some((key, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!("{} must not be empty", key)));
        }

        if self.token_validity_hours <= 0 {
            return Err(ConfigError::Invalid(
                "token_validity_hours must be positive".to_string(),
            ));
        }

        if self.token_validity_hours > constants::MAX_TOKEN_VALIDITY_HOURS {
            return Err(ConfigError::Invalid(format!(
                "token_validity_hours must not exceed {}",
                constants::MAX_TOKEN_VALIDITY_HOURS
            )));
        }

        Ok(())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("aws_region", &self.aws_region)
            .field("aws_access_key_id", &self.aws_access_key_id)
            .field("aws_secret_access_key", &"***")
            .field("person_api_client_id", &self.person_api_client_id)
            .field("person_api_client_secret", &"***")
            .field("aws_lambda_function", &self.aws_lambda_function)
            .field("oauth_url", &self.oauth_url)
            .field("person_api_base", &self.person_api_base)
            .field("token_validity_hours", &self.token_validity_hours)
            .finish()
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config::from_json(
        r#"{
            "aws_region": "us-west-2",
            "aws_access_key_id": "AKIDEXAMPLE",
            "aws_secret_access_key": "secret",
            "person_api_client_id": "client",
            "person_api_client_secret": "client-secret",
            "aws_lambda_function": "triage-bot"
        }"#,
    )
    .unwrap()
}
