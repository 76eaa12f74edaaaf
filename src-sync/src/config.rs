//! Service configuration.
//!
//! Read from a JSON file in the shape of an Amplify configuration, then patched
//! from the environment.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const ENV_ENDPOINT: &str = "TODO_GRAPHQL_ENDPOINT";
pub const ENV_API_KEY: &str = "TODO_API_KEY";
pub const ENV_AUTH_TOKEN: &str = "TODO_AUTH_TOKEN";
pub const ENV_USER_EMAIL: &str = "TODO_USER_EMAIL";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How requests authenticate against the GraphQL endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AuthMode {
    /// `x-api-key` header
    #[default]
    #[serde(rename = "API_KEY")]
    ApiKey,
    /// `Authorization` header carrying a user-pool token
    #[serde(rename = "AMAZON_COGNITO_USER_POOLS")]
    UserPool,
}

impl AuthMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMode::ApiKey => "API_KEY",
            AuthMode::UserPool => "AMAZON_COGNITO_USER_POOLS",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(rename = "aws_appsync_graphqlEndpoint", default)]
    pub endpoint: String,
    #[serde(rename = "aws_appsync_authenticationType", default)]
    pub auth_mode: AuthMode,
    #[serde(rename = "aws_appsync_apiKey", default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    /// Shown in the welcome line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            auth_mode: AuthMode::default(),
            api_key: None,
            auth_token: None,
            user_email: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ServiceConfig {
    /// Load config from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        tracing::info!(path = %path.display(), "Loaded service config");
        Ok(config)
    }

    /// Load from `path` when it exists, defaults otherwise, then apply env overrides.
    pub fn from_file_and_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            Self::load(path)?
        } else {
            tracing::info!(path = %path.display(), "No config file found, using environment only");
            Self::default()
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Patch fields from a key lookup (normally the process environment).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup(ENV_ENDPOINT) {
            self.endpoint = endpoint;
        }
        if let Some(key) = lookup(ENV_API_KEY) {
            self.api_key = Some(key);
        }
        if let Some(token) = lookup(ENV_AUTH_TOKEN) {
            self.auth_token = Some(token);
            if self.api_key.is_none() {
                self.auth_mode = AuthMode::UserPool;
            }
        }
        if let Some(email) = lookup(ENV_USER_EMAIL) {
            self.user_email = Some(email);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::MissingEndpoint);
        }
        let credential = match self.auth_mode {
            AuthMode::ApiKey => &self.api_key,
            AuthMode::UserPool => &self.auth_token,
        };
        match credential {
            Some(value) if !value.is_empty() => Ok(()),
            _ => Err(ConfigError::MissingCredentials(self.auth_mode.as_str())),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
