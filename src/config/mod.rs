//! # Configuration Management
//!
//! Environment-driven configuration for the connsync bridge. All settings
//! are read once at process start by [`Settings::from_env`], which fails
//! fast: a missing or malformed required variable aborts startup before
//! any rotation event is read.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use url::Url;
use validator::Validate;

use crate::errors::{Error, Result};
use crate::secrets::SecretString;
use crate::services::RetryPolicy;

/// Main application configuration
#[derive(Debug, Clone, Validate)]
pub struct Settings {
    /// What to synchronize: the target connection and the rotated secret
    #[validate(nested)]
    pub sync: SyncSettings,

    /// Secret store client configuration
    pub secret_store: SecretStoreSettings,

    /// Connection registry client configuration
    pub registry: RegistrySettings,

    /// Update retry configuration
    #[validate(nested)]
    pub retry: RetrySettings,
}

/// Synchronization target configuration
#[derive(Debug, Clone, Validate)]
pub struct SyncSettings {
    /// Name of the registry connection to update
    #[validate(length(min = 1, message = "Connection name cannot be empty"))]
    pub connection_name: String,

    /// Identifier of the rotated secret in the store
    #[validate(length(min = 1, message = "Secret id cannot be empty"))]
    pub secret_id: String,

    /// OAuth client-credential parameters pushed alongside the secret
    #[validate(nested)]
    pub oauth: OAuthClientSettings,
}

/// Static OAuth client-credentials parameters
#[derive(Debug, Clone, Validate)]
pub struct OAuthClientSettings {
    /// OAuth client id paired with the rotated secret
    #[validate(length(min = 1, message = "OAuth client id cannot be empty"))]
    pub client_id: String,

    /// Token endpoint the registry exchanges credentials against
    pub authorization_endpoint: Url,

    /// Audience requested in the token exchange
    #[validate(length(min = 1, message = "OAuth audience cannot be empty"))]
    pub audience: String,
}

/// Secret store (secrets-manager agent) client configuration
#[derive(Debug, Clone)]
pub struct SecretStoreSettings {
    /// Base URL of the agent endpoint
    pub endpoint: Url,

    /// Access token the agent expects on every request
    pub token: SecretString,
}

/// Connection registry client configuration
#[derive(Debug, Clone)]
pub struct RegistrySettings {
    /// Base URL of the registry API
    pub endpoint: Url,

    /// Bearer token for the registry API
    pub token: SecretString,
}

/// Update retry configuration
#[derive(Debug, Clone, Validate)]
pub struct RetrySettings {
    /// Total update attempts, including the first
    #[validate(range(min = 1, message = "At least one update attempt is required"))]
    pub max_attempts: u32,

    /// Fixed wait between attempts, in seconds
    pub delay_seconds: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self { max_attempts: 3, delay_seconds: 20 }
    }
}

impl RetrySettings {
    /// Build the retry policy the update executor runs under
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            delay: Duration::from_secs(self.delay_seconds),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Log filter directive, e.g. "info" or "connsync=debug"
    pub log_level: String,

    /// Emit JSON log lines instead of human-readable text
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self { log_level: "info".to_string(), json_logs: true }
    }
}

impl ObservabilityConfig {
    /// Create logging configuration from environment variables
    pub fn from_env() -> Self {
        let log_level =
            env::var("CONNSYNC_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let json_logs = env::var("CONNSYNC_LOG_FORMAT")
            .map(|format| format.eq_ignore_ascii_case("json"))
            .unwrap_or(true);

        Self { log_level, json_logs }
    }
}

impl Settings {
    /// Create configuration from environment variables, validated.
    pub fn from_env() -> Result<Self> {
        let settings = Self {
            sync: SyncSettings {
                connection_name: required_var("CONNSYNC_CONNECTION_NAME")?,
                secret_id: required_var("CONNSYNC_SECRET_ID")?,
                oauth: OAuthClientSettings {
                    client_id: required_var("CONNSYNC_OAUTH_CLIENT_ID")?,
                    authorization_endpoint: required_url(
                        "CONNSYNC_OAUTH_AUTHORIZATION_ENDPOINT",
                    )?,
                    audience: required_var("CONNSYNC_OAUTH_AUDIENCE")?,
                },
            },
            secret_store: SecretStoreSettings {
                endpoint: required_url("CONNSYNC_SECRETS_AGENT_ENDPOINT")?,
                token: SecretString::new(required_var("CONNSYNC_SECRETS_AGENT_TOKEN")?),
            },
            registry: RegistrySettings {
                endpoint: required_url("CONNSYNC_REGISTRY_ENDPOINT")?,
                token: SecretString::new(required_var("CONNSYNC_REGISTRY_TOKEN")?),
            },
            retry: RetrySettings {
                max_attempts: optional_parsed("CONNSYNC_UPDATE_MAX_ATTEMPTS", 3)?,
                delay_seconds: optional_parsed("CONNSYNC_UPDATE_RETRY_DELAY_SECONDS", 20)?,
            },
        };

        settings.validate_all()?;
        Ok(settings)
    }

    /// Validate the entire configuration
    pub fn validate_all(&self) -> Result<()> {
        Validate::validate(self).map_err(validation_error)
    }
}

fn required_var(name: &str) -> Result<String> {
    env::var(name)
        .map_err(|_| Error::config(format!("Missing required environment variable {}", name)))
}

fn required_url(name: &str) -> Result<Url> {
    let value = required_var(name)?;
    Url::parse(&value).map_err(|e| Error::config(format!("Invalid URL in {}: {}", name, e)))
}

fn optional_parsed<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|e| Error::config(format!("Invalid value in {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

fn validation_error(errors: validator::ValidationErrors) -> Error {
    Error::config(format!("Validation failed: {}", errors))
}
