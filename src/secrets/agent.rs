//! Secrets-manager agent backend implementation.
//!
//! The agent is a sidecar that serves the store's GetSecretValue surface
//! over plain HTTP on a local endpoint, authenticated with a token it
//! injects into the environment. Talking to the sidecar keeps request
//! signing out of this binary entirely.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use url::Url;

use super::client::{SecretStore, SecretValue};
use super::types::SecretString;
use crate::config::SecretStoreSettings;
use crate::errors::{Error, Result};

/// Header carrying the agent's injected access token.
const AGENT_TOKEN_HEADER: &str = "X-Aws-Parameters-Secrets-Token";

/// Path of the agent's GetSecretValue endpoint.
const GET_SECRET_PATH: &str = "/secretsmanager/get";

/// HTTP client for a secrets-manager agent sidecar.
#[derive(Debug, Clone)]
pub struct SecretsAgentClient {
    client: Client,
    endpoint: Url,
    token: SecretString,
}

/// GetSecretValue response shape served by the agent.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GetSecretValueResponse {
    secret_string: Option<String>,
    version_id: Option<String>,
}

impl SecretsAgentClient {
    /// Create a new agent client from settings.
    pub fn new(settings: &SecretStoreSettings) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, endpoint: settings.endpoint.clone(), token: settings.token.clone() })
    }

    fn get_secret_url(&self, secret_id: &str) -> Result<Url> {
        let mut url = self
            .endpoint
            .join(GET_SECRET_PATH)
            .map_err(|e| Error::secret_store(secret_id, format!("Invalid agent endpoint: {}", e)))?;
        url.query_pairs_mut().append_pair("secretId", secret_id);
        Ok(url)
    }
}

#[async_trait]
impl SecretStore for SecretsAgentClient {
    async fn get_secret_value(&self, secret_id: &str) -> Result<SecretValue> {
        let url = self.get_secret_url(secret_id)?;

        let response = self
            .client
            .get(url)
            .header(AGENT_TOKEN_HEADER, self.token.expose_secret())
            .send()
            .await
            .map_err(|e| {
                Error::secret_store_with_source(secret_id, "Request to secret store failed", e)
            })?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::NOT_FOUND => {
                return Err(Error::secret_store(secret_id, "Secret not found"));
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(Error::secret_store(secret_id, "Access to secret denied"));
            }
            status => {
                return Err(Error::secret_store(
                    secret_id,
                    format!("Secret store responded with status {}", status),
                ));
            }
        }

        let body: GetSecretValueResponse = response.json().await.map_err(|e| {
            Error::secret_store_with_source(secret_id, "Failed to decode secret store response", e)
        })?;

        Ok(SecretValue {
            secret_string: body.secret_string.map(SecretString::new),
            version_id: body.version_id,
        })
    }
}
