//! HTTP connection registry backend.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use url::Url;

use super::types::UpdateConnectionRequest;
use crate::config::RegistrySettings;
use crate::errors::{Error, Result};
use crate::secrets::SecretString;

/// Trait for connection registry backends.
///
/// A registry holds named integration endpoints with associated
/// authorization configuration; updating a connection's authorization is
/// idempotent at the remote, so repeating the same payload is safe.
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// Replace the authorization parameters stored on a connection.
    ///
    /// # Errors
    ///
    /// - [`Error::Registry`] if the registry is unreachable or rejects
    ///   the update
    async fn update_connection_authorization(
        &self,
        request: &UpdateConnectionRequest,
    ) -> Result<()>;
}

/// Reqwest-based implementation of [`ConnectionRegistry`].
#[derive(Debug, Clone)]
pub struct HttpConnectionRegistry {
    client: Client,
    endpoint: Url,
    token: SecretString,
}

impl HttpConnectionRegistry {
    /// Create a new registry client from settings.
    pub fn new(settings: &RegistrySettings) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, endpoint: settings.endpoint.clone(), token: settings.token.clone() })
    }

    fn authorization_url(&self, connection_name: &str) -> Result<Url> {
        self.endpoint
            .join(&format!("/v1/connections/{}/authorization", connection_name))
            .map_err(|e| {
                Error::registry(connection_name, format!("Invalid registry endpoint: {}", e))
            })
    }
}

/// Wire body for the authorization update.
///
/// The client secret is exposed here and nowhere else; this is the single
/// point where the redacting wrapper crosses the wire boundary.
fn authorization_body(request: &UpdateConnectionRequest) -> Value {
    json!({
        "authorizationType": request.authorization_type,
        "authorizationEndpoint": request.authorization_endpoint.as_str(),
        "httpMethod": request.http_method,
        "clientId": request.client_id,
        "clientSecret": request.client_secret.expose_secret(),
        "bodyParameters": request.body_parameters,
    })
}

#[async_trait]
impl ConnectionRegistry for HttpConnectionRegistry {
    async fn update_connection_authorization(
        &self,
        request: &UpdateConnectionRequest,
    ) -> Result<()> {
        let url = self.authorization_url(&request.connection_name)?;

        let response = self
            .client
            .put(url)
            .bearer_auth(self.token.expose_secret())
            .json(&authorization_body(request))
            .send()
            .await
            .map_err(|e| {
                Error::registry_with_source(
                    &request.connection_name,
                    "Request to connection registry failed",
                    e,
                )
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let detail: String =
            response.text().await.unwrap_or_default().chars().take(200).collect();
        Err(Error::registry(
            &request.connection_name,
            format!("Registry responded with status {}: {}", status, detail),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OAuthClientSettings;
    use serde_json::json;

    fn request() -> UpdateConnectionRequest {
        UpdateConnectionRequest::oauth_client_credentials(
            "orders-connection",
            &OAuthClientSettings {
                client_id: "client-123".to_string(),
                authorization_endpoint: "https://tenant.example.com/oauth/token".parse().unwrap(),
                audience: "https://tenant.example.com/api/v2/".to_string(),
            },
            &SecretString::new("  s3cr3t\n"),
        )
    }

    #[test]
    fn test_authorization_url() {
        let registry = HttpConnectionRegistry::new(&RegistrySettings {
            endpoint: "https://registry.example.com".parse().unwrap(),
            token: SecretString::new("registry-token"),
        })
        .unwrap();

        let url = registry.authorization_url("orders-connection").unwrap();
        assert_eq!(
            url.as_str(),
            "https://registry.example.com/v1/connections/orders-connection/authorization"
        );
    }

    #[test]
    fn test_authorization_body_exposes_trimmed_secret_at_wire_boundary() {
        let body = authorization_body(&request());

        assert_eq!(
            body,
            json!({
                "authorizationType": "OAUTH_CLIENT_CREDENTIALS",
                "authorizationEndpoint": "https://tenant.example.com/oauth/token",
                "httpMethod": "POST",
                "clientId": "client-123",
                "clientSecret": "s3cr3t",
                "bodyParameters": [
                    {
                        "key": "audience",
                        "value": "https://tenant.example.com/api/v2/",
                        "isValueSecret": false
                    },
                    {"key": "grant_type", "value": "client_credentials", "isValueSecret": false},
                ],
            })
        );
    }
}
