//! Connection authorization request types.

use serde::Serialize;
use url::Url;

use crate::config::OAuthClientSettings;
use crate::secrets::SecretString;

/// Grant type pushed with every client-credentials update.
const GRANT_TYPE_CLIENT_CREDENTIALS: &str = "client_credentials";

/// Authorization scheme stored on a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AuthorizationType {
    #[serde(rename = "OAUTH_CLIENT_CREDENTIALS")]
    OAuthClientCredentials,
}

/// HTTP method the registry uses against the authorization endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OAuthHttpMethod {
    #[serde(rename = "POST")]
    Post,
}

/// A key/value parameter sent in the token request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyParameter {
    pub key: String,
    pub value: String,
    /// Marks the value as secret to the registry. Only the client secret
    /// is sensitive; it travels in the client parameters, not here.
    pub is_value_secret: bool,
}

impl BodyParameter {
    fn plain(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { key: key.into(), value: value.into(), is_value_secret: false }
    }
}

/// Payload describing a connection authorization update.
///
/// Built fresh per invocation from configuration plus the fetched secret;
/// immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateConnectionRequest {
    pub connection_name: String,
    pub authorization_type: AuthorizationType,
    pub authorization_endpoint: Url,
    pub http_method: OAuthHttpMethod,
    pub client_id: String,
    pub client_secret: SecretString,
    pub body_parameters: Vec<BodyParameter>,
}

impl UpdateConnectionRequest {
    /// Builds the OAuth client-credentials update for a freshly rotated
    /// secret.
    ///
    /// Pure: deterministic for identical inputs. The secret is embedded
    /// trimmed of surrounding whitespace; stored values commonly carry a
    /// trailing newline that would break the token exchange. Authorization
    /// type, token-request method, and the `grant_type` body parameter are
    /// fixed; `audience` comes from configuration.
    pub fn oauth_client_credentials(
        connection_name: impl Into<String>,
        oauth: &OAuthClientSettings,
        secret: &SecretString,
    ) -> Self {
        Self {
            connection_name: connection_name.into(),
            authorization_type: AuthorizationType::OAuthClientCredentials,
            authorization_endpoint: oauth.authorization_endpoint.clone(),
            http_method: OAuthHttpMethod::Post,
            client_id: oauth.client_id.clone(),
            client_secret: secret.trimmed(),
            body_parameters: vec![
                BodyParameter::plain("audience", oauth.audience.clone()),
                BodyParameter::plain("grant_type", GRANT_TYPE_CLIENT_CREDENTIALS),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn oauth_settings() -> OAuthClientSettings {
        OAuthClientSettings {
            client_id: "client-123".to_string(),
            authorization_endpoint: "https://tenant.example.com/oauth/token".parse().unwrap(),
            audience: "https://tenant.example.com/api/v2/".to_string(),
        }
    }

    #[test]
    fn test_builder_trims_client_secret() {
        let request = UpdateConnectionRequest::oauth_client_credentials(
            "orders-connection",
            &oauth_settings(),
            &SecretString::new("  s3cr3t\n"),
        );

        assert_eq!(request.client_secret.expose_secret(), "s3cr3t");
    }

    #[test]
    fn test_builder_preserves_interior_whitespace() {
        let request = UpdateConnectionRequest::oauth_client_credentials(
            "orders-connection",
            &oauth_settings(),
            &SecretString::new("\ts3c r3t "),
        );

        assert_eq!(request.client_secret.expose_secret(), "s3c r3t");
    }

    #[test]
    fn test_builder_sets_fixed_fields() {
        let request = UpdateConnectionRequest::oauth_client_credentials(
            "orders-connection",
            &oauth_settings(),
            &SecretString::new("s3cr3t"),
        );

        assert_eq!(request.connection_name, "orders-connection");
        assert_eq!(request.authorization_type, AuthorizationType::OAuthClientCredentials);
        assert_eq!(request.http_method, OAuthHttpMethod::Post);
        assert_eq!(request.client_id, "client-123");
        assert_eq!(
            request.authorization_endpoint.as_str(),
            "https://tenant.example.com/oauth/token"
        );
    }

    #[test]
    fn test_builder_sets_body_parameters() {
        let request = UpdateConnectionRequest::oauth_client_credentials(
            "orders-connection",
            &oauth_settings(),
            &SecretString::new("s3cr3t"),
        );

        assert_eq!(
            request.body_parameters,
            vec![
                BodyParameter::plain("audience", "https://tenant.example.com/api/v2/"),
                BodyParameter::plain("grant_type", "client_credentials"),
            ]
        );
        assert!(request.body_parameters.iter().all(|p| !p.is_value_secret));
    }

    #[test]
    fn test_builder_is_deterministic() {
        let first = UpdateConnectionRequest::oauth_client_credentials(
            "orders-connection",
            &oauth_settings(),
            &SecretString::new("s3cr3t"),
        );
        let second = UpdateConnectionRequest::oauth_client_credentials(
            "orders-connection",
            &oauth_settings(),
            &SecretString::new("s3cr3t"),
        );

        assert_eq!(first, second);
    }

    #[test]
    fn test_wire_enum_and_parameter_serialization() {
        assert_eq!(
            serde_json::to_value(AuthorizationType::OAuthClientCredentials).unwrap(),
            json!("OAUTH_CLIENT_CREDENTIALS")
        );
        assert_eq!(serde_json::to_value(OAuthHttpMethod::Post).unwrap(), json!("POST"));
        assert_eq!(
            serde_json::to_value(BodyParameter::plain("grant_type", "client_credentials"))
                .unwrap(),
            json!({"key": "grant_type", "value": "client_credentials", "isValueSecret": false})
        );
    }
}
