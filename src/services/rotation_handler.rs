//! Rotation event handling.
//!
//! The handler is invoked once per delivered rotation event. It reads the
//! rotated secret, builds the OAuth client-credentials payload, and pushes
//! it to the connection registry through the retrying executor. Any error
//! is logged with its context and returned to the caller, whose own
//! redelivery policy decides what happens next.

use std::sync::Arc;

use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use super::update_executor::{update_with_retry, RetryPolicy};
use crate::config::SyncSettings;
use crate::errors::Result;
use crate::registry::{ConnectionRegistry, UpdateConnectionRequest};
use crate::secrets::SecretStore;

/// Trigger record delivered by the event bus when a secret rotates.
///
/// Identity only; no field affects control flow.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RotationEvent {
    #[serde(default)]
    pub source: String,

    #[serde(default, rename = "detail-type", alias = "detailType")]
    pub detail_type: String,

    #[serde(default)]
    pub id: String,
}

/// Synchronizes a registry connection's credentials with a rotated secret.
pub struct RotationHandler {
    secrets: Arc<dyn SecretStore>,
    registry: Arc<dyn ConnectionRegistry>,
    sync: SyncSettings,
    policy: RetryPolicy,
}

impl RotationHandler {
    /// Create a new handler with injected collaborators.
    pub fn new(
        secrets: Arc<dyn SecretStore>,
        registry: Arc<dyn ConnectionRegistry>,
        sync: SyncSettings,
        policy: RetryPolicy,
    ) -> Self {
        Self { secrets, registry, sync, policy }
    }

    /// Handle one rotation event.
    ///
    /// Fetch errors short-circuit: no update attempt is made when the
    /// secret cannot be read. Returns `Ok(())` only when the registry
    /// update succeeded.
    pub async fn handle(&self, event: &RotationEvent, cancel: &CancellationToken) -> Result<()> {
        info!(
            source = %event.source,
            detail_type = %event.detail_type,
            id = %event.id,
            "Rotation event received"
        );

        let value = match self.secrets.get_secret_value(&self.sync.secret_id).await {
            Ok(value) => value,
            Err(err) => {
                error!(
                    secret_id = %self.sync.secret_id,
                    error = %err,
                    "Failed to fetch rotated secret"
                );
                return Err(err);
            }
        };

        let secret = value.into_string(&self.sync.secret_id).inspect_err(|err| {
            error!(secret_id = %self.sync.secret_id, error = %err, "Rotated secret is unusable");
        })?;

        let request = UpdateConnectionRequest::oauth_client_credentials(
            &self.sync.connection_name,
            &self.sync.oauth,
            &secret,
        );

        update_with_retry(self.registry.as_ref(), &request, &self.policy, cancel).await?;

        info!(
            connection_name = %self.sync.connection_name,
            secret_id = %self.sync.secret_id,
            "Connection credentials synchronized"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_deserializes_bus_shape() {
        let event: RotationEvent = serde_json::from_str(
            r#"{
                "source": "aws.secretsmanager",
                "detail-type": "AWS API Call via CloudTrail",
                "id": "5c9a3747-293c-59d7-dcee-a2210ac034fc",
                "detail": {"eventName": "RotationSucceeded"}
            }"#,
        )
        .unwrap();

        assert_eq!(event.source, "aws.secretsmanager");
        assert_eq!(event.detail_type, "AWS API Call via CloudTrail");
        assert_eq!(event.id, "5c9a3747-293c-59d7-dcee-a2210ac034fc");
    }

    #[test]
    fn test_event_accepts_camel_case_detail_type() {
        let event: RotationEvent =
            serde_json::from_str(r#"{"detailType": "Rotation Succeeded"}"#).unwrap();

        assert_eq!(event.detail_type, "Rotation Succeeded");
        assert!(event.source.is_empty());
    }

    #[test]
    fn test_event_tolerates_empty_payload() {
        let event: RotationEvent = serde_json::from_str("{}").unwrap();
        assert!(event.id.is_empty());
    }
}
