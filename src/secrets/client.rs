//! Core secret store trait and value types.

use async_trait::async_trait;

use super::types::SecretString;
use crate::errors::{Error, Result};

/// Current value of a secret as returned by the store.
#[derive(Debug, Clone)]
pub struct SecretValue {
    /// Textual value; absent when the secret only has a binary form.
    pub secret_string: Option<SecretString>,

    /// Store-assigned version of this value, if the store reports one.
    pub version_id: Option<String>,
}

impl SecretValue {
    /// Extracts the textual value, failing when the secret is binary-only.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedSecretFormat`] when no textual value is present.
    pub fn into_string(self, secret_id: &str) -> Result<SecretString> {
        self.secret_string.ok_or_else(|| Error::unsupported_secret_format(secret_id))
    }
}

/// Trait for secret store backends.
///
/// Values are fetched fresh on every call and never cached by the bridge;
/// a rotation event must always see the value the store holds right now.
///
/// # Security Considerations
///
/// - Implementations MUST NOT log secret values
/// - Network communication MUST use TLS outside loopback deployments
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Retrieve the current value of a secret.
    ///
    /// # Arguments
    ///
    /// * `secret_id` - The secret identifier; must be non-empty and refer
    ///   to an existing secret in the store
    ///
    /// # Errors
    ///
    /// - [`Error::SecretStore`] if the store is unreachable, denies access,
    ///   or does not know the secret
    async fn get_secret_value(&self, secret_id: &str) -> Result<SecretValue>;
}
