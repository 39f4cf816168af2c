//! # Error Handling
//!
//! Crate-wide error types for the connsync bridge using `thiserror`.
//! Every failure the handler can surface maps to a variant here, so the
//! invoking trigger infrastructure always sees a concrete cause rather
//! than an opaque one.

/// Custom result type for connsync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed source error for transport-level failures
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for the connsync bridge
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Configuration errors, detected before the first event is handled
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Secret store fetch failures (unreachable, denied, unknown secret).
    /// Not retried locally; redelivery belongs to the trigger infrastructure.
    #[error("Secret store error for '{secret_id}': {message}")]
    SecretStore {
        secret_id: String,
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// The secret exists but carries no textual value. Fatal for the
    /// invocation and never retried.
    #[error("Secret '{secret_id}' has no string value (binary secrets are not supported)")]
    UnsupportedSecretFormat { secret_id: String },

    /// A connection registry update attempt failed
    #[error("Connection registry error for '{connection_name}': {message}")]
    Registry {
        connection_name: String,
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Cancellation fired while waiting between update attempts
    #[error("Cancelled while {operation}")]
    Cancelled { operation: String },
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into() }
    }

    /// Create a secret store error
    pub fn secret_store<I: Into<String>, M: Into<String>>(secret_id: I, message: M) -> Self {
        Self::SecretStore { secret_id: secret_id.into(), message: message.into(), source: None }
    }

    /// Create a secret store error with an underlying cause
    pub fn secret_store_with_source<I: Into<String>, M: Into<String>>(
        secret_id: I,
        message: M,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::SecretStore {
            secret_id: secret_id.into(),
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create an unsupported secret format error
    pub fn unsupported_secret_format<I: Into<String>>(secret_id: I) -> Self {
        Self::UnsupportedSecretFormat { secret_id: secret_id.into() }
    }

    /// Create a connection registry error
    pub fn registry<C: Into<String>, M: Into<String>>(connection_name: C, message: M) -> Self {
        Self::Registry {
            connection_name: connection_name.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a connection registry error with an underlying cause
    pub fn registry_with_source<C: Into<String>, M: Into<String>>(
        connection_name: C,
        message: M,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::Registry {
            connection_name: connection_name.into(),
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a cancellation error
    pub fn cancelled<S: Into<String>>(operation: S) -> Self {
        Self::Cancelled { operation: operation.into() }
    }
}
