//! # connsync
//!
//! connsync is an event-triggered credential-rotation bridge. When a
//! secret-rotation event fires, it reads the freshly rotated OAuth client
//! secret from the secret store and pushes updated client-credential
//! parameters into a named connection of the event-routing registry, so
//! the connection's outbound authorization stays in sync with the rotated
//! secret.
//!
//! ## Architecture
//!
//! ```text
//! Rotation Event → RotationHandler → SecretStore (fetch current value)
//!                        ↓
//!          UpdateConnectionRequest (build OAuth payload)
//!                        ↓
//!          update_with_retry → ConnectionRegistry (bounded retries)
//! ```
//!
//! The handler owns no state between invocations; each event fetches the
//! secret fresh, builds its own payload, and runs its own retry loop. The
//! secret's rotation lifecycle (generation, versioning, rollback) belongs
//! to the store — connsync only consumes the current value.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use connsync::config::Settings;
//! use connsync::registry::HttpConnectionRegistry;
//! use connsync::secrets::SecretsAgentClient;
//! use connsync::services::{RotationEvent, RotationHandler};
//! use tokio_util::sync::CancellationToken;
//!
//! let settings = Settings::from_env()?;
//! let handler = RotationHandler::new(
//!     Arc::new(SecretsAgentClient::new(&settings.secret_store)?),
//!     Arc::new(HttpConnectionRegistry::new(&settings.registry)?),
//!     settings.sync.clone(),
//!     settings.retry.policy(),
//! );
//! handler.handle(&event, &CancellationToken::new()).await?;
//! ```

pub mod config;
pub mod errors;
pub mod observability;
pub mod registry;
pub mod secrets;
pub mod services;

// Re-export commonly used types
pub use errors::{Error, Result};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
