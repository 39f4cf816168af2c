//! Secret store access for the rotation bridge.
//!
//! This module provides the [`SecretStore`] trait the handler fetches
//! rotated values through, the [`SecretsAgentClient`] backend that talks to
//! a secrets-manager agent sidecar, and the redacting [`SecretString`]
//! wrapper used everywhere secret material flows.
//!
//! Values are read fresh on every invocation and never cached: the bridge's
//! entire job is to propagate the value the store holds *now*.

pub mod agent;
pub mod client;
pub mod types;

pub use agent::SecretsAgentClient;
pub use client::{SecretStore, SecretValue};
pub use types::SecretString;
