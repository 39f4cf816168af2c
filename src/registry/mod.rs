//! Connection registry access for the rotation bridge.
//!
//! The registry holds named integration endpoints with associated
//! authorization configuration. This module provides the typed update
//! payload, the [`ConnectionRegistry`] trait the update executor submits
//! through, and the [`HttpConnectionRegistry`] backend.

pub mod http;
pub mod types;

pub use http::{ConnectionRegistry, HttpConnectionRegistry};
pub use types::{AuthorizationType, BodyParameter, OAuthHttpMethod, UpdateConnectionRequest};
