//! Resilient connection-update execution.
//!
//! Submits an authorization update to the registry, absorbing transient
//! registry unavailability with a bounded, fixed-interval retry loop. The
//! inter-attempt wait races against a cancellation token so an invocation
//! deadline is honored mid-backoff instead of after it.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::errors::{Error, Result};
use crate::registry::{ConnectionRegistry, UpdateConnectionRequest};

/// Retry policy for connection updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,

    /// Fixed wait between attempts
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 3, delay: Duration::from_secs(20) }
    }
}

/// Submit `request` to the registry, retrying failed attempts under `policy`.
///
/// The first successful attempt short-circuits the loop. The wait between
/// attempts never follows the final attempt, and cancellation during a wait
/// aborts immediately with [`Error::Cancelled`]. When every attempt fails,
/// the error from the last attempt is returned.
pub async fn update_with_retry(
    registry: &dyn ConnectionRegistry,
    request: &UpdateConnectionRequest,
    policy: &RetryPolicy,
    cancel: &CancellationToken,
) -> Result<()> {
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match registry.update_connection_authorization(request).await {
            Ok(()) => {
                info!(
                    connection_name = %request.connection_name,
                    attempt,
                    "Connection authorization updated"
                );
                return Ok(());
            }
            Err(err) => {
                error!(
                    connection_name = %request.connection_name,
                    attempt,
                    max_attempts,
                    error = %err,
                    "Connection update attempt failed"
                );
                if attempt >= max_attempts {
                    return Err(err);
                }
            }
        }

        tokio::select! {
            () = tokio::time::sleep(policy.delay) => {}
            () = cancel.cancelled() => {
                return Err(Error::cancelled("waiting to retry connection update"));
            }
        }
        attempt += 1;
    }
}
