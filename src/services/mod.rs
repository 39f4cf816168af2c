//! Core synchronization services: the rotation handler and the retrying
//! update executor it drives.

pub mod rotation_handler;
pub mod update_executor;

pub use rotation_handler::{RotationEvent, RotationHandler};
pub use update_executor::{update_with_retry, RetryPolicy};
