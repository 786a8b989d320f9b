//! Registry errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Connection refused, TLS failure or timeout. The operator may retry.
    #[error("Registry unavailable: {0}")]
    Unavailable(String),

    /// The registry answered a list or delete with a non-success result.
    #[error("Registry rejected the request: {0}")]
    Rejected(String),

    /// The registry refused a create or update payload.
    #[error("Registry rejected the webhook: {0}")]
    ValidationRejected(String),

    /// The record no longer exists on the registry.
    #[error("Webhook endpoint not found: {0}")]
    NotFound(String),
}

impl RegistryError {
    /// Whether the local snapshot is likely stale and should be refreshed.
    pub fn suggests_refresh(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
