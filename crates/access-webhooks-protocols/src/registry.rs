//! Webhook registry trait definition.

use async_trait::async_trait;

use crate::error::RegistryError;
use crate::types::{WebhookDraft, WebhookEndpoint};

/// Remote collection of webhook endpoints.
///
/// The registry is the source of truth for ids and persisted state.
/// Implementations never retry; every failure is returned to the caller.
#[async_trait]
pub trait WebhookRegistry: Send + Sync {
    /// Fetch the whole collection, in registry order.
    async fn list(&self) -> Result<Vec<WebhookEndpoint>, RegistryError>;

    /// Create a record. The registry assigns the id.
    async fn create(&self, draft: &WebhookDraft) -> Result<WebhookEndpoint, RegistryError>;

    /// Replace name, endpoint and events of an existing record.
    async fn update(
        &self,
        id: &str,
        draft: &WebhookDraft,
    ) -> Result<WebhookEndpoint, RegistryError>;

    /// Delete a record. Fails with [`RegistryError::NotFound`] when it is
    /// already gone.
    async fn delete(&self, id: &str) -> Result<(), RegistryError>;
}
