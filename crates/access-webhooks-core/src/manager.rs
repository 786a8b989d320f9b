//! Sequences registry calls and owns the display snapshot.

use std::sync::Arc;

use tracing::{debug, info, warn};

use access_webhooks_protocols::{FormError, RegistryError, WebhookEndpoint, WebhookRegistry};

use crate::form::{FormMode, FormSession};
use crate::snapshot::Snapshot;

/// Asks the operator to approve a destructive action.
pub trait Confirmation {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirmation for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The operator declined; no request was sent.
    Cancelled,
}

/// Front-end facing controller for the webhook list.
///
/// Mutating calls take `&mut self`, so one manager never has two of them in
/// flight.
pub struct WebhookManager {
    registry: Arc<dyn WebhookRegistry>,
    snapshot: Snapshot,
}

impl WebhookManager {
    pub fn new(registry: Arc<dyn WebhookRegistry>) -> Self {
        Self {
            registry,
            snapshot: Snapshot::default(),
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// List the collection and replace the snapshot.
    ///
    /// On failure the previous snapshot stays in place.
    pub async fn refresh(&mut self) -> Result<&Snapshot, RegistryError> {
        let endpoints = self.registry.list().await?;
        debug!("Snapshot refreshed with {} endpoint(s)", endpoints.len());
        self.snapshot = Snapshot::new(endpoints);
        Ok(&self.snapshot)
    }

    pub fn open_create(&self) -> FormSession {
        FormSession::open(FormMode::Create)
    }

    /// Open an edit form prefilled from the current snapshot.
    pub fn open_edit(&self, id: &str) -> Result<FormSession, RegistryError> {
        let existing = self
            .snapshot
            .find(id)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))?;
        Ok(FormSession::open(FormMode::Edit(existing)))
    }

    /// Submit the form, then refresh.
    ///
    /// The session is only borrowed so a failed save keeps its values.
    pub async fn save(&mut self, session: &FormSession) -> Result<WebhookEndpoint, FormError> {
        let saved = session.submit(self.registry.as_ref()).await?;
        info!("Saved webhook {} ({})", saved.id, saved.name);
        self.refresh_after_mutation().await;
        Ok(saved)
    }

    /// Delete after the operator confirms.
    pub async fn delete(
        &mut self,
        id: &str,
        confirmation: &dyn Confirmation,
    ) -> Result<DeleteOutcome, RegistryError> {
        let prompt = match self.snapshot.find(id) {
            Some(existing) => format!(
                "Are you sure you want to delete webhook {} ({})?",
                id, existing.name
            ),
            None => format!("Are you sure you want to delete webhook {}?", id),
        };
        if !confirmation.confirm(&prompt) {
            debug!("Delete of {} cancelled", id);
            return Ok(DeleteOutcome::Cancelled);
        }

        self.registry.delete(id).await?;
        info!("Deleted webhook {}", id);
        self.refresh_after_mutation().await;
        Ok(DeleteOutcome::Deleted)
    }

    async fn refresh_after_mutation(&mut self) {
        if let Err(e) = self.refresh().await {
            warn!("Change was saved but the list could not be refreshed: {}", e);
        }
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
